use api_types::{
    category::{Category, CategoryWrite, DistributionType},
    member::Member,
    movement::{Movement, MovementWrite},
    salary::{Period, PeriodLabel, Salary, SalaryWrite},
};
use chrono::NaiveDate;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Keyboard surface shared by the modal forms.
pub trait FormInput {
    fn next_field(&mut self);
    fn prev_field(&mut self);
    /// Text of the focused field, `None` when a picker is focused.
    fn focused_text(&mut self) -> Option<&mut String>;
    fn cycle(&mut self, _delta: isize) {}

    fn input(&mut self, ch: char) {
        if let Some(text) = self.focused_text() {
            text.push(ch);
        }
    }

    fn backspace(&mut self) {
        if let Some(text) = self.focused_text() {
            text.pop();
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PickerOption {
    pub id: i64,
    pub label: String,
}

/// Single-choice list. An optional trailing action entry sits after the
/// options (e.g. "Create new period").
#[derive(Debug, Clone, Default)]
pub struct Picker {
    options: Vec<PickerOption>,
    selected: Option<usize>,
    action: Option<&'static str>,
}

impl Picker {
    pub fn new(options: Vec<PickerOption>) -> Self {
        Self {
            options,
            selected: None,
            action: None,
        }
    }

    pub fn with_action(mut self, label: &'static str) -> Self {
        self.action = Some(label);
        self
    }

    pub fn select_id(&mut self, id: Option<i64>) {
        self.selected = id.and_then(|id| self.options.iter().position(|option| option.id == id));
    }

    /// Swaps the option list, keeping the current choice when it survives.
    pub fn set_options(&mut self, options: Vec<PickerOption>) {
        let keep = self.selected_id();
        self.options = options;
        self.select_id(keep);
    }

    fn len(&self) -> usize {
        self.options.len() + usize::from(self.action.is_some())
    }

    pub fn cycle(&mut self, delta: isize) {
        let len = self.len();
        if len == 0 {
            return;
        }
        let next = match self.selected {
            None if delta >= 0 => 0,
            None => len - 1,
            Some(index) => (index as isize + delta).rem_euclid(len as isize) as usize,
        };
        self.selected = Some(next);
    }

    pub fn selected(&self) -> Option<&PickerOption> {
        self.selected.and_then(|index| self.options.get(index))
    }

    pub fn selected_id(&self) -> Option<i64> {
        self.selected().map(|option| option.id)
    }

    pub fn action_selected(&self) -> bool {
        self.action.is_some() && self.selected == Some(self.options.len())
    }

    /// Label to show in the form.
    pub fn display(&self) -> &str {
        if self.action_selected() {
            return self.action.unwrap_or_default();
        }
        self.selected()
            .map(|option| option.label.as_str())
            .unwrap_or("(choose)")
    }
}

pub fn category_options(categories: &[Category]) -> Vec<PickerOption> {
    categories
        .iter()
        .map(|category| PickerOption {
            id: category.id,
            label: category.name.clone(),
        })
        .collect()
}

pub fn distribution_options(types: &[DistributionType]) -> Vec<PickerOption> {
    types
        .iter()
        .map(|kind| PickerOption {
            id: kind.id,
            label: kind.name.clone(),
        })
        .collect()
}

pub fn member_options(members: &[Member]) -> Vec<PickerOption> {
    members
        .iter()
        .map(|member| PickerOption {
            id: member.id,
            label: member.name.clone(),
        })
        .collect()
}

pub fn period_options(periods: &[Period]) -> Vec<PickerOption> {
    periods
        .iter()
        .map(|period| PickerOption {
            id: period.id,
            label: period.period.clone(),
        })
        .collect()
}

fn cycle_field<T: Copy + PartialEq>(order: &[T], current: T, delta: isize) -> T {
    let index = order.iter().position(|field| *field == current).unwrap_or(0);
    let next = (index as isize + delta).rem_euclid(order.len() as isize) as usize;
    order[next]
}

// ---------------------------------------------------------------------------
// Sign in / sign up
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Register,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthField {
    Username,
    Email,
    Password,
}

#[derive(Debug)]
pub struct AuthForm {
    pub mode: AuthMode,
    pub username: String,
    pub email: String,
    pub password: String,
    pub focus: AuthField,
    pub message: Option<String>,
    pub loading: bool,
}

impl AuthForm {
    pub fn new(username: &str) -> Self {
        Self {
            mode: AuthMode::Login,
            username: username.to_string(),
            email: String::new(),
            password: String::new(),
            focus: AuthField::Username,
            message: None,
            loading: false,
        }
    }

    fn fields(&self) -> &'static [AuthField] {
        match self.mode {
            AuthMode::Login => &[AuthField::Username, AuthField::Password],
            AuthMode::Register => &[AuthField::Username, AuthField::Email, AuthField::Password],
        }
    }

    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            AuthMode::Login => AuthMode::Register,
            AuthMode::Register => AuthMode::Login,
        };
        if !self.fields().contains(&self.focus) {
            self.focus = AuthField::Username;
        }
        self.message = None;
    }

    pub fn can_submit(&self) -> bool {
        let filled = !self.username.trim().is_empty() && !self.password.is_empty();
        let email_ok = self.mode == AuthMode::Login || !self.email.trim().is_empty();
        filled && email_ok && !self.loading
    }

    /// Drops the password after a session ends or a login attempt finishes.
    pub fn reset_secret(&mut self) {
        self.password.clear();
        self.loading = false;
    }
}

impl FormInput for AuthForm {
    fn next_field(&mut self) {
        self.focus = cycle_field(self.fields(), self.focus, 1);
    }

    fn prev_field(&mut self) {
        self.focus = cycle_field(self.fields(), self.focus, -1);
    }

    fn focused_text(&mut self) -> Option<&mut String> {
        Some(match self.focus {
            AuthField::Username => &mut self.username,
            AuthField::Email => &mut self.email,
            AuthField::Password => &mut self.password,
        })
    }
}

// ---------------------------------------------------------------------------
// Household onboarding
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HouseholdMode {
    Create,
    Join,
}

impl HouseholdMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Create => "Create",
            Self::Join => "Join",
        }
    }

    pub fn failure(self) -> &'static str {
        match self {
            Self::Create => "Failed to create household. Please try again.",
            Self::Join => "Failed to join household. Please check the name and try again.",
        }
    }
}

#[derive(Debug)]
pub struct HouseholdForm {
    pub mode: HouseholdMode,
    pub name: String,
    pub error: Option<String>,
    pub saving: bool,
}

impl Default for HouseholdForm {
    fn default() -> Self {
        Self {
            mode: HouseholdMode::Create,
            name: String::new(),
            error: None,
            saving: false,
        }
    }
}

impl HouseholdForm {
    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            HouseholdMode::Create => HouseholdMode::Join,
            HouseholdMode::Join => HouseholdMode::Create,
        };
        self.error = None;
    }

    /// Trimmed name, or the inline error to show.
    pub fn validate(&self) -> Result<String, &'static str> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("Please enter a household name");
        }
        Ok(name.to_string())
    }
}

impl FormInput for HouseholdForm {
    fn next_field(&mut self) {
        self.toggle_mode();
    }

    fn prev_field(&mut self) {
        self.toggle_mode();
    }

    fn focused_text(&mut self) -> Option<&mut String> {
        Some(&mut self.name)
    }
}

// ---------------------------------------------------------------------------
// Movements
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementField {
    Amount,
    Date,
    Category,
    Description,
}

const MOVEMENT_FIELDS: [MovementField; 4] = [
    MovementField::Amount,
    MovementField::Date,
    MovementField::Category,
    MovementField::Description,
];

#[derive(Debug)]
pub struct MovementForm {
    /// `Some` when editing an existing movement.
    pub editing: Option<i64>,
    pub amount: String,
    pub date: String,
    pub category: Picker,
    pub description: String,
    pub focus: MovementField,
    pub error: Option<String>,
    pub saving: bool,
}

impl MovementForm {
    pub fn create(today: NaiveDate, categories: &[Category]) -> Self {
        Self {
            editing: None,
            amount: String::new(),
            date: today.format(DATE_FORMAT).to_string(),
            category: Picker::new(category_options(categories)),
            description: String::new(),
            focus: MovementField::Amount,
            error: None,
            saving: false,
        }
    }

    pub fn edit(movement: &Movement, categories: &[Category]) -> Self {
        let mut category = Picker::new(category_options(categories));
        category.select_id(Some(movement.category.id));
        Self {
            editing: Some(movement.id),
            amount: movement.amount.to_string(),
            date: movement.date.format(DATE_FORMAT).to_string(),
            category,
            description: movement.description.clone().unwrap_or_default(),
            focus: MovementField::Amount,
            error: None,
            saving: false,
        }
    }

    pub fn can_submit(&self) -> bool {
        !self.amount.trim().is_empty() && self.category.selected_id().is_some() && !self.saving
    }

    pub fn payload(&self) -> Result<MovementWrite, &'static str> {
        let amount = parse_amount(&self.amount)?;
        let date = NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT)
            .map_err(|_| "Enter the date as YYYY-MM-DD")?;
        let category_id = self.category.selected_id().ok_or("Choose a category")?;
        Ok(MovementWrite {
            amount,
            date,
            category_id,
            description: self.description.trim().to_string(),
        })
    }
}

impl FormInput for MovementForm {
    fn next_field(&mut self) {
        self.focus = cycle_field(&MOVEMENT_FIELDS, self.focus, 1);
    }

    fn prev_field(&mut self) {
        self.focus = cycle_field(&MOVEMENT_FIELDS, self.focus, -1);
    }

    fn focused_text(&mut self) -> Option<&mut String> {
        match self.focus {
            MovementField::Amount => Some(&mut self.amount),
            MovementField::Date => Some(&mut self.date),
            MovementField::Description => Some(&mut self.description),
            MovementField::Category => None,
        }
    }

    fn cycle(&mut self, delta: isize) {
        if self.focus == MovementField::Category {
            self.category.cycle(delta);
        }
    }
}

fn parse_amount(raw: &str) -> Result<f64, &'static str> {
    match raw.trim().parse::<f64>() {
        Ok(amount) if amount.is_finite() => Ok(amount),
        _ => Err("Enter a valid amount"),
    }
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryField {
    Name,
    Distribution,
}

const CATEGORY_FIELDS: [CategoryField; 2] = [CategoryField::Name, CategoryField::Distribution];

#[derive(Debug)]
pub struct CategoryForm {
    pub editing: Option<i64>,
    pub name: String,
    pub distribution: Picker,
    pub focus: CategoryField,
    pub error: Option<String>,
    pub saving: bool,
}

impl CategoryForm {
    pub fn create(types: &[DistributionType]) -> Self {
        Self {
            editing: None,
            name: String::new(),
            distribution: Picker::new(distribution_options(types)),
            focus: CategoryField::Name,
            error: None,
            saving: false,
        }
    }

    pub fn edit(category: &Category, types: &[DistributionType]) -> Self {
        let mut distribution = Picker::new(distribution_options(types));
        distribution.select_id(category.distribution_type.as_ref().map(|kind| kind.id));
        Self {
            editing: Some(category.id),
            name: category.name.clone(),
            distribution,
            focus: CategoryField::Name,
            error: None,
            saving: false,
        }
    }

    pub fn can_submit(&self) -> bool {
        !self.name.trim().is_empty() && self.distribution.selected_id().is_some() && !self.saving
    }

    pub fn payload(&self) -> Result<CategoryWrite, &'static str> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("Enter a category name");
        }
        let distribution_type_id = self
            .distribution
            .selected_id()
            .ok_or("Choose a distribution type")?;
        Ok(CategoryWrite {
            name: name.to_string(),
            distribution_type_id,
        })
    }
}

impl FormInput for CategoryForm {
    fn next_field(&mut self) {
        self.focus = cycle_field(&CATEGORY_FIELDS, self.focus, 1);
    }

    fn prev_field(&mut self) {
        self.focus = cycle_field(&CATEGORY_FIELDS, self.focus, -1);
    }

    fn focused_text(&mut self) -> Option<&mut String> {
        match self.focus {
            CategoryField::Name => Some(&mut self.name),
            CategoryField::Distribution => None,
        }
    }

    fn cycle(&mut self, delta: isize) {
        if self.focus == CategoryField::Distribution {
            self.distribution.cycle(delta);
        }
    }
}

// ---------------------------------------------------------------------------
// Salaries and periods
// ---------------------------------------------------------------------------

pub const NEW_PERIOD_ACTION: &str = "+ Create new period";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SalaryField {
    Amount,
    Member,
    Period,
}

const SALARY_FIELDS: [SalaryField; 3] = [SalaryField::Amount, SalaryField::Member, SalaryField::Period];

#[derive(Debug)]
pub struct SalaryForm {
    pub editing: Option<i64>,
    pub amount: String,
    pub member: Picker,
    pub period: Picker,
    pub focus: SalaryField,
    pub error: Option<String>,
    pub saving: bool,
}

impl SalaryForm {
    pub fn create(members: &[Member], periods: &[Period]) -> Self {
        Self {
            editing: None,
            amount: String::new(),
            member: Picker::new(member_options(members)),
            period: Picker::new(period_options(periods)).with_action(NEW_PERIOD_ACTION),
            focus: SalaryField::Amount,
            error: None,
            saving: false,
        }
    }

    pub fn edit(salary: &Salary, members: &[Member], periods: &[Period]) -> Self {
        let mut form = Self::create(members, periods);
        form.editing = Some(salary.id);
        form.amount = salary.amount.to_string();
        form.member.select_id(salary.member.as_ref().map(|member| member.id));
        form.period.select_id(salary.period.as_ref().map(|period| period.id));
        form
    }

    pub fn wants_new_period(&self) -> bool {
        self.focus == SalaryField::Period && self.period.action_selected()
    }

    pub fn can_submit(&self) -> bool {
        !self.amount.trim().is_empty()
            && self.member.selected_id().is_some()
            && self.period.selected().is_some()
            && !self.saving
    }

    pub fn payload(&self) -> Result<SalaryWrite, &'static str> {
        let amount = parse_amount(&self.amount)?;
        let member_id = self.member.selected_id().ok_or("Choose a member")?;
        let label = self.period.selected().ok_or("Choose a period")?;
        let period = PeriodLabel::parse(&label.label).map_err(|_| "Choose a valid period")?;
        Ok(SalaryWrite {
            amount,
            period,
            member_id,
        })
    }
}

impl FormInput for SalaryForm {
    fn next_field(&mut self) {
        self.focus = cycle_field(&SALARY_FIELDS, self.focus, 1);
    }

    fn prev_field(&mut self) {
        self.focus = cycle_field(&SALARY_FIELDS, self.focus, -1);
    }

    fn focused_text(&mut self) -> Option<&mut String> {
        match self.focus {
            SalaryField::Amount => Some(&mut self.amount),
            SalaryField::Member | SalaryField::Period => None,
        }
    }

    fn cycle(&mut self, delta: isize) {
        match self.focus {
            SalaryField::Member => self.member.cycle(delta),
            SalaryField::Period => self.period.cycle(delta),
            SalaryField::Amount => {}
        }
    }
}

#[derive(Debug, Default)]
pub struct PeriodForm {
    pub input: String,
    pub error: Option<String>,
    pub saving: bool,
}

impl PeriodForm {
    pub fn can_submit(&self) -> bool {
        PeriodLabel::is_valid(self.input.trim()) && !self.saving
    }

    /// Validated label, rejecting periods the household already has.
    pub fn payload(&self, existing: &[Period]) -> Result<PeriodLabel, &'static str> {
        let label = PeriodLabel::parse(self.input.trim()).map_err(|_| "Use the YYYY-MM format")?;
        if existing.iter().any(|period| period.period == label.as_str()) {
            return Err("Period already exists");
        }
        Ok(label)
    }
}

impl FormInput for PeriodForm {
    fn next_field(&mut self) {}

    fn prev_field(&mut self) {}

    fn focused_text(&mut self) -> Option<&mut String> {
        Some(&mut self.input)
    }
}
