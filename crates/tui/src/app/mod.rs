pub mod forms;
pub mod gate;
pub mod route;
pub mod scope;
pub mod views;

#[cfg(test)]
mod tests;

use std::{future::Future, time::Duration};

use api_types::{
    auth::TokenPair,
    category::{Category, DistributionType},
    member::{DetailedBalance, Member},
    movement::Movement,
    salary::{Period, Salary},
    user::User,
};
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

use crate::{
    client::{Client, ClientError, ClientResult},
    config::AppConfig,
    error::{AppError, Result},
    session::SessionStore,
    ui::{
        self,
        keymap::{AppAction, map_key},
    },
};

use self::{
    forms::{
        AuthForm, AuthMode, CategoryForm, FormInput, HouseholdForm, HouseholdMode, MovementForm,
        PeriodForm, SalaryForm, category_options, distribution_options, member_options,
        period_options,
    },
    gate::{AuthGate, guard},
    route::{Route, SettingsTab},
    scope::ViewScope,
    views::{
        CategoriesState, DashboardState, HouseholdState, HouseholdStatus, MovementsState,
        SalariesState, Table,
    },
};

pub const SESSION_EXPIRED: &str = "Session expired. Please sign in again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Create,
    Update,
    Delete,
}

impl Mutation {
    fn verb(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }

    fn failure(self, resource: &str) -> String {
        format!("Failed to {} {resource}. Please try again.", self.verb())
    }
}

/// Result of a request issued by the mounted view.
#[derive(Debug)]
pub enum Message {
    LoggedIn(ClientResult<TokenPair>),
    RegisterFailed(ClientError),
    MemberMe(ClientResult<Member>),
    HouseholdSaved {
        mode: HouseholdMode,
        result: ClientResult<()>,
    },
    Movements(ClientResult<Vec<Movement>>),
    Categories(ClientResult<Vec<Category>>),
    DistributionTypes(ClientResult<Vec<DistributionType>>),
    Members(ClientResult<Vec<Member>>),
    DetailedBalances(ClientResult<Vec<DetailedBalance>>),
    User(ClientResult<User>),
    Salaries(ClientResult<Vec<Salary>>),
    Periods(ClientResult<Vec<Period>>),
    MovementSaved(Mutation, ClientResult<()>),
    CategorySaved(Mutation, ClientResult<()>),
    SalarySaved(Mutation, ClientResult<()>),
    PeriodCreated(ClientResult<Period>),
}

#[derive(Debug)]
pub struct AppState {
    pub route: Route,
    pub gate: AuthGate,
    pub auth: AuthForm,
    pub household: HouseholdState,
    pub dashboard: DashboardState,
    pub movements: MovementsState,
    pub categories: CategoriesState,
    pub salaries: SalariesState,
    pub members: Table<Member>,
    pub user: Option<User>,
    pub show_help: bool,
    pub base_url: String,
}

impl AppState {
    fn new(config: &AppConfig) -> Self {
        Self {
            route: Route::Root,
            gate: AuthGate::default(),
            auth: AuthForm::new(&config.username),
            household: HouseholdState::default(),
            dashboard: DashboardState::default(),
            movements: MovementsState::default(),
            categories: CategoriesState::default(),
            salaries: SalariesState::default(),
            members: Table::default(),
            user: None,
            show_help: false,
            base_url: config.base_url.clone(),
        }
    }

    /// Forgets everything fetched under the previous session.
    fn clear_session_data(&mut self) {
        self.household = HouseholdState::default();
        self.dashboard = DashboardState::default();
        self.movements = MovementsState::default();
        self.categories = CategoriesState::default();
        self.salaries = SalariesState::default();
        self.members = Table::default();
        self.user = None;
        self.auth.reset_secret();
    }

    fn close_dialogs(&mut self) {
        self.movements.form = None;
        self.categories.form = None;
        self.salaries.form = None;
        self.salaries.period_form = None;
    }

    /// True while keystrokes go to a text field.
    pub fn capturing_text(&self) -> bool {
        self.route == Route::Auth
            || self.household.modal.is_some()
            || self.movements.form.is_some()
            || self.categories.form.is_some()
            || self.salaries.form.is_some()
            || self.salaries.period_form.is_some()
    }

    pub fn household_ready(&self) -> bool {
        self.household.status == HouseholdStatus::Present
    }
}

enum FormKey {
    Submit,
    Close,
    Handled,
}

fn form_key<F: FormInput>(form: &mut F, action: AppAction) -> FormKey {
    match action {
        AppAction::Submit => return FormKey::Submit,
        AppAction::Cancel => return FormKey::Close,
        AppAction::NextField => form.next_field(),
        AppAction::PrevField => form.prev_field(),
        AppAction::Up | AppAction::Left => form.cycle(-1),
        AppAction::Down | AppAction::Right => form.cycle(1),
        AppAction::Backspace => form.backspace(),
        AppAction::Input(ch) => form.input(ch),
        AppAction::Quit | AppAction::ToggleMode | AppAction::None => {}
    }
    FormKey::Handled
}

/// Server-provided detail when there is one, else the generic text.
fn failure_message(err: &ClientError, fallback: &str) -> String {
    err.server_message().unwrap_or(fallback).to_string()
}

pub struct App {
    config: AppConfig,
    client: Client,
    session: SessionStore,
    scope: ViewScope,
    pub state: AppState,
    /// Whether the mounted view already issued its data requests.
    data_loaded: bool,
    should_quit: bool,
}

impl App {
    pub fn new(config: &AppConfig, session: SessionStore) -> Result<Self> {
        let client = Client::new(
            &config.base_url,
            session.clone(),
            config.refresh_on_unauthorized,
        )?;
        Ok(Self {
            config: config.clone(),
            client,
            session,
            scope: ViewScope::default(),
            state: AppState::new(config),
            data_loaded: false,
            should_quit: false,
        })
    }

    /// Resolves the stored session and mounts the entry route.
    pub async fn start(&mut self) {
        let has_token = self.session.get().await.is_some();
        self.state.gate.resolve(has_token);
        tracing::info!(authenticated = self.state.gate.is_authenticated(), "starting");
        let entry = Route::parse(&self.config.start_route).unwrap_or_else(|| {
            tracing::warn!(path = %self.config.start_route, "unknown start route");
            Route::Root
        });
        self.navigate(entry);
    }

    pub async fn run(&mut self) -> Result<()> {
        self.start().await;
        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(100);

        while !self.should_quit {
            while let Some(message) = self.scope.try_next() {
                self.apply(message).await;
            }

            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key).await,
                    Event::Resize(_, _) => {}
                    _ => {}
                }
            }
        }

        Ok(())
    }

    /// Applies results until the mounted view has nothing in flight.
    #[cfg(test)]
    pub async fn settle(&mut self) {
        while let Some(message) = self.scope.next().await {
            self.apply(message).await;
        }
    }

    fn spawn<F, Fut>(&mut self, request: F)
    where
        F: FnOnce(Client) -> Fut,
        Fut: Future<Output = Message> + Send + 'static,
    {
        let client = self.client.clone();
        self.scope.spawn(request(client));
    }

    // -----------------------------------------------------------------------
    // Navigation
    // -----------------------------------------------------------------------

    /// Unmounts the current view and mounts `requested`, or wherever the
    /// auth gate sends it.
    pub fn navigate(&mut self, requested: Route) {
        let route = guard(requested, self.state.gate.state());
        if route != requested {
            tracing::debug!(from = requested.path(), to = route.path(), "route redirected");
        }

        self.scope.remount();
        self.data_loaded = false;
        self.state.close_dialogs();
        self.state.route = route;

        if route.is_protected() {
            self.check_household();
        }
    }

    fn check_household(&mut self) {
        self.state.household.error = None;
        self.spawn(|client| async move { Message::MemberMe(client.member_me().await) });
    }

    fn fetch_route_data(&mut self) {
        self.data_loaded = true;
        match self.state.route {
            Route::Dashboard => {
                self.load_movements();
                self.load_categories();
                self.load_members();
                self.load_balances();
            }
            Route::Movements => {
                self.load_movements();
                self.load_categories();
            }
            Route::Salaries | Route::Settings(SettingsTab::Salaries) => {
                self.load_salaries();
                self.load_members();
                self.load_periods();
            }
            Route::Settings(SettingsTab::General) => {
                self.load_user();
                self.load_members();
            }
            Route::Settings(SettingsTab::Categories) => {
                self.load_categories();
                self.load_distribution_types();
            }
            Route::Analytics | Route::Root | Route::Auth => {}
        }
    }

    fn load_movements(&mut self) {
        self.state.movements.table.start_loading();
        self.spawn(|client| async move { Message::Movements(client.movements_list().await) });
    }

    fn load_categories(&mut self) {
        self.state.categories.table.start_loading();
        self.spawn(|client| async move { Message::Categories(client.categories_list().await) });
    }

    fn load_distribution_types(&mut self) {
        self.spawn(|client| async move {
            Message::DistributionTypes(client.distribution_types_list().await)
        });
    }

    fn load_members(&mut self) {
        self.state.members.start_loading();
        self.spawn(|client| async move { Message::Members(client.members_list().await) });
    }

    fn load_balances(&mut self) {
        self.state.dashboard.balances.start_loading();
        self.spawn(|client| async move {
            Message::DetailedBalances(client.members_detailed_balances().await)
        });
    }

    fn load_user(&mut self) {
        self.spawn(|client| async move { Message::User(client.user_me().await) });
    }

    fn load_salaries(&mut self) {
        self.state.salaries.table.start_loading();
        self.spawn(|client| async move { Message::Salaries(client.salaries_list().await) });
    }

    fn load_periods(&mut self) {
        self.spawn(|client| async move { Message::Periods(client.periods_list().await) });
    }

    // -----------------------------------------------------------------------
    // Results
    // -----------------------------------------------------------------------

    /// Routes a 401 to the session-level handler; everything else passes.
    fn authorized<T>(&mut self, result: ClientResult<T>) -> Option<ClientResult<T>> {
        match result {
            Err(err) if err.is_unauthorized() => {
                self.on_unauthorized();
                None
            }
            other => Some(other),
        }
    }

    fn on_unauthorized(&mut self) {
        tracing::warn!(route = self.state.route.path(), "session rejected, returning to sign in");
        self.state.gate.revoke();
        self.state.clear_session_data();
        self.state.auth.message = Some(SESSION_EXPIRED.to_string());
        self.navigate(Route::Auth);
    }

    pub async fn apply(&mut self, message: Message) {
        match message {
            Message::LoggedIn(result) => self.on_logged_in(result).await,
            Message::RegisterFailed(err) => {
                tracing::warn!("registration failed: {err}");
                self.state.auth.loading = false;
                self.state.auth.message =
                    Some(failure_message(&err, "Registration failed. Please try again."));
            }
            Message::MemberMe(result) => {
                let Some(result) = self.authorized(result) else {
                    return;
                };
                self.on_member(result);
            }
            Message::HouseholdSaved { mode, result } => {
                let Some(result) = self.authorized(result) else {
                    return;
                };
                self.on_household_saved(mode, result);
            }
            Message::Movements(result) => {
                let Some(result) = self.authorized(result) else {
                    return;
                };
                match result {
                    Ok(items) => {
                        self.state.movements.table.loaded(items);
                        let rows = self.state.movements.recent_count();
                        self.state.dashboard.step(0, rows);
                    }
                    Err(err) => {
                        tracing::warn!("movements fetch failed: {err}");
                        self.state
                            .movements
                            .table
                            .failed("Failed to fetch movements. Please try again later.");
                    }
                }
            }
            Message::Categories(result) => {
                let Some(result) = self.authorized(result) else {
                    return;
                };
                match result {
                    Ok(items) => {
                        if let Some(form) = self.state.movements.form.as_mut() {
                            form.category.set_options(category_options(&items));
                        }
                        self.state.categories.table.loaded(items);
                    }
                    Err(err) => {
                        tracing::warn!("categories fetch failed: {err}");
                        self.state
                            .categories
                            .table
                            .failed("Failed to fetch categories. Please try again later.");
                    }
                }
            }
            Message::DistributionTypes(result) => {
                let Some(result) = self.authorized(result) else {
                    return;
                };
                match result {
                    Ok(types) => {
                        if let Some(form) = self.state.categories.form.as_mut() {
                            form.distribution.set_options(distribution_options(&types));
                        }
                        self.state.categories.distribution_types = types;
                    }
                    Err(err) => tracing::warn!("distribution types fetch failed: {err}"),
                }
            }
            Message::Members(result) => {
                let Some(result) = self.authorized(result) else {
                    return;
                };
                match result {
                    Ok(items) => {
                        if let Some(form) = self.state.salaries.form.as_mut() {
                            form.member.set_options(member_options(&items));
                        }
                        self.state.members.loaded(items);
                    }
                    Err(err) => {
                        tracing::warn!("members fetch failed: {err}");
                        self.state.members.failed("Failed to fetch members.");
                    }
                }
            }
            Message::DetailedBalances(result) => {
                let Some(result) = self.authorized(result) else {
                    return;
                };
                match result {
                    Ok(items) => self.state.dashboard.balances.loaded(items),
                    Err(err) => {
                        tracing::warn!("balances fetch failed: {err}");
                        self.state
                            .dashboard
                            .balances
                            .failed("Failed to fetch balances.");
                    }
                }
            }
            Message::User(result) => {
                let Some(result) = self.authorized(result) else {
                    return;
                };
                match result {
                    Ok(user) => self.state.user = Some(user),
                    Err(err) => tracing::warn!("user fetch failed: {err}"),
                }
            }
            Message::Salaries(result) => {
                let Some(result) = self.authorized(result) else {
                    return;
                };
                match result {
                    Ok(items) => self.state.salaries.table.loaded(items),
                    Err(err) => {
                        tracing::warn!("salaries fetch failed: {err}");
                        self.state
                            .salaries
                            .table
                            .failed("Failed to fetch salaries. Please try again later.");
                    }
                }
            }
            Message::Periods(result) => {
                let Some(result) = self.authorized(result) else {
                    return;
                };
                match result {
                    Ok(periods) => {
                        if let Some(form) = self.state.salaries.form.as_mut() {
                            form.period.set_options(period_options(&periods));
                        }
                        self.state.salaries.periods = periods;
                    }
                    Err(err) => tracing::warn!("periods fetch failed: {err}"),
                }
            }
            Message::MovementSaved(op, result) => {
                let Some(result) = self.authorized(result) else {
                    return;
                };
                match result {
                    Ok(()) => {
                        tracing::info!(op = op.verb(), "movement saved");
                        self.state.movements.form = None;
                        self.load_movements();
                        if self.state.route == Route::Dashboard {
                            self.load_balances();
                            self.check_household();
                        }
                    }
                    Err(err) => {
                        tracing::warn!(op = op.verb(), "movement mutation failed: {err}");
                        let message = failure_message(&err, &op.failure("movement"));
                        match self.state.movements.form.as_mut() {
                            Some(form) => {
                                form.saving = false;
                                form.error = Some(message);
                            }
                            None => self.state.movements.table.error = Some(message),
                        }
                    }
                }
            }
            Message::CategorySaved(op, result) => {
                let Some(result) = self.authorized(result) else {
                    return;
                };
                match result {
                    Ok(()) => {
                        tracing::info!(op = op.verb(), "category saved");
                        self.state.categories.form = None;
                        self.load_categories();
                    }
                    Err(err) => {
                        tracing::warn!(op = op.verb(), "category mutation failed: {err}");
                        let message = failure_message(&err, &op.failure("category"));
                        match self.state.categories.form.as_mut() {
                            Some(form) => {
                                form.saving = false;
                                form.error = Some(message);
                            }
                            None => self.state.categories.table.error = Some(message),
                        }
                    }
                }
            }
            Message::SalarySaved(op, result) => {
                let Some(result) = self.authorized(result) else {
                    return;
                };
                match result {
                    Ok(()) => {
                        tracing::info!(op = op.verb(), "salary saved");
                        self.state.salaries.form = None;
                        self.load_salaries();
                    }
                    Err(err) => {
                        tracing::warn!(op = op.verb(), "salary mutation failed: {err}");
                        let message = failure_message(&err, &op.failure("salary"));
                        match self.state.salaries.form.as_mut() {
                            Some(form) => {
                                form.saving = false;
                                form.error = Some(message);
                            }
                            None => self.state.salaries.table.error = Some(message),
                        }
                    }
                }
            }
            Message::PeriodCreated(result) => {
                let Some(result) = self.authorized(result) else {
                    return;
                };
                self.on_period_created(result);
            }
        }
    }

    async fn on_logged_in(&mut self, result: ClientResult<TokenPair>) {
        let tokens = match result {
            Ok(tokens) => tokens,
            Err(err) => {
                tracing::warn!("login failed: {err}");
                self.state.auth.loading = false;
                self.state.auth.message = Some(match err {
                    ClientError::Transport(_) => {
                        format!("Could not reach {}", self.state.base_url)
                    }
                    _ => "Invalid username or password".to_string(),
                });
                return;
            }
        };

        if let Err(err) = self.session.set(&tokens.access, Some(&tokens.refresh)).await {
            tracing::error!("could not store session: {err}");
            self.state.auth.loading = false;
            self.state.auth.message = Some("Could not store the session.".to_string());
            return;
        }

        tracing::info!(username = %self.state.auth.username, "logged in");
        self.state.gate.login_succeeded();
        self.state.auth.reset_secret();
        self.state.auth.message = None;
        self.navigate(Route::Dashboard);
    }

    fn on_member(&mut self, result: ClientResult<Member>) {
        let member = match result {
            Ok(member) => member,
            Err(err) => {
                tracing::warn!("household check failed: {err}");
                self.state.household.error = Some("Failed to check household status".to_string());
                return;
            }
        };

        let has_household = member.household.is_some();
        self.state.household.member = Some(member);
        if has_household {
            self.state.household.status = HouseholdStatus::Present;
            self.state.household.modal = None;
            if !self.data_loaded {
                self.fetch_route_data();
            }
        } else {
            tracing::info!("member has no household yet");
            self.state.household.status = HouseholdStatus::Missing;
            if self.state.household.modal.is_none() {
                self.state.household.modal = Some(HouseholdForm::default());
            }
        }
    }

    fn on_household_saved(&mut self, mode: HouseholdMode, result: ClientResult<()>) {
        match result {
            Ok(()) => {
                tracing::info!(mode = mode.label(), "household ready");
                self.state.household.status = HouseholdStatus::Present;
                self.state.household.modal = None;
                self.fetch_route_data();
                self.check_household();
            }
            Err(err) => {
                tracing::warn!(mode = mode.label(), "household request failed: {err}");
                if let Some(modal) = self.state.household.modal.as_mut() {
                    modal.saving = false;
                    modal.error = Some(failure_message(&err, mode.failure()));
                }
            }
        }
    }

    fn on_period_created(&mut self, result: ClientResult<Period>) {
        match result {
            Ok(period) => {
                tracing::info!(period = %period.period, "period created");
                self.state.salaries.period_form = None;
                self.state.salaries.periods.push(period.clone());
                if let Some(form) = self.state.salaries.form.as_mut() {
                    form.period
                        .set_options(period_options(&self.state.salaries.periods));
                    form.period.select_id(Some(period.id));
                }
            }
            Err(err) => {
                tracing::warn!("period create failed: {err}");
                if let Some(form) = self.state.salaries.period_form.as_mut() {
                    form.saving = false;
                    form.error = Some(failure_message(
                        &err,
                        "Failed to create period. Please try again.",
                    ));
                }
            }
        }
    }

    // -----------------------------------------------------------------------
    // Keys
    // -----------------------------------------------------------------------

    async fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        self.handle_action(map_key(key)).await;
    }

    pub async fn handle_action(&mut self, action: AppAction) {
        if action == AppAction::Quit {
            self.should_quit = true;
            return;
        }

        if self.state.show_help {
            if matches!(action, AppAction::Cancel | AppAction::Submit | AppAction::Input('?')) {
                self.state.show_help = false;
            }
            return;
        }

        if self.state.route == Route::Auth {
            self.auth_action(action);
        } else if self.state.household.modal.is_some() {
            self.household_action(action);
        } else if self.state.salaries.period_form.is_some() {
            self.period_action(action);
        } else if self.state.salaries.form.is_some() {
            self.salary_form_action(action);
        } else if self.state.movements.form.is_some() {
            self.movement_form_action(action);
        } else if self.state.categories.form.is_some() {
            self.category_form_action(action);
        } else {
            self.browse_action(action).await;
        }
    }

    fn auth_action(&mut self, action: AppAction) {
        if action == AppAction::ToggleMode {
            self.state.auth.toggle_mode();
            return;
        }
        match form_key(&mut self.state.auth, action) {
            FormKey::Submit => self.submit_auth(),
            FormKey::Close | FormKey::Handled => {}
        }
    }

    fn submit_auth(&mut self) {
        let auth = &mut self.state.auth;
        if !auth.can_submit() {
            if !auth.loading {
                auth.message = Some("Please fill in all fields".to_string());
            }
            return;
        }
        auth.loading = true;
        auth.message = None;

        let username = auth.username.trim().to_string();
        let password = auth.password.clone();
        match auth.mode {
            AuthMode::Login => self.spawn(move |client| async move {
                Message::LoggedIn(client.login(&username, &password).await)
            }),
            AuthMode::Register => {
                let email = auth.email.trim().to_string();
                self.spawn(move |client| async move {
                    match client.register(&username, &email, &password).await {
                        Ok(()) => Message::LoggedIn(client.login(&username, &password).await),
                        Err(err) => Message::RegisterFailed(err),
                    }
                });
            }
        }
    }

    fn household_action(&mut self, action: AppAction) {
        let Some(modal) = self.state.household.modal.as_mut() else {
            return;
        };
        match form_key(modal, action) {
            FormKey::Close => self.state.household.modal = None,
            FormKey::Submit => self.submit_household(),
            FormKey::Handled => {}
        }
    }

    fn submit_household(&mut self) {
        let Some(modal) = self.state.household.modal.as_mut() else {
            return;
        };
        if modal.saving {
            return;
        }
        let name = match modal.validate() {
            Ok(name) => name,
            Err(message) => {
                modal.error = Some(message.to_string());
                return;
            }
        };
        modal.saving = true;
        modal.error = None;

        let mode = modal.mode;
        self.spawn(move |client| async move {
            let result = match mode {
                HouseholdMode::Create => client.household_create(&name).await.map(drop),
                HouseholdMode::Join => client.household_join(&name).await,
            };
            Message::HouseholdSaved { mode, result }
        });
    }

    fn movement_form_action(&mut self, action: AppAction) {
        let Some(form) = self.state.movements.form.as_mut() else {
            return;
        };
        match form_key(form, action) {
            FormKey::Close => self.state.movements.form = None,
            FormKey::Submit => self.submit_movement(),
            FormKey::Handled => {}
        }
    }

    fn submit_movement(&mut self) {
        let Some(form) = self.state.movements.form.as_mut() else {
            return;
        };
        if !form.can_submit() {
            return;
        }
        let payload = match form.payload() {
            Ok(payload) => payload,
            Err(message) => {
                form.error = Some(message.to_string());
                return;
            }
        };
        form.saving = true;
        form.error = None;

        let editing = form.editing;
        self.spawn(move |client| async move {
            match editing {
                Some(id) => Message::MovementSaved(
                    Mutation::Update,
                    client.movement_update(id, &payload).await.map(drop),
                ),
                None => Message::MovementSaved(
                    Mutation::Create,
                    client.movement_create(&payload).await.map(drop),
                ),
            }
        });
    }

    fn delete_movement(&mut self, movement: Option<&Movement>) {
        let Some(id) = movement.map(|movement| movement.id) else {
            return;
        };
        tracing::info!(id, "deleting movement");
        self.spawn(move |client| async move {
            Message::MovementSaved(Mutation::Delete, client.movement_delete(id).await)
        });
    }

    fn category_form_action(&mut self, action: AppAction) {
        let Some(form) = self.state.categories.form.as_mut() else {
            return;
        };
        match form_key(form, action) {
            FormKey::Close => self.state.categories.form = None,
            FormKey::Submit => self.submit_category(),
            FormKey::Handled => {}
        }
    }

    fn submit_category(&mut self) {
        let Some(form) = self.state.categories.form.as_mut() else {
            return;
        };
        if !form.can_submit() {
            return;
        }
        let payload = match form.payload() {
            Ok(payload) => payload,
            Err(message) => {
                form.error = Some(message.to_string());
                return;
            }
        };
        form.saving = true;
        form.error = None;

        let editing = form.editing;
        self.spawn(move |client| async move {
            match editing {
                Some(id) => Message::CategorySaved(
                    Mutation::Update,
                    client.category_update(id, &payload).await.map(drop),
                ),
                None => Message::CategorySaved(
                    Mutation::Create,
                    client.category_create(&payload).await.map(drop),
                ),
            }
        });
    }

    fn delete_category(&mut self) {
        let Some(id) = self.state.categories.table.selected_item().map(|category| category.id) else {
            return;
        };
        tracing::info!(id, "deleting category");
        self.spawn(move |client| async move {
            Message::CategorySaved(Mutation::Delete, client.category_delete(id).await)
        });
    }

    fn salary_form_action(&mut self, action: AppAction) {
        let Some(form) = self.state.salaries.form.as_mut() else {
            return;
        };
        match form_key(form, action) {
            FormKey::Close => self.state.salaries.form = None,
            FormKey::Submit if form.wants_new_period() => {
                self.state.salaries.period_form = Some(PeriodForm::default());
            }
            FormKey::Submit => self.submit_salary(),
            FormKey::Handled => {}
        }
    }

    fn submit_salary(&mut self) {
        let Some(form) = self.state.salaries.form.as_mut() else {
            return;
        };
        if !form.can_submit() {
            return;
        }
        let payload = match form.payload() {
            Ok(payload) => payload,
            Err(message) => {
                form.error = Some(message.to_string());
                return;
            }
        };
        form.saving = true;
        form.error = None;

        let editing = form.editing;
        self.spawn(move |client| async move {
            match editing {
                Some(id) => Message::SalarySaved(
                    Mutation::Update,
                    client.salary_update(id, &payload).await.map(drop),
                ),
                None => Message::SalarySaved(
                    Mutation::Create,
                    client.salary_create(&payload).await.map(drop),
                ),
            }
        });
    }

    fn period_action(&mut self, action: AppAction) {
        let Some(form) = self.state.salaries.period_form.as_mut() else {
            return;
        };
        match form_key(form, action) {
            FormKey::Close => self.state.salaries.period_form = None,
            FormKey::Submit => self.submit_period(),
            FormKey::Handled => {}
        }
    }

    fn submit_period(&mut self) {
        let periods = &self.state.salaries.periods;
        let Some(form) = self.state.salaries.period_form.as_mut() else {
            return;
        };
        if !form.can_submit() {
            return;
        }
        let label = match form.payload(periods) {
            Ok(label) => label,
            Err(message) => {
                form.error = Some(message.to_string());
                return;
            }
        };
        form.saving = true;
        form.error = None;

        self.spawn(move |client| async move {
            Message::PeriodCreated(client.period_create(&label).await)
        });
    }

    async fn browse_action(&mut self, action: AppAction) {
        match action {
            AppAction::Input('q') => {
                self.should_quit = true;
                return;
            }
            AppAction::Input('?') => {
                self.state.show_help = true;
                return;
            }
            AppAction::Input('L') => {
                self.logout().await;
                return;
            }
            AppAction::Input('r') => {
                self.navigate(self.state.route);
                return;
            }
            AppAction::Input(ch @ '1'..='5') => {
                let index = ch as usize - '1' as usize;
                self.navigate(Route::NAV[index]);
                return;
            }
            AppAction::Input('o') if self.state.household.status == HouseholdStatus::Missing => {
                self.state.household.modal = Some(HouseholdForm::default());
                return;
            }
            AppAction::Up | AppAction::Input('k') => {
                self.move_selection(-1);
                return;
            }
            AppAction::Down | AppAction::Input('j') => {
                self.move_selection(1);
                return;
            }
            _ => {}
        }

        if !self.state.household_ready() {
            return;
        }

        match self.state.route {
            Route::Dashboard => match action {
                AppAction::Input('a' | 'n') => self.open_movement_form(None),
                AppAction::Input('b') | AppAction::Submit => {
                    self.state.dashboard.expanded = !self.state.dashboard.expanded;
                }
                AppAction::Input('e') => {
                    let selected = self
                        .state
                        .movements
                        .recent_at(self.state.dashboard.selected)
                        .cloned();
                    if let Some(movement) = selected {
                        self.open_movement_form(Some(&movement));
                    }
                }
                AppAction::Input('d') => {
                    let selected = self
                        .state
                        .movements
                        .recent_at(self.state.dashboard.selected)
                        .cloned();
                    self.delete_movement(selected.as_ref());
                }
                _ => {}
            },
            Route::Movements => match action {
                AppAction::Input('n') => self.open_movement_form(None),
                AppAction::Input('e') | AppAction::Submit => {
                    let selected = self.state.movements.table.selected_item().cloned();
                    if let Some(movement) = selected {
                        self.open_movement_form(Some(&movement));
                    }
                }
                AppAction::Input('d') => {
                    let selected = self.state.movements.table.selected_item().cloned();
                    self.delete_movement(selected.as_ref());
                }
                _ => {}
            },
            Route::Salaries => self.salaries_action(action),
            Route::Settings(tab) => {
                if matches!(action, AppAction::NextField | AppAction::Right) {
                    self.navigate(Route::Settings(tab.next()));
                    return;
                }
                if matches!(action, AppAction::PrevField | AppAction::Left) {
                    self.navigate(Route::Settings(tab.next().next()));
                    return;
                }
                match tab {
                    SettingsTab::General => {}
                    SettingsTab::Categories => match action {
                        AppAction::Input('n') => {
                            self.state.categories.form = Some(CategoryForm::create(
                                &self.state.categories.distribution_types,
                            ));
                        }
                        AppAction::Input('e') | AppAction::Submit => {
                            let categories = &self.state.categories;
                            if let Some(category) = categories.table.selected_item() {
                                let form =
                                    CategoryForm::edit(category, &categories.distribution_types);
                                self.state.categories.form = Some(form);
                            }
                        }
                        AppAction::Input('d') => self.delete_category(),
                        _ => {}
                    },
                    SettingsTab::Salaries => self.salaries_action(action),
                }
            }
            Route::Analytics | Route::Root | Route::Auth => {}
        }
    }

    fn salaries_action(&mut self, action: AppAction) {
        let members = &self.state.members.items;
        let periods = &self.state.salaries.periods;
        let form = match action {
            AppAction::Input('n') => Some(SalaryForm::create(members, periods)),
            AppAction::Input('e') | AppAction::Submit => self
                .state
                .salaries
                .table
                .selected_item()
                .map(|salary| SalaryForm::edit(salary, members, periods)),
            _ => None,
        };
        if form.is_some() {
            self.state.salaries.form = form;
        }
    }

    fn open_movement_form(&mut self, movement: Option<&Movement>) {
        let categories = &self.state.categories.table.items;
        let form = match movement {
            Some(movement) => MovementForm::edit(movement, categories),
            None => MovementForm::create(self.config.today(), categories),
        };
        self.state.movements.form = Some(form);
    }

    fn move_selection(&mut self, delta: isize) {
        match self.state.route {
            Route::Movements => self.state.movements.table.step(delta),
            Route::Settings(SettingsTab::Categories) => self.state.categories.table.step(delta),
            Route::Salaries | Route::Settings(SettingsTab::Salaries) => {
                self.state.salaries.table.step(delta);
            }
            Route::Settings(SettingsTab::General) => self.state.members.step(delta),
            Route::Dashboard => {
                let rows = self.state.movements.recent_count();
                self.state.dashboard.step(delta, rows);
            }
            Route::Analytics | Route::Root | Route::Auth => {}
        }
    }

    async fn logout(&mut self) {
        if let Err(err) = self.session.clear().await {
            tracing::error!("could not clear session: {err}");
        }
        tracing::info!("logged out");
        self.state.gate.revoke();
        self.state.clear_session_data();
        self.state.auth.message = None;
        self.navigate(Route::Auth);
    }
}
