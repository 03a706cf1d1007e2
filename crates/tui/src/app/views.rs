use api_types::{
    category::{Category, DistributionType},
    member::{DetailedBalance, Member},
    movement::Movement,
    salary::{Period, Salary},
};

use crate::app::forms::{CategoryForm, HouseholdForm, MovementForm, PeriodForm, SalaryForm};

/// Movements listed on the dashboard.
pub const RECENT_LIMIT: usize = 10;

/// Rows fetched for a view, with load status and cursor.
#[derive(Debug)]
pub struct Table<T> {
    pub items: Vec<T>,
    pub loading: bool,
    pub error: Option<String>,
    pub selected: usize,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
            selected: 0,
        }
    }
}

impl<T> Table<T> {
    pub fn start_loading(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn loaded(&mut self, items: Vec<T>) {
        self.items = items;
        self.loading = false;
        self.error = None;
        if self.selected >= self.items.len() {
            self.selected = self.items.len().saturating_sub(1);
        }
    }

    pub fn failed(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.error = Some(message.into());
    }

    pub fn selected_item(&self) -> Option<&T> {
        self.items.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.selected = (self.selected + 1).min(self.items.len() - 1);
    }

    pub fn select_prev(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn step(&mut self, delta: isize) {
        if delta > 0 {
            self.select_next();
        } else {
            self.select_prev();
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HouseholdStatus {
    #[default]
    Unknown,
    Missing,
    Present,
}

#[derive(Debug, Default)]
pub struct HouseholdState {
    pub status: HouseholdStatus,
    pub member: Option<Member>,
    /// Onboarding modal, open while the member has no household.
    pub modal: Option<HouseholdForm>,
    pub error: Option<String>,
}

impl HouseholdState {
    pub fn household_name(&self) -> Option<&str> {
        self.member
            .as_ref()
            .and_then(|member| member.household.as_ref())
            .map(|household| household.name.as_str())
    }
}

#[derive(Debug, Default)]
pub struct DashboardState {
    pub balances: Table<DetailedBalance>,
    pub expanded: bool,
    /// Cursor into the recent movements.
    pub selected: usize,
}

impl DashboardState {
    pub fn step(&mut self, delta: isize, rows: usize) {
        if rows == 0 {
            self.selected = 0;
            return;
        }
        self.selected = self.selected.saturating_add_signed(delta).min(rows - 1);
    }
}

#[derive(Debug, Default)]
pub struct MovementsState {
    pub table: Table<Movement>,
    pub form: Option<MovementForm>,
}

impl MovementsState {
    /// Most recent first, as many as the dashboard shows.
    pub fn recent(&self, limit: usize) -> impl Iterator<Item = &Movement> {
        let mut sorted: Vec<&Movement> = self.table.items.iter().collect();
        sorted.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        sorted.into_iter().take(limit)
    }

    pub fn recent_at(&self, index: usize) -> Option<&Movement> {
        self.recent(RECENT_LIMIT).nth(index)
    }

    pub fn recent_count(&self) -> usize {
        self.table.items.len().min(RECENT_LIMIT)
    }
}

#[derive(Debug, Default)]
pub struct CategoriesState {
    pub table: Table<Category>,
    pub distribution_types: Vec<DistributionType>,
    pub form: Option<CategoryForm>,
}

#[derive(Debug, Default)]
pub struct SalariesState {
    pub table: Table<Salary>,
    pub periods: Vec<Period>,
    pub form: Option<SalaryForm>,
    pub period_form: Option<PeriodForm>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_stays_in_bounds() {
        let mut table = Table::default();
        table.select_next();
        assert_eq!(table.selected, 0);

        table.loaded(vec![1, 2, 3]);
        table.select_next();
        table.select_next();
        table.select_next();
        assert_eq!(table.selected_item(), Some(&3));

        table.loaded(vec![1]);
        assert_eq!(table.selected, 0);
        table.select_prev();
        assert_eq!(table.selected_item(), Some(&1));
    }

    #[test]
    fn dashboard_cursor_stays_on_recent_rows() {
        let mut dashboard = DashboardState::default();
        dashboard.step(1, 0);
        assert_eq!(dashboard.selected, 0);

        dashboard.step(1, 2);
        dashboard.step(1, 2);
        assert_eq!(dashboard.selected, 1);
        dashboard.step(-1, 2);
        dashboard.step(-1, 2);
        assert_eq!(dashboard.selected, 0);
    }

    #[test]
    fn failure_keeps_previous_rows() {
        let mut table = Table::default();
        table.loaded(vec!["a"]);
        table.start_loading();
        table.failed("boom");
        assert_eq!(table.items, vec!["a"]);
        assert_eq!(table.error.as_deref(), Some("boom"));
        assert!(!table.loading);
    }
}
