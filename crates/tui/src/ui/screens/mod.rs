pub mod analytics;
pub mod auth;
pub mod dashboard;
pub mod dialogs;
pub mod household;
pub mod movements;
pub mod salaries;
pub mod settings;

use ratatui::{
    style::Style,
    text::{Line, Span},
};

use crate::{app::views::Table, ui::theme::Theme};

/// Replaces the rows while there is nothing to show: loading, failed, or empty.
pub(crate) fn table_notice<T>(table: &Table<T>, empty: &str, theme: &Theme) -> Option<Line<'static>> {
    if let Some(error) = &table.error {
        return Some(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(theme.error),
        )));
    }
    if table.items.is_empty() {
        let text = if table.loading { "Loading…" } else { empty };
        return Some(Line::from(Span::styled(
            text.to_string(),
            Style::default().fg(theme.dim),
        )));
    }
    None
}
