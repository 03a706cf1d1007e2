use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Cell, Paragraph, Row, Table, TableState},
};

use crate::{
    app::AppState,
    ui::{
        components::{card::Card, money::format_amount},
        screens::table_notice,
        theme::Theme,
    },
};

/// Salaries table; also mounted as the Salaries tab of Settings.
pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let card = Card::new("Salaries", &theme).focused(true);
    let table = &state.salaries.table;

    if let Some(notice) = table_notice(table, "No salaries recorded. Press n to add one.", &theme) {
        card.render_with(frame, area, Paragraph::new(notice));
        return;
    }

    let header =
        Row::new(["Period", "Member", "Amount"]).style(Style::default().fg(theme.text_muted));
    let rows = table.items.iter().map(|salary| {
        Row::new(vec![
            Cell::from(
                salary
                    .period
                    .as_ref()
                    .map(|period| period.period.clone())
                    .unwrap_or_else(|| "-".to_string()),
            ),
            Cell::from(
                salary
                    .member
                    .as_ref()
                    .map(|member| member.name.clone())
                    .unwrap_or_else(|| "-".to_string()),
            ),
            Cell::from(format_amount(salary.amount)),
        ])
    });

    let widget = Table::new(
        rows,
        [
            Constraint::Length(10),
            Constraint::Length(18),
            Constraint::Min(8),
        ],
    )
    .header(header)
    .row_highlight_style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
    .highlight_symbol("» ");

    let mut table_state = TableState::default().with_selected(Some(table.selected));
    let inner = card.inner(area);
    frame.render_widget(card.block(), area);
    frame.render_stateful_widget(widget, inner, &mut table_state);
}
