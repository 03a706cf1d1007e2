use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Cell, Paragraph, Row, Table, TableState},
};

use crate::{
    app::AppState,
    ui::{
        components::{card::Card, money::styled_amount},
        screens::table_notice,
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let card = Card::new("Movements", &theme).focused(true);
    let table = &state.movements.table;

    if let Some(notice) = table_notice(table, "No movements yet. Press n to add one.", &theme) {
        card.render_with(frame, area, Paragraph::new(notice));
        return;
    }

    let header = Row::new(["Date", "Category", "Member", "Amount", "Description"])
        .style(Style::default().fg(theme.text_muted));
    let rows = table.items.iter().map(|movement| {
        Row::new(vec![
            Cell::from(movement.date.format("%Y-%m-%d").to_string()),
            Cell::from(movement.category.name.clone()),
            Cell::from(movement.member.name.clone()),
            Cell::from(styled_amount(movement.amount, &theme)),
            Cell::from(movement.description.clone().unwrap_or_default()),
        ])
    });

    let widget = Table::new(
        rows,
        [
            Constraint::Length(11),
            Constraint::Length(16),
            Constraint::Length(12),
            Constraint::Length(10),
            Constraint::Min(10),
        ],
    )
    .header(header)
    .row_highlight_style(
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("» ");

    let mut table_state = TableState::default().with_selected(Some(table.selected));
    let inner = card.inner(area);
    frame.render_widget(card.block(), area);
    frame.render_stateful_widget(widget, inner, &mut table_state);
}
