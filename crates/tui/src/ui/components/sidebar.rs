use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::{
    app::{AppState, route::Route},
    ui::theme::Theme,
};

/// Vertical navigation panel shown on every protected route.
pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let mut lines = vec![
        Line::from(Span::styled(
            " wisp",
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!(" {}", state.household.household_name().unwrap_or("no household")),
            Style::default().fg(theme.dim),
        )),
        Line::from(""),
    ];

    for (index, route) in Route::NAV.iter().enumerate() {
        let active = route.same_section(state.route);
        let marker = if active { "▌" } else { " " };
        let style = if active {
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text_muted)
        };
        lines.push(Line::from(vec![
            Span::styled(marker, Style::default().fg(theme.accent)),
            Span::styled(format!("{} ", index + 1), Style::default().fg(theme.dim)),
            Span::styled(route.label(), style),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::raw(" "),
        Span::styled("L", Style::default().fg(theme.accent)),
        Span::styled(" logout", Style::default().fg(theme.text_muted)),
    ]));

    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(Style::default().fg(theme.border));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
