use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::ui::{components::card::Card, theme::Theme};

pub fn render(frame: &mut Frame<'_>, area: Rect) {
    let theme = Theme::default();
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Analytics are coming soon.",
            Style::default().fg(theme.text),
        )),
        Line::from(Span::styled(
            "Spending by category and member will show up here.",
            Style::default().fg(theme.dim),
        )),
    ];
    Card::new("Analytics", &theme).render_with(
        frame,
        area,
        Paragraph::new(lines).alignment(Alignment::Center),
    );
}
