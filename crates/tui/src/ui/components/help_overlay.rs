use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::{
    app::{
        AppState,
        route::{Route, SettingsTab},
    },
    ui::{
        components::{
            centered_rect,
            hints::{self, KeyHint},
        },
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    if !state.show_help {
        return;
    }

    let theme = Theme::default();
    let popup = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(Span::styled(" Keys ", Style::default().fg(theme.accent)))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.accent));
    frame.render_widget(Paragraph::new(help_lines(state, &theme)).block(block), popup);
}

fn help_lines(state: &AppState, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(hints::hints_to_spans(
            &[
                KeyHint::new("1-5", "switch view"),
                KeyHint::new("j/k", "move"),
            ],
            theme,
        )),
        Line::from(hints::hints_to_spans(&hints::GLOBAL, theme)),
        Line::from(""),
    ];

    let section: &[KeyHint] = match state.route {
        Route::Dashboard => &[
            KeyHint::new("↑↓", "select movement"),
            KeyHint::new("a", "add movement"),
            KeyHint::new("e", "edit movement"),
            KeyHint::new("d", "delete movement"),
            KeyHint::new("b", "expand balances"),
        ],
        Route::Movements | Route::Settings(SettingsTab::Categories) => &hints::CRUD,
        Route::Salaries | Route::Settings(SettingsTab::Salaries) => &[
            KeyHint::new("n", "new salary"),
            KeyHint::new("e", "edit salary"),
        ],
        Route::Settings(SettingsTab::General) => &[KeyHint::new("Tab", "next tab")],
        Route::Analytics | Route::Root | Route::Auth => &[],
    };
    if !section.is_empty() {
        lines.push(Line::from(Span::styled(
            state.route.label(),
            Style::default().fg(theme.text_muted),
        )));
        lines.push(Line::from(hints::hints_to_spans(section, theme)));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        "In forms",
        Style::default().fg(theme.text_muted),
    )));
    lines.push(Line::from(hints::hints_to_spans(&hints::FORM, theme)));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Esc", Style::default().fg(theme.accent)),
        Span::raw(" close"),
    ]));
    lines
}
