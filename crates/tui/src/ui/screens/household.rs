use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use crate::{
    app::{
        AppState,
        forms::{HouseholdForm, HouseholdMode},
    },
    ui::{
        components::{
            centered_box,
            dialog::{Field, field_line},
        },
        theme::Theme,
    },
};

/// Shown in place of a view while the member has no household.
pub fn render_notice(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "You need to belong to a household to see shared expenses.",
            Style::default().fg(theme.text),
        )),
        Line::from(vec![
            Span::styled("o", Style::default().fg(theme.accent)),
            Span::styled(" create or join one", Style::default().fg(theme.dim)),
        ]),
    ];
    if let Some(error) = &state.household.error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(theme.error),
        )));
    }
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

pub fn render_modal(frame: &mut Frame<'_>, area: Rect, modal: &HouseholdForm) {
    let theme = Theme::default();
    let popup = centered_box(52, 11, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(Span::styled(
            " Set up your household ",
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.surface_bright));

    let mut tabs = vec![Span::raw(" ")];
    for mode in [HouseholdMode::Create, HouseholdMode::Join] {
        let style = if mode == modal.mode {
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(theme.text_muted)
        };
        tabs.push(Span::styled(mode.label(), style));
        tabs.push(Span::raw("   "));
    }

    let prompt = match modal.mode {
        HouseholdMode::Create => "Start a new household and invite the others.",
        HouseholdMode::Join => "Join an existing household by its name.",
    };
    let status = if let Some(error) = &modal.error {
        Line::from(Span::styled(error.clone(), Style::default().fg(theme.error)))
    } else if modal.saving {
        Line::from(Span::styled("Working…", Style::default().fg(theme.warning)))
    } else {
        Line::from("")
    };

    let lines = vec![
        Line::from(tabs),
        Line::from(""),
        Line::from(Span::styled(format!(" {prompt}"), Style::default().fg(theme.dim))),
        Line::from(""),
        field_line(&Field::text(" Name", &modal.name, true), &theme),
        Line::from(""),
        status,
        Line::from(vec![
            Span::styled(" Tab", Style::default().fg(theme.accent)),
            Span::raw(" create/join  "),
            Span::styled("Enter", Style::default().fg(theme.accent)),
            Span::raw(format!(" {}  ", modal.mode.label().to_lowercase())),
            Span::styled("Esc", Style::default().fg(theme.accent)),
            Span::raw(" later"),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), popup);
}
