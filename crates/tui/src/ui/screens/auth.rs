use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::{
    app::{
        AppState,
        forms::{AuthField, AuthMode},
    },
    ui::{
        components::{
            centered_box,
            dialog::{Field, field_line},
        },
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let auth = &state.auth;

    let (title, mut fields) = match auth.mode {
        AuthMode::Login => (" sign in ", Vec::with_capacity(2)),
        AuthMode::Register => (" create account ", Vec::with_capacity(3)),
    };
    fields.push(Field::text(
        "Username",
        &auth.username,
        auth.focus == AuthField::Username,
    ));
    if auth.mode == AuthMode::Register {
        fields.push(Field::text("Email", &auth.email, auth.focus == AuthField::Email));
    }
    fields.push(Field::secret(
        "Password",
        &auth.password,
        auth.focus == AuthField::Password,
    ));

    let height = fields.len() as u16 * 2 + 3;
    let card_area = centered_box(44, height, area);
    frame.render_widget(Clear, card_area);

    let block = Block::default()
        .title(Span::styled(
            title,
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));
    let inner = block.inner(card_area);
    frame.render_widget(block, card_area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            fields
                .iter()
                .flat_map(|_| [Constraint::Length(1), Constraint::Length(1)])
                .collect::<Vec<_>>(),
        )
        .margin(1)
        .split(inner);
    for (index, field) in fields.iter().enumerate() {
        frame.render_widget(Paragraph::new(field_line(field, &theme)), rows[index * 2]);
    }

    let below = Rect {
        x: area.x,
        y: (card_area.y + card_area.height + 1).min(area.bottom().saturating_sub(3)),
        width: area.width,
        height: 3.min(area.height),
    };
    frame.render_widget(
        Paragraph::new(footer(state, &theme)).alignment(Alignment::Center),
        below,
    );
}

fn footer(state: &AppState, theme: &Theme) -> Vec<Line<'static>> {
    let auth = &state.auth;
    let status = if auth.loading {
        Line::from(Span::styled("Signing in…", Style::default().fg(theme.warning)))
    } else if let Some(message) = &auth.message {
        Line::from(Span::styled(message.clone(), Style::default().fg(theme.error)))
    } else {
        Line::from(Span::styled(
            state.base_url.clone(),
            Style::default().fg(theme.dim),
        ))
    };

    let switch = match auth.mode {
        AuthMode::Login => " create an account",
        AuthMode::Register => " sign in instead",
    };
    vec![
        status,
        Line::from(""),
        Line::from(vec![
            Span::styled("Tab", Style::default().fg(theme.accent)),
            Span::raw(" next  "),
            Span::styled("Enter", Style::default().fg(theme.accent)),
            Span::raw(" submit  "),
            Span::styled("Ctrl+T", Style::default().fg(theme.accent)),
            Span::raw(switch),
            Span::raw("  "),
            Span::styled("Ctrl+C", Style::default().fg(theme.accent)),
            Span::raw(" quit"),
        ]),
    ]
}
