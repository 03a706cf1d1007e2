use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    app::{AppState, views::RECENT_LIMIT},
    ui::{
        components::{
            card::Card,
            money::{format_amount, relation_label, styled_amount, styled_balance},
        },
        screens::table_notice,
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();

    let balance_rows = if state.dashboard.expanded {
        state.dashboard.balances.items.len().max(1) as u16 + 2
    } else {
        0
    };
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4 + balance_rows),
            Constraint::Min(3),
        ])
        .split(area);

    render_balance(frame, layout[0], state, &theme);
    render_recent(frame, layout[1], state, &theme);
}

fn render_balance(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let balance = state
        .household
        .member
        .as_ref()
        .map(|member| member.balance)
        .unwrap_or_default();

    let toggle = if state.dashboard.expanded {
        " hide details"
    } else {
        " show details"
    };
    let mut lines = vec![
        Line::from(styled_balance(balance, theme)),
        Line::from(vec![
            Span::styled("b", Style::default().fg(theme.accent)),
            Span::styled(toggle, Style::default().fg(theme.dim)),
        ]),
    ];

    if state.dashboard.expanded {
        lines.push(Line::from(""));
        let balances = &state.dashboard.balances;
        match table_notice(balances, "Nobody else in the household yet.", theme) {
            Some(notice) => lines.push(notice),
            None => lines.extend(balances.items.iter().map(|row| {
                let relation = relation_label(row.net_balance);
                let amount = if relation.is_empty() {
                    "settled".to_string()
                } else {
                    format_amount(row.net_balance.abs())
                };
                Line::from(vec![
                    Span::styled(format!("{:<16}", row.member.name), Style::default().fg(theme.text)),
                    Span::styled(format!("{relation:<10}"), Style::default().fg(theme.text_muted)),
                    net_span(row.net_balance, amount, theme),
                ])
            })),
        }
    }

    Card::new("Balance", theme).render_with(frame, area, Paragraph::new(lines));
}

fn net_span(net: f64, text: String, theme: &Theme) -> Span<'static> {
    let color = if net > 0.0 {
        theme.positive
    } else if net < 0.0 {
        theme.negative
    } else {
        theme.dim
    };
    Span::styled(text, Style::default().fg(color))
}

fn render_recent(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let card = Card::new("Recent movements", theme);
    let movements = &state.movements;

    if let Some(notice) = table_notice(
        &movements.table,
        "No movements yet. Press a to add one.",
        theme,
    ) {
        card.render_with(frame, area, Paragraph::new(notice));
        return;
    }

    let lines: Vec<Line<'static>> = movements
        .recent(RECENT_LIMIT)
        .enumerate()
        .map(|(index, movement)| {
            let marker = if index == state.dashboard.selected {
                "» "
            } else {
                "  "
            };
            Line::from(vec![
                Span::styled(marker, Style::default().fg(theme.accent)),
                Span::styled(
                    movement.date.format("%d %b").to_string(),
                    Style::default().fg(theme.dim),
                ),
                Span::raw("  "),
                Span::styled(
                    format!("{:<14}", movement.category.name),
                    Style::default().fg(theme.text),
                ),
                Span::styled(
                    format!("{:<10}", movement.member.name),
                    Style::default().fg(theme.text_muted),
                ),
                styled_amount(movement.amount, theme),
                Span::styled(
                    movement
                        .description
                        .as_deref()
                        .filter(|text| !text.is_empty())
                        .map(|text| format!("  {text}"))
                        .unwrap_or_default(),
                    Style::default().fg(theme.dim),
                ),
            ])
        })
        .collect();

    card.render_with(frame, area, Paragraph::new(lines));
}
