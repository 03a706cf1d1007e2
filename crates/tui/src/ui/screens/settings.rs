use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, TableState},
};

use crate::{
    app::{AppState, route::SettingsTab},
    ui::{
        components::{card::Card, money::styled_balance},
        screens::{salaries, table_notice},
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, tab: SettingsTab) {
    let theme = Theme::default();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(area);

    render_tabs(frame, layout[0], tab, &theme);
    match tab {
        SettingsTab::General => render_general(frame, layout[1], state, &theme),
        SettingsTab::Categories => render_categories(frame, layout[1], state, &theme),
        SettingsTab::Salaries => salaries::render(frame, layout[1], state),
    }
}

fn render_tabs(frame: &mut Frame<'_>, area: Rect, active: SettingsTab, theme: &Theme) {
    let mut spans = vec![Span::raw(" ")];
    for (i, tab) in SettingsTab::ALL.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        if *tab == active {
            spans.push(Span::styled("[", Style::default().fg(theme.accent)));
            spans.push(Span::styled(
                tab.label(),
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled("]", Style::default().fg(theme.accent)));
        } else {
            spans.push(Span::styled(tab.label(), Style::default().fg(theme.text_muted)));
        }
    }
    spans.push(Span::styled("   Tab", Style::default().fg(theme.accent)));
    spans.push(Span::styled(" next tab", Style::default().fg(theme.dim)));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_general(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(3)])
        .split(area);

    let label = |text: &'static str| Span::styled(format!("{text:<12}"), Style::default().fg(theme.text_muted));
    let value = |text: String| Span::styled(text, Style::default().fg(theme.text));
    let user = state.user.as_ref();
    let account = vec![
        Line::from(vec![
            label("Username"),
            value(user.map(|user| user.username.clone()).unwrap_or_default()),
        ]),
        Line::from(vec![
            label("Email"),
            value(user.map(|user| user.email.clone()).unwrap_or_default()),
        ]),
        Line::from(vec![
            label("Household"),
            value(state.household.household_name().unwrap_or("-").to_string()),
        ]),
        Line::from(vec![label("Server"), value(state.base_url.clone())]),
    ];
    Card::new("Account", theme).render_with(frame, layout[0], Paragraph::new(account));

    let card = Card::new("Members", theme);
    let members = &state.members;
    let lines = match table_notice(members, "No members yet.", theme) {
        Some(notice) => vec![notice],
        None => members
            .items
            .iter()
            .enumerate()
            .map(|(index, member)| {
                let marker = if index == members.selected { "» " } else { "  " };
                let mut spans = vec![
                    Span::styled(marker, Style::default().fg(theme.accent)),
                    Span::styled(format!("{:<18}", member.name), Style::default().fg(theme.text)),
                ];
                spans.extend(styled_balance(member.balance, theme));
                Line::from(spans)
            })
            .collect(),
    };
    card.render_with(frame, layout[1], Paragraph::new(lines));
}

fn render_categories(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let card = Card::new("Categories", theme).focused(true);
    let table = &state.categories.table;

    if let Some(notice) = table_notice(table, "No categories yet. Press n to add one.", theme) {
        card.render_with(frame, area, Paragraph::new(notice));
        return;
    }

    let header =
        Row::new(["Name", "Distribution", "Updated"]).style(Style::default().fg(theme.text_muted));
    let rows = table.items.iter().map(|category| {
        Row::new(vec![
            Cell::from(category.name.clone()),
            Cell::from(
                category
                    .distribution_type
                    .as_ref()
                    .map(|kind| kind.name.clone())
                    .unwrap_or_else(|| "-".to_string()),
            ),
            Cell::from(
                category
                    .updated_at
                    .or(category.created_at)
                    .map(|at| at.format("%Y-%m-%d").to_string())
                    .unwrap_or_default(),
            ),
        ])
    });

    let widget = Table::new(
        rows,
        [
            Constraint::Length(20),
            Constraint::Length(16),
            Constraint::Min(10),
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
