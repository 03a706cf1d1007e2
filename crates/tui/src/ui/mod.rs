pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

use crate::app::{
    AppState,
    route::{Route, SettingsTab},
    views::HouseholdStatus,
};

use components::hints::{self, KeyHint};

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::Theme;

const SIDEBAR_WIDTH: u16 = 22;

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let theme = Theme::default();
    let area = frame.area();
    frame.render_widget(Block::default().style(Style::default().bg(theme.background)), area);

    match state.route {
        Route::Root | Route::Auth => screens::auth::render(frame, area, state),
        _ => render_shell(frame, area, state, &theme),
    }
}

fn render_shell(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
        .split(area);
    components::sidebar::render(frame, columns[0], state, theme);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Min(0),    // View
            Constraint::Length(1), // Hints
        ])
        .split(columns[1]);

    render_title(frame, layout[0], state, theme);

    let content = layout[1];
    match state.household.status {
        HouseholdStatus::Present => render_view(frame, content, state),
        HouseholdStatus::Missing => screens::household::render_notice(frame, content, state),
        HouseholdStatus::Unknown => {
            let text = match &state.household.error {
                Some(error) => Span::styled(error.clone(), Style::default().fg(theme.error)),
                None => Span::styled("Loading…", Style::default().fg(theme.dim)),
            };
            frame.render_widget(Paragraph::new(Line::from(text)), content);
        }
    }

    render_bottom_bar(frame, layout[2], state, theme);

    screens::dialogs::render(frame, area, state);
    if let Some(modal) = &state.household.modal {
        screens::household::render_modal(frame, area, modal);
    }
    components::help_overlay::render(frame, area, state);
}

fn render_view(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    match state.route {
        Route::Dashboard => screens::dashboard::render(frame, area, state),
        Route::Movements => screens::movements::render(frame, area, state),
        Route::Analytics => screens::analytics::render(frame, area),
        Route::Salaries => screens::salaries::render(frame, area, state),
        Route::Settings(tab) => screens::settings::render(frame, area, state, tab),
        Route::Root | Route::Auth => {}
    }
}

fn render_title(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let mut spans = vec![
        Span::styled(format!(" {}", state.route.label()), Style::default().fg(theme.text)),
        Span::styled(format!("  {}", state.route.path()), Style::default().fg(theme.dim)),
    ];
    if let Some(member) = &state.household.member {
        spans.push(Span::styled("   ", Style::default()));
        spans.push(Span::styled(member.name.clone(), Style::default().fg(theme.text_muted)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let mut parts = vec![Span::raw(" ")];
    parts.extend(hints::hints_to_spans(&context_hints(state), theme));
    if !state.capturing_text() {
        parts.push(hints::hint_separator(theme));
        parts.extend(hints::hints_to_spans(&hints::GLOBAL, theme));
    }
    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}

fn context_hints(state: &AppState) -> Vec<KeyHint> {
    if state.capturing_text() {
        return hints::FORM.to_vec();
    }
    if state.household.status == HouseholdStatus::Missing {
        return vec![KeyHint::new("o", "set up household")];
    }
    match state.route {
        Route::Dashboard => vec![
            KeyHint::new("a", "add movement"),
            KeyHint::new("e", "edit"),
            KeyHint::new("d", "delete"),
            KeyHint::new("b", "balances"),
        ],
        Route::Movements | Route::Settings(SettingsTab::Categories) => hints::CRUD.to_vec(),
        Route::Salaries | Route::Settings(SettingsTab::Salaries) => vec![
            KeyHint::new("↑↓", "select"),
            KeyHint::new("n", "new"),
            KeyHint::new("e", "edit"),
        ],
        Route::Settings(SettingsTab::General) => vec![KeyHint::new("Tab", "next tab")],
        Route::Analytics | Route::Root | Route::Auth => Vec::new(),
    }
}
