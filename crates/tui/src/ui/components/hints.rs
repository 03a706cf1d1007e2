use ratatui::{style::Style, text::Span};

use crate::ui::theme::Theme;

/// A keyboard hint: the key and what it does.
#[derive(Debug, Clone)]
pub struct KeyHint {
    pub key: &'static str,
    pub action: &'static str,
}

impl KeyHint {
    pub const fn new(key: &'static str, action: &'static str) -> Self {
        Self { key, action }
    }
}

pub fn hints_to_spans(hints: &[KeyHint], theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::new();

    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(hint.key, Style::default().fg(theme.accent)));
        spans.push(Span::raw(format!(" {}", hint.action)));
    }

    spans
}

pub fn hint_separator(theme: &Theme) -> Span<'static> {
    Span::styled("  │  ", Style::default().fg(theme.border))
}

pub const FORM: [KeyHint; 4] = [
    KeyHint::new("Tab", "next"),
    KeyHint::new("↑↓", "choose"),
    KeyHint::new("Enter", "save"),
    KeyHint::new("Esc", "cancel"),
];

pub const CRUD: [KeyHint; 4] = [
    KeyHint::new("↑↓", "select"),
    KeyHint::new("n", "new"),
    KeyHint::new("e", "edit"),
    KeyHint::new("d", "delete"),
];

pub const GLOBAL: [KeyHint; 4] = [
    KeyHint::new("r", "refresh"),
    KeyHint::new("L", "logout"),
    KeyHint::new("?", "help"),
    KeyHint::new("q", "quit"),
];
