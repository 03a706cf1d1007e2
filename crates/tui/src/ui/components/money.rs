use ratatui::{
    style::{Modifier, Style},
    text::Span,
};

use crate::ui::theme::Theme;

/// Rounds half up to the nearest whole unit; `-2.5` becomes `-2`.
pub fn whole_units(amount: f64) -> i64 {
    (amount + 0.5).floor() as i64
}

/// `$` followed by the whole-unit amount.
#[must_use]
pub fn format_amount(amount: f64) -> String {
    format!("${}", whole_units(amount))
}

#[must_use]
pub fn styled_amount(amount: f64, theme: &Theme) -> Span<'static> {
    let color = if amount > 0.0 {
        theme.positive
    } else if amount < 0.0 {
        theme.negative
    } else {
        theme.text
    };
    Span::styled(format_amount(amount), Style::default().fg(color))
}

/// Headline of the balance card: the magnitude and which way it flows.
pub fn balance_headline(balance: f64) -> (String, &'static str) {
    let caption = if balance >= 0.0 { "owed to you" } else { "you owe" };
    (format_amount(balance.abs()), caption)
}

#[must_use]
pub fn styled_balance(balance: f64, theme: &Theme) -> Vec<Span<'static>> {
    let (amount, caption) = balance_headline(balance);
    let color = if balance >= 0.0 {
        theme.positive
    } else {
        theme.negative
    };
    vec![
        Span::styled(amount, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::styled(format!(" {caption}"), Style::default().fg(theme.text_muted)),
    ]
}

/// Per-counterparty caption of a detailed balance row.
pub fn relation_label(net_balance: f64) -> &'static str {
    if net_balance > 0.0 {
        "owes you"
    } else if net_balance < 0.0 {
        "you owe"
    } else {
        ""
    }
}
