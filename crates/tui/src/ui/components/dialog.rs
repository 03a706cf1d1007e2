use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::ui::{components::centered_box, theme::Theme};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Secret,
    Choice,
}

pub struct Field<'a> {
    pub label: &'a str,
    pub value: &'a str,
    pub kind: FieldKind,
    pub focused: bool,
}

impl<'a> Field<'a> {
    pub fn text(label: &'a str, value: &'a str, focused: bool) -> Self {
        Self {
            label,
            value,
            kind: FieldKind::Text,
            focused,
        }
    }

    pub fn secret(label: &'a str, value: &'a str, focused: bool) -> Self {
        Self {
            kind: FieldKind::Secret,
            ..Self::text(label, value, focused)
        }
    }

    pub fn choice(label: &'a str, value: &'a str, focused: bool) -> Self {
        Self {
            kind: FieldKind::Choice,
            ..Self::text(label, value, focused)
        }
    }
}

/// Modal form: labelled fields, an optional error line and a status line
/// saying whether Enter will submit.
pub struct Dialog<'a> {
    pub title: &'a str,
    pub fields: Vec<Field<'a>>,
    pub error: Option<&'a str>,
    pub ready: bool,
    pub busy: bool,
    pub width: u16,
}

impl Dialog<'_> {
    pub fn render(&self, frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
        let height = self.fields.len() as u16 * 2 + 5;
        let popup = centered_box(self.width, height, area);
        frame.render_widget(Clear, popup);

        let block = Block::default()
            .title(Span::styled(
                format!(" {} ", self.title),
                Style::default().fg(theme.accent),
            ))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.border_focused))
            .style(Style::default().bg(theme.surface_bright));
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let mut constraints: Vec<Constraint> = self
            .fields
            .iter()
            .flat_map(|_| [Constraint::Length(1), Constraint::Length(1)])
            .collect();
        constraints.push(Constraint::Length(1));
        constraints.push(Constraint::Min(0));
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .horizontal_margin(1)
            .split(inner);

        for (index, field) in self.fields.iter().enumerate() {
            frame.render_widget(Paragraph::new(field_line(field, theme)), rows[index * 2]);
        }

        let status_row = rows[self.fields.len() * 2];
        frame.render_widget(Paragraph::new(self.status_line(theme)), status_row);
    }

    fn status_line(&self, theme: &Theme) -> Line<'static> {
        if let Some(error) = self.error {
            return Line::from(Span::styled(error.to_string(), Style::default().fg(theme.error)));
        }
        if self.busy {
            return Line::from(Span::styled("Saving…", Style::default().fg(theme.warning)));
        }
        if self.ready {
            Line::from(vec![
                Span::styled("Enter", Style::default().fg(theme.accent)),
                Span::raw(" save  "),
                Span::styled("Esc", Style::default().fg(theme.accent)),
                Span::raw(" cancel"),
            ])
        } else {
            Line::from(Span::styled(
                "Fill in the required fields",
                Style::default().fg(theme.dim),
            ))
        }
    }
}

pub fn field_line(field: &Field<'_>, theme: &Theme) -> Line<'static> {
    let label_style = if field.focused {
        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text_muted)
    };
    let value_style = if field.focused {
        Style::default().fg(theme.text)
    } else {
        Style::default().fg(theme.dim)
    };

    let value = match field.kind {
        FieldKind::Text if field.focused => format!("{}│", field.value),
        FieldKind::Text => field.value.to_string(),
        FieldKind::Secret if field.focused => format!("{}│", mask(field.value)),
        FieldKind::Secret => mask(field.value),
        FieldKind::Choice if field.focused => format!("‹ {} ›", field.value),
        FieldKind::Choice => field.value.to_string(),
    };

    Line::from(vec![
        Span::styled(format!("{:<12}", field.label), label_style),
        Span::styled(value, value_style),
    ])
}

/// One bullet per character.
pub fn mask(secret: &str) -> String {
    "•".repeat(secret.chars().count())
}
