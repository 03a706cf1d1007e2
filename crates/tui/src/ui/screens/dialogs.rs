use ratatui::{Frame, layout::Rect};

use crate::{
    app::{
        AppState,
        forms::{CategoryField, MovementField, SalaryField},
    },
    ui::{
        components::dialog::{Dialog, Field},
        theme::Theme,
    },
};

/// Draws whichever form dialog is open. The period dialog stacks on top of
/// the salary form.
pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();

    if let Some(form) = &state.movements.form {
        let title = if form.editing.is_some() {
            "Edit movement"
        } else {
            "Add movement"
        };
        Dialog {
            title,
            fields: vec![
                Field::text("Amount", &form.amount, form.focus == MovementField::Amount),
                Field::text("Date", &form.date, form.focus == MovementField::Date),
                Field::choice(
                    "Category",
                    form.category.display(),
                    form.focus == MovementField::Category,
                ),
                Field::text(
                    "Description",
                    &form.description,
                    form.focus == MovementField::Description,
                ),
            ],
            error: form.error.as_deref(),
            ready: form.can_submit(),
            busy: form.saving,
            width: 56,
        }
        .render(frame, area, &theme);
    }

    if let Some(form) = &state.categories.form {
        let title = if form.editing.is_some() {
            "Edit category"
        } else {
            "New category"
        };
        Dialog {
            title,
            fields: vec![
                Field::text("Name", &form.name, form.focus == CategoryField::Name),
                Field::choice(
                    "Split",
                    form.distribution.display(),
                    form.focus == CategoryField::Distribution,
                ),
            ],
            error: form.error.as_deref(),
            ready: form.can_submit(),
            busy: form.saving,
            width: 50,
        }
        .render(frame, area, &theme);
    }

    if let Some(form) = &state.salaries.form {
        let title = if form.editing.is_some() {
            "Edit salary"
        } else {
            "New salary"
        };
        Dialog {
            title,
            fields: vec![
                Field::text("Amount", &form.amount, form.focus == SalaryField::Amount),
                Field::choice("Member", form.member.display(), form.focus == SalaryField::Member),
                Field::choice("Period", form.period.display(), form.focus == SalaryField::Period),
            ],
            error: form.error.as_deref(),
            ready: form.can_submit() || form.wants_new_period(),
            busy: form.saving,
            width: 50,
        }
        .render(frame, area, &theme);
    }

    if let Some(form) = &state.salaries.period_form {
        Dialog {
            title: "New period (YYYY-MM)",
            fields: vec![Field::text("Period", &form.input, true)],
            error: form.error.as_deref(),
            ready: form.can_submit(),
            busy: form.saving,
            width: 40,
        }
        .render(frame, area, &theme);
    }
}
