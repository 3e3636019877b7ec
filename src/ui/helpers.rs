use anyhow::Error;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::error::StoreError;

use super::forms::FormField;

/// Render one `Label: value` row of a popup form, highlighting the focused
/// field and greying out empty ones.
pub(crate) fn form_line(field: &FormField<'_>) -> Line<'static> {
    let display = if field.value.is_empty() {
        "<required>".to_string()
    } else {
        field.value.to_string()
    };

    let style = if field.active {
        Style::default().fg(Color::Yellow)
    } else if field.value.is_empty() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };

    Line::from(vec![
        Span::raw(format!("{}: ", field.label)),
        Span::styled(display, style),
    ])
}

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height. Used for modal dialogs.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

/// Extract the most relevant error message from a chained error: the store
/// error if there is one, otherwise the innermost cause.
pub(crate) fn surface_error(err: &Error) -> String {
    if let Some(store_err) = err.chain().find_map(|cause| cause.downcast_ref::<StoreError>()) {
        return store_err.to_string();
    }
    err.chain()
        .last()
        .map(|cause| cause.to_string())
        .unwrap_or_else(|| err.to_string())
}
