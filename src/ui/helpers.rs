use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use super::app::MenuAction;

/// Build the text inside one menu tile: the action name centered on the first
/// line and its tooltip underneath.
pub(crate) fn menu_tile_lines(action: MenuAction, width: u16, selected: bool) -> Vec<Line<'static>> {
    let title_style = if selected {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };

    vec![
        Line::from(Span::styled(
            center_label(action.title(), width as usize),
            title_style,
        )),
        Line::from(""),
        Line::from(Span::styled(
            action.tooltip().to_string(),
            Style::default().fg(Color::Gray),
        )),
    ]
}

/// Pad `label` with spaces so it sits in the middle of `width` columns.
pub(crate) fn center_label(label: &str, width: usize) -> String {
    let label_width = label.chars().count();
    if label_width >= width {
        return label.chars().take(width).collect();
    }
    let padding = width - label_width;
    let left = padding / 2;
    format!("{}{}{}", " ".repeat(left), label, " ".repeat(padding - left))
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

/// Extract the most relevant error message from a chained error.
pub(crate) fn surface_error(err: &(dyn std::error::Error + 'static)) -> String {
    let mut current = err;
    while let Some(source) = current.source() {
        current = source;
    }
    current.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{GuestListError, ValidationError};

    #[test]
    fn labels_are_centered_and_clipped() {
        assert_eq!(center_label("Add", 7), "  Add  ");
        assert_eq!(center_label("Add", 6), " Add  ");
        assert_eq!(center_label("Delete", 3), "Del");
    }

    #[test]
    fn surface_error_reports_the_innermost_cause() {
        let err = GuestListError::from(ValidationError::MissingField("Email"));
        assert_eq!(surface_error(&err), "Email is required.");
    }
}
