use std::path::PathBuf;

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::error::{ExportError, ValidationError};
use crate::export::{ensure_extension, ExportFormat};
use crate::models::{Attendee, NewAttendee};

/// Fields of the attendee form, in the order they are asked for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub(crate) enum AttendeeField {
    #[default]
    FirstName,
    LastName,
    City,
    Company,
    Email,
    Phone,
}

impl AttendeeField {
    pub(crate) const ALL: [AttendeeField; 6] = [
        AttendeeField::FirstName,
        AttendeeField::LastName,
        AttendeeField::City,
        AttendeeField::Company,
        AttendeeField::Email,
        AttendeeField::Phone,
    ];

    pub(crate) fn label(self) -> &'static str {
        match self {
            AttendeeField::FirstName => "First name",
            AttendeeField::LastName => "Last name",
            AttendeeField::City => "City",
            AttendeeField::Company => "Company",
            AttendeeField::Email => "Email",
            AttendeeField::Phone => "Phone number",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Six text inputs collected before an attendee is added.
#[derive(Default, Clone)]
pub(crate) struct AttendeeForm {
    values: [String; 6],
    pub(crate) active: AttendeeField,
    pub(crate) error: Option<String>,
}

impl AttendeeForm {
    pub(crate) fn value(&self, field: AttendeeField) -> &str {
        &self.values[field.index()]
    }

    /// Move focus forward, wrapping after the phone number.
    pub(crate) fn next_field(&mut self) {
        let next = (self.active.index() + 1) % AttendeeField::ALL.len();
        self.active = AttendeeField::ALL[next];
    }

    /// Move focus backward, wrapping before the first name.
    pub(crate) fn previous_field(&mut self) {
        let len = AttendeeField::ALL.len();
        let previous = (self.active.index() + len - 1) % len;
        self.active = AttendeeField::ALL[previous];
    }

    pub(crate) fn is_last_field(&self) -> bool {
        self.active == AttendeeField::Phone
    }

    /// Append a character to the active field. Control characters are ignored.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        self.values[self.active.index()].push(ch);
        true
    }

    pub(crate) fn backspace(&mut self) {
        self.values[self.active.index()].pop();
    }

    /// Validate the inputs and produce the attendee to confirm.
    pub(crate) fn parse_inputs(&self) -> Result<NewAttendee, ValidationError> {
        let [first, last, city, company, email, phone] = &self.values;
        let attendee = NewAttendee::new(first, last, city, company, email, phone).trimmed();
        attendee.validate()?;
        Ok(attendee)
    }

    /// Render a single line for the form widget.
    pub(crate) fn build_line(&self, field: AttendeeField) -> Line<'static> {
        let value = self.value(field);
        let is_active = self.active == field;

        let display = if value.is_empty() {
            "<required>".to_string()
        } else {
            value.to_string()
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::raw(format!("{}: ", field.label())),
            Span::styled(display, style),
        ])
    }

    pub(crate) fn value_len(&self, field: AttendeeField) -> usize {
        self.value(field).chars().count()
    }
}

/// Attendee waiting for the user to confirm it should be added.
#[derive(Clone)]
pub(crate) struct ConfirmAddition {
    pub(crate) attendee: NewAttendee,
    /// Reopened with its values when saving fails.
    pub(crate) form: AttendeeForm,
}

/// Attendee waiting for the user to confirm removal.
#[derive(Clone)]
pub(crate) struct ConfirmDeletion {
    pub(crate) attendee: Attendee,
}

/// Picking which export format to write.
#[derive(Default, Clone)]
pub(crate) struct FormatChoice {
    pub(crate) selected: usize,
}

impl FormatChoice {
    pub(crate) fn move_selection(&mut self, offset: isize) {
        let len = ExportFormat::ALL.len() as isize;
        self.selected = (self.selected as isize + offset).rem_euclid(len) as usize;
    }

    pub(crate) fn current(&self) -> ExportFormat {
        ExportFormat::ALL[self.selected.min(ExportFormat::ALL.len() - 1)]
    }
}

/// Destination file name for an export.
#[derive(Clone)]
pub(crate) struct PathForm {
    pub(crate) format: ExportFormat,
    pub(crate) value: String,
    pub(crate) error: Option<String>,
}

impl PathForm {
    pub(crate) fn new(format: ExportFormat) -> Self {
        Self {
            format,
            value: String::new(),
            error: None,
        }
    }

    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        self.value.push(ch);
        true
    }

    pub(crate) fn backspace(&mut self) {
        self.value.pop();
    }

    /// Resolve the typed name into a destination with the right extension.
    pub(crate) fn destination(&self) -> Result<PathBuf, ExportError> {
        ensure_extension(&self.value, self.format)
    }
}

/// Search prompt contents.
#[derive(Default, Clone)]
pub(crate) struct SearchForm {
    pub(crate) query: String,
}
