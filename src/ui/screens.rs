use std::path::PathBuf;

use crate::export::detail_lines;
use crate::models::Attendee;

/// Attendee list shown when choosing who to delete. Typing narrows the list
/// by name so long guest lists stay manageable.
pub(crate) struct AttendeePicker {
    pub(crate) attendees: Vec<Attendee>,
    pub(crate) filtered: Vec<Attendee>,
    pub(crate) filter: String,
    pub(crate) selected: usize,
}

impl AttendeePicker {
    pub(crate) fn new(attendees: Vec<Attendee>) -> Self {
        let mut picker = Self {
            filtered: Vec::new(),
            attendees,
            filter: String::new(),
            selected: 0,
        };
        picker.apply_filter();
        picker
    }

    fn apply_filter(&mut self) {
        let needle = self.filter.trim().to_lowercase();
        self.filtered = if needle.is_empty() {
            self.attendees.clone()
        } else {
            self.attendees
                .iter()
                .filter(|attendee| attendee.full_name().to_lowercase().contains(&needle))
                .cloned()
                .collect()
        };
        self.ensure_in_bounds();
    }

    pub(crate) fn push_filter_char(&mut self, ch: char) {
        if ch.is_control() {
            return;
        }
        self.filter.push(ch);
        self.apply_filter();
    }

    pub(crate) fn pop_filter_char(&mut self) {
        self.filter.pop();
        self.apply_filter();
    }

    pub(crate) fn current(&self) -> Option<&Attendee> {
        self.filtered.get(self.selected)
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        if self.filtered.is_empty() {
            return;
        }
        let len = self.filtered.len() as isize;
        self.selected = (self.selected as isize + offset).clamp(0, len - 1) as usize;
    }

    pub(crate) fn select_first(&mut self) {
        self.selected = 0;
    }

    pub(crate) fn select_last(&mut self) {
        self.selected = self.filtered.len().saturating_sub(1);
    }

    fn ensure_in_bounds(&mut self) {
        if self.filtered.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.filtered.len() {
            self.selected = self.filtered.len() - 1;
        }
    }
}

/// Severity of a notice or footer message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum NoticeKind {
    Info,
    Error,
}

/// Modal message shown after an action completes, fails, or needs the user to
/// try again.
pub(crate) struct Notice {
    pub(crate) title: String,
    pub(crate) lines: Vec<String>,
    pub(crate) kind: NoticeKind,
    /// File that `o` opens with the system viewer.
    pub(crate) exported: Option<PathBuf>,
    pub(crate) scroll: u16,
}

impl Notice {
    pub(crate) fn info(title: impl Into<String>, lines: Vec<String>) -> Self {
        Self {
            title: title.into(),
            lines,
            kind: NoticeKind::Info,
            exported: None,
            scroll: 0,
        }
    }

    pub(crate) fn error(title: impl Into<String>, lines: Vec<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            ..Self::info(title, lines)
        }
    }

    pub(crate) fn with_export(mut self, path: PathBuf) -> Self {
        self.exported = Some(path);
        self
    }

    /// Notice listing each attendee as an indented detail block.
    pub(crate) fn attendee_details(attendees: &[Attendee]) -> Self {
        let mut lines = Vec::new();
        for attendee in attendees {
            let [heading, rest @ ..] = detail_lines(attendee);
            lines.push(heading);
            lines.extend(rest.into_iter().map(|line| format!("    {line}")));
            lines.push(String::new());
        }
        lines.pop();
        Self::info("Attendee info", lines)
    }

    pub(crate) fn scroll_by(&mut self, offset: i32) {
        let max = self.lines.len().saturating_sub(1) as i32;
        self.scroll = (self.scroll as i32 + offset).clamp(0, max) as u16;
    }
}
