//! Presentation of the guest list: plain-text lines for the front-ends and the
//! Word/Excel exports handed out to organisers.

mod docx;
mod text;
mod xlsx;

use std::fmt;
use std::path::{Path, PathBuf};

pub use docx::write_docx;
pub use text::{detail_lines, render_details, render_summaries};
pub use xlsx::{write_sheet, write_xlsx, SheetCell, COLUMN_TITLES, TIMESTAMP_FORMAT};

use crate::error::ExportError;
use crate::models::Attendee;

/// File formats the guest list can be exported to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Word,
    Excel,
}

impl ExportFormat {
    /// Every format, in the order offered to the user.
    pub const ALL: [ExportFormat; 2] = [ExportFormat::Word, ExportFormat::Excel];

    pub fn label(self) -> &'static str {
        match self {
            ExportFormat::Word => "Word Document",
            ExportFormat::Excel => "Excel Document",
        }
    }

    /// Extension including the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Word => ".docx",
            ExportFormat::Excel => ".xlsx",
        }
    }

    /// Pick the format matching the extension of `path`, if any.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|format| format.extension()[1..] == extension)
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Turn a user-chosen file name into a destination for `format`. Names that
/// already end with the right extension are kept, bare names get it appended,
/// and names carrying some other extension are refused.
pub fn ensure_extension(name: &str, format: ExportFormat) -> Result<PathBuf, ExportError> {
    let trimmed = name.trim();
    let invalid = || ExportError::InvalidFileName {
        name: trimmed.to_string(),
        expected: format.extension(),
    };

    let path = Path::new(trimmed);
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(invalid)?;

    if file_name.to_ascii_lowercase().ends_with(format.extension()) {
        Ok(path.to_path_buf())
    } else if file_name.contains('.') {
        Err(invalid())
    } else {
        Ok(PathBuf::from(format!("{trimmed}{}", format.extension())))
    }
}

/// Write `attendees` to `path` in `format`, returning the path written to.
pub fn export_attendees(
    format: ExportFormat,
    path: &Path,
    attendees: &[Attendee],
) -> Result<PathBuf, ExportError> {
    match format {
        ExportFormat::Word => write_docx(path, attendees),
        ExportFormat::Excel => {
            Ok(write_xlsx(Some(path), attendees)?.unwrap_or_else(|| path.to_path_buf()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_extension_is_kept() {
        assert_eq!(
            ensure_extension("guests.docx", ExportFormat::Word).unwrap(),
            PathBuf::from("guests.docx")
        );
        assert_eq!(
            ensure_extension("out/Guests.XLSX", ExportFormat::Excel).unwrap(),
            PathBuf::from("out/Guests.XLSX")
        );
    }

    #[test]
    fn bare_name_gets_the_extension() {
        assert_eq!(
            ensure_extension("guests", ExportFormat::Excel).unwrap(),
            PathBuf::from("guests.xlsx")
        );
        assert_eq!(
            ensure_extension("./exports/guests", ExportFormat::Word).unwrap(),
            PathBuf::from("./exports/guests.docx")
        );
    }

    #[test]
    fn foreign_extension_is_refused() {
        let err = ensure_extension("guests.pdf", ExportFormat::Word).unwrap_err();
        assert!(matches!(
            err,
            ExportError::InvalidFileName { expected: ".docx", .. }
        ));
        assert!(ensure_extension("guests.docx", ExportFormat::Excel).is_err());
    }

    #[test]
    fn empty_name_is_refused() {
        assert!(ensure_extension("   ", ExportFormat::Word).is_err());
    }

    #[test]
    fn format_follows_the_path_extension() {
        assert_eq!(
            ExportFormat::from_path(Path::new("list.docx")),
            Some(ExportFormat::Word)
        );
        assert_eq!(
            ExportFormat::from_path(Path::new("list.XLSX")),
            Some(ExportFormat::Excel)
        );
        assert_eq!(ExportFormat::from_path(Path::new("list.csv")), None);
        assert_eq!(ExportFormat::from_path(Path::new("list")), None);
    }
}
