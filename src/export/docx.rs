use std::fs::File;
use std::path::{Path, PathBuf};

use docx_rs::{BreakType, Docx, Paragraph, Run};
use tracing::info;

use super::text::detail_lines;
use crate::error::ExportError;
use crate::models::Attendee;

/// Marker printed in front of every entry so the list can be ticked off at the
/// registration desk.
const CHECKBOX: &str = "[ ] ";

/// Write one paragraph per attendee to a Word document at `path` and return
/// the path. The file handle is closed before returning, on success or error.
pub fn write_docx(path: &Path, attendees: &[Attendee]) -> Result<PathBuf, ExportError> {
    let document = attendees
        .iter()
        .fold(Docx::new(), |doc, attendee| {
            doc.add_paragraph(attendee_paragraph(attendee))
        });

    let file = File::create(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    document
        .build()
        .pack(file)
        .map_err(|err| ExportError::Docx(err.to_string()))?;

    info!(path = %path.display(), attendees = attendees.len(), "exported guest list document");
    Ok(path.to_path_buf())
}

/// Build the checkbox paragraph: the detail lines separated by line breaks,
/// each continuation line indented with a tab.
fn attendee_paragraph(attendee: &Attendee) -> Paragraph {
    let [heading, rest @ ..] = detail_lines(attendee);
    let run = rest.iter().fold(
        Run::new().add_text(format!("{CHECKBOX}{heading}")),
        |run, line| {
            run.add_break(BreakType::TextWrapping)
                .add_tab()
                .add_text(line)
        },
    );
    Paragraph::new().add_run(run)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use chrono::NaiveDate;
    use docx_rs::{DocumentChild, ParagraphChild, RunChild};
    use tempfile::TempDir;

    use super::*;

    fn attendee(id: i64, first: &str, last: &str) -> Attendee {
        Attendee {
            id,
            first_name: first.into(),
            last_name: last.into(),
            city: "Warsaw".into(),
            company: "GDF".into(),
            email: format!("{}@gdf.pl", first.to_lowercase()),
            phone: "555".into(),
            date_added: NaiveDate::from_ymd_opt(2019, 9, 13)
                .unwrap()
                .and_hms_opt(13, 22, 15)
                .unwrap(),
        }
    }

    fn paragraph_texts(path: &Path) -> Vec<String> {
        let bytes = fs::read(path).unwrap();
        let docx = docx_rs::read_docx(&bytes).unwrap();
        docx.document
            .children
            .iter()
            .filter_map(|child| match child {
                DocumentChild::Paragraph(paragraph) => Some(paragraph),
                _ => None,
            })
            .map(|paragraph| {
                let mut text = String::new();
                for child in &paragraph.children {
                    if let ParagraphChild::Run(run) = child {
                        for piece in &run.children {
                            match piece {
                                RunChild::Text(t) => text.push_str(&t.text),
                                RunChild::Break(_) => text.push('\n'),
                                RunChild::Tab(_) => text.push('\t'),
                                _ => {}
                            }
                        }
                    }
                }
                text
            })
            .collect()
    }

    #[test]
    fn one_paragraph_per_attendee_in_label_layout() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.docx");
        let attendees = vec![
            attendee(1, "John", "Doe"),
            attendee(2, "Jane", "Roe"),
            attendee(5, "Max", "Moe"),
        ];

        let written = write_docx(&path, &attendees).unwrap();
        assert_eq!(written, path);

        let texts = paragraph_texts(&path);
        assert_eq!(texts.len(), attendees.len());
        assert_eq!(
            texts[0],
            "[ ] id 1:\n\tJohn Doe from Warsaw\n\tWorking at GDF,\n\temail: john@gdf.pl,\n\tnumber: 555"
        );
        assert!(texts[2].starts_with("[ ] id 5:"));
        assert!(texts[2].contains("Max Moe from Warsaw"));
    }

    #[test]
    fn empty_list_writes_an_empty_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.docx");
        write_docx(&path, &[]).unwrap();
        assert!(paragraph_texts(&path).is_empty());
    }

    #[test]
    fn unwritable_destination_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("out.docx");
        let err = write_docx(&path, &[attendee(1, "John", "Doe")]).unwrap_err();
        assert!(matches!(err, ExportError::Io { .. }));
    }
}
