use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use rust_xlsxwriter::{ColNum, RowNum, Workbook, Worksheet};
use tracing::info;

use crate::error::ExportError;
use crate::models::Attendee;

/// Header row of the guest list spreadsheet, one title per column.
pub const COLUMN_TITLES: [&str; 8] = [
    "id",
    "first name",
    "last_name",
    "city",
    "company",
    "email",
    "phone number",
    "date added",
];

/// Layout used for timestamp cells so spreadsheets show readable dates without
/// relying on Excel number formats.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single typed cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum SheetCell {
    Integer(i64),
    Text(String),
    /// Written as text in [`TIMESTAMP_FORMAT`].
    Timestamp(NaiveDateTime),
}

impl From<&str> for SheetCell {
    fn from(value: &str) -> Self {
        SheetCell::Text(value.to_string())
    }
}

impl From<i64> for SheetCell {
    fn from(value: i64) -> Self {
        SheetCell::Integer(value)
    }
}

impl From<NaiveDateTime> for SheetCell {
    fn from(value: NaiveDateTime) -> Self {
        SheetCell::Timestamp(value)
    }
}

/// Write `titles` as the first row and `rows` below it into the first sheet of
/// a new workbook at `path`.
pub fn write_sheet(
    path: &Path,
    titles: &[&str],
    rows: &[Vec<SheetCell>],
) -> Result<(), ExportError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, title) in titles.iter().enumerate() {
        worksheet.write_string(0, col_num(col), *title)?;
    }

    for (index, row) in rows.iter().enumerate() {
        let row_num = row_num(index + 1);
        for (col, cell) in row.iter().enumerate() {
            write_cell(worksheet, row_num, col_num(col), cell)?;
        }
    }

    workbook.save(path)?;
    Ok(())
}

/// Export the guest list with the fixed eight-column header. Returns `None`
/// when the caller has no destination, otherwise the path written to.
pub fn write_xlsx(
    path: Option<&Path>,
    attendees: &[Attendee],
) -> Result<Option<PathBuf>, ExportError> {
    let Some(path) = path else {
        return Ok(None);
    };

    let rows: Vec<Vec<SheetCell>> = attendees.iter().map(attendee_row).collect();
    write_sheet(path, &COLUMN_TITLES, &rows)?;

    info!(path = %path.display(), attendees = attendees.len(), "exported guest list spreadsheet");
    Ok(Some(path.to_path_buf()))
}

fn attendee_row(attendee: &Attendee) -> Vec<SheetCell> {
    vec![
        attendee.id.into(),
        attendee.first_name.as_str().into(),
        attendee.last_name.as_str().into(),
        attendee.city.as_str().into(),
        attendee.company.as_str().into(),
        attendee.email.as_str().into(),
        attendee.phone.as_str().into(),
        attendee.date_added.into(),
    ]
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: RowNum,
    col: ColNum,
    cell: &SheetCell,
) -> Result<(), ExportError> {
    match cell {
        SheetCell::Integer(value) => {
            worksheet.write_number(row, col, *value as f64)?;
        }
        SheetCell::Text(value) => {
            worksheet.write_string(row, col, value.as_str())?;
        }
        SheetCell::Timestamp(value) => {
            worksheet.write_string(row, col, value.format(TIMESTAMP_FORMAT).to_string())?;
        }
    }
    Ok(())
}

// Out-of-range indices saturate so the writer reports its own limit error.
fn row_num(index: usize) -> RowNum {
    RowNum::try_from(index).unwrap_or(RowNum::MAX)
}

fn col_num(index: usize) -> ColNum {
    ColNum::try_from(index).unwrap_or(ColNum::MAX)
}

#[cfg(test)]
mod tests {
    use calamine::{open_workbook, Reader, Xlsx};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    use super::*;

    fn read_back(path: &Path) -> Vec<Vec<String>> {
        let mut workbook: Xlsx<_> = open_workbook(path).unwrap();
        let range = workbook.worksheet_range_at(0).unwrap().unwrap();
        range
            .rows()
            .map(|row| row.iter().map(ToString::to_string).collect())
            .collect()
    }

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2019, 9, day)
            .unwrap()
            .and_hms_micro_opt(hour, 22, 15, 271_516)
            .unwrap()
    }

    #[test]
    fn header_and_rows_read_back_unchanged() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sheet.xlsx");
        let rows: Vec<Vec<SheetCell>> = vec![
            vec![SheetCell::Integer(1), "Ada".into(), at(13, 9).into()],
            vec![SheetCell::Integer(2), "Alan".into(), at(14, 10).into()],
            vec![SheetCell::Integer(3), "Grace".into(), at(15, 11).into()],
        ];

        write_sheet(&path, &["id", "name", "joined"], &rows).unwrap();

        assert_eq!(
            read_back(&path),
            vec![
                vec!["id", "name", "joined"],
                vec!["1", "Ada", "2019-09-13 09:22:15"],
                vec!["2", "Alan", "2019-09-14 10:22:15"],
                vec!["3", "Grace", "2019-09-15 11:22:15"],
            ]
        );
    }

    #[test]
    fn guest_list_uses_the_fixed_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("guests.xlsx");
        let attendee = Attendee {
            id: 50,
            first_name: "Milosz".into(),
            last_name: "Wyrzbicki".into(),
            city: "Poznan".into(),
            company: "Coders".into(),
            email: "aw@coders.com".into(),
            phone: "786978432".into(),
            date_added: at(13, 13),
        };

        let written = write_xlsx(Some(path.as_path()), &[attendee]).unwrap();
        assert_eq!(written.as_deref(), Some(path.as_path()));

        let sheet = read_back(&path);
        assert_eq!(sheet.len(), 2);
        assert_eq!(sheet[0], COLUMN_TITLES.to_vec());
        assert_eq!(
            sheet[1],
            vec![
                "50",
                "Milosz",
                "Wyrzbicki",
                "Poznan",
                "Coders",
                "aw@coders.com",
                "786978432",
                "2019-09-13 13:22:15",
            ]
        );
    }

    #[test]
    fn no_destination_writes_nothing() {
        assert_eq!(write_xlsx(None, &[]).unwrap(), None);
    }
}
