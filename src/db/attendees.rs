use rusqlite::{params, Connection, Row};

use crate::models::{Attendee, NewAttendee};

/// Column list shared by every query that hydrates an [`Attendee`].
const ATTENDEE_COLUMNS: &str =
    "guest_id, first_name, last_name, city, company, email, phone, date_added";

/// Insert one attendee and return the id the database assigned. A missing
/// `date_added` is filled with the current local time.
pub fn insert_attendee(conn: &Connection, attendee: &NewAttendee) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO guestlist (first_name, last_name, city, company, email, phone, date_added)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            attendee.first_name,
            attendee.last_name,
            attendee.city,
            attendee.company,
            attendee.email,
            attendee.phone,
            attendee.resolved_date_added(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Every attendee, oldest id first.
pub fn fetch_all_attendees(conn: &Connection) -> rusqlite::Result<Vec<Attendee>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {ATTENDEE_COLUMNS} FROM guestlist ORDER BY guest_id"
    ))?;
    let attendees = stmt
        .query_map([], attendee_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(attendees)
}

/// Look up a single attendee by id.
pub fn fetch_attendee(conn: &Connection, id: i64) -> rusqlite::Result<Option<Attendee>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {ATTENDEE_COLUMNS} FROM guestlist WHERE guest_id = ?1"
    ))?;
    let mut rows = stmt.query_map([id], attendee_from_row)?;
    rows.next().transpose()
}

/// Attendees whose `first last` name matches the `LIKE` pattern, ignoring case
/// for any script. Callers add the `%` wildcards themselves and escape literal
/// wildcards with `\`.
pub fn search_attendees(conn: &Connection, pattern: &str) -> rusqlite::Result<Vec<Attendee>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {ATTENDEE_COLUMNS} FROM guestlist
         WHERE casefold(first_name || ' ' || last_name) LIKE casefold(?1) ESCAPE '\\'
         ORDER BY guest_id"
    ))?;
    let attendees = stmt
        .query_map([pattern], attendee_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(attendees)
}

/// Delete the attendee with `id`, returning how many rows went away. Unknown
/// ids delete nothing and are not an error.
pub fn delete_attendee(conn: &Connection, id: i64) -> rusqlite::Result<usize> {
    conn.execute("DELETE FROM guestlist WHERE guest_id = ?1", params![id])
}

fn attendee_from_row(row: &Row<'_>) -> rusqlite::Result<Attendee> {
    Ok(Attendee {
        id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        city: row.get(3)?,
        company: row.get(4)?,
        email: row.get(5)?,
        phone: row.get(6)?,
        date_added: row.get(7)?,
    })
}
