//! The operations a front-end offers on the guest list. Each call validates
//! its input, runs one unit of work through the [`Store`], and reports the
//! outcome explicitly so "nothing matched" never looks like "the query failed".

use std::path::{Path, PathBuf};

use tracing::info;

use crate::db::{
    delete_attendee, fetch_all_attendees, fetch_attendee, insert_attendee, search_attendees, Store,
};
use crate::error::{DatabaseError, GuestListError};
use crate::export::{export_attendees, ExportFormat};
use crate::models::{Attendee, NewAttendee};

/// A search returning this many attendees or more is reported as too broad.
pub const MAX_SEARCH_RESULTS: usize = 7;

/// What a name search produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Matches(Vec<Attendee>),
    NoMatches,
    /// Too many hits to be useful; carries the count so the user can narrow it.
    TooMany(usize),
}

/// What a delete request did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    Removed,
    NotFound,
}

/// Where an export went and how many attendees it holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub path: PathBuf,
    pub attendees: usize,
}

/// Handle used by the TUI and the subcommands.
#[derive(Debug, Clone)]
pub struct GuestList {
    store: Store,
}

impl GuestList {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Validate and store a new attendee, returning the stored row.
    pub fn add(&self, attendee: &NewAttendee) -> Result<Attendee, GuestListError> {
        let attendee = attendee.trimmed();
        attendee.validate()?;

        let stored = self.store.run("add attendee", |conn| {
            let id = insert_attendee(conn, &attendee)?;
            fetch_attendee(conn, id)?.ok_or(rusqlite::Error::QueryReturnedNoRows)
        })?;

        info!(id = stored.id, name = %stored.full_name(), "attendee added");
        Ok(stored)
    }

    pub fn list(&self) -> Result<Vec<Attendee>, DatabaseError> {
        self.store.run("list attendees", fetch_all_attendees)
    }

    /// Case-insensitive search for `term` anywhere in `first last`.
    pub fn search(&self, term: &str) -> Result<SearchOutcome, DatabaseError> {
        let pattern = name_pattern(term);
        let matches = self
            .store
            .run("search attendees", |conn| search_attendees(conn, &pattern))?;

        Ok(match matches.len() {
            0 => SearchOutcome::NoMatches,
            count if count >= MAX_SEARCH_RESULTS => SearchOutcome::TooMany(count),
            _ => SearchOutcome::Matches(matches),
        })
    }

    pub fn remove(&self, id: i64) -> Result<Removal, DatabaseError> {
        let deleted = self
            .store
            .run("remove attendee", |conn| delete_attendee(conn, id))?;

        if deleted == 0 {
            Ok(Removal::NotFound)
        } else {
            info!(id, "attendee removed");
            Ok(Removal::Removed)
        }
    }

    /// Export every attendee to `path` in `format`.
    pub fn export(&self, format: ExportFormat, path: &Path) -> Result<ExportReport, GuestListError> {
        let attendees = self.list()?;
        let path = export_attendees(format, path, &attendees)?;
        Ok(ExportReport {
            path,
            attendees: attendees.len(),
        })
    }
}

/// Wrap a search term in `%` wildcards. `%`, `_` and `\` in the term are
/// escaped so they only match themselves. A blank term matches everybody.
pub fn name_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.trim().chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::config::ConnectionParams;
    use crate::error::ValidationError;

    fn guest_list(dir: &TempDir) -> GuestList {
        let path = dir.path().join("guests.sqlite");
        let params = ConnectionParams::new(
            "database",
            [("database", path.to_string_lossy().into_owned())],
        );
        GuestList::new(Store::open(&params).unwrap())
    }

    fn attendee(first: &str, last: &str) -> NewAttendee {
        NewAttendee::new(first, last, "Warsaw", "GDF", "someone@gdf.pl", "555")
    }

    #[test]
    fn add_returns_the_stored_row() {
        let dir = TempDir::new().unwrap();
        let guests = guest_list(&dir);

        let stored = guests.add(&attendee("  John", "Doe ")).unwrap();
        assert_eq!(stored.first_name, "John");
        assert_eq!(stored.last_name, "Doe");
        assert_eq!(guests.list().unwrap(), vec![stored]);
    }

    #[test]
    fn invalid_attendee_never_reaches_the_database() {
        let dir = TempDir::new().unwrap();
        let guests = guest_list(&dir);
        let mut bad = attendee("John", "Doe");
        bad.email = "not-an-email".into();

        let err = guests.add(&bad).unwrap_err();
        assert!(matches!(
            err,
            GuestListError::Validation(ValidationError::InvalidEmail(_))
        ));
        assert!(guests.list().unwrap().is_empty());
    }

    #[test]
    fn search_distinguishes_no_matches_from_matches() {
        let dir = TempDir::new().unwrap();
        let guests = guest_list(&dir);
        guests.add(&attendee("Ada", "Lovelace")).unwrap();

        assert_eq!(guests.search("hopper").unwrap(), SearchOutcome::NoMatches);
        match guests.search("LACE").unwrap() {
            SearchOutcome::Matches(found) => assert_eq!(found[0].first_name, "Ada"),
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn broad_search_is_too_many() {
        let dir = TempDir::new().unwrap();
        let guests = guest_list(&dir);
        for n in 0..MAX_SEARCH_RESULTS {
            guests.add(&attendee("Jan", &format!("Kowalski{n}"))).unwrap();
        }
        guests.add(&attendee("Ada", "Lovelace")).unwrap();

        assert_eq!(
            guests.search("kowal").unwrap(),
            SearchOutcome::TooMany(MAX_SEARCH_RESULTS)
        );
        assert!(matches!(
            guests.search("ada").unwrap(),
            SearchOutcome::Matches(found) if found.len() == 1
        ));
    }

    #[test]
    fn remove_reports_unknown_ids() {
        let dir = TempDir::new().unwrap();
        let guests = guest_list(&dir);
        let stored = guests.add(&attendee("John", "Doe")).unwrap();

        assert_eq!(guests.remove(stored.id + 100).unwrap(), Removal::NotFound);
        assert_eq!(guests.remove(stored.id).unwrap(), Removal::Removed);
        assert_eq!(guests.remove(stored.id).unwrap(), Removal::NotFound);
    }

    #[test]
    fn name_pattern_wraps_the_trimmed_term() {
        assert_eq!(name_pattern(" ada "), "%ada%");
        assert_eq!(name_pattern(""), "%%");
        assert_eq!(name_pattern("a_b%c\\"), r"%a\_b\%c\\%");
    }

    #[test]
    fn wildcards_in_the_term_match_literally() {
        let dir = TempDir::new().unwrap();
        let guests = guest_list(&dir);
        guests.add(&attendee("John", "Doe")).unwrap();
        guests.add(&attendee("Jane", "Roe")).unwrap();

        assert_eq!(guests.search("_").unwrap(), SearchOutcome::NoMatches);
        assert_eq!(guests.search("%").unwrap(), SearchOutcome::NoMatches);
        assert!(matches!(
            guests.search("o").unwrap(),
            SearchOutcome::Matches(found) if found.len() == 2
        ));
    }

    #[test]
    fn search_folds_polish_letters() {
        let dir = TempDir::new().unwrap();
        let guests = guest_list(&dir);
        let stored = guests
            .add(&NewAttendee::new("Łukasz", "Żółć", "Wrocław", "PWr", "lz@pwr.pl", "71"))
            .unwrap();

        for term in ["łukasz", "ŻÓŁĆ", "kasz żó"] {
            assert_eq!(
                guests.search(term).unwrap(),
                SearchOutcome::Matches(vec![stored.clone()]),
                "term {term}"
            );
        }
    }
}
