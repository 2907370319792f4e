//! Conference attendee guest list backed by SQLite, with a terminal UI,
//! one-shot subcommands, and Word/Excel export.
//!
//! [`GuestList`] is the entry point for every operation; the `ui` and `cli`
//! modules are thin front-ends over it.
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod export;
pub mod guestlist;
pub mod models;
pub mod ui;

pub use config::{load_connection_params, ConnectionParams};
pub use db::Store;
pub use error::{ConfigError, DatabaseError, ExportError, GuestListError, ValidationError};
pub use export::ExportFormat;
pub use guestlist::{ExportReport, GuestList, Removal, SearchOutcome, MAX_SEARCH_RESULTS};
pub use models::{Attendee, NewAttendee};
pub use ui::{run_app, App};
