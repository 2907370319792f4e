//! Error types for every layer of the guest list. Each enum maps to one failure
//! family so callers can tell a bad configuration apart from a failed query, a
//! rejected form, or an export that could not be written.

use std::path::PathBuf;

use thiserror::Error;

/// Problems reading the INI file that carries the connection parameters.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: ini::Error,
    },

    #[error("section [{section}] not found in the {} file", path.display())]
    MissingSection { section: String, path: PathBuf },

    #[error("key `{key}` missing from section [{section}]")]
    MissingKey { section: String, key: String },

    #[error("invalid value `{value}` for key `{key}`")]
    InvalidValue { key: String, value: String },
}

/// Failures raised while talking to the attendee database.
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("failed to open database {}", path.display())]
    Connect {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("{operation} failed")]
    Query {
        operation: &'static str,
        #[source]
        source: rusqlite::Error,
    },
}

/// Errors that can stop [`Store::open`](crate::db::Store::open): the
/// parameters themselves or the first trip to the database.
#[derive(Debug, Error)]
pub enum StoreOpenError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

/// Reasons an attendee is rejected before it ever reaches the database.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required.")]
    MissingField(&'static str),

    #[error("`{0}` does not look like an email address.")]
    InvalidEmail(String),
}

/// Failures while writing the guest list to a document or spreadsheet.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("incorrect file name `{name}`, expected a {expected} file")]
    InvalidFileName { name: String, expected: &'static str },

    #[error("failed to write {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("spreadsheet error")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("document error: {0}")]
    Docx(String),
}

/// Anything the guest list service can report back to a front-end.
#[derive(Debug, Error)]
pub enum GuestListError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error(transparent)]
    Export(#[from] ExportError),
}
