use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::functions::FunctionFlags;
use rusqlite::Connection;
use tracing::{debug, error};

use crate::config::ConnectionParams;
use crate::error::{ConfigError, DatabaseError, StoreOpenError};

/// Key naming the SQLite file inside the connection parameters.
const DATABASE_KEY: &str = "database";
/// Optional key holding how long to wait on a locked database, in milliseconds.
const BUSY_TIMEOUT_KEY: &str = "busy_timeout_ms";

/// Runs units of work against the guest list database, one connection per
/// call. The connection parameters are resolved once when the store is built
/// and never re-read.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
    busy_timeout: Option<Duration>,
}

impl Store {
    /// Resolve the database location from `params` and make sure the
    /// `guestlist` table exists.
    pub fn open(params: &ConnectionParams) -> Result<Self, StoreOpenError> {
        let path = PathBuf::from(params.require(DATABASE_KEY)?);
        let busy_timeout = params
            .get(BUSY_TIMEOUT_KEY)
            .map(|raw| {
                raw.trim()
                    .parse::<u64>()
                    .map(Duration::from_millis)
                    .map_err(|_| ConfigError::InvalidValue {
                        key: BUSY_TIMEOUT_KEY.to_string(),
                        value: raw.to_string(),
                    })
            })
            .transpose()?;

        for (key, _) in params.iter() {
            if key != DATABASE_KEY && key != BUSY_TIMEOUT_KEY {
                debug!(key, "connection parameter not used by the embedded database");
            }
        }

        let store = Self { path, busy_timeout };
        store.run("create guestlist table", ensure_schema)?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a connection, run `work` inside a transaction and commit only when
    /// it succeeds. The connection is closed on every path; a failing unit of
    /// work leaves the database untouched because the transaction rolls back
    /// when dropped.
    pub fn run<T, F>(&self, operation: &'static str, work: F) -> Result<T, DatabaseError>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T>,
    {
        let result = self.run_inner(operation, work);
        if let Err(err) = &result {
            error!(operation, error = %error_chain(err), "database operation failed");
        }
        result
    }

    fn run_inner<T, F>(&self, operation: &'static str, work: F) -> Result<T, DatabaseError>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T>,
    {
        let mut conn = self.connect()?;
        let query_err = |source| DatabaseError::Query { operation, source };

        let tx = conn.transaction().map_err(query_err)?;
        debug!(operation, "running unit of work");
        let value = work(&tx).map_err(query_err)?;
        tx.commit().map_err(query_err)?;
        Ok(value)
    }

    fn connect(&self) -> Result<Connection, DatabaseError> {
        let connect_err = |source| DatabaseError::Connect {
            path: self.path.clone(),
            source,
        };
        let conn = Connection::open(&self.path).map_err(connect_err)?;
        if let Some(timeout) = self.busy_timeout {
            conn.busy_timeout(timeout).map_err(connect_err)?;
        }
        register_casefold(&conn).map_err(connect_err)?;
        Ok(conn)
    }
}

/// `casefold(text)` lowercases with Unicode rules. SQLite's own `LIKE` and
/// `lower` only fold ASCII, so name searches compare casefolded text instead.
fn register_casefold(conn: &Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        "casefold",
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let text: Option<String> = ctx.get(0)?;
            Ok(text.map(|text| text.to_lowercase()))
        },
    )
}

/// Create the guest list table on first use. `AUTOINCREMENT` keeps SQLite from
/// handing out the id of a deleted row again.
fn ensure_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS guestlist (
            guest_id INTEGER PRIMARY KEY AUTOINCREMENT,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            city TEXT NOT NULL,
            company TEXT NOT NULL,
            email TEXT NOT NULL,
            phone TEXT NOT NULL,
            date_added TIMESTAMP NOT NULL
        )",
        [],
    )?;
    Ok(())
}

fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn params_for(dir: &TempDir) -> ConnectionParams {
        let path = dir.path().join("guests.sqlite");
        ConnectionParams::new(
            "database",
            [("database", path.to_string_lossy().into_owned())],
        )
    }

    fn row_count(store: &Store) -> i64 {
        store
            .run("count rows", |conn| {
                conn.query_row("SELECT COUNT(*) FROM guestlist", [], |row| row.get(0))
            })
            .unwrap()
    }

    #[test]
    fn open_creates_the_table() {
        let dir = TempDir::new().unwrap();
        let store = Store::open(&params_for(&dir)).unwrap();
        assert!(store.path().exists());
        assert_eq!(row_count(&store), 0);
    }

    #[test]
    fn open_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let params = params_for(&dir);
        Store::open(&params).unwrap();
        Store::open(&params).unwrap();
    }

    #[test]
    fn missing_database_key_is_a_config_error() {
        let params = ConnectionParams::new("database", [("host", "localhost")]);
        let err = Store::open(&params).unwrap_err();
        assert!(matches!(
            err,
            StoreOpenError::Config(ConfigError::MissingKey { .. })
        ));
    }

    #[test]
    fn bad_busy_timeout_is_rejected() {
        let dir = TempDir::new().unwrap();
        let mut values: Vec<(String, String)> = params_for(&dir)
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        values.push(("busy_timeout_ms".into(), "soon".into()));
        let params = ConnectionParams::new("database", values);

        let err = Store::open(&params).unwrap_err();
        assert!(matches!(
            err,
            StoreOpenError::Config(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn failed_unit_of_work_commits_nothing() {
        let dir = TempDir::new().unwrap();
        let store = Store::open(&params_for(&dir)).unwrap();

        let result: Result<(), DatabaseError> = store.run("insert then fail", |conn| {
            conn.execute(
                "INSERT INTO guestlist (first_name, last_name, city, company, email, phone, date_added)
                 VALUES ('A', 'B', 'C', 'D', 'e@f.gh', '1', '2020-01-01 00:00:00')",
                [],
            )?;
            conn.execute("INSERT INTO no_such_table VALUES (1)", [])?;
            Ok(())
        });

        let err = result.unwrap_err();
        assert!(matches!(
            err,
            DatabaseError::Query { operation: "insert then fail", .. }
        ));
        assert_eq!(row_count(&store), 0);
    }

    #[test]
    fn connections_fold_case_beyond_ascii() {
        let dir = TempDir::new().unwrap();
        let store = Store::open(&params_for(&dir)).unwrap();

        let folded: (String, Option<String>) = store
            .run("casefold", |conn| {
                conn.query_row("SELECT casefold('ŻÓŁĆ Ab'), casefold(NULL)", [], |row| {
                    Ok((row.get(0)?, row.get(1)?))
                })
            })
            .unwrap();
        assert_eq!(folded, ("żółć ab".to_string(), None));
    }

    #[test]
    fn unreachable_database_reports_connect_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing-dir").join("guests.sqlite");
        let params = ConnectionParams::new(
            "database",
            [("database", path.to_string_lossy().into_owned())],
        );

        let err = Store::open(&params).unwrap_err();
        assert!(matches!(
            err,
            StoreOpenError::Database(DatabaseError::Connect { .. })
        ));
    }
}
