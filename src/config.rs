//! Connection parameters read from an INI file. The loader copies one section
//! verbatim into an immutable [`ConnectionParams`] value which the binary builds
//! once at startup and hands to the [`Store`](crate::db::Store).

use std::collections::BTreeMap;
use std::path::Path;

use ini::Ini;
use tracing::debug;

use crate::error::ConfigError;

/// Configuration file looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "conference_attendees.ini";
/// Section holding the connection parameters unless the caller names another.
pub const DEFAULT_SECTION: &str = "database";

/// Key/value pairs of one configuration section, kept exactly as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionParams {
    section: String,
    values: BTreeMap<String, String>,
}

impl ConnectionParams {
    /// Build parameters directly, mostly useful for tests and tooling that do
    /// not keep an INI file around.
    pub fn new<I, K, V>(section: &str, values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            section: section.to_string(),
            values: values
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    pub fn section(&self) -> &str {
        &self.section
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Look up a key that has to be present for the caller to proceed.
    pub fn require(&self, key: &str) -> Result<&str, ConfigError> {
        self.get(key).ok_or_else(|| ConfigError::MissingKey {
            section: self.section.clone(),
            key: key.to_string(),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Read `section` from the INI file at `path`. Every key in the section is
/// passed through untouched; nothing is defaulted or merged in.
pub fn load_connection_params(
    path: impl AsRef<Path>,
    section: &str,
) -> Result<ConnectionParams, ConfigError> {
    let path = path.as_ref();
    let ini = Ini::load_from_file(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let properties = ini
        .section(Some(section))
        .ok_or_else(|| ConfigError::MissingSection {
            section: section.to_string(),
            path: path.to_path_buf(),
        })?;

    let params = ConnectionParams::new(section, properties.iter());
    debug!(
        path = %path.display(),
        section,
        keys = params.len(),
        "loaded connection parameters"
    );
    Ok(params)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn write_config(dir: &TempDir, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn reads_every_key_of_the_section() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            "[database]\nhost=localhost\ndatabase=guests.sqlite\nuser=admin\npassword=s3cret\n",
        );

        let params = load_connection_params(&path, "database").unwrap();
        assert_eq!(params.section(), "database");
        assert_eq!(params.len(), 4);
        assert_eq!(params.get("host"), Some("localhost"));
        assert_eq!(params.get("database"), Some("guests.sqlite"));
        assert_eq!(params.get("user"), Some("admin"));
        assert_eq!(params.get("password"), Some("s3cret"));
    }

    #[test]
    fn only_the_named_section_is_returned() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            "[database]\ndatabase=main.sqlite\n\n[staging]\ndatabase=staging.sqlite\nport=5433\n",
        );

        let params = load_connection_params(&path, "staging").unwrap();
        assert_eq!(params.get("database"), Some("staging.sqlite"));
        assert_eq!(params.get("port"), Some("5433"));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn missing_section_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "[other]\ndatabase=guests.sqlite\n");

        let err = load_connection_params(&path, "database").unwrap_err();
        assert!(matches!(err, ConfigError::MissingSection { ref section, .. } if section == "database"));
        assert!(err.to_string().contains("section [database] not found"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = load_connection_params(dir.path().join("absent.ini"), "database").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn require_reports_the_missing_key() {
        let params = ConnectionParams::new("database", [("host", "localhost")]);
        let err = params.require("database").unwrap_err();
        assert_eq!(err.to_string(), "key `database` missing from section [database]");
    }
}
