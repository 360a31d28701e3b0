//! Database configuration.

use std::path::PathBuf;

use serde::Deserialize;

/// Environment variable naming the database file.
pub const DB_FILE_ENV: &str = "CHANWATCH_DB_FILE";

/// Default database file, relative to the working directory.
pub const DEFAULT_DB_FILE: &str = "chanwatch.db";

/// Configuration for the Database.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DatabaseConfig {
    /// Path of the backing file. Created on first open.
    #[serde(default = "default_path")]
    pub path: PathBuf,
}

fn default_path() -> PathBuf {
    PathBuf::from(DEFAULT_DB_FILE)
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}

impl DatabaseConfig {
    /// Config pointing at an explicit file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read the path from `CHANWATCH_DB_FILE`, falling back to the default.
    pub fn from_env() -> Self {
        Self::from_var(std::env::var_os(DB_FILE_ENV))
    }

    fn from_var(value: Option<std::ffi::OsString>) -> Self {
        match value {
            Some(path) if !path.is_empty() => Self::new(path),
            _ => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_path() {
        assert_eq!(DatabaseConfig::default().path, PathBuf::from("chanwatch.db"));
    }

    #[test]
    fn test_from_var() {
        let config = DatabaseConfig::from_var(Some("/var/lib/bot/db.sqlite".into()));
        assert_eq!(config.path, PathBuf::from("/var/lib/bot/db.sqlite"));

        assert_eq!(DatabaseConfig::from_var(None), DatabaseConfig::default());
        assert_eq!(DatabaseConfig::from_var(Some("".into())), DatabaseConfig::default());
    }

    #[test]
    fn test_deserialize_fills_default() {
        let config: DatabaseConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, DatabaseConfig::default());

        let config: DatabaseConfig = serde_json::from_str(r#"{"path": "x.db"}"#).unwrap();
        assert_eq!(config.path, PathBuf::from("x.db"));
    }
}
