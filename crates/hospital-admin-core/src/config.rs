//! Runtime configuration, resolved once at startup.
//!
//! Sessions take a [`CoreConfig`] rather than reading the environment
//! themselves, so tests can build one directly.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::ids::IdScheme;

/// SQLite file path. Unset means records live in memory only.
pub const DB_PATH_VAR: &str = "HOSPITAL_ADMIN_DB";
/// `sequential` (default) or `uuid`.
pub const ID_SCHEME_VAR: &str = "HOSPITAL_ADMIN_ID_SCHEME";
/// Whether to start from mock records. Defaults to true.
pub const SEED_VAR: &str = "HOSPITAL_ADMIN_SEED";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}: {message}")]
    Invalid { var: &'static str, message: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Where a session keeps its records.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Storage {
    #[default]
    Memory,
    Sqlite(PathBuf),
}

/// Core configuration resolved at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    storage: Storage,
    id_scheme: IdScheme,
    seed_mock_data: bool,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            storage: Storage::Memory,
            id_scheme: IdScheme::Sequential,
            seed_mock_data: true,
        }
    }
}

impl CoreConfig {
    pub fn new(storage: Storage, id_scheme: IdScheme, seed_mock_data: bool) -> Self {
        Self {
            storage,
            id_scheme,
            seed_mock_data,
        }
    }

    /// Read configuration from process environment variables.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to its
    /// value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<Self> {
        let storage = match lookup(DB_PATH_VAR) {
            Some(path) if !path.trim().is_empty() => Storage::Sqlite(PathBuf::from(path.trim())),
            _ => Storage::Memory,
        };

        let id_scheme = match lookup(ID_SCHEME_VAR) {
            Some(raw) => raw.parse().map_err(|message| ConfigError::Invalid {
                var: ID_SCHEME_VAR,
                message,
            })?,
            None => IdScheme::default(),
        };

        let seed_mock_data = match lookup(SEED_VAR) {
            Some(raw) => parse_flag(&raw).ok_or_else(|| ConfigError::Invalid {
                var: SEED_VAR,
                message: format!("expected true or false, got '{raw}'"),
            })?,
            None => true,
        };

        Ok(Self {
            storage,
            id_scheme,
            seed_mock_data,
        })
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn db_path(&self) -> Option<&Path> {
        match &self.storage {
            Storage::Sqlite(path) => Some(path),
            Storage::Memory => None,
        }
    }

    pub fn id_scheme(&self) -> IdScheme {
        self.id_scheme
    }

    pub fn seed_mock_data(&self) -> bool {
        self.seed_mock_data
    }

    pub fn with_storage(mut self, storage: Storage) -> Self {
        self.storage = storage;
        self
    }

    pub fn with_id_scheme(mut self, id_scheme: IdScheme) -> Self {
        self.id_scheme = id_scheme;
        self
    }

    pub fn with_seed(mut self, seed_mock_data: bool) -> Self {
        self.seed_mock_data = seed_mock_data;
        self
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| vars.get(var).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = CoreConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, CoreConfig::default());
        assert!(config.db_path().is_none());
        assert!(config.seed_mock_data());
    }

    #[test]
    fn test_reads_all_vars() {
        let config = CoreConfig::from_lookup(lookup(&[
            (DB_PATH_VAR, "/tmp/admin.db"),
            (ID_SCHEME_VAR, "uuid"),
            (SEED_VAR, "off"),
        ]))
        .unwrap();

        assert_eq!(config.db_path(), Some(Path::new("/tmp/admin.db")));
        assert_eq!(config.id_scheme(), IdScheme::Uuid);
        assert!(!config.seed_mock_data());
    }

    #[test]
    fn test_blank_db_path_means_memory() {
        let config = CoreConfig::from_lookup(lookup(&[(DB_PATH_VAR, "  ")])).unwrap();
        assert_eq!(config.storage(), &Storage::Memory);
    }

    #[test]
    fn test_invalid_values() {
        let err = CoreConfig::from_lookup(lookup(&[(ID_SCHEME_VAR, "random")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: ID_SCHEME_VAR, .. }));

        let err = CoreConfig::from_lookup(lookup(&[(SEED_VAR, "maybe")])).unwrap_err();
        assert!(err.to_string().contains("maybe"));
    }
}
