// Store configuration.
//
// Responsibilities
// - Name the namespace key the ledger is persisted under.
// - Optionally name the directory used by the file storage adapter.

use anyhow::{Context, bail};
use std::env;
use std::path::PathBuf;

/// Version-tagged namespace key. Bumping the tag starts a fresh ledger; nothing is migrated.
pub const DEFAULT_STORAGE_KEY: &str = "salaryEntries_v1";

pub const STORAGE_KEY_VAR: &str = "SALARY_LEDGER_STORAGE_KEY";
pub const DATA_DIR_VAR: &str = "SALARY_LEDGER_DATA_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub storage_key: String,
    pub data_dir: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            data_dir: None,
        }
    }
}

impl StoreConfig {
    /// Reads `.env` if present, then the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let storage_key = match lookup(STORAGE_KEY_VAR) {
            Some(key) if key.trim().is_empty() => bail!("{STORAGE_KEY_VAR} must not be empty"),
            Some(key) => key,
            None => DEFAULT_STORAGE_KEY.to_string(),
        };
        let data_dir = lookup(DATA_DIR_VAR)
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from);
        Ok(Self {
            storage_key,
            data_dir,
        })
    }

    pub fn require_data_dir(&self) -> anyhow::Result<&PathBuf> {
        self.data_dir
            .as_ref()
            .with_context(|| format!("{DATA_DIR_VAR} must be set for file storage"))
    }
}

#[cfg(test)]
mod store_config_tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[rstest]
    fn it_should_default_to_the_versioned_key_and_no_directory() {
        let config = StoreConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, StoreConfig::default());
        assert_eq!(config.storage_key, "salaryEntries_v1");
        assert!(config.require_data_dir().is_err());
    }

    #[rstest]
    fn it_should_read_overrides() {
        let config = StoreConfig::from_lookup(lookup_from(&[
            (STORAGE_KEY_VAR, "salaryEntries_v2"),
            (DATA_DIR_VAR, "/var/lib/salary-ledger"),
        ]))
        .unwrap();
        assert_eq!(config.storage_key, "salaryEntries_v2");
        assert_eq!(
            config.require_data_dir().unwrap(),
            &PathBuf::from("/var/lib/salary-ledger")
        );
    }

    #[rstest]
    fn it_should_reject_an_empty_storage_key() {
        let err = StoreConfig::from_lookup(lookup_from(&[(STORAGE_KEY_VAR, "  ")])).unwrap_err();
        assert!(err.to_string().contains(STORAGE_KEY_VAR));
    }
}
