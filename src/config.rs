//! Environment-driven settings shared by the binaries.
//!
//! Every setting has a default, so an empty environment is a valid
//! configuration. Defaults are logged when taken.

use std::env;
use std::path::PathBuf;
use tracing::info;

pub const STORE_ENV: &str = "KHAJA_STORE";
pub const FAVORITES_KEY_ENV: &str = "KHAJA_FAVORITES_KEY";
pub const JOURNAL_KEY_ENV: &str = "KHAJA_JOURNAL_KEY";

pub const DEFAULT_STORE: &str = "khaja-store.json";
pub const DEFAULT_FAVORITES_KEY: &str = "khajaTimeFavorites";
pub const DEFAULT_JOURNAL_KEY: &str = "journalEntries";

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    /// JSON file backing the key-value store.
    pub store_path: PathBuf,
    pub favorites_key: String,
    pub journal_key: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE),
            favorites_key: DEFAULT_FAVORITES_KEY.to_string(),
            journal_key: DEFAULT_JOURNAL_KEY.to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let load = |key: &str, default: &str| -> String {
            match lookup(key).filter(|value| !value.trim().is_empty()) {
                Some(value) => value.trim().to_string(),
                None => {
                    info!("{key} not set, using default: {default}");
                    default.to_string()
                }
            }
        };

        Self {
            store_path: PathBuf::from(load(STORE_ENV, DEFAULT_STORE)),
            favorites_key: load(FAVORITES_KEY_ENV, DEFAULT_FAVORITES_KEY),
            journal_key: load(JOURNAL_KEY_ENV, DEFAULT_JOURNAL_KEY),
        }
    }
}
