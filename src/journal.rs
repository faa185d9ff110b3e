//! Mood journal entries kept in the shared key-value store.

use crate::storage::{KeyValueStore, load_list, save_list};
use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

/// Shortest entry text accepted after trimming, in characters.
pub const MIN_ENTRY_CHARS: usize = 3;

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub text: String,
    pub timestamp: String,
}

#[derive(Debug, Error)]
pub enum JournalError {
    #[error("Please write something meaningful!")]
    TooShort,
    #[error("failed to store journal entry: {0:#}")]
    Storage(anyhow::Error),
}

impl From<anyhow::Error> for JournalError {
    fn from(err: anyhow::Error) -> Self {
        JournalError::Storage(err)
    }
}

/// Journal persisted under one key of a [`KeyValueStore`].
#[derive(Debug)]
pub struct JournalStore<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> JournalStore<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Stored entries, oldest first; empty when nothing readable is stored.
    pub fn entries(&self) -> Vec<JournalEntry> {
        load_list(&self.store, &self.key)
    }

    pub fn count(&self) -> usize {
        self.entries().len()
    }

    /// Append an entry stamped with the local time.
    pub fn save(&mut self, text: &str) -> Result<(JournalEntry, usize), JournalError> {
        self.save_at(text, Local::now())
    }

    /// Append an entry stamped with `at`. Returns the entry and the new count.
    pub fn save_at<Tz>(
        &mut self,
        text: &str,
        at: DateTime<Tz>,
    ) -> Result<(JournalEntry, usize), JournalError>
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let text = text.trim();
        if text.chars().count() < MIN_ENTRY_CHARS {
            return Err(JournalError::TooShort);
        }

        let entry = JournalEntry {
            text: text.to_string(),
            timestamp: format_timestamp(&at),
        };
        let mut entries = self.entries();
        entries.push(entry.clone());
        save_list(&mut self.store, &self.key, &entries)?;
        info!(count = entries.len(), "journal entry saved");
        Ok((entry, entries.len()))
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

/// Locale-style stamp, e.g. `3/7/2025, 9:05:02 PM`.
fn format_timestamp<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    at.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}
