//! Persisted preference store
//!
//! Durable key/value storage for the two presentation preferences. The
//! presentation context is the only writer.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::file_io::{read_json, write_json_atomic};
use crate::error::WalletResult;

/// Keys the core reads and writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PreferenceKey {
    Theme,
    Locale,
}

impl PreferenceKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Theme => "theme",
            Self::Locale => "locale",
        }
    }
}

impl fmt::Display for PreferenceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key/value persistence for presentation preferences
pub trait PreferenceStore {
    /// Read a preference; `Ok(None)` when it was never written
    fn get(&self, key: PreferenceKey) -> WalletResult<Option<String>>;

    /// Write a preference, replacing any previous value
    fn set(&mut self, key: PreferenceKey, value: &str) -> WalletResult<()>;
}

/// Preference store backed by a single JSON object on disk
#[derive(Debug, Clone)]
pub struct JsonPreferenceStore {
    path: PathBuf,
}

impl JsonPreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> WalletResult<BTreeMap<String, String>> {
        read_json(&self.path)
    }
}

impl PreferenceStore for JsonPreferenceStore {
    fn get(&self, key: PreferenceKey) -> WalletResult<Option<String>> {
        Ok(self.load()?.remove(key.as_str()))
    }

    /// An unreadable file is replaced by one holding only `key`; the
    /// presentation context rewrites the other preference afterwards.
    fn set(&mut self, key: PreferenceKey, value: &str) -> WalletResult<()> {
        let mut values = self.load().unwrap_or_else(|e| {
            warn!(path = %self.path.display(), error = %e, "discarding unreadable preferences file");
            BTreeMap::new()
        });
        values.insert(key.as_str().to_string(), value.to_string());
        write_json_atomic(&self.path, &values)?;
        debug!(%key, value, "preference written");
        Ok(())
    }
}

/// In-memory preference store; nothing survives the process
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    values: BTreeMap<PreferenceKey, String>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value, as if it had been persisted by an earlier session
    pub fn with(mut self, key: PreferenceKey, value: impl Into<String>) -> Self {
        self.values.insert(key, value.into());
        self
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: PreferenceKey) -> WalletResult<Option<String>> {
        Ok(self.values.get(&key).cloned())
    }

    fn set(&mut self, key: PreferenceKey, value: &str) -> WalletResult<()> {
        self.values.insert(key, value.to_string());
        Ok(())
    }
}
