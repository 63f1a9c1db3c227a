//! Locale codes

use serde::{Deserialize, Serialize};
use std::fmt;

/// A locale code such as `en`, `ru` or `kz`
///
/// The set is open: any code can be named, but only codes with a resource
/// set in the [`LocaleTable`](super::LocaleTable) can become active.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locale(String);

impl Locale {
    /// Code of the locale every other locale falls back to
    pub const DEFAULT_CODE: &'static str = "en";

    /// Normalize a code: trimmed and lowercased
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_lowercase())
    }

    pub fn en() -> Self {
        Self::new("en")
    }

    pub fn ru() -> Self {
        Self::new("ru")
    }

    pub fn kz() -> Self {
        Self::new("kz")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CODE)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
