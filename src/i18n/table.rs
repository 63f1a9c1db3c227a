//! Locale resource table
//!
//! Static mapping of locale -> namespace -> key -> display string. The
//! bundled locales are compiled into the binary from `locales/*.json`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::locale::Locale;
use crate::error::{WalletError, WalletResult};

const BUNDLED: &[(&str, &str)] = &[
    ("en", include_str!("locales/en.json")),
    ("ru", include_str!("locales/ru.json")),
    ("kz", include_str!("locales/kz.json")),
];

/// All strings of one locale, grouped by namespace
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocaleResources {
    namespaces: BTreeMap<String, BTreeMap<String, String>>,
}

impl LocaleResources {
    /// Parse a resource set from its JSON form (`{"ns": {"key": "text"}}`)
    pub fn from_json(json: &str) -> WalletResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn get(&self, namespace: &str, key: &str) -> Option<&str> {
        self.namespaces
            .get(namespace)
            .and_then(|keys| keys.get(key))
            .map(String::as_str)
    }

    /// Add or replace a single string
    pub fn insert(
        &mut self,
        namespace: impl Into<String>,
        key: impl Into<String>,
        text: impl Into<String>,
    ) {
        self.namespaces
            .entry(namespace.into())
            .or_default()
            .insert(key.into(), text.into());
    }

    /// Every `(namespace, key)` pair in this set
    fn keys(&self) -> impl Iterator<Item = (&str, &str)> {
        self.namespaces.iter().flat_map(|(ns, keys)| {
            keys.keys().map(move |key| (ns.as_str(), key.as_str()))
        })
    }
}

/// Translated-string lookup keyed by locale, namespace and key
#[derive(Debug, Clone)]
pub struct LocaleTable {
    default_locale: Locale,
    locales: BTreeMap<Locale, LocaleResources>,
}

impl LocaleTable {
    /// Create a table holding only the default locale's resources
    pub fn new(default_resources: LocaleResources) -> Self {
        let mut locales = BTreeMap::new();
        locales.insert(Locale::default(), default_resources);
        Self {
            default_locale: Locale::default(),
            locales,
        }
    }

    /// The table with every bundled locale (en, ru, kz)
    pub fn bundled() -> WalletResult<Self> {
        let mut locales = BTreeMap::new();
        for (code, json) in BUNDLED {
            let resources = LocaleResources::from_json(json).map_err(|e| {
                WalletError::Config(format!("Bundled locale '{}' is malformed: {}", code, e))
            })?;
            locales.insert(Locale::new(code), resources);
        }
        Ok(Self {
            default_locale: Locale::default(),
            locales,
        })
    }

    pub fn default_locale(&self) -> &Locale {
        &self.default_locale
    }

    /// Whether `locale` has a resource set
    pub fn contains(&self, locale: &Locale) -> bool {
        self.locales.contains_key(locale)
    }

    /// Every locale with a resource set, sorted by code
    pub fn locales(&self) -> impl Iterator<Item = &Locale> {
        self.locales.keys()
    }

    /// Raw lookup with no fallback
    pub fn lookup(&self, locale: &Locale, namespace: &str, key: &str) -> Option<&str> {
        self.locales
            .get(locale)
            .and_then(|resources| resources.get(namespace, key))
    }

    /// Lookup with a single fallback to the default locale, then to the key
    pub fn translate<'a>(&'a self, locale: &Locale, namespace: &str, key: &'a str) -> &'a str {
        self.lookup(locale, namespace, key)
            .or_else(|| {
                debug!(%locale, namespace, key, "falling back to default locale");
                self.lookup(&self.default_locale, namespace, key)
            })
            .unwrap_or(key)
    }

    /// Human-readable name of a locale in its own language
    pub fn language_name<'a>(&'a self, locale: &'a Locale) -> &'a str {
        self.lookup(locale, "meta", "language_name")
            .unwrap_or_else(|| locale.as_str())
    }

    /// Keys the default locale defines that `locale` does not, as `namespace.key`
    pub fn missing_keys(&self, locale: &Locale) -> Vec<String> {
        let Some(defaults) = self.locales.get(&self.default_locale) else {
            return Vec::new();
        };
        match self.locales.get(locale) {
            Some(resources) => uncovered_keys(defaults, resources),
            None => uncovered_keys(defaults, &LocaleResources::default()),
        }
    }

    /// Add a locale, or replace an existing one
    ///
    /// The resource set must cover every key of the default locale. Replacing
    /// the default locale itself is rejected if any other registered locale
    /// would stop covering it.
    pub fn register(&mut self, locale: Locale, resources: LocaleResources) -> WalletResult<()> {
        if locale == self.default_locale {
            for (other, existing) in self.locales.iter().filter(|(code, _)| **code != locale) {
                let missing = uncovered_keys(&resources, existing);
                if !missing.is_empty() {
                    return Err(incomplete(other, &missing));
                }
            }
        } else if let Some(defaults) = self.locales.get(&self.default_locale) {
            let missing = uncovered_keys(defaults, &resources);
            if !missing.is_empty() {
                return Err(incomplete(&locale, &missing));
            }
        }

        self.locales.insert(locale, resources);
        Ok(())
    }
}

/// Keys of `reference` that `candidate` does not define, as `namespace.key`
fn uncovered_keys(reference: &LocaleResources, candidate: &LocaleResources) -> Vec<String> {
    reference
        .keys()
        .filter(|(ns, key)| candidate.get(ns, key).is_none())
        .map(|(ns, key)| format!("{}.{}", ns, key))
        .collect()
}

fn incomplete(locale: &Locale, missing: &[String]) -> WalletError {
    WalletError::Config(format!(
        "Locale '{}' is missing {} key(s): {}",
        locale,
        missing.len(),
        missing.join(", ")
    ))
}
