//! Presentation context
//!
//! Owns the active theme and locale for the whole application. Created once
//! at the root and passed by reference to every screen. Changes update the
//! in-memory value first, notify subscribers synchronously, and only then
//! write through to the preference store, so a reader never sees a value
//! older than the last call.

use std::fmt;

use tracing::{debug, info, warn};

use super::theme::{Palette, Theme};
use crate::error::{WalletError, WalletResult};
use crate::i18n::{Locale, LocaleTable};
use crate::storage::{PreferenceKey, PreferenceStore};

/// A change pushed to subscribers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextChange {
    Theme(Theme),
    Locale(Locale),
}

/// Result of writing a changed preference through to the store
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistOutcome {
    /// Value changed and was persisted
    Saved,
    /// Value was already active; nothing written, nobody notified
    Unchanged,
    /// Value changed in memory but will not survive a restart
    Failed(String),
}

impl PersistOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Handle returned by [`PresentationContext::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Consistent view of both values at one instant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation {
    pub theme: Theme,
    pub locale: Locale,
}

type Callback = Box<dyn FnMut(&ContextChange)>;

/// Single source of truth for theme and locale
pub struct PresentationContext<S: PreferenceStore> {
    store: S,
    table: LocaleTable,
    theme: Theme,
    locale: Locale,
    subscribers: Vec<(SubscriptionId, Callback)>,
    next_subscription: u64,
}

impl<S: PreferenceStore> PresentationContext<S> {
    /// Load theme and locale from `store`, falling back to light/en
    ///
    /// Never fails: unreadable, unparsable or unknown stored values are
    /// logged and replaced by defaults.
    pub fn initialize(store: S, table: LocaleTable) -> Self {
        let theme = match store.get(PreferenceKey::Theme) {
            Ok(Some(raw)) => raw.parse().unwrap_or_else(|e| {
                warn!(error = %e, "stored theme is invalid, using default");
                Theme::default()
            }),
            Ok(None) => Theme::default(),
            Err(e) => {
                warn!(error = %e, "could not read theme preference, using default");
                Theme::default()
            }
        };

        let locale = match store.get(PreferenceKey::Locale) {
            Ok(Some(raw)) => {
                let locale = Locale::new(raw);
                if table.contains(&locale) {
                    locale
                } else {
                    warn!(%locale, "stored locale has no resources, using default");
                    table.default_locale().clone()
                }
            }
            Ok(None) => table.default_locale().clone(),
            Err(e) => {
                warn!(error = %e, "could not read locale preference, using default");
                table.default_locale().clone()
            }
        };

        debug!(%theme, %locale, "presentation context initialized");

        Self {
            store,
            table,
            theme,
            locale,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn palette(&self) -> Palette {
        self.theme.palette()
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn table(&self) -> &LocaleTable {
        &self.table
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn snapshot(&self) -> Presentation {
        Presentation {
            theme: self.theme,
            locale: self.locale.clone(),
        }
    }

    /// Switch theme; see [`PersistOutcome`] for what happened on disk
    pub fn set_theme(&mut self, next: Theme) -> PersistOutcome {
        if next == self.theme {
            return PersistOutcome::Unchanged;
        }

        self.theme = next;
        info!(theme = %next, "theme changed");
        self.notify(&ContextChange::Theme(next));
        self.persist(PreferenceKey::Theme, next.as_str())
    }

    pub fn toggle_theme(&mut self) -> PersistOutcome {
        self.set_theme(self.theme.toggled())
    }

    /// Switch locale
    ///
    /// # Errors
    ///
    /// `UnknownLocale` when the table has no resources for `next`; state is
    /// left untouched.
    pub fn set_locale(&mut self, next: Locale) -> WalletResult<PersistOutcome> {
        if !self.table.contains(&next) {
            return Err(WalletError::UnknownLocale(next.to_string()));
        }
        if next == self.locale {
            return Ok(PersistOutcome::Unchanged);
        }

        self.locale = next.clone();
        info!(locale = %next, "locale changed");
        self.notify(&ContextChange::Locale(next.clone()));
        Ok(self.persist(PreferenceKey::Locale, next.as_str()))
    }

    /// Translate `namespace.key` in the active locale; never fails
    pub fn translate<'a>(&'a self, namespace: &str, key: &'a str) -> &'a str {
        self.table.translate(&self.locale, namespace, key)
    }

    /// Register a callback fired after every change
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&ContextChange) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove a callback; returns false if it was already gone
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub, _)| *sub != id);
        self.subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    fn notify(&mut self, change: &ContextChange) {
        for (_, callback) in self.subscribers.iter_mut() {
            callback(change);
        }
    }

    fn persist(&mut self, key: PreferenceKey, value: &str) -> PersistOutcome {
        let written = self
            .store
            .set(key, value)
            .and_then(|()| self.restore_sibling(key));
        match written {
            Ok(()) => PersistOutcome::Saved,
            Err(e) => {
                warn!(%key, value, error = %e, "preference not persisted");
                PersistOutcome::Failed(e.to_string())
            }
        }
    }

    /// Rewrite the other preference if the store no longer holds the active
    /// value, e.g. after it recovered from an unreadable file
    fn restore_sibling(&mut self, written: PreferenceKey) -> WalletResult<()> {
        let (other, current, is_default) = match written {
            PreferenceKey::Theme => (
                PreferenceKey::Locale,
                self.locale.as_str().to_string(),
                &self.locale == self.table.default_locale(),
            ),
            PreferenceKey::Locale => (
                PreferenceKey::Theme,
                self.theme.as_str().to_string(),
                self.theme == Theme::default(),
            ),
        };

        match self.store.get(other) {
            Ok(Some(stored)) if stored == current => Ok(()),
            Ok(None) if is_default => Ok(()),
            _ => {
                debug!(key = %other, value = %current, "restoring preference missing from store");
                self.store.set(other, &current)
            }
        }
    }
}

impl<S: PreferenceStore + fmt::Debug> fmt::Debug for PresentationContext<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PresentationContext")
            .field("store", &self.store)
            .field("theme", &self.theme)
            .field("locale", &self.locale)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryPreferenceStore;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Store whose writes always fail
    #[derive(Debug, Default)]
    struct ReadOnlyStore {
        inner: MemoryPreferenceStore,
    }

    impl PreferenceStore for ReadOnlyStore {
        fn get(&self, key: PreferenceKey) -> WalletResult<Option<String>> {
            self.inner.get(key)
        }

        fn set(&mut self, _key: PreferenceKey, _value: &str) -> WalletResult<()> {
            Err(WalletError::Storage("disk full".into()))
        }
    }

    /// Store whose reads always fail
    #[derive(Debug, Default)]
    struct UnreadableStore;

    impl PreferenceStore for UnreadableStore {
        fn get(&self, _key: PreferenceKey) -> WalletResult<Option<String>> {
            Err(WalletError::Storage("corrupt".into()))
        }

        fn set(&mut self, _key: PreferenceKey, _value: &str) -> WalletResult<()> {
            Ok(())
        }
    }

    fn context_with(store: MemoryPreferenceStore) -> PresentationContext<MemoryPreferenceStore> {
        PresentationContext::initialize(store, LocaleTable::bundled().unwrap())
    }

    fn stored(ctx: &PresentationContext<MemoryPreferenceStore>, key: PreferenceKey) -> Option<String> {
        ctx.store().get(key).unwrap()
    }

    #[test]
    fn test_initialize_defaults_when_absent() {
        let ctx = context_with(MemoryPreferenceStore::new());
        assert_eq!(ctx.theme(), Theme::Light);
        assert_eq!(ctx.locale(), &Locale::en());
    }

    #[test]
    fn test_initialize_reads_store() {
        let ctx = context_with(
            MemoryPreferenceStore::new()
                .with(PreferenceKey::Theme, "dark")
                .with(PreferenceKey::Locale, "kz"),
        );
        assert_eq!(ctx.theme(), Theme::Dark);
        assert_eq!(ctx.locale(), &Locale::kz());
    }

    #[test]
    fn test_initialize_ignores_garbage() {
        let ctx = context_with(
            MemoryPreferenceStore::new()
                .with(PreferenceKey::Theme, "neon")
                .with(PreferenceKey::Locale, "xx"),
        );
        assert_eq!(ctx.theme(), Theme::Light);
        assert_eq!(ctx.locale(), &Locale::en());

        let ctx = PresentationContext::initialize(UnreadableStore, LocaleTable::bundled().unwrap());
        assert_eq!(ctx.snapshot(), Presentation { theme: Theme::Light, locale: Locale::en() });
    }

    #[test]
    fn test_set_theme_writes_through() {
        let mut ctx = context_with(MemoryPreferenceStore::new());
        assert_eq!(ctx.set_theme(Theme::Dark), PersistOutcome::Saved);
        assert_eq!(ctx.theme(), Theme::Dark);
        assert_eq!(stored(&ctx, PreferenceKey::Theme).as_deref(), Some("dark"));

        assert_eq!(ctx.set_theme(Theme::Dark), PersistOutcome::Unchanged);
        assert_eq!(ctx.toggle_theme(), PersistOutcome::Saved);
        assert_eq!(ctx.theme(), Theme::Light);
    }

    #[test]
    fn test_subscribers_see_new_theme_before_write() {
        let mut ctx = PresentationContext::initialize(
            ReadOnlyStore::default(),
            LocaleTable::bundled().unwrap(),
        );
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        ctx.subscribe(move |change| sink.borrow_mut().push(change.clone()));

        let outcome = ctx.set_theme(Theme::Dark);

        // Write failed, but every consumer already reads dark
        assert!(outcome.is_failed());
        assert_eq!(ctx.theme(), Theme::Dark);
        assert_eq!(seen.borrow().as_slice(), &[ContextChange::Theme(Theme::Dark)]);
    }

    #[test]
    fn test_set_locale_changes_translation() {
        let mut ctx = context_with(MemoryPreferenceStore::new());
        assert_eq!(ctx.translate("common", "cancel"), "Cancel");

        assert_eq!(ctx.set_locale(Locale::ru()).unwrap(), PersistOutcome::Saved);
        assert_eq!(ctx.translate("common", "cancel"), "Отмена");
        assert_eq!(stored(&ctx, PreferenceKey::Locale).as_deref(), Some("ru"));
    }

    #[test]
    fn test_unknown_locale_leaves_state_unchanged() {
        let mut ctx = context_with(MemoryPreferenceStore::new().with(PreferenceKey::Locale, "kz"));
        let before: Vec<String> = ["save", "cancel", "confirm", "missing_key"]
            .iter()
            .map(|key| ctx.translate("common", key).to_string())
            .collect();
        let notified = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&notified);
        ctx.subscribe(move |_| *counter.borrow_mut() += 1);

        let err = ctx.set_locale(Locale::new("fr")).unwrap_err();

        assert!(err.is_unknown_locale());
        assert_eq!(ctx.locale(), &Locale::kz());
        let after: Vec<String> = ["save", "cancel", "confirm", "missing_key"]
            .iter()
            .map(|key| ctx.translate("common", key).to_string())
            .collect();
        assert_eq!(before, after);
        assert_eq!(*notified.borrow(), 0);
        assert_eq!(stored(&ctx, PreferenceKey::Locale).as_deref(), Some("kz"));
    }

    #[test]
    fn test_rapid_locale_changes_converge_on_last() {
        let mut ctx = context_with(MemoryPreferenceStore::new());
        let _ = ctx.set_locale(Locale::ru()).unwrap();
        let _ = ctx.set_locale(Locale::kz()).unwrap();

        assert_eq!(ctx.locale(), &Locale::kz());
        assert_eq!(stored(&ctx, PreferenceKey::Locale).as_deref(), Some("kz"));
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let mut ctx = context_with(MemoryPreferenceStore::new());
        let count = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&count);
        let id = ctx.subscribe(move |_| *counter.borrow_mut() += 1);

        let _ = ctx.toggle_theme();
        assert!(ctx.unsubscribe(id));
        assert!(!ctx.unsubscribe(id));
        let _ = ctx.toggle_theme();

        assert_eq!(*count.borrow(), 1);
        assert_eq!(ctx.subscriber_count(), 0);
    }

    #[test]
    fn test_write_after_corrupt_file_keeps_other_preference() {
        use crate::storage::JsonPreferenceStore;
        use tempfile::TempDir;

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("preferences.json");
        let mut ctx = PresentationContext::initialize(
            JsonPreferenceStore::new(&path),
            LocaleTable::bundled().unwrap(),
        );
        let _ = ctx.set_locale(Locale::ru()).unwrap();

        std::fs::write(&path, "{ truncated").unwrap();
        assert_eq!(ctx.set_theme(Theme::Dark), PersistOutcome::Saved);

        let reopened = JsonPreferenceStore::new(&path);
        assert_eq!(reopened.get(PreferenceKey::Theme).unwrap().as_deref(), Some("dark"));
        assert_eq!(reopened.get(PreferenceKey::Locale).unwrap().as_deref(), Some("ru"));
    }

    #[test]
    fn test_default_sibling_is_not_written() {
        let mut ctx = context_with(MemoryPreferenceStore::new());
        let _ = ctx.set_theme(Theme::Dark);
        assert_eq!(stored(&ctx, PreferenceKey::Locale), None);
    }
}
