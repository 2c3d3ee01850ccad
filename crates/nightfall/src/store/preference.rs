use crate::error::StorageError;
use crate::theme::{EffectiveTheme, Theme};

use super::backend::Storage;

/// The single persisted theme preference.
///
/// Wraps a [`Storage`] backend and one fixed key. The stored value is kept
/// either absent or a valid [`Theme`] string by [`sanitize`](Self::sanitize),
/// and every resolved write stores a concrete [`EffectiveTheme`].
pub struct PreferenceStore {
    key: String,
    storage: Box<dyn Storage>,
}

impl std::fmt::Debug for PreferenceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreferenceStore")
            .field("key", &self.key)
            .field("value", &self.raw())
            .finish()
    }
}

impl PreferenceStore {
    pub fn new(key: impl Into<String>, storage: impl Storage + 'static) -> Self {
        Self {
            key: key.into(),
            storage: Box::new(storage),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// The stored string, exactly as persisted.
    pub fn raw(&self) -> Option<String> {
        self.storage.get(&self.key)
    }

    /// Deletes the stored value if it is not `dark`, `light` or `system`.
    pub fn sanitize(&mut self) {
        if let Some(value) = self.raw() {
            if value.parse::<Theme>().is_err() {
                tracing::debug!(key = %self.key, %value, "removing invalid stored theme");
                self.storage.remove(&self.key);
            }
        }
    }

    /// Reads the preference.
    ///
    /// Only `dark` and `light` are returned as-is. Anything else, including an
    /// absent entry and a literal `system`, reads as [`Theme::System`].
    pub fn read(&self) -> Theme {
        match self.raw().and_then(|value| value.parse::<Theme>().ok()) {
            Some(theme @ (Theme::Dark | Theme::Light)) => theme,
            _ => Theme::System,
        }
    }

    pub fn write(&mut self, theme: EffectiveTheme) {
        self.storage.set(&self.key, theme.as_str());
    }

    /// Asks the backend to persist pending writes.
    pub fn flush(&mut self) -> Result<(), StorageError> {
        self.storage.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStorage;
    use proptest::prelude::*;

    fn store_with(value: Option<&str>) -> (PreferenceStore, MemoryStorage) {
        let storage = match value {
            Some(v) => MemoryStorage::with_entry("theme", v),
            None => MemoryStorage::new(),
        };
        (PreferenceStore::new("theme", storage.clone()), storage)
    }

    #[test]
    fn test_read_concrete_values() {
        assert_eq!(store_with(Some("dark")).0.read(), Theme::Dark);
        assert_eq!(store_with(Some("light")).0.read(), Theme::Light);
    }

    #[test]
    fn test_read_absent_and_system_as_system() {
        assert_eq!(store_with(None).0.read(), Theme::System);
        assert_eq!(store_with(Some("system")).0.read(), Theme::System);
    }

    #[test]
    fn test_read_invalid_as_system_without_deleting() {
        let (store, storage) = store_with(Some("sepia"));
        assert_eq!(store.read(), Theme::System);
        assert_eq!(storage.get("theme").as_deref(), Some("sepia"));
    }

    #[test]
    fn test_sanitize_keeps_valid_values() {
        for value in ["dark", "light", "system"] {
            let (mut store, storage) = store_with(Some(value));
            store.sanitize();
            assert_eq!(storage.get("theme").as_deref(), Some(value));
        }
    }

    #[test]
    fn test_sanitize_absent_is_noop() {
        let (mut store, storage) = store_with(None);
        store.sanitize();
        assert!(storage.is_empty());
    }

    #[test]
    fn test_write_overwrites() {
        let (mut store, storage) = store_with(Some("system"));
        store.write(EffectiveTheme::Dark);
        assert_eq!(storage.get("theme").as_deref(), Some("dark"));
        store.write(EffectiveTheme::Light);
        assert_eq!(store.read(), Theme::Light);
    }

    #[test]
    fn test_sanitize_only_touches_own_key() {
        let storage = MemoryStorage::with_entry("unrelated", "sepia");
        let mut store = PreferenceStore::new("theme", storage.clone());
        store.sanitize();
        assert_eq!(storage.get("unrelated").as_deref(), Some("sepia"));
    }

    proptest! {
        #[test]
        fn prop_sanitize_removes_invalid(value in "\\PC*") {
            prop_assume!(value.parse::<Theme>().is_err());

            let (mut store, storage) = store_with(Some(value.as_str()));
            store.sanitize();

            prop_assert_eq!(storage.get("theme"), None);
            prop_assert_eq!(store.read(), Theme::System);
        }
    }
}
