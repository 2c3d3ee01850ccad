//! Page-load orchestration.
//!
//! [`ThemeApplier::run`] is the whole load-time pipeline:
//!
//! 1. sanitize the stored preference,
//! 2. read it,
//! 3. resolve it to a concrete theme,
//! 4. write the concrete theme back (always, so `system` never stays stored),
//! 5. mark the root and body elements,
//! 6. extract light and dark tokens from the stylesheets,
//! 7. install the override style element.
//!
//! Every step is synchronous and none can fail, so the pipeline can run before
//! first paint. Running it again yields the same document.

use serde::Serialize;

use crate::config::EngineConfig;
use crate::dom::Document;
use crate::inject::StyleInjector;
use crate::store::PreferenceStore;
use crate::theme::{EffectiveTheme, SchemeQuery, Theme, ThemeResolver};
use crate::tokens::{TokenExtractor, TokenSet};

/// What a [`ThemeApplier::run`] did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplyReport {
    /// The preference read from the store after sanitizing.
    pub requested: Theme,
    /// The theme now stored and marked on the document.
    pub effective: EffectiveTheme,
    pub light: TokenSet,
    pub dark: TokenSet,
    /// Stylesheets skipped because their rules were unreadable.
    pub skipped_stylesheets: usize,
}

/// Runs the load-time pipeline against a store and a document.
#[derive(Debug, Clone, Copy)]
pub struct ThemeApplier<'a> {
    config: &'a EngineConfig,
}

impl<'a> ThemeApplier<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    pub fn run(
        &self,
        store: &mut PreferenceStore,
        document: &mut Document,
        scheme: &dyn SchemeQuery,
    ) -> ApplyReport {
        store.sanitize();
        let requested = store.read();
        let effective = ThemeResolver::new(scheme).resolve_effective(requested);
        store.write(effective);

        document.mark(&self.config.attribute, effective.as_str());

        let ((light, dark), skipped_stylesheets) =
            TokenExtractor::new(self.config).scan_counting(document);
        StyleInjector::new(self.config).install(document, &light, &dark);

        tracing::debug!(%requested, %effective, skipped_stylesheets, "applied theme");

        ApplyReport {
            requested,
            effective,
            light,
            dark,
            skipped_stylesheets,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::StyleSheet;
    use crate::store::{MemoryStorage, Storage};
    use crate::theme::FixedScheme;

    fn store(storage: &MemoryStorage) -> PreferenceStore {
        PreferenceStore::new("theme", storage.clone())
    }

    #[test]
    fn test_system_preference_is_replaced_by_concrete() {
        let config = EngineConfig::default();
        let storage = MemoryStorage::with_entry("theme", "system");
        let mut doc = Document::new();

        let report =
            ThemeApplier::new(&config).run(&mut store(&storage), &mut doc, &FixedScheme::dark());

        assert_eq!(report.requested, Theme::System);
        assert_eq!(report.effective, EffectiveTheme::Dark);
        assert_eq!(storage.get("theme").as_deref(), Some("dark"));
        assert_eq!(doc.root().unwrap().attribute("data-theme"), Some("dark"));
        assert_eq!(doc.body().unwrap().attribute("data-theme"), Some("dark"));
    }

    #[test]
    fn test_invalid_preference_sanitized_then_resolved() {
        let config = EngineConfig::default();
        let storage = MemoryStorage::with_entry("theme", "solarized");
        let mut doc = Document::new();

        let report =
            ThemeApplier::new(&config).run(&mut store(&storage), &mut doc, &FixedScheme::light());

        assert_eq!(report.requested, Theme::System);
        assert_eq!(storage.get("theme").as_deref(), Some("light"));
    }

    #[test]
    fn test_concrete_preference_rewritten_and_wins_over_system() {
        let config = EngineConfig::default();
        let storage = MemoryStorage::with_entry("theme", "light");
        let mut doc = Document::new();

        let report =
            ThemeApplier::new(&config).run(&mut store(&storage), &mut doc, &FixedScheme::dark());

        assert_eq!(report.effective, EffectiveTheme::Light);
        assert_eq!(storage.get("theme").as_deref(), Some("light"));
    }

    #[test]
    fn test_missing_body_is_not_an_error() {
        let config = EngineConfig::default();
        let storage = MemoryStorage::new();
        let mut doc = Document::new().without_body();

        ThemeApplier::new(&config).run(&mut store(&storage), &mut doc, &FixedScheme::dark());

        assert_eq!(doc.root().unwrap().attribute("data-theme"), Some("dark"));
        assert_eq!(doc.styles_with_id("theme-overrides").count(), 1);
    }

    #[test]
    fn test_rerun_keeps_single_override() {
        let config = EngineConfig::default();
        let storage = MemoryStorage::new();
        let mut doc = Document::new()
            .with_stylesheet(StyleSheet::parse("body { --token-bg: white; }"));
        let applier = ThemeApplier::new(&config);

        let first = applier.run(&mut store(&storage), &mut doc, &FixedScheme::light());
        let snapshot = doc.clone();
        let second = applier.run(&mut store(&storage), &mut doc, &FixedScheme::light());

        assert_eq!(first.requested, Theme::System);
        assert_eq!(second.requested, Theme::Light);
        assert_eq!(first.effective, second.effective);
        assert_eq!(first.light, second.light);
        assert_eq!(doc, snapshot);
        assert_eq!(doc.styles_with_id("theme-overrides").count(), 1);
    }
}
