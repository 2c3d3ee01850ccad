//! # Nightfall - light/dark theme synchronization
//!
//! `nightfall` resolves a user's light/dark preference, keeps it in sync
//! between a persistent store, the page and any number of toggle controls,
//! and re-emits the page's themed CSS custom properties so an explicit choice
//! overrides the OS color scheme.
//!
//! ## Core Concepts
//!
//! - [`Theme`]: the preference, `dark`, `light` or `system`
//! - [`EffectiveTheme`]: the resolved value, `dark` or `light`
//! - [`PreferenceStore`]: the single persisted preference, over any [`Storage`]
//! - [`ThemeResolver`]: resolves `system` through a [`SchemeQuery`]
//! - [`TokenExtractor`]: collects light and dark custom properties from stylesheets
//! - [`StyleInjector`]: installs the singleton override `<style>` element
//! - [`ThemeApplier`]: the page-load pipeline tying the above together
//! - [`ThemeContext`] / [`ToggleBridge`]: shared state for toggle controls
//!
//! ## Quick Start
//!
//! ```rust
//! use nightfall::{
//!     Document, EffectiveTheme, EngineConfig, FixedScheme, MemoryStorage, PreferenceStore,
//!     Storage, StyleSheet, ThemeContext,
//! };
//!
//! let css = r#"
//!     body { --token-bg: white; }
//!     @media (prefers-color-scheme: dark) {
//!         body { --token-bg: black; }
//!     }
//! "#;
//! let document = Document::new().with_stylesheet(StyleSheet::parse(css));
//!
//! let storage = MemoryStorage::new();
//! let store = PreferenceStore::new("theme", storage.clone());
//! let ctx = ThemeContext::new(EngineConfig::default(), store, document, FixedScheme::dark());
//!
//! // Run before first paint.
//! let report = ctx.apply();
//! assert_eq!(report.effective, EffectiveTheme::Dark);
//! assert_eq!(storage.get("theme").as_deref(), Some("dark"));
//!
//! let overrides = ctx.document().styles_with_id("theme-overrides").count();
//! assert_eq!(overrides, 1);
//!
//! // A toggle control.
//! let toggle = ctx.mount();
//! assert_eq!(toggle.toggle(), EffectiveTheme::Light);
//! assert_eq!(storage.get("theme").as_deref(), Some("light"));
//! ```
//!
//! ## Failure Model
//!
//! Nothing in the page pipeline is fatal. Invalid stored values are deleted,
//! unreadable stylesheets are skipped with a `tracing` warning, missing root
//! or body elements are ignored, and a page without themed rules simply gets
//! empty token blocks. Only the file-backed edges ([`FileStorage`],
//! [`EngineConfig::from_file`]) return errors.

pub mod apply;
pub mod config;
pub mod dom;
mod error;
pub mod inject;
pub mod prelude;
pub mod store;
pub mod theme;
pub mod tokens;
pub mod toggle;

pub use error::{ConfigError, StorageError, StylesheetError};

pub use apply::{ApplyReport, ThemeApplier};
pub use config::EngineConfig;
pub use dom::{
    CssRule, Declaration, Document, Element, HeadNode, MediaRule, StyleElement, StyleRule,
    StyleSheet,
};
pub use inject::StyleInjector;
pub use store::{FileStorage, MemoryStorage, PreferenceStore, Storage};
pub use theme::{
    EffectiveTheme, FixedScheme, OsScheme, SchemeQuery, Theme, ThemeResolver, UnknownTheme,
};
pub use tokens::{Token, TokenExtractor, TokenSet};
pub use toggle::{
    Subscription, ThemeCell, ThemeContext, ThemeEvents, ToggleBridge, THEME_CHANGED_EVENT,
};
