//! End-to-end page sessions: load, apply, mount, toggle, reload.

use std::cell::Cell;
use std::rc::Rc;

use nightfall::{
    CssRule, Document, EffectiveTheme, EngineConfig, FileStorage, FixedScheme, MemoryStorage,
    PreferenceStore, Storage, StyleSheet, Theme, ThemeContext,
};

const SITE_CSS: &str = r#"
body {
    --token-bg: white;
    margin: 0;
}

@media (prefers-color-scheme: dark) {
    body {
        --token-bg: black;
    }
}

@media (prefers-color-scheme: dark) {
    body[data-theme="light"] {
        --token-bg: white;
    }
}
"#;

fn session(storage: MemoryStorage, scheme: FixedScheme) -> ThemeContext {
    let store = PreferenceStore::new("theme", storage);
    let document = Document::new().with_stylesheet(StyleSheet::parse(SITE_CSS));
    ThemeContext::new(EngineConfig::default(), store, document, scheme)
}

fn override_text(ctx: &ThemeContext) -> String {
    let doc = ctx.document();
    let styles: Vec<_> = doc.styles_with_id("theme-overrides").collect();
    assert_eq!(styles.len(), 1, "expected exactly one override element");
    styles[0].text().to_string()
}

#[test]
fn test_tokens_are_rekeyed_to_the_marking_attribute() {
    let ctx = session(MemoryStorage::new(), FixedScheme::light());
    let report = ctx.apply();

    assert_eq!(report.light.get("--token-bg"), Some("white"));
    assert_eq!(report.dark.get("--token-bg"), Some("black"));

    let css = override_text(&ctx);
    let rules = StyleSheet::parse(&css);
    let texts: Vec<String> = rules
        .css_rules()
        .unwrap()
        .iter()
        .map(CssRule::css_text)
        .collect();

    assert_eq!(
        texts,
        vec![
            r#"[data-theme="light"] { --token-bg: white; }"#,
            r#"[data-theme="dark"] { --token-bg: black; }"#,
            r#"[data-theme="light"] { color-scheme: light; }"#,
            r#"[data-theme="dark"] { color-scheme: dark; }"#,
        ]
    );
}

#[test]
fn test_apply_twice_keeps_one_override() {
    let ctx = session(MemoryStorage::new(), FixedScheme::dark());
    ctx.apply();
    let first = override_text(&ctx);
    ctx.apply();
    assert_eq!(override_text(&ctx), first);
}

#[test]
fn test_second_stylesheet_overrides_first() {
    let store = PreferenceStore::new("theme", MemoryStorage::new());
    let document = Document::new()
        .with_stylesheet(StyleSheet::parse("body { --token-bg: white; --token-fg: black; }"))
        .with_stylesheet(StyleSheet::parse("body { --token-bg: linen; }"));
    let ctx = ThemeContext::new(EngineConfig::default(), store, document, FixedScheme::light());

    let report = ctx.apply();
    assert_eq!(report.light.to_string(), "--token-bg: linen;");
}

#[test]
fn test_restricted_stylesheet_does_not_stop_the_page() {
    let store = PreferenceStore::new("theme", MemoryStorage::new());
    let document = Document::new()
        .with_stylesheet(StyleSheet::restricted("https://cdn.example/vendor.css"))
        .with_stylesheet(StyleSheet::parse(SITE_CSS));
    let ctx = ThemeContext::new(EngineConfig::default(), store, document, FixedScheme::light());

    let report = ctx.apply();
    assert_eq!(report.skipped_stylesheets, 1);
    assert_eq!(report.light.get("--token-bg"), Some("white"));
}

#[test]
fn test_fresh_visit_with_dark_os() {
    let storage = MemoryStorage::new();
    let ctx = session(storage.clone(), FixedScheme::dark());

    let toggle = ctx.mount();
    assert_eq!(toggle.theme(), Theme::Dark);
    assert_eq!(storage.get("theme").as_deref(), Some("dark"));
}

#[test]
fn test_toggle_updates_everything_once() {
    let storage = MemoryStorage::with_entry("theme", "light");
    let ctx = session(storage.clone(), FixedScheme::dark());
    ctx.apply();
    let toggle = ctx.mount();

    let events = Rc::new(Cell::new(0));
    let counter = Rc::clone(&events);
    let sub = ctx.events().subscribe(move || counter.set(counter.get() + 1));

    assert_eq!(toggle.toggle(), EffectiveTheme::Dark);
    assert_eq!(events.get(), 1);
    assert_eq!(storage.get("theme").as_deref(), Some("dark"));
    {
        let doc = ctx.document();
        assert_eq!(doc.root().unwrap().attribute("data-theme"), Some("dark"));
        assert_eq!(doc.body().unwrap().attribute("data-theme"), Some("dark"));
    }

    sub.release();
    toggle.toggle();
    assert_eq!(events.get(), 1);
}

#[test]
fn test_choice_survives_reload_through_file_storage() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs.json");

    let first_visit = {
        let store = PreferenceStore::new("theme", FileStorage::open(&path).unwrap());
        ThemeContext::new(
            EngineConfig::default(),
            store,
            Document::new(),
            FixedScheme::light(),
        )
    };
    first_visit.apply();
    first_visit.mount().toggle();
    first_visit.flush().unwrap();

    let store = PreferenceStore::new("theme", FileStorage::open(&path).unwrap());
    let second_visit = ThemeContext::new(
        EngineConfig::default(),
        store,
        Document::new(),
        FixedScheme::light(),
    );
    let report = second_visit.apply();

    assert_eq!(report.requested, Theme::Dark);
    assert_eq!(report.effective, EffectiveTheme::Dark);
}

#[test]
fn test_custom_config_names() {
    let config = EngineConfig::from_yaml(
        r#"
storage_key: site-theme
attribute: data-mode
style_id: site-overrides
"#,
    )
    .unwrap();
    let storage = MemoryStorage::new();
    let store = PreferenceStore::new(config.storage_key.clone(), storage.clone());
    let ctx = ThemeContext::new(config, store, Document::new(), FixedScheme::dark());

    ctx.apply();

    assert_eq!(storage.get("site-theme").as_deref(), Some("dark"));
    let doc = ctx.document();
    assert_eq!(doc.body().unwrap().attribute("data-mode"), Some("dark"));
    assert_eq!(doc.styles_with_id("site-overrides").count(), 1);
}
