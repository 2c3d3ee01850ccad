//! The override stylesheet.
//!
//! Extracted token sets are re-emitted keyed to the marking attribute, so the
//! page follows the resolved theme rather than the OS media query:
//!
//! ```css
//! [data-theme="light"] {
//!   --token-bg: white;
//! }
//! [data-theme="dark"] {
//!   --token-bg: black;
//! }
//! [data-theme="light"] {
//!   color-scheme: light;
//! }
//! [data-theme="dark"] {
//!   color-scheme: dark;
//! }
//! ```
//!
//! The sheet is installed as one `<style>` element identified by the
//! configured style id. Installing again replaces it.

use std::fmt::Write as _;

use crate::config::EngineConfig;
use crate::dom::{Document, StyleElement};
use crate::theme::EffectiveTheme;
use crate::tokens::TokenSet;

/// Builds and installs the singleton override style element.
#[derive(Debug, Clone, Copy)]
pub struct StyleInjector<'a> {
    config: &'a EngineConfig,
}

impl<'a> StyleInjector<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    /// The override CSS text: token blocks for light and dark, then the two
    /// `color-scheme` rules.
    pub fn compose(&self, light: &TokenSet, dark: &TokenSet) -> String {
        let mut css = String::new();
        for (theme, tokens) in [(EffectiveTheme::Light, light), (EffectiveTheme::Dark, dark)] {
            let declarations = tokens.iter().map(|t| (t.name.as_str(), t.value.as_str()));
            self.write_block(&mut css, theme, declarations);
        }
        for theme in [EffectiveTheme::Light, EffectiveTheme::Dark] {
            self.write_block(&mut css, theme, [("color-scheme", theme.as_str())]);
        }
        css
    }

    fn write_block<'d>(
        &self,
        css: &mut String,
        theme: EffectiveTheme,
        declarations: impl IntoIterator<Item = (&'d str, &'d str)>,
    ) {
        // Writing into a String cannot fail.
        let _ = writeln!(css, "[{}=\"{}\"] {{", self.config.attribute, theme);
        for (name, value) in declarations {
            let _ = writeln!(css, "  {}: {};", name, value);
        }
        css.push_str("}\n");
    }

    /// Installs the override element, replacing any previous instance.
    pub fn install(&self, document: &mut Document, light: &TokenSet, dark: &TokenSet) {
        let css = self.compose(light, dark);
        document.replace_style(StyleElement::with_id(self.config.style_id.as_str(), css));
        tracing::debug!(
            id = %self.config.style_id,
            light = light.len(),
            dark = dark.len(),
            "installed theme override styles"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::CssRule;

    fn tokens(pairs: &[(&str, &str)]) -> TokenSet {
        let mut set = TokenSet::new();
        for (name, value) in pairs {
            set.push(*name, *value);
        }
        set
    }

    #[test]
    fn test_compose_four_rules() {
        let config = EngineConfig::default();
        let css = StyleInjector::new(&config).compose(
            &tokens(&[("--token-bg", "white"), ("--token-fg", "#111")]),
            &tokens(&[("--token-bg", "black")]),
        );

        insta::assert_snapshot!(css, @r#"
        [data-theme="light"] {
          --token-bg: white;
          --token-fg: #111;
        }
        [data-theme="dark"] {
          --token-bg: black;
        }
        [data-theme="light"] {
          color-scheme: light;
        }
        [data-theme="dark"] {
          color-scheme: dark;
        }
        "#);
    }

    #[test]
    fn test_compose_empty_sets_still_valid() {
        let config = EngineConfig::default();
        let css = StyleInjector::new(&config).compose(&TokenSet::new(), &TokenSet::new());

        let sheet = crate::dom::StyleSheet::parse(&css);
        let rules = sheet.css_rules().unwrap();
        assert_eq!(rules.len(), 4);
        match &rules[0] {
            CssRule::Style(rule) => {
                assert_eq!(rule.selector, r#"[data-theme="light"]"#);
                assert!(rule.declarations.is_empty());
            }
            other => panic!("expected style rule, got {:?}", other),
        }
    }

    #[test]
    fn test_compose_uses_configured_attribute() {
        let config = EngineConfig {
            attribute: "data-mode".into(),
            ..EngineConfig::default()
        };
        let css = StyleInjector::new(&config).compose(&TokenSet::new(), &TokenSet::new());
        assert!(css.contains(r#"[data-mode="dark"]"#));
        assert!(!css.contains("data-theme"));
    }

    #[test]
    fn test_install_is_idempotent() {
        let config = EngineConfig::default();
        let injector = StyleInjector::new(&config);
        let light = tokens(&[("--token-bg", "white")]);
        let dark = tokens(&[("--token-bg", "black")]);

        let mut doc = Document::new();
        injector.install(&mut doc, &light, &dark);
        let once = doc.clone();
        injector.install(&mut doc, &light, &dark);

        assert_eq!(doc, once);
        assert_eq!(doc.styles_with_id("theme-overrides").count(), 1);
    }
}
