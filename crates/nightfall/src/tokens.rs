//! Theme token extraction.
//!
//! Sites declare their themed custom properties twice: once on the body rule
//! (light) and once inside `@media (prefers-color-scheme: dark)` (dark). The
//! [`TokenExtractor`] finds both declaration sets so they can be re-emitted
//! keyed to the marking attribute instead of the media query, which lets an
//! explicit user choice override the OS preference.
//!
//! ## Last match wins
//!
//! When several rules match a branch, the most recently scanned non-empty one
//! replaces the earlier result outright. Sets are never merged, so a sheet
//! loaded later can fully redefine a branch.
//!
//! ```rust
//! use nightfall::{Document, EngineConfig, StyleSheet, TokenExtractor};
//!
//! let doc = Document::new()
//!     .with_stylesheet(StyleSheet::parse("body { --token-bg: white; }"))
//!     .with_stylesheet(StyleSheet::parse("body { --token-fg: black; }"));
//!
//! let config = EngineConfig::default();
//! let (light, dark) = TokenExtractor::new(&config).scan(&doc);
//!
//! assert_eq!(light.to_string(), "--token-fg: black;");
//! assert!(dark.is_empty());
//! ```

use std::fmt;

use serde::Serialize;

use crate::config::EngineConfig;
use crate::dom::{CssRule, Declaration, Document, MediaRule, StyleRule};

/// Media feature text identifying the dark branch, whitespace removed.
const DARK_SCHEME_FEATURE: &str = "prefers-color-scheme:dark";

/// One themed custom property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub name: String,
    pub value: String,
}

impl From<&Declaration> for Token {
    fn from(decl: &Declaration) -> Self {
        Self {
            name: decl.name.clone(),
            value: decl.value.clone(),
        }
    }
}

/// An ordered set of tokens for one theme branch.
///
/// Order is declaration order in the source rule and is preserved in the
/// generated CSS.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TokenSet {
    tokens: Vec<Token>,
}

impl TokenSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.tokens.push(Token {
            name: name.into(),
            value: value.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.tokens
            .iter()
            .find(|token| token.name == name)
            .map(|token| token.value.as_str())
    }
}

impl<'a> FromIterator<&'a Declaration> for TokenSet {
    fn from_iter<I: IntoIterator<Item = &'a Declaration>>(iter: I) -> Self {
        Self {
            tokens: iter.into_iter().map(Token::from).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a TokenSet {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

/// Declarations separated by single spaces: `--a: 1; --b: 2;`.
impl fmt::Display for TokenSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}: {};", token.name, token.value)?;
        }
        Ok(())
    }
}

/// Derives light and dark token sets from a document's stylesheets.
#[derive(Debug, Clone, Copy)]
pub struct TokenExtractor<'a> {
    config: &'a EngineConfig,
}

impl<'a> TokenExtractor<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    /// Light tokens declared by `rule`.
    ///
    /// Only a style rule whose selector is exactly the configured light
    /// selector contributes; of its declarations, only names containing the
    /// token marker are kept.
    pub fn extract_light(&self, rule: &CssRule) -> TokenSet {
        match rule {
            CssRule::Style(StyleRule {
                selector,
                declarations,
            }) if *selector == self.config.light_selector => declarations
                .iter()
                .filter(|decl| decl.name.contains(&self.config.token_marker))
                .collect(),
            CssRule::Style(_) | CssRule::Media(_) | CssRule::Other { .. } => TokenSet::new(),
        }
    }

    /// Dark tokens declared by `rule`.
    ///
    /// Only a media rule matching `prefers-color-scheme: dark` contributes
    /// (a query negated with `not` does not count),
    /// and not when its text contains the configured exclusion marker (rules
    /// already scoped to an explicit theme would apply twice). The first
    /// nested rule's body is taken whole, selector stripped.
    pub fn extract_dark(&self, rule: &CssRule) -> TokenSet {
        match rule {
            CssRule::Media(media) if is_dark_scheme(media) => {
                if rule.css_text().contains(&self.config.dark_exclusion()) {
                    tracing::debug!(condition = %media.condition, "skipping excluded dark rule");
                    return TokenSet::new();
                }
                match media.rules.first() {
                    Some(CssRule::Style(nested)) => nested.declarations.iter().collect(),
                    Some(CssRule::Media(_) | CssRule::Other { .. }) | None => TokenSet::new(),
                }
            }
            CssRule::Style(_) | CssRule::Media(_) | CssRule::Other { .. } => TokenSet::new(),
        }
    }

    /// Scans every readable stylesheet in document order.
    ///
    /// Sheets whose rules cannot be read are skipped with a warning. For each
    /// branch the last non-empty extraction wins.
    pub fn scan(&self, document: &Document) -> (TokenSet, TokenSet) {
        self.scan_counting(document).0
    }

    /// Like [`scan`](Self::scan), also returning the number of skipped sheets.
    pub(crate) fn scan_counting(&self, document: &Document) -> ((TokenSet, TokenSet), usize) {
        let mut light = TokenSet::new();
        let mut dark = TokenSet::new();
        let mut skipped = 0;

        for sheet in document.stylesheets() {
            let rules = match sheet.css_rules() {
                Ok(rules) => rules,
                Err(err) => {
                    tracing::warn!(error = %err, "skipping stylesheet while collecting theme tokens");
                    skipped += 1;
                    continue;
                }
            };

            for rule in rules {
                let found = self.extract_light(rule);
                if !found.is_empty() {
                    light = found;
                }
                let found = self.extract_dark(rule);
                if !found.is_empty() {
                    dark = found;
                }
            }
        }

        ((light, dark), skipped)
    }
}

/// True when any query of the comma-separated list asks for the dark scheme
/// without negating it.
fn is_dark_scheme(media: &MediaRule) -> bool {
    media.condition.split(',').any(|query| {
        let query = query.trim().to_ascii_lowercase();
        let negated = query
            .strip_prefix("not")
            .is_some_and(|rest| rest.starts_with(char::is_whitespace));
        let compact: String = query.chars().filter(|c| !c.is_whitespace()).collect();
        !negated && compact.contains(DARK_SCHEME_FEATURE)
    })
}
