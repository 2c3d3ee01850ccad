//! Stylesheets and the rule kinds the engine distinguishes.

use std::fmt::{self, Write as _};

use crate::error::StylesheetError;

use super::parser::parse_rules;

/// A single `name: value` declaration, value kept as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    pub value: String,
}

impl Declaration {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {};", self.name, self.value)
    }
}

/// A plain `selector { declarations }` rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRule {
    /// Selector text with whitespace collapsed to single spaces.
    pub selector: String,
    pub declarations: Vec<Declaration>,
}

/// An `@media condition { rules }` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRule {
    /// Condition text with whitespace collapsed to single spaces.
    pub condition: String,
    pub rules: Vec<CssRule>,
}

/// A top-level or nested rule.
///
/// Only style and media rules carry anything the engine reads; every other
/// at-rule (`@font-face`, `@import`, `@supports`, ...) is kept as
/// [`CssRule::Other`] so rule order is preserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CssRule {
    Style(StyleRule),
    Media(MediaRule),
    Other { name: String, prelude: String },
}

impl CssRule {
    /// Serializes the rule, including nested rules, as CSS text.
    pub fn css_text(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = write_rule(&mut out, self);
        out
    }
}

fn write_rule(out: &mut String, rule: &CssRule) -> fmt::Result {
    match rule {
        CssRule::Style(style) => {
            write!(out, "{} {{", style.selector)?;
            for decl in &style.declarations {
                write!(out, " {}", decl)?;
            }
            out.push_str(" }");
        }
        CssRule::Media(media) => {
            write!(out, "@media {} {{", media.condition)?;
            for nested in &media.rules {
                out.push(' ');
                write_rule(out, nested)?;
            }
            out.push_str(" }");
        }
        CssRule::Other { name, prelude } if prelude.is_empty() => write!(out, "@{};", name)?,
        CssRule::Other { name, prelude } => write!(out, "@{} {};", name, prelude)?,
    }
    Ok(())
}

impl fmt::Display for CssRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.css_text())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum RuleAccess {
    Readable(Vec<CssRule>),
    Restricted,
}

/// A loaded stylesheet.
///
/// A sheet is either readable, exposing its parsed rules, or restricted
/// (for example served from another origin), in which case
/// [`css_rules`](Self::css_rules) fails and the engine skips it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleSheet {
    href: Option<String>,
    access: RuleAccess,
}

impl StyleSheet {
    /// Parses CSS text into a readable sheet.
    ///
    /// Malformed rules are dropped the way a browser drops them; the rest of
    /// the sheet is kept.
    pub fn parse(css: &str) -> Self {
        Self {
            href: None,
            access: RuleAccess::Readable(parse_rules(css)),
        }
    }

    /// A readable sheet built from already parsed rules.
    pub fn from_rules(rules: Vec<CssRule>) -> Self {
        Self {
            href: None,
            access: RuleAccess::Readable(rules),
        }
    }

    /// A sheet whose rules cannot be read.
    pub fn restricted(href: impl Into<String>) -> Self {
        Self {
            href: Some(href.into()),
            access: RuleAccess::Restricted,
        }
    }

    /// Records where the sheet came from.
    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    pub fn href(&self) -> Option<&str> {
        self.href.as_deref()
    }

    pub fn is_readable(&self) -> bool {
        matches!(self.access, RuleAccess::Readable(_))
    }

    /// The sheet's top-level rules.
    pub fn css_rules(&self) -> Result<&[CssRule], StylesheetError> {
        match &self.access {
            RuleAccess::Readable(rules) => Ok(rules.as_slice()),
            RuleAccess::Restricted => Err(StylesheetError::Inaccessible {
                href: self.href.clone(),
            }),
        }
    }
}
