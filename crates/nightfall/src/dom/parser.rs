//! CSS text to [`CssRule`] trees.
//!
//! Built on `cssparser` (the tokenizer Firefox uses), so comments, escapes and
//! nested blocks are handled correctly. The engine only needs structure, not
//! meaning: selectors, media conditions and declaration values are kept as
//! source text (whitespace collapsed) rather than interpreted.
//!
//! Error recovery follows browsers: a malformed rule or declaration is dropped
//! and parsing continues with the next one.

use cssparser::{
    AtRuleParser, CowRcStr, DeclarationParser, ParseError, Parser, ParserInput, ParserState,
    QualifiedRuleParser, RuleBodyItemParser, RuleBodyParser,
};

use super::sheet::{CssRule, Declaration, MediaRule, StyleRule};

/// Parses a whole stylesheet.
pub(crate) fn parse_rules(css: &str) -> Vec<CssRule> {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    parse_rule_list(&mut parser)
}

fn parse_rule_list(input: &mut Parser<'_, '_>) -> Vec<CssRule> {
    let mut rule_parser = RuleListParser;
    let mut rules = Vec::new();

    for result in cssparser::StyleSheetParser::new(input, &mut rule_parser) {
        match result {
            Ok(rule) => rules.push(rule),
            Err((err, text)) => {
                tracing::debug!(error = ?err.kind, rule = text, "dropping malformed css rule");
            }
        }
    }
    rules
}

/// Consumes the rest of `input` and returns its source text.
fn consume_text(input: &mut Parser<'_, '_>) -> String {
    let start = input.position();
    while input.next_including_whitespace_and_comments().is_ok() {}
    collapse_whitespace(input.slice_from(start))
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

struct RuleListParser;

enum AtPrelude {
    Media(String),
    Other { name: String, prelude: String },
}

impl<'i> QualifiedRuleParser<'i> for RuleListParser {
    type Prelude = String;
    type QualifiedRule = CssRule;
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        let selector = consume_text(input);
        if selector.is_empty() {
            return Err(input.new_custom_error(()));
        }
        Ok(selector)
    }

    fn parse_block<'t>(
        &mut self,
        selector: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::QualifiedRule, ParseError<'i, Self::Error>> {
        let mut decl_parser = DeclarationListParser;
        let declarations = RuleBodyParser::new(input, &mut decl_parser)
            .filter_map(|result| match result {
                Ok(decl) => Some(decl),
                Err((err, text)) => {
                    tracing::debug!(
                        error = ?err.kind,
                        declaration = text,
                        "dropping malformed css declaration"
                    );
                    None
                }
            })
            .collect();

        Ok(CssRule::Style(StyleRule {
            selector,
            declarations,
        }))
    }
}

impl<'i> AtRuleParser<'i> for RuleListParser {
    type Prelude = AtPrelude;
    type AtRule = CssRule;
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        let prelude = consume_text(input);
        if name.as_ref().eq_ignore_ascii_case("media") {
            Ok(AtPrelude::Media(prelude))
        } else {
            Ok(AtPrelude::Other {
                name: name.as_ref().to_ascii_lowercase(),
                prelude,
            })
        }
    }

    fn rule_without_block(
        &mut self,
        prelude: Self::Prelude,
        _start: &ParserState,
    ) -> Result<Self::AtRule, ()> {
        match prelude {
            // `@media print;` has no rules and is invalid CSS.
            AtPrelude::Media(_) => Err(()),
            AtPrelude::Other { name, prelude } => Ok(CssRule::Other { name, prelude }),
        }
    }

    fn parse_block<'t>(
        &mut self,
        prelude: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::AtRule, ParseError<'i, Self::Error>> {
        match prelude {
            AtPrelude::Media(condition) => Ok(CssRule::Media(MediaRule {
                condition,
                rules: parse_rule_list(input),
            })),
            AtPrelude::Other { name, prelude } => {
                while input.next().is_ok() {}
                Ok(CssRule::Other { name, prelude })
            }
        }
    }
}

struct DeclarationListParser;

impl<'i> DeclarationParser<'i> for DeclarationListParser {
    type Declaration = Declaration;
    type Error = ();

    fn parse_value<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Declaration, ParseError<'i, Self::Error>> {
        let start = input.position();
        while input.next().is_ok() {}
        let value = input.slice_from(start).trim();
        Ok(Declaration::new(name.as_ref(), value))
    }
}

impl<'i> AtRuleParser<'i> for DeclarationListParser {
    type Prelude = ();
    type AtRule = Declaration;
    type Error = ();
}

impl<'i> QualifiedRuleParser<'i> for DeclarationListParser {
    type Prelude = ();
    type QualifiedRule = Declaration;
    type Error = ();
}

impl<'i> RuleBodyItemParser<'i, Declaration, ()> for DeclarationListParser {
    fn parse_declarations(&self) -> bool {
        true
    }
    fn parse_qualified(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    fn style(rule: &CssRule) -> &StyleRule {
        match rule {
            CssRule::Style(style) => style,
            other => panic!("expected style rule, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_style_rule_keeps_order() {
        let rules = parse_rules("body { --token-fg: #111; color: red; --token-bg: white; }");
        assert_eq!(rules.len(), 1);

        let body = style(&rules[0]);
        assert_eq!(body.selector, "body");
        assert_eq!(
            body.declarations,
            vec![
                Declaration::new("--token-fg", "#111"),
                Declaration::new("color", "red"),
                Declaration::new("--token-bg", "white"),
            ]
        );
    }

    #[test]
    fn test_selector_whitespace_collapsed() {
        let rules = parse_rules(":root,\n    body   { color: red; }");
        assert_eq!(style(&rules[0]).selector, ":root, body");
    }

    #[test]
    fn test_value_text_preserved() {
        let rules = parse_rules("body { --token-shadow: 0 1px 2px rgba(0, 0, 0, .2); }");
        assert_eq!(
            style(&rules[0]).declarations[0].value,
            "0 1px 2px rgba(0, 0, 0, .2)"
        );
    }

    #[test]
    fn test_parse_media_rule() {
        let css = "@media (prefers-color-scheme: dark) { body { --token-bg: black; } }";
        let rules = parse_rules(css);
        assert_eq!(rules.len(), 1);

        match &rules[0] {
            CssRule::Media(media) => {
                assert_eq!(media.condition, "(prefers-color-scheme: dark)");
                assert_eq!(media.rules.len(), 1);
                assert_eq!(style(&media.rules[0]).selector, "body");
            }
            other => panic!("expected media rule, got {:?}", other),
        }
    }

    #[test]
    fn test_other_at_rules_kept_in_order() {
        let css = r#"
            @import url("base.css");
            body { color: red; }
            @font-face { font-family: Mono; src: url(mono.woff2); }
        "#;
        let rules = parse_rules(css);
        assert_eq!(rules.len(), 3);
        assert!(matches!(&rules[0], CssRule::Other { name, .. } if name == "import"));
        assert!(matches!(&rules[1], CssRule::Style(_)));
        assert!(matches!(&rules[2], CssRule::Other { name, .. } if name == "font-face"));
    }

    #[test]
    fn test_malformed_rule_is_dropped() {
        let css = "{ color: red; } body { --token-bg: white; }";
        let rules = parse_rules(css);
        assert_eq!(rules.len(), 1);
        assert_eq!(style(&rules[0]).selector, "body");
    }

    #[test]
    #[traced_test]
    fn test_malformed_declaration_is_dropped_and_logged() {
        let rules = parse_rules("body { 42: red; --token-bg: white; }");
        assert_eq!(
            style(&rules[0]).declarations,
            vec![Declaration::new("--token-bg", "white")]
        );
        assert!(logs_contain("dropping malformed css declaration"));
    }

    #[test]
    fn test_comments_ignored_between_rules() {
        let css = "/* light */ body { --token-bg: white; } /* end */";
        let rules = parse_rules(css);
        assert_eq!(rules.len(), 1);
        assert_eq!(style(&rules[0]).declarations.len(), 1);
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_rules("").is_empty());
        assert!(parse_rules("   ").is_empty());
    }
}
