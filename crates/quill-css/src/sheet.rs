//! Style rule model and sheet parsing.
//!
//! [CSS Syntax Module Level 3](https://www.w3.org/TR/css-syntax-3/)
//!
//! A sheet is an ordered sequence of rules of the form
//! `selector(,selector)* { prop: value; ... }` where `value` is a bare token
//! running up to the next `;`. The rule list is append-only and append order
//! is the only cascade precedence signal; there is no selector specificity.
//!
//! A malformed fragment contributes zero rules and emits a single
//! deduplicated warning; parsing never fails.

use std::collections::HashSet;

use quill_common::warning::warn_once;

/// One cascade rule: a selector set plus an ordered declaration list.
///
/// Selectors are element names or the wildcard `"*"`. Declarations keep
/// their source order so that a later declaration of the same property wins
/// within one rule, mirroring the append-order precedence between rules.
#[derive(Debug, Clone)]
pub struct CascadeRule {
    /// Element names this rule applies to; `"*"` matches every element.
    pub selectors: HashSet<String>,
    /// `(property, value)` pairs in declaration order.
    pub properties: Vec<(String, String)>,
}

impl CascadeRule {
    /// Whether this rule's selector set covers the given element name.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        self.selectors.contains(name) || self.selectors.contains("*")
    }

    /// The value this rule declares for `property`, if any. The last
    /// declaration of a property wins within a rule.
    #[must_use]
    pub fn value_of(&self, property: &str) -> Option<&str> {
        self.properties
            .iter()
            .rev()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
    }
}

/// Parse a sheet into its cascade rules, in source order.
///
/// Malformed fragments are skipped with a [`warn_once`] diagnostic; the
/// sheet contributes whatever well-formed rules it contains. An unbalanced
/// `{` abandons the rest of the sheet (there is no way to resynchronize).
#[must_use]
pub fn parse_stylesheet(text: &str) -> Vec<CascadeRule> {
    let text = strip_comments(text);
    let mut rules = Vec::new();
    let mut rest = text.as_str();

    while let Some(open) = rest.find('{') {
        let selector_text = &rest[..open];
        let after_open = &rest[open + 1..];

        let Some(close) = after_open.find('}') else {
            warn_once("css", "unterminated rule block; ignoring rest of sheet");
            return rules;
        };
        let body = &after_open[..close];
        rest = &after_open[close + 1..];

        if let Some(rule) = parse_rule(selector_text, body) {
            rules.push(rule);
        }
    }

    if !rest.trim().is_empty() {
        warn_once("css", "trailing text after last rule ignored");
    }

    rules
}

/// Parse a single rule from its selector list and declaration body.
fn parse_rule(selector_text: &str, body: &str) -> Option<CascadeRule> {
    let selectors: HashSet<String> = selector_text
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    if selectors.is_empty() {
        warn_once("css", "rule with empty selector list ignored");
        return None;
    }

    // Only simple name selectors (and "*") are supported. A selector with
    // embedded whitespace is a combinator, which this cascade does not
    // model; the whole rule is dropped rather than mis-applied.
    if let Some(sel) = selectors
        .iter()
        .find(|s| s.chars().any(char::is_whitespace))
    {
        warn_once("css", &format!("unsupported selector '{sel}'; rule ignored"));
        return None;
    }

    let mut properties = Vec::new();
    for decl in body.split(';') {
        let decl = decl.trim();
        if decl.is_empty() {
            continue;
        }
        match decl.split_once(':') {
            Some((prop, value)) if !prop.trim().is_empty() && !value.trim().is_empty() => {
                properties.push((prop.trim().to_string(), value.trim().to_string()));
            }
            _ => {
                warn_once("css", &format!("malformed declaration '{decl}' ignored"));
            }
        }
    }

    Some(CascadeRule {
        selectors,
        properties,
    })
}

/// Remove `/* ... */` comments. An unterminated comment runs to the end of
/// the sheet, matching CSS error recovery.
fn strip_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find("/*") {
        out.push_str(&rest[..start]);
        match rest[start + 2..].find("*/") {
            Some(end) => rest = &rest[start + 2 + end + 2..],
            None => return out,
        }
    }
    out.push_str(rest);
    out
}
