//! Style cascade resolution.
//!
//! [§ 6 Cascading](https://www.w3.org/TR/css-cascade-4/#cascading)
//!
//! "The cascade takes an unordered list of declared values for a given
//! property on a given element, sorts them by their declaration's
//! precedence..."
//!
//! Precedence here is intentionally simplified: the rule list is
//! append-ordered and a later-appended rule always wins over an earlier one,
//! regardless of selector form. A wildcard rule appended after an exact-name
//! rule overrides it, and vice versa. There is no specificity.
//!
//! Resolution is a pure function of `(element name, rule list)`; the layout
//! engine memoizes lookups per element name within a pass.

use quill_common::warning::warn_once;

use crate::geometry::Insets;
use crate::sheet::{CascadeRule, parse_stylesheet};
use crate::style::{
    BlockStyle, Border, Color, Display, FontStyle, FontWeight, TextAlign, TextDecoration,
    TextStyle,
};

/// Property names the resolver understands. Anything else in a rule is
/// reported once and ignored.
const RECOGNIZED_PROPERTIES: [&str; 12] = [
    // BlockStyle
    "display",
    "background-color",
    "border",
    "padding",
    "margin",
    "text-align",
    // TextStyle
    "color",
    "font-size",
    "font-weight",
    "font-style",
    "text-decoration",
    "font-family",
];

/// Resolves element names to [`BlockStyle`] / [`TextStyle`] values against
/// an append-ordered rule list.
#[derive(Debug, Clone)]
pub struct StyleResolver {
    rules: Vec<CascadeRule>,
    base_font_size: f32,
    font_scale: f32,
}

impl StyleResolver {
    /// Create a resolver seeded with a default sheet.
    ///
    /// `base_font_size` anchors percentage `font-size` values;
    /// `font_scale` multiplies every parsed length (font sizes, insets,
    /// border widths, image attribute sizes), letting an embedder render at
    /// a zoom factor without touching the sheets.
    #[must_use]
    pub fn new(default_sheet: &str, base_font_size: f32, font_scale: f32) -> Self {
        let mut resolver = StyleResolver {
            rules: Vec::new(),
            base_font_size,
            font_scale,
        };
        resolver.append_sheet(default_sheet);
        resolver
    }

    /// Append one rule. O(1); later rules win over earlier ones.
    pub fn append_style(&mut self, rule: CascadeRule) {
        for (prop, _) in &rule.properties {
            if !RECOGNIZED_PROPERTIES.contains(&prop.as_str()) {
                warn_once("css", &format!("unknown property '{prop}' ignored"));
            }
        }
        self.rules.push(rule);
    }

    /// Parse a sheet and append its rules in source order.
    pub fn append_sheet(&mut self, text: &str) {
        for rule in parse_stylesheet(text) {
            self.append_style(rule);
        }
    }

    /// The configured font scale factor.
    #[must_use]
    pub fn font_scale(&self) -> f32 {
        self.font_scale
    }

    /// Resolve the block style for an element name.
    ///
    /// Each recognized property starts from the built-in default and is
    /// overwritten by every matching rule in append order; an element with
    /// no matching rules resolves to exactly [`BlockStyle::initial`]. A
    /// value that fails to coerce leaves the running value unchanged.
    #[must_use]
    pub fn lookup_block_style(&self, name: &str) -> BlockStyle {
        let mut style = BlockStyle::initial();
        for rule in self.rules.iter().filter(|r| r.matches(name)) {
            if let Some(v) = rule.value_of("display") {
                match Display::from_keyword(v) {
                    Some(d) => style.display = d,
                    None => warn_once("css", &format!("unknown display value '{v}'")),
                }
            }
            if let Some(v) = rule.value_of("background-color") {
                style.background_color = Color::new(v);
            }
            if let Some(v) = rule.value_of("border") {
                match self.parse_border(v) {
                    Some(b) => style.border = b,
                    None => warn_once("css", &format!("malformed border value '{v}'")),
                }
            }
            if let Some(v) = rule.value_of("padding") {
                match self.parse_length(v) {
                    Some(n) => style.padding = Insets::uniform(n),
                    None => warn_once("css", &format!("malformed padding value '{v}'")),
                }
            }
            if let Some(v) = rule.value_of("margin") {
                match self.parse_length(v) {
                    Some(n) => style.margin = Insets::uniform(n),
                    None => warn_once("css", &format!("malformed margin value '{v}'")),
                }
            }
            if let Some(v) = rule.value_of("text-align") {
                match TextAlign::from_keyword(v) {
                    Some(a) => style.text_align = a,
                    None => warn_once("css", &format!("unknown text-align value '{v}'")),
                }
            }
        }
        style
    }

    /// Resolve the text style for an element name, with the same precedence
    /// as [`lookup_block_style`](Self::lookup_block_style).
    #[must_use]
    pub fn lookup_text_style(&self, name: &str) -> TextStyle {
        let mut style = TextStyle::initial(self.base_font_size * self.font_scale);
        for rule in self.rules.iter().filter(|r| r.matches(name)) {
            if let Some(v) = rule.value_of("color") {
                style.color = Color::new(v);
            }
            if let Some(v) = rule.value_of("font-size") {
                match self.parse_font_size(v) {
                    Some(n) => style.font_size = n,
                    None => warn_once("css", &format!("malformed font-size value '{v}'")),
                }
            }
            if let Some(v) = rule.value_of("font-weight") {
                match FontWeight::from_keyword(v) {
                    Some(w) => style.font_weight = w,
                    None => warn_once("css", &format!("unknown font-weight value '{v}'")),
                }
            }
            if let Some(v) = rule.value_of("font-style") {
                match FontStyle::from_keyword(v) {
                    Some(s) => style.font_style = s,
                    None => warn_once("css", &format!("unknown font-style value '{v}'")),
                }
            }
            if let Some(v) = rule.value_of("text-decoration") {
                match TextDecoration::from_keyword(v) {
                    Some(d) => style.text_decoration = d,
                    None => warn_once("css", &format!("unknown text-decoration value '{v}'")),
                }
            }
            if let Some(v) = rule.value_of("font-family") {
                style.font_family = v.to_string();
            }
        }
        style
    }

    /// Parse a bare length token (optionally `px`-suffixed), scaled by the
    /// font scale factor.
    fn parse_length(&self, v: &str) -> Option<f32> {
        let v = v.strip_suffix("px").unwrap_or(v).trim();
        v.parse::<f32>().ok().map(|n| n * self.font_scale)
    }

    /// [§ 3.5 font-size](https://www.w3.org/TR/css-fonts-4/#font-size-prop)
    ///
    /// A literal length, or a percentage of the base font size. Either way
    /// the result is scaled by the font scale factor.
    fn parse_font_size(&self, v: &str) -> Option<f32> {
        if let Some(pct) = v.strip_suffix('%') {
            return pct
                .trim()
                .parse::<f32>()
                .ok()
                .map(|p| self.base_font_size * (p / 100.0) * self.font_scale);
        }
        self.parse_length(v)
    }

    /// Parse the positional border shorthand `"<width> <style> <color>"`.
    ///
    /// The line style keyword is required by the grammar but not retained.
    fn parse_border(&self, v: &str) -> Option<Border> {
        let parts: Vec<&str> = v.split_whitespace().collect();
        let [width, _line_style, color] = parts.as_slice() else {
            return None;
        };
        let width = self.parse_length(width)?;
        Some(Border {
            color: Color::new(color),
            thick: Insets::uniform(width),
        })
    }
}
