//! Resolved style types.
//!
//! [CSS Cascading and Inheritance Level 4](https://www.w3.org/TR/css-cascade-4/)
//!
//! The cascade resolves every element to exactly two value bags: a
//! [`BlockStyle`] consumed by box layout and a [`TextStyle`] consumed by
//! inline layout and painting. Both are plain data; the resolver in
//! [`crate::resolver`] produces them and the layout engine memoizes them per
//! element name within a pass.

use serde::Serialize;

use crate::geometry::Insets;

/// [§ 2 Box Layout Modes](https://www.w3.org/TR/css-display-3/#the-display-properties)
///
/// The outer display type of an element. Only the four values the engine
/// lays out are modeled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Display {
    /// Generates a block-level box stacked vertically.
    Block,
    /// Participates in the parent's inline formatting context.
    Inline,
    /// Generates no box at all and does not advance the flow cursor.
    None,
    /// Block-level, with a list marker drawn by the renderer.
    ListItem,
}

impl Display {
    /// Parse a `display` keyword.
    #[must_use]
    pub fn from_keyword(s: &str) -> Option<Self> {
        match s {
            "block" => Some(Display::Block),
            "inline" => Some(Display::Inline),
            "none" => Some(Display::None),
            "list-item" => Some(Display::ListItem),
            _ => None,
        }
    }
}

/// [§ 16.2 Alignment: the 'text-align' property](https://www.w3.org/TR/CSS2/text.html#alignment-prop)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TextAlign {
    /// Lines start at the content-box left edge.
    Left,
    /// Lines are centered within the available width.
    Center,
    /// Lines end at the content-box right edge.
    Right,
}

impl TextAlign {
    /// Parse a `text-align` keyword.
    #[must_use]
    pub fn from_keyword(s: &str) -> Option<Self> {
        match s {
            "left" => Some(TextAlign::Left),
            "center" => Some(TextAlign::Center),
            "right" => Some(TextAlign::Right),
            _ => None,
        }
    }
}

/// [§ 3.2 font-weight](https://www.w3.org/TR/css-fonts-4/#font-weight-prop)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FontWeight {
    /// Normal weight.
    Normal,
    /// Bold weight.
    Bold,
}

impl FontWeight {
    /// Parse a `font-weight` keyword.
    #[must_use]
    pub fn from_keyword(s: &str) -> Option<Self> {
        match s {
            "normal" => Some(FontWeight::Normal),
            "bold" => Some(FontWeight::Bold),
            _ => None,
        }
    }
}

/// [§ 3.4 font-style](https://www.w3.org/TR/css-fonts-4/#font-style-prop)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FontStyle {
    /// Upright.
    Normal,
    /// Italic.
    Italic,
}

impl FontStyle {
    /// Parse a `font-style` keyword.
    #[must_use]
    pub fn from_keyword(s: &str) -> Option<Self> {
        match s {
            "normal" => Some(FontStyle::Normal),
            "italic" => Some(FontStyle::Italic),
            _ => None,
        }
    }
}

/// [CSS Text Decoration Level 3](https://www.w3.org/TR/css-text-decor-3/#text-decoration-line-property)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TextDecoration {
    /// No decoration.
    None,
    /// Underlined, drawn by the renderer under each run.
    Underline,
}

impl TextDecoration {
    /// Parse a `text-decoration` keyword.
    #[must_use]
    pub fn from_keyword(s: &str) -> Option<Self> {
        match s {
            "none" => Some(TextDecoration::None),
            "underline" => Some(TextDecoration::Underline),
            _ => None,
        }
    }
}

/// A CSS color token, passed through uninterpreted.
///
/// The engine never needs channel values; the renderer owns color parsing.
/// Keeping the raw token avoids committing this core to one color model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Color(pub String);

impl Color {
    /// Create a color from a raw CSS token.
    #[must_use]
    pub fn new(token: &str) -> Self {
        Color(token.to_string())
    }
}

/// [§ 4 Borders](https://www.w3.org/TR/css-backgrounds-3/#borders)
///
/// A border: a color plus a per-edge thickness. The border line style
/// keyword (`solid`, `dashed`, …) is accepted by the parser but not
/// retained; the renderer draws all borders solid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Border {
    /// Border color.
    pub color: Color,
    /// Border thickness on each edge.
    pub thick: Insets,
}

/// Block-level style values for one element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockStyle {
    /// Outer display type.
    pub display: Display,
    /// Background fill color.
    pub background_color: Color,
    /// Border color and thickness.
    pub border: Border,
    /// Padding insets.
    pub padding: Insets,
    /// Margin insets.
    pub margin: Insets,
    /// Horizontal alignment of inline content.
    pub text_align: TextAlign,
}

impl BlockStyle {
    /// The built-in default block style, used when no rule matches a
    /// property.
    #[must_use]
    pub fn initial() -> Self {
        BlockStyle {
            display: Display::Block,
            background_color: Color::new("white"),
            border: Border {
                color: Color::new("black"),
                thick: Insets::uniform(0.0),
            },
            padding: Insets::uniform(0.0),
            margin: Insets::uniform(0.0),
            text_align: TextAlign::Left,
        }
    }

    /// Combined margin + border + padding insets: the offset from the box
    /// edge to the content edge.
    #[must_use]
    pub fn inset(&self) -> Insets {
        self.margin + self.border.thick + self.padding
    }
}

/// Text style values for one element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextStyle {
    /// Text color.
    pub color: Color,
    /// Font size in device units (font scale already applied).
    pub font_size: f32,
    /// Font weight.
    pub font_weight: FontWeight,
    /// Font style.
    pub font_style: FontStyle,
    /// Text decoration.
    pub text_decoration: TextDecoration,
    /// Font family token.
    pub font_family: String,
}

impl TextStyle {
    /// The built-in default text style at the given resolved font size.
    #[must_use]
    pub fn initial(font_size: f32) -> Self {
        TextStyle {
            color: Color::new("black"),
            font_size,
            font_weight: FontWeight::Normal,
            font_style: FontStyle::Normal,
            text_decoration: TextDecoration::None,
            font_family: "sans-serif".to_string(),
        }
    }
}
