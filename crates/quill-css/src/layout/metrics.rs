//! Text measurement interface for layout.
//!
//! [§ 10.8 Line height calculations](https://www.w3.org/TR/CSS2/visudet.html#line-height)
//!
//! "CSS assumes that every font has font metrics that specify a
//! characteristic height above the baseline and a depth below it."

use crate::style::TextStyle;

/// Text measurement provider used during line breaking.
///
/// Implementors measure the advance width of a string under a resolved text
/// style, matching whatever the renderer will eventually draw with. The
/// measurement must be deterministic for identical inputs within one layout
/// pass, or line breaking is not reproducible.
pub trait TextMetrics {
    /// Measure the total advance width of `text` under `style`.
    fn measure(&self, text: &str, style: &TextStyle) -> f32;
}

/// Approximate text metrics using a fixed width ratio.
///
/// Implementation note: without access to actual font data, we use a fixed
/// ratio approximation. The average advance width of Latin glyphs in a
/// proportional font is roughly 0.6× the font size. This is a fallback for
/// callers with no font stack, and the workhorse in tests.
pub struct ApproximateTextMetrics;

impl TextMetrics for ApproximateTextMetrics {
    fn measure(&self, text: &str, style: &TextStyle) -> f32 {
        const CHAR_WIDTH_RATIO: f32 = 0.6;
        text.chars().count() as f32 * style.font_size * CHAR_WIDTH_RATIO
    }
}
