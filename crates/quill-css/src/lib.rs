//! Style resolution and layout for the Quill rendering engine.
//!
//! This crate is the engine core: it turns a [`quill_dom::NodeTree`] plus a
//! set of style rules into a positioned box tree, and answers point queries
//! against that tree. It deliberately stops short of pixels. Fonts, images,
//! and painting live behind the [`TextMetrics`] and [`ImageCache`] traits so
//! the same layout code runs under any renderer, or none.
//!
//! The pipeline:
//!
//! 1. [`sheet::parse_stylesheet`] turns CSS-like text into append-ordered
//!    [`sheet::CascadeRule`]s.
//! 2. A [`StyleResolver`] cascades those rules into a [`style::BlockStyle`]
//!    and [`style::TextStyle`] per element name; the only precedence is
//!    append order.
//! 3. [`layout::layout`] walks the node tree and produces a [`BlockBox`]
//!    tree: blocks stacked vertically, inline content broken greedily into
//!    lines of styled runs.
//! 4. [`layout::find_element`] maps a point back to the element under it.

pub mod default_sheet;
pub mod geometry;
pub mod layout;
pub mod resolver;
pub mod sheet;
pub mod style;

pub use default_sheet::DEFAULT_SHEET;
pub use geometry::{Insets, Point, Rect, Size};
pub use layout::{
    ApproximateTextMetrics, BlockBox, ImageBox, ImageCache, LayoutBox, LayoutError, LineBox,
    NoImages, RunBox, TextMetrics, find_element, layout,
};
pub use resolver::StyleResolver;
