//! The box tree produced by layout.
//!
//! [§ 9.2 Controlling box generation](https://www.w3.org/TR/CSS2/visuren.html#box-gen)
//!
//! The tree is the engine's sole output and is rebuilt from scratch on every
//! pass; boxes carry no identity across passes. Elements are referenced by
//! [`NodeId`] handles into the externally-owned node tree, never owned.
//!
//! Shape invariant: a [`BlockBox`]'s children are either all block-level
//! boxes, or the exact line/run/image sequence of one inline pass, never a
//! mix of the two within one box.

use serde::Serialize;

use quill_dom::NodeId;

use crate::geometry::{Point, Rect, Size};
use crate::style::{BlockStyle, TextStyle};

/// A node in the box tree.
///
/// A closed sum so that layout, painting, and hit-testing can match
/// exhaustively instead of downcasting.
#[derive(Debug, Clone, Serialize)]
pub enum LayoutBox {
    /// A block-level box.
    Block(BlockBox),
    /// One visual line of an inline formatting context.
    Line(LineBox),
    /// A styled text run. Runs normally live inside a [`LineBox`]; the
    /// variant exists so every box kind can travel through one type.
    Run(RunBox),
    /// A replaced image box.
    Image(ImageBox),
}

impl LayoutBox {
    /// The bounds of this box in its parent's coordinate space.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        match self {
            LayoutBox::Block(b) => b.bounds(),
            LayoutBox::Line(l) => l.bounds(),
            LayoutBox::Run(r) => r.bounds(),
            LayoutBox::Image(i) => i.bounds(),
        }
    }
}

/// [§ 9.4.1 Block formatting contexts](https://www.w3.org/TR/CSS2/visuren.html#block-formatting)
///
/// A block-level box: vertical stacking of children, width inherited from
/// the parent's content width, height accumulated from child bottom edges.
#[derive(Debug, Clone, Serialize)]
pub struct BlockBox {
    /// The element this box was generated for.
    pub element: NodeId,
    /// Position relative to the parent block's origin.
    pub position: Point,
    /// Border-box size.
    pub size: Size,
    /// The resolved block style.
    pub style: BlockStyle,
    /// Child boxes: all block-level, or one inline pass's line/run/image
    /// sequence.
    pub children: Vec<LayoutBox>,
}

impl BlockBox {
    /// The bounds of this box in its parent's coordinate space.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.position, self.size)
    }
}

/// [§ 9.4.2 Inline formatting contexts](https://www.w3.org/TR/CSS2/visuren.html#inline-formatting)
///
/// "The rectangular area that contains the boxes that form a line is called
/// a line box."
#[derive(Debug, Clone, Serialize)]
pub struct LineBox {
    /// Position relative to the owning block's origin (content offset
    /// applied).
    pub position: Point,
    /// Line extent: accumulated run width by line height.
    pub size: Size,
    /// Runs on this line, left to right.
    pub runs: Vec<RunBox>,
}

impl LineBox {
    /// The bounds of this line in the owning block's coordinate space.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.position, self.size)
    }
}

/// A maximal span of text within a line sharing one resolved text style.
#[derive(Debug, Clone, Serialize)]
pub struct RunBox {
    /// The element whose style governs this run (the span, or the
    /// enclosing text container for literal text).
    pub element: NodeId,
    /// The run's text with words separated by single spaces.
    pub text: String,
    /// Position relative to the owning line.
    pub position: Point,
    /// Measured width by line height.
    pub size: Size,
    /// The resolved text style.
    pub style: TextStyle,
}

impl RunBox {
    /// The bounds of this run in the owning line's coordinate space.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.position, self.size)
    }
}

/// A replaced image box.
///
/// Sized from explicit attributes, the image cache's intrinsic size, or a
/// placeholder while the source is still loading.
#[derive(Debug, Clone, Serialize)]
pub struct ImageBox {
    /// The `img` element.
    pub element: NodeId,
    /// The image source identifier (the `src` attribute).
    pub src: String,
    /// Position relative to the parent block's origin.
    pub position: Point,
    /// Laid-out size.
    pub size: Size,
    /// The resolved block style.
    pub style: BlockStyle,
}

impl ImageBox {
    /// The bounds of this image in its parent's coordinate space.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.position, self.size)
    }
}
