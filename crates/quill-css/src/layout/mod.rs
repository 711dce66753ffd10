//! Layout: node tree in, box tree out.
//!
//! [§ 9 Visual formatting model](https://www.w3.org/TR/CSS2/visuren.html)
//!
//! A layout pass is a pure function of the node tree, the style resolver,
//! and the viewport width; it walks the tree once, top-down, and produces a
//! fresh box tree. Elements whose children are all inline-level get an
//! inline formatting pass (lines of runs); everything else stacks its
//! children vertically as blocks. The pass never mutates the node tree and
//! never triggers another pass, even when it starts image loads whose
//! dimensions will only be known later.
//!
//! Malformed content degrades instead of failing: the only error is a
//! document with no root element. Everything else is laid out best-effort
//! with a one-time warning.

mod hittest;
mod image;
mod inline;
mod layout_box;
mod metrics;

pub use hittest::find_element;
pub use image::{IMAGE_PLACEHOLDER_SIZE, ImageCache, NoImages};
pub use inline::LINE_HEIGHT_FACTOR;
pub use layout_box::{BlockBox, ImageBox, LayoutBox, LineBox, RunBox};
pub use metrics::{ApproximateTextMetrics, TextMetrics};

use std::collections::HashMap;

use thiserror::Error;

use quill_common::warning::warn_once;
use quill_dom::{ElementData, NodeId, NodeTree, NodeType};

use crate::geometry::{Point, Rect, Size};
use crate::layout::inline::InlineFlow;
use crate::resolver::StyleResolver;
use crate::style::{BlockStyle, Display, TextStyle};

/// Layout failure.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// The tree has no element child under the document node.
    #[error("document has no root element")]
    InvalidDocument,
}

/// Lay out a document.
///
/// The returned root box spans the viewport width at position (0, 0); its
/// height is determined by the content and may exceed the viewport. The
/// root element always generates a box, even under `display: none`.
pub fn layout(
    tree: &NodeTree,
    resolver: &StyleResolver,
    viewport: Size,
    metrics: &dyn TextMetrics,
    images: &dyn ImageCache,
) -> Result<BlockBox, LayoutError> {
    let root = tree.document_element().ok_or(LayoutError::InvalidDocument)?;
    let data = tree.as_element(root).ok_or(LayoutError::InvalidDocument)?;
    let mut pass = LayoutPass::new(tree, resolver, metrics, images);
    let style = pass.block_style_of(&data.name);
    Ok(pass.layout_container(root, style, viewport.to_rect()))
}

/// State for one layout pass.
///
/// Holds the inputs plus per-pass style memo tables: resolution is a pure
/// function of the element name, so each name is resolved at most once per
/// pass no matter how many elements share it.
struct LayoutPass<'a> {
    tree: &'a NodeTree,
    resolver: &'a StyleResolver,
    metrics: &'a dyn TextMetrics,
    images: &'a dyn ImageCache,
    block_styles: HashMap<String, BlockStyle>,
    text_styles: HashMap<String, TextStyle>,
}

impl<'a> LayoutPass<'a> {
    fn new(
        tree: &'a NodeTree,
        resolver: &'a StyleResolver,
        metrics: &'a dyn TextMetrics,
        images: &'a dyn ImageCache,
    ) -> Self {
        LayoutPass {
            tree,
            resolver,
            metrics,
            images,
            block_styles: HashMap::new(),
            text_styles: HashMap::new(),
        }
    }

    fn block_style_of(&mut self, name: &str) -> BlockStyle {
        if let Some(style) = self.block_styles.get(name) {
            return style.clone();
        }
        let style = self.resolver.lookup_block_style(name);
        let _ = self.block_styles.insert(name.to_string(), style.clone());
        style
    }

    fn text_style_of(&mut self, id: NodeId) -> TextStyle {
        let tree = self.tree;
        let name = tree.as_element(id).map_or("", |data| data.name.as_str());
        if let Some(style) = self.text_styles.get(name) {
            return style.clone();
        }
        let style = self.resolver.lookup_text_style(name);
        let _ = self.text_styles.insert(name.to_string(), style.clone());
        style
    }

    /// Lay out one element into `bounds` (parent-relative; the height is
    /// advisory and recomputed from content). `None` means the element
    /// generates no box.
    fn layout_element(&mut self, id: NodeId, bounds: Rect) -> Option<LayoutBox> {
        let tree = self.tree;
        let data = tree.as_element(id)?;
        if data.name == "img" {
            let style = self.block_style_of("img");
            if style.display == Display::None {
                return None;
            }
            let mut image = self.image_box(id, data);
            image.position = bounds.top_left();
            return Some(LayoutBox::Image(image));
        }
        let style = self.block_style_of(&data.name);
        if style.display == Display::None {
            return None;
        }
        Some(LayoutBox::Block(self.layout_container(id, style, bounds)))
    }

    /// Dispatch a container element to inline or block layout. List items
    /// and elements with only inline-level children get an inline pass.
    fn layout_container(&mut self, id: NodeId, style: BlockStyle, bounds: Rect) -> BlockBox {
        if style.display == Display::ListItem || self.inline_content(id) {
            self.text_layout(id, style, bounds)
        } else {
            if style.display == Display::Inline {
                let name = self.tree.as_element(id).map_or("", |d| d.name.as_str());
                warn_once(
                    "layout",
                    &format!("inline <{name}> contains block children; laid out as a block"),
                );
            }
            self.box_layout(id, style, bounds)
        }
    }

    /// Whether every child participates in inline flow: text, images, and
    /// elements displayed `inline` or `none`. Childless elements count as
    /// inline content and lay out to an empty box.
    fn inline_content(&mut self, id: NodeId) -> bool {
        let tree = self.tree;
        for &child in tree.children(id) {
            if let Some(data) = tree.as_element(child) {
                if data.name == "img" {
                    continue;
                }
                match self.block_style_of(&data.name).display {
                    Display::Block | Display::ListItem => return false,
                    Display::Inline | Display::None => {}
                }
            }
        }
        true
    }

    /// [§ 9.4.1 Block formatting contexts](https://www.w3.org/TR/CSS2/visuren.html#block-formatting)
    ///
    /// Stack child boxes vertically. Each child spans the content width and
    /// the flow cursor drops to its bottom edge; the box's own height is the
    /// final cursor position plus the bottom inset.
    fn box_layout(&mut self, id: NodeId, style: BlockStyle, bounds: Rect) -> BlockBox {
        let inset = style.inset();
        let content_w = bounds.w - inset.left - inset.right;
        let mut cursor_y = inset.top;
        let mut children = Vec::new();
        let tree = self.tree;
        for &child in tree.children(id) {
            match tree.get(child).map(|n| &n.node_type) {
                Some(NodeType::Text(text)) => {
                    if !text.trim().is_empty() {
                        warn_once("layout", "text outside an inline container skipped");
                    }
                }
                Some(NodeType::Element(_)) => {
                    let child_bounds = Rect::new(inset.left, cursor_y, content_w, 0.0);
                    if let Some(child_box) = self.layout_element(child, child_bounds) {
                        let placed = child_box.bounds();
                        cursor_y = placed.y + placed.h;
                        children.push(child_box);
                    }
                }
                _ => {}
            }
        }
        BlockBox {
            element: id,
            position: bounds.top_left(),
            size: Size::new(bounds.w, cursor_y + inset.bottom),
            style,
            children,
        }
    }

    /// Lay out an element whose children are all inline-level: flow words
    /// into lines within the content width, then align.
    fn text_layout(&mut self, id: NodeId, style: BlockStyle, bounds: Rect) -> BlockBox {
        let inset = style.inset();
        let avail_w = bounds.w - inset.left - inset.right;
        let mut flow = InlineFlow::new(self.metrics, avail_w, inset.top_left());
        self.flow_children(&mut flow, id, 0);
        let (children, cursor_y) = flow.finish(style.text_align);
        BlockBox {
            element: id,
            position: bounds.top_left(),
            size: Size::new(bounds.w, cursor_y + inset.bottom),
            style,
            children,
        }
    }

    /// Feed the inline content of `id` into the flow. Text is governed by
    /// its enclosing element's style. Spans are meant to be single-level;
    /// deeper nesting degrades to flowing the nested text with a
    /// diagnostic.
    fn flow_children(&mut self, flow: &mut InlineFlow<'_>, id: NodeId, depth: usize) {
        let style = self.text_style_of(id);
        let tree = self.tree;
        for &child in tree.children(id) {
            match tree.get(child).map(|n| &n.node_type) {
                Some(NodeType::Text(text)) => {
                    for word in text.split_whitespace() {
                        flow.place_word(id, &style, word);
                    }
                }
                Some(NodeType::Element(data)) => {
                    if data.name == "img" {
                        if self.block_style_of("img").display != Display::None {
                            let image = self.image_box(child, data);
                            flow.place_image(image);
                        }
                        continue;
                    }
                    match self.block_style_of(&data.name).display {
                        Display::None => {}
                        Display::Inline => {
                            if depth > 0 {
                                warn_once(
                                    "layout",
                                    &format!("nested inline <{}> flattened", data.name),
                                );
                            }
                            self.flow_children(flow, child, depth + 1);
                        }
                        Display::Block | Display::ListItem => {
                            warn_once(
                                "layout",
                                &format!(
                                    "block-level <{}> inside inline flow treated as inline",
                                    data.name
                                ),
                            );
                            self.flow_children(flow, child, depth + 1);
                        }
                    }
                }
                _ => {}
            }
        }
    }

    /// Build an image box at the origin; the caller positions it.
    ///
    /// Size precedence per axis: explicit attribute, then intrinsic size
    /// from the cache, then the placeholder. An unloaded source gets a
    /// fire-and-forget load so a later pass can pick up real dimensions. A
    /// missing `src` attribute never reaches the cache; the box keeps the
    /// placeholder size.
    fn image_box(&mut self, id: NodeId, data: &ElementData) -> ImageBox {
        let style = self.block_style_of("img");
        let src = data.attr("src");
        let intrinsic = match src {
            Some(src) if self.images.is_loaded(src) => self.images.size(src),
            Some(src) => {
                self.images.load(src);
                None
            }
            None => {
                warn_once("layout", "img element without a src attribute");
                None
            }
        };
        let mut size = intrinsic.unwrap_or(IMAGE_PLACEHOLDER_SIZE);
        let scale = self.resolver.font_scale();
        if let Some(value) = data.attr("width") {
            match value.parse::<f32>() {
                Ok(w) => size.w = w * scale,
                Err(_) => warn_once("layout", &format!("malformed image width '{value}'")),
            }
        }
        if let Some(value) = data.attr("height") {
            match value.parse::<f32>() {
                Ok(h) => size.h = h * scale,
                Err(_) => warn_once("layout", &format!("malformed image height '{value}'")),
            }
        }
        ImageBox {
            element: id,
            src: src.unwrap_or("").to_string(),
            position: Point::ZERO,
            size,
            style,
        }
    }
}
