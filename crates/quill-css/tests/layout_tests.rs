//! Layout engine tests: block stacking, line breaking, alignment, images.
//!
//! Text is measured with fixed-width test metrics (10 units per character)
//! so expected positions are exact.

use std::cell::RefCell;
use std::collections::HashMap;

use quill_css::geometry::{Point, Size};
use quill_css::layout::{
    IMAGE_PLACEHOLDER_SIZE, ImageCache, LINE_HEIGHT_FACTOR, LayoutBox, TextMetrics, layout,
};
use quill_css::resolver::StyleResolver;
use quill_css::style::{FontWeight, TextStyle};
use quill_dom::{NodeId, NodeTree};

const CHAR_W: f32 = 10.0;

struct CharMetrics;

impl TextMetrics for CharMetrics {
    fn measure(&self, text: &str, _style: &TextStyle) -> f32 {
        text.chars().count() as f32 * CHAR_W
    }
}

#[derive(Default)]
struct TestImages {
    sizes: HashMap<String, Size>,
    loads: RefCell<Vec<String>>,
}

impl ImageCache for TestImages {
    fn is_loaded(&self, src: &str) -> bool {
        self.sizes.contains_key(src)
    }

    fn size(&self, src: &str) -> Option<Size> {
        self.sizes.get(src).copied()
    }

    fn load(&self, src: &str) {
        self.loads.borrow_mut().push(src.to_string());
    }
}

/// Base font size 10 so one line is exactly `10 * LINE_HEIGHT_FACTOR` tall.
fn resolver(extra_sheet: &str) -> StyleResolver {
    let mut resolver = StyleResolver::new("span, b { display: inline; }", 10.0, 1.0);
    resolver.append_sheet(extra_sheet);
    resolver
}

fn line_height() -> f32 {
    10.0 * LINE_HEIGHT_FACTOR
}

fn el(tree: &mut NodeTree, parent: NodeId, name: &str) -> NodeId {
    let id = tree.alloc_element(name);
    tree.append_child(parent, id);
    id
}

fn text(tree: &mut NodeTree, parent: NodeId, content: &str) {
    let id = tree.alloc_text(content);
    tree.append_child(parent, id);
}

fn expect_block(child: &LayoutBox) -> &quill_css::layout::BlockBox {
    match child {
        LayoutBox::Block(b) => b,
        other => panic!("expected block box, got {other:?}"),
    }
}

fn expect_line(child: &LayoutBox) -> &quill_css::layout::LineBox {
    match child {
        LayoutBox::Line(l) => l,
        other => panic!("expected line box, got {other:?}"),
    }
}

fn expect_image(child: &LayoutBox) -> &quill_css::layout::ImageBox {
    match child {
        LayoutBox::Image(i) => i,
        other => panic!("expected image box, got {other:?}"),
    }
}

#[test]
fn test_blocks_stack_vertically() {
    let mut tree = NodeTree::new();
    let html = el(&mut tree, NodeId::ROOT, "html");
    let p1 = el(&mut tree, html, "p");
    text(&mut tree, p1, "hi");
    let p2 = el(&mut tree, html, "p");
    text(&mut tree, p2, "ho");

    let root = layout(
        &tree,
        &resolver(""),
        Size::new(100.0, 100.0),
        &CharMetrics,
        &TestImages::default(),
    )
    .unwrap();

    assert_eq!(root.size.w, 100.0);
    assert_eq!(root.children.len(), 2);
    let first = expect_block(&root.children[0]);
    let second = expect_block(&root.children[1]);
    assert_eq!(first.position, Point::new(0.0, 0.0));
    assert_eq!(first.size, Size::new(100.0, line_height()));
    assert_eq!(second.position, Point::new(0.0, line_height()));
    assert_eq!(root.size.h, 2.0 * line_height());
}

#[test]
fn test_insets_offset_children_and_grow_height() {
    let mut tree = NodeTree::new();
    let div = el(&mut tree, NodeId::ROOT, "div");
    let p = el(&mut tree, div, "p");
    text(&mut tree, p, "hi");

    let root = layout(
        &tree,
        &resolver("div { margin: 4; padding: 3; }"),
        Size::new(100.0, 100.0),
        &CharMetrics,
        &TestImages::default(),
    )
    .unwrap();

    let p_box = expect_block(&root.children[0]);
    assert_eq!(p_box.position, Point::new(7.0, 7.0));
    assert_eq!(p_box.size.w, 86.0);
    assert_eq!(root.size.h, 7.0 + line_height() + 7.0);
}

#[test]
fn test_greedy_line_breaking() {
    let mut tree = NodeTree::new();
    let p = el(&mut tree, NodeId::ROOT, "p");
    text(&mut tree, p, "aaa bbb ccc");

    // "aaa bbb" is 70 units and fits in 75; adding " ccc" would need 110.
    let root = layout(
        &tree,
        &resolver(""),
        Size::new(75.0, 100.0),
        &CharMetrics,
        &TestImages::default(),
    )
    .unwrap();

    assert_eq!(root.children.len(), 2);
    let first = expect_line(&root.children[0]);
    let second = expect_line(&root.children[1]);
    assert_eq!(first.runs.len(), 1);
    assert_eq!(first.runs[0].text, "aaa bbb");
    assert_eq!(first.size.w, 70.0);
    assert_eq!(second.runs[0].text, "ccc");
    assert_eq!(second.size.w, 30.0);
    assert_eq!(first.position, Point::new(0.0, 0.0));
    assert_eq!(second.position, Point::new(0.0, line_height()));
    assert_eq!(root.size.h, 2.0 * line_height());
}

#[test]
fn test_overflow_word_gets_its_own_line() {
    let mut tree = NodeTree::new();
    let p = el(&mut tree, NodeId::ROOT, "p");
    text(&mut tree, p, "a incomprehensibilities b");

    let root = layout(
        &tree,
        &resolver(""),
        Size::new(75.0, 100.0),
        &CharMetrics,
        &TestImages::default(),
    )
    .unwrap();

    assert_eq!(root.children.len(), 3);
    let middle = expect_line(&root.children[1]);
    assert_eq!(middle.runs[0].text, "incomprehensibilities");
    assert!(middle.size.w > 75.0);
}

#[test]
fn test_text_alignment_offsets_lines() {
    for (align, expected_x) in [("left", 0.0), ("center", 30.0), ("right", 60.0)] {
        let mut tree = NodeTree::new();
        let p = el(&mut tree, NodeId::ROOT, "p");
        text(&mut tree, p, "aaaa");

        let sheet = format!("p {{ text-align: {align}; }}");
        let root = layout(
            &tree,
            &resolver(&sheet),
            Size::new(100.0, 100.0),
            &CharMetrics,
            &TestImages::default(),
        )
        .unwrap();

        let line = expect_line(&root.children[0]);
        assert_eq!(line.size.w, 40.0);
        assert_eq!(line.position.x, expected_x, "align {align}");
        // Runs stay line-relative.
        assert_eq!(line.runs[0].position.x, 0.0);
    }
}

#[test]
fn test_display_none_generates_no_box_and_no_gap() {
    let mut tree = NodeTree::new();
    let div = el(&mut tree, NodeId::ROOT, "div");
    let p1 = el(&mut tree, div, "p");
    text(&mut tree, p1, "hi");
    let hidden = el(&mut tree, div, "aside");
    text(&mut tree, hidden, "secret");
    let p2 = el(&mut tree, div, "p");
    text(&mut tree, p2, "ho");

    let root = layout(
        &tree,
        &resolver("aside { display: none; }"),
        Size::new(100.0, 100.0),
        &CharMetrics,
        &TestImages::default(),
    )
    .unwrap();

    assert_eq!(root.children.len(), 2);
    let second = expect_block(&root.children[1]);
    assert_eq!(second.position.y, line_height());
}

#[test]
fn test_hidden_inline_child_leaves_one_run() {
    let mut tree = NodeTree::new();
    let p = el(&mut tree, NodeId::ROOT, "p");
    text(&mut tree, p, "aaa");
    let hidden = el(&mut tree, p, "span");
    text(&mut tree, hidden, "xxx");
    text(&mut tree, p, "bbb");

    let root = layout(
        &tree,
        &resolver("span { display: none; }"),
        Size::new(200.0, 100.0),
        &CharMetrics,
        &TestImages::default(),
    )
    .unwrap();

    let line = expect_line(&root.children[0]);
    assert_eq!(line.runs.len(), 1);
    assert_eq!(line.runs[0].text, "aaa bbb");
}

#[test]
fn test_runs_split_on_style_boundaries() {
    let mut tree = NodeTree::new();
    let p = el(&mut tree, NodeId::ROOT, "p");
    text(&mut tree, p, "aa");
    let b = el(&mut tree, p, "b");
    text(&mut tree, b, "bb");
    text(&mut tree, p, "cc");

    let root = layout(
        &tree,
        &resolver("b { font-weight: bold; }"),
        Size::new(200.0, 100.0),
        &CharMetrics,
        &TestImages::default(),
    )
    .unwrap();

    let line = expect_line(&root.children[0]);
    assert_eq!(line.runs.len(), 3);
    assert_eq!(line.runs[0].text, "aa");
    assert_eq!(line.runs[0].position.x, 0.0);
    assert_eq!(line.runs[1].text, "bb");
    assert_eq!(line.runs[1].position.x, 30.0);
    assert_eq!(line.runs[1].style.font_weight, FontWeight::Bold);
    assert_eq!(line.runs[2].text, "cc");
    assert_eq!(line.runs[2].position.x, 60.0);
    assert_eq!(line.size.w, 80.0);
}

#[test]
fn test_empty_element_collapses_to_insets() {
    let mut tree = NodeTree::new();
    let _p = el(&mut tree, NodeId::ROOT, "p");

    let root = layout(
        &tree,
        &resolver("p { padding: 5; }"),
        Size::new(100.0, 100.0),
        &CharMetrics,
        &TestImages::default(),
    )
    .unwrap();

    assert!(root.children.is_empty());
    // The root here is the p itself.
    assert_eq!(root.size.h, 10.0);
}

#[test]
fn test_unloaded_image_uses_placeholder_and_starts_load() {
    let mut tree = NodeTree::new();
    let div = el(&mut tree, NodeId::ROOT, "div");
    let img = el(&mut tree, div, "img");
    tree.set_attr(img, "src", "cat.png");

    let images = TestImages::default();
    let root = layout(
        &tree,
        &resolver(""),
        Size::new(100.0, 100.0),
        &CharMetrics,
        &images,
    )
    .unwrap();

    let image = expect_image(&root.children[0]);
    assert_eq!(image.size, IMAGE_PLACEHOLDER_SIZE);
    assert_eq!(image.src, "cat.png");
    assert_eq!(images.loads.borrow().as_slice(), ["cat.png"]);
}

#[test]
fn test_image_without_src_never_touches_the_cache() {
    let mut tree = NodeTree::new();
    let div = el(&mut tree, NodeId::ROOT, "div");
    let _img = el(&mut tree, div, "img");

    let images = TestImages::default();
    let root = layout(
        &tree,
        &resolver(""),
        Size::new(100.0, 100.0),
        &CharMetrics,
        &images,
    )
    .unwrap();

    let image = expect_image(&root.children[0]);
    assert_eq!(image.size, IMAGE_PLACEHOLDER_SIZE);
    assert_eq!(image.src, "");
    assert!(images.loads.borrow().is_empty());
}

#[test]
fn test_loaded_image_uses_intrinsic_size() {
    let mut tree = NodeTree::new();
    let div = el(&mut tree, NodeId::ROOT, "div");
    let img = el(&mut tree, div, "img");
    tree.set_attr(img, "src", "cat.png");

    let mut images = TestImages::default();
    let _ = images
        .sizes
        .insert("cat.png".to_string(), Size::new(80.0, 60.0));
    let root = layout(
        &tree,
        &resolver(""),
        Size::new(100.0, 100.0),
        &CharMetrics,
        &images,
    )
    .unwrap();

    let image = expect_image(&root.children[0]);
    assert_eq!(image.size, Size::new(80.0, 60.0));
    assert!(images.loads.borrow().is_empty());
    assert_eq!(root.size.h, 60.0);
}

#[test]
fn test_image_attribute_overrides_single_axis() {
    let mut tree = NodeTree::new();
    let div = el(&mut tree, NodeId::ROOT, "div");
    let img = el(&mut tree, div, "img");
    tree.set_attr(img, "src", "cat.png");
    tree.set_attr(img, "width", "30");

    let root = layout(
        &tree,
        &resolver(""),
        Size::new(100.0, 100.0),
        &CharMetrics,
        &TestImages::default(),
    )
    .unwrap();

    let image = expect_image(&root.children[0]);
    assert_eq!(image.size, Size::new(30.0, IMAGE_PLACEHOLDER_SIZE.h));
}

#[test]
fn test_image_in_inline_flow_breaks_the_line() {
    let mut tree = NodeTree::new();
    let p = el(&mut tree, NodeId::ROOT, "p");
    text(&mut tree, p, "before");
    let img = el(&mut tree, p, "img");
    tree.set_attr(img, "src", "cat.png");
    text(&mut tree, p, "after");

    let root = layout(
        &tree,
        &resolver(""),
        Size::new(200.0, 100.0),
        &CharMetrics,
        &TestImages::default(),
    )
    .unwrap();

    assert_eq!(root.children.len(), 3);
    let first = expect_line(&root.children[0]);
    assert_eq!(first.runs[0].text, "before");
    let image = expect_image(&root.children[1]);
    assert_eq!(image.position.y, line_height());
    let second = expect_line(&root.children[2]);
    assert_eq!(second.runs[0].text, "after");
    assert_eq!(second.position.y, line_height() + IMAGE_PLACEHOLDER_SIZE.h);
}

#[test]
fn test_layout_is_idempotent() {
    let mut tree = NodeTree::new();
    let div = el(&mut tree, NodeId::ROOT, "div");
    let h = el(&mut tree, div, "h1");
    text(&mut tree, h, "title text");
    let p = el(&mut tree, div, "p");
    text(&mut tree, p, "some body words that wrap over more than one line");
    let img = el(&mut tree, p, "img");
    tree.set_attr(img, "src", "cat.png");

    let resolver = resolver("div { padding: 2; } p { margin: 3; text-align: center; }");
    let viewport = Size::new(120.0, 100.0);
    let first = layout(&tree, &resolver, viewport, &CharMetrics, &TestImages::default()).unwrap();
    let second = layout(&tree, &resolver, viewport, &CharMetrics, &TestImages::default()).unwrap();

    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_empty_document_is_an_error() {
    let tree = NodeTree::new();
    let result = layout(
        &tree,
        &resolver(""),
        Size::new(100.0, 100.0),
        &CharMetrics,
        &TestImages::default(),
    );
    assert!(result.is_err());
}
