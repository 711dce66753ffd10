//! Point to element hit-testing over the box tree.
//!
//! [CSSOM View § 5 Extensions to the Document interface](https://www.w3.org/TR/cssom-view-1/#extensions-to-the-document-interface)
//!
//! The equivalent of `elementFromPoint`: given a point in the root box's
//! coordinate space, find the element whose box most specifically contains
//! it. Children are scanned in document order and the first containing child
//! wins; overlap from negative margins therefore resolves to the earlier
//! sibling. A point inside a box but outside all of its children belongs to
//! the box's own element.

use quill_dom::NodeId;

use crate::geometry::Point;
use crate::layout::layout_box::{BlockBox, LayoutBox};

/// Find the element under `point`.
///
/// `point` is in the coordinate space the root box is positioned in. Never
/// fails: a point outside every child resolves to the root element itself.
#[must_use]
pub fn find_element(root: &BlockBox, point: Point) -> NodeId {
    find_in_block(root, point.subtract(root.position))
}

fn find_in_block(block: &BlockBox, point: Point) -> NodeId {
    for child in &block.children {
        let bounds = child.bounds();
        if !bounds.contains(point) {
            continue;
        }
        let local = point.subtract(bounds.top_left());
        match child {
            LayoutBox::Block(inner) => return find_in_block(inner, local),
            LayoutBox::Image(image) => return image.element,
            LayoutBox::Run(run) => return run.element,
            LayoutBox::Line(line) => {
                for run in &line.runs {
                    if run.bounds().contains(local) {
                        return run.element;
                    }
                }
                // Inside the line but between runs: keep scanning, the
                // point may sit over a later sibling.
            }
        }
    }
    block.element
}
