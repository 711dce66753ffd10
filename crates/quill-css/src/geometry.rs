//! Geometry primitives for layout.
//!
//! [CSS Box Model Module Level 3](https://www.w3.org/TR/css-box-3/)

use std::ops::Add;

use serde::Serialize;

/// A point in 2D space.
///
/// Box positions are stored relative to their owning box: a run's position is
/// relative to its line, a line's or child box's position is relative to its
/// parent block. Hit-testing translates points inward one level at a time.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate.
    pub y: f32,
}

impl Point {
    /// The origin.
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    /// Create a point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Point { x, y }
    }

    /// Translate by another point.
    #[must_use]
    pub fn add(self, other: Point) -> Point {
        Point {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Translate by the negation of another point (into its local space).
    #[must_use]
    pub fn subtract(self, other: Point) -> Point {
        Point {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Size {
    /// Width.
    pub w: f32,
    /// Height.
    pub h: f32,
}

impl Size {
    /// Create a size.
    #[must_use]
    pub const fn new(w: f32, h: f32) -> Self {
        Size { w, h }
    }

    /// This size as a rectangle at the origin.
    #[must_use]
    pub const fn to_rect(self) -> Rect {
        Rect {
            x: 0.0,
            y: 0.0,
            w: self.w,
            h: self.h,
        }
    }
}

/// A positioned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rect {
    /// Horizontal position of the top-left corner.
    pub x: f32,
    /// Vertical position of the top-left corner.
    pub y: f32,
    /// Width.
    pub w: f32,
    /// Height.
    pub h: f32,
}

impl Rect {
    /// Create a rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Rect { x, y, w, h }
    }

    /// Create a rectangle from a position and a size.
    #[must_use]
    pub const fn from_pos_size(position: Point, size: Size) -> Self {
        Rect {
            x: position.x,
            y: position.y,
            w: size.w,
            h: size.h,
        }
    }

    /// The top-left corner.
    #[must_use]
    pub const fn top_left(&self) -> Point {
        Point {
            x: self.x,
            y: self.y,
        }
    }

    /// The width/height pair.
    #[must_use]
    pub const fn size(&self) -> Size {
        Size {
            w: self.w,
            h: self.h,
        }
    }

    /// Shrink this rectangle inward by the given insets.
    ///
    /// [§ 3 The CSS Box Model](https://www.w3.org/TR/css-box-3/#box-model)
    ///
    /// This is how a content rectangle is derived from a box rectangle: the
    /// combined margin + border + padding insets move the origin down-right
    /// and reduce the extent on both axes.
    #[must_use]
    pub fn subtract_inset(&self, inset: Insets) -> Rect {
        Rect {
            x: self.x + inset.left,
            y: self.y + inset.top,
            w: self.w - inset.left - inset.right,
            h: self.h - inset.top - inset.bottom,
        }
    }

    /// Translate by a point.
    #[must_use]
    pub fn translate(&self, position: Point) -> Rect {
        Rect {
            x: self.x + position.x,
            y: self.y + position.y,
            w: self.w,
            h: self.h,
        }
    }

    /// Whether a point lies within this rectangle (edges inclusive).
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.y >= self.y
            && point.x <= self.x + self.w
            && point.y <= self.y + self.h
    }
}

/// Four edge offsets: top, right, bottom, left.
///
/// Used for margins, padding, and border thickness. Insets compose
/// additively: `margin + border + padding` gives the total offset from the
/// box edge to the content edge.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Insets {
    /// Top edge offset.
    pub top: f32,
    /// Right edge offset.
    pub right: f32,
    /// Bottom edge offset.
    pub bottom: f32,
    /// Left edge offset.
    pub left: f32,
}

impl Insets {
    /// Create insets with the given per-edge offsets.
    #[must_use]
    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Insets {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Create uniform insets with the same offset on every edge.
    #[must_use]
    pub const fn uniform(n: f32) -> Self {
        Insets {
            top: n,
            right: n,
            bottom: n,
            left: n,
        }
    }

    /// The top-left offset as a point.
    #[must_use]
    pub const fn top_left(&self) -> Point {
        Point {
            x: self.left,
            y: self.top,
        }
    }
}

impl Add for Insets {
    type Output = Insets;

    fn add(self, other: Insets) -> Insets {
        Insets {
            top: self.top + other.top,
            right: self.right + other.right,
            bottom: self.bottom + other.bottom,
            left: self.left + other.left,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtract_inset() {
        let rect = Size::new(100.0, 80.0).to_rect();
        let inner = rect.subtract_inset(Insets::uniform(10.0));
        assert_eq!(inner, Rect::new(10.0, 10.0, 80.0, 60.0));
    }

    #[test]
    fn test_insets_compose_additively() {
        let total = Insets::uniform(2.0) + Insets::uniform(3.0) + Insets::new(1.0, 0.0, 0.0, 0.0);
        assert_eq!(total, Insets::new(6.0, 5.0, 5.0, 5.0));
        assert_eq!(total.top_left(), Point::new(5.0, 6.0));
    }

    #[test]
    fn test_contains_edges_inclusive() {
        let rect = Rect::new(10.0, 10.0, 20.0, 20.0);
        assert!(rect.contains(Point::new(10.0, 10.0)));
        assert!(rect.contains(Point::new(30.0, 30.0)));
        assert!(rect.contains(Point::new(15.0, 25.0)));
        assert!(!rect.contains(Point::new(9.9, 15.0)));
        assert!(!rect.contains(Point::new(15.0, 30.1)));
    }

    #[test]
    fn test_translate_into_local_space_round_trips() {
        let rect = Rect::new(5.0, 7.0, 10.0, 10.0);
        let moved = rect.translate(Point::new(3.0, 4.0));
        assert_eq!(moved.top_left(), Point::new(8.0, 11.0));
        let p = Point::new(12.0, 14.0);
        assert_eq!(p.subtract(Point::new(3.0, 4.0)).add(Point::new(3.0, 4.0)), p);
    }
}
