// RustGamekit
// copyright rust_gamekit contributors 2016～2025

//! Integer pixel geometry shared by the UI layer and texture addressing.
//!
//! `Rect` stores its four edges (left/top/right/bottom) rather than an origin
//! and a size, so offsetting and intersecting never need a conversion.
//! Hit-testing is inclusive on every edge.

use serde::{Deserialize, Serialize};
use std::cmp::{max, min};

/// 2D integer coordinate
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }

    pub fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

/// Axis aligned rectangle, edges in pixels
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

pub const EMPTY_RECT: Rect = Rect::new(0, 0, 0, 0);

impl Rect {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Build from an origin and a size
    pub const fn from_size(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    pub fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    pub fn offset(&mut self, x: i32, y: i32) {
        self.left += x;
        self.right += x;
        self.top += y;
        self.bottom += y;
    }

    pub fn offset_by(&mut self, pt: Point) {
        self.offset(pt.x, pt.y);
    }

    /// Copy of self moved by `pt`
    pub fn offsetted(&self, pt: Point) -> Rect {
        let mut r = *self;
        r.offset_by(pt);
        r
    }

    /// Grow (or shrink with negative values) on both sides of each axis
    pub fn inflate(&mut self, x: i32, y: i32) {
        self.left -= x;
        self.right += x;
        self.top -= y;
        self.bottom += y;
    }

    pub fn contains_xy(&self, x: i32, y: i32) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }

    pub fn contains(&self, pt: Point) -> bool {
        self.contains_xy(pt.x, pt.y)
    }

    /// Overlap of two rects. The result may be empty (right < left) when they
    /// do not intersect, callers check `is_empty`.
    pub fn intersection(&self, other: &Rect) -> Rect {
        Rect::new(
            max(self.left, other.left),
            max(self.top, other.top),
            min(self.right, other.right),
            min(self.bottom, other.bottom),
        )
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        !self.intersection(other).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_test_is_inclusive() {
        let r = Rect::from_size(10, 10, 20, 5);
        assert!(r.contains(Point::new(10, 10)));
        assert!(r.contains(Point::new(30, 15)));
        assert!(!r.contains(Point::new(31, 15)));
        assert!(!r.contains(Point::new(9, 12)));
    }

    #[test]
    fn test_offset_and_inflate() {
        let mut r = Rect::new(0, 0, 10, 10);
        r.offset(5, -2);
        assert_eq!(r, Rect::new(5, -2, 15, 8));
        r.inflate(1, 2);
        assert_eq!(r, Rect::new(4, -4, 16, 10));
        assert_eq!(r.width(), 12);
        assert_eq!(r.height(), 14);
    }

    #[test]
    fn test_intersection() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 5, 20, 20);
        assert_eq!(a.intersection(&b), Rect::new(5, 5, 10, 10));
        assert!(a.intersects(&b));
        let c = Rect::new(11, 0, 20, 10);
        assert!(!a.intersects(&c));
    }
}
