//! Integer geometry shared by sprites, layers and the renderer.
//!
//! [`Rect`] is the box every sprite and layer carries. All accessors are
//! derived from `(x, y, w, h)`; nothing is cached, so a box can never get out
//! of sync with the rectangle it describes.
//!
//! # Related
//!
//! - [`crate::components::anchor`] – placing a rectangle around an anchor point
//! - [`crate::systems::collision`] – AABB tests built on [`Rect::intersects`]

use serde::{Deserialize, Serialize};

/// A point in pixel space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub w: i32,
    pub h: i32,
}

impl Size {
    pub const fn new(w: i32, h: i32) -> Self {
        Self { w, h }
    }
}

/// Axis-aligned rectangle. `x`/`y` is the top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub const fn from_size(size: Size) -> Self {
        Self::new(0, 0, size.w, size.h)
    }

    pub fn size(&self) -> Size {
        Size::new(self.w, self.h)
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.left(), self.top())
    }

    pub fn top_right(&self) -> Point {
        Point::new(self.right(), self.top())
    }

    pub fn bottom_left(&self) -> Point {
        Point::new(self.left(), self.bottom())
    }

    pub fn bottom_right(&self) -> Point {
        Point::new(self.right(), self.bottom())
    }

    /// Geometric center, rounded toward the top-left.
    pub fn center(&self) -> Point {
        Point::new(self.x + self.w / 2, self.y + self.h / 2)
    }

    /// Average of the four corners.
    pub fn centroid(&self) -> Point {
        let corners = [
            self.top_left(),
            self.top_right(),
            self.bottom_left(),
            self.bottom_right(),
        ];
        let (sx, sy) = corners
            .iter()
            .fold((0, 0), |(sx, sy), p| (sx + p.x, sy + p.y));
        Point::new(sx / 4, sy / 4)
    }

    /// Length of the diagonal.
    pub fn diagonal(&self) -> f32 {
        (self.w as f32).hypot(self.h as f32)
    }

    /// Non-empty overlap test. Rectangles that merely touch do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        !(self.right() <= other.left()
            || self.left() >= other.right()
            || self.bottom() <= other.top()
            || self.top() >= other.bottom())
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }

    pub fn translated(&self, dx: i32, dy: i32) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.w, self.h)
    }
}

/// Anything that occupies a box on screen.
pub trait Bounded {
    fn bounds(&self) -> Rect;
}

impl Bounded for Rect {
    fn bounds(&self) -> Rect {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sides_and_corners() {
        let r = Rect::new(10, 20, 30, 40);
        assert_eq!(r.left(), 10);
        assert_eq!(r.right(), 40);
        assert_eq!(r.top(), 20);
        assert_eq!(r.bottom(), 60);
        assert_eq!(r.top_left(), Point::new(10, 20));
        assert_eq!(r.bottom_right(), Point::new(40, 60));
        assert_eq!(r.top_right(), Point::new(40, 20));
        assert_eq!(r.bottom_left(), Point::new(10, 60));
    }

    #[test]
    fn test_center_and_centroid() {
        let r = Rect::new(0, 0, 10, 20);
        assert_eq!(r.center(), Point::new(5, 10));
        assert_eq!(r.centroid(), Point::new(5, 10));
        let odd = Rect::new(1, 1, 3, 3);
        assert_eq!(odd.center(), Point::new(2, 2));
    }

    #[test]
    fn test_diagonal() {
        let r = Rect::new(0, 0, 3, 4);
        assert!((r.diagonal() - 5.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_intersects_overlapping() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 5, 10, 10);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_intersects_disjoint() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(20, 20, 5, 5);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(10, 0, 10, 10);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_contains() {
        let r = Rect::new(0, 0, 10, 10);
        assert!(r.contains(Point::new(0, 0)));
        assert!(r.contains(Point::new(9, 9)));
        assert!(!r.contains(Point::new(10, 5)));
    }
}
