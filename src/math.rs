//! Axis-aligned rectangles for bounds, playfield and collision tests
//!
//! Entity bounds are stored relative to the entity position and translated
//! into canvas space with [`Rect::translated`] before testing.

use glam::Vec2;
use serde::Deserialize;

/// An axis-aligned rectangle (origin is the top-left corner)
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Build a rect from its min and max corners
    pub fn from_min_max(min: Vec2, max: Vec2) -> Self {
        Self {
            origin: min,
            size: max - min,
        }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.origin
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.origin + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.origin + self.size * 0.5
    }

    /// Same rect moved by `offset`
    #[inline]
    pub fn translated(&self, offset: Vec2) -> Self {
        Self {
            origin: self.origin + offset,
            size: self.size,
        }
    }

    /// Inclusive point test (points on the edge are inside)
    pub fn contains_point(&self, p: Vec2) -> bool {
        let (min, max) = (self.min(), self.max());
        p.x >= min.x && p.x <= max.x && p.y >= min.y && p.y <= max.y
    }

    /// True if `other` lies entirely within this rect (shared edges allowed)
    pub fn contains_rect(&self, other: &Rect) -> bool {
        let (min, max) = (self.min(), self.max());
        let (omin, omax) = (other.min(), other.max());
        omin.x >= min.x && omin.y >= min.y && omax.x <= max.x && omax.y <= max.y
    }

    /// True if the interiors intersect (touching edges do not overlap)
    pub fn overlaps(&self, other: &Rect) -> bool {
        let (min, max) = (self.min(), self.max());
        let (omin, omax) = (other.min(), other.max());
        min.x < omax.x && omin.x < max.x && min.y < omax.y && omin.y < max.y
    }

    /// Shrink by `top` on the top edge and `edge` on the other three
    pub fn inset(&self, top: f32, edge: f32) -> Self {
        Self::from_min_max(
            self.min() + Vec2::new(edge, top),
            self.max() - Vec2::new(edge, edge),
        )
    }

    /// True if the rect has a positive area
    pub fn is_valid(&self) -> bool {
        self.size.x > 0.0 && self.size.y > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_point_edges_inclusive() {
        let r = Rect::new(0.0, 0.0, 10.0, 5.0);
        assert!(r.contains_point(Vec2::new(0.0, 0.0)));
        assert!(r.contains_point(Vec2::new(10.0, 5.0)));
        assert!(!r.contains_point(Vec2::new(10.1, 2.0)));
        assert!(!r.contains_point(Vec2::new(5.0, -0.1)));
    }

    #[test]
    fn test_contains_rect() {
        let outer = Rect::new(0.0, 0.0, 8.0, 6.0);
        assert!(outer.contains_rect(&Rect::new(2.0, 1.0, 4.0, 4.0)));
        assert!(outer.contains_rect(&outer));
        assert!(!outer.contains_rect(&Rect::new(5.0, 1.0, 4.0, 4.0)));
    }

    #[test]
    fn test_overlaps_ignores_touching() {
        let a = Rect::new(0.0, 0.0, 4.0, 4.0);
        assert!(a.overlaps(&Rect::new(3.0, 3.0, 4.0, 4.0)));
        assert!(!a.overlaps(&Rect::new(4.0, 0.0, 4.0, 4.0)));
        assert!(!a.overlaps(&Rect::new(10.0, 10.0, 1.0, 1.0)));
    }

    #[test]
    fn test_inset_reserves_top_margin() {
        let canvas = Rect::new(0.0, 0.0, 100.0, 80.0);
        let field = canvas.inset(12.0, 2.0);
        assert_eq!(field.min(), Vec2::new(2.0, 12.0));
        assert_eq!(field.max(), Vec2::new(98.0, 78.0));
        assert!(field.is_valid());
    }

    #[test]
    fn test_translated_keeps_size() {
        let bounds = Rect::new(0.0, 4.0, 8.0, 6.0);
        let moved = bounds.translated(Vec2::new(10.0, 20.0));
        assert_eq!(moved.origin, Vec2::new(10.0, 24.0));
        assert_eq!(moved.size, bounds.size);
        assert_eq!(moved.center(), Vec2::new(14.0, 27.0));
    }
}
