//! Spatial primitives for the side-view world
//!
//! Axis-aligned rectangles plus the three overlap tests the simulation
//! needs: box vs box (bodies against terrain), circle vs box (projectiles
//! against terrain), and point vs box (projectiles and pickups against bodies).
//! World space has +y pointing down.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle of the given size centered on `center`
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self {
            x: center.x - size.x / 2.0,
            y: center.y - size.y / 2.0,
            w: size.x,
            h: size.y,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Strict overlap: rectangles that merely share an edge do not intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        !(other.x >= self.right()
            || other.right() <= self.x
            || other.y >= self.bottom()
            || other.bottom() <= self.y)
    }

    /// Inclusive containment (points on the edge count)
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// Circle overlap, including the rounded-corner region
    pub fn intersects_circle(&self, center: Vec2, radius: f32) -> bool {
        let half = Vec2::new(self.w / 2.0, self.h / 2.0);
        let d = (center - self.center()).abs();

        if d.x > half.x + radius || d.y > half.y + radius {
            return false;
        }
        if d.x <= half.x || d.y <= half.y {
            return true;
        }

        let corner = d - half;
        corner.length_squared() <= radius * radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_intersects() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        assert!(!a.intersects(&Rect::new(20.0, 0.0, 5.0, 5.0)));
        // Touching edges do not count
        assert!(!a.intersects(&Rect::new(10.0, 0.0, 5.0, 5.0)));
        assert!(!a.intersects(&Rect::new(0.0, 10.0, 5.0, 5.0)));
    }

    #[test]
    fn test_contains_point_inclusive() {
        let r = Rect::new(-5.0, -5.0, 10.0, 10.0);
        assert!(r.contains_point(Vec2::ZERO));
        assert!(r.contains_point(Vec2::new(5.0, 5.0)));
        assert!(!r.contains_point(Vec2::new(5.1, 0.0)));
    }

    #[test]
    fn test_circle_edges_and_corners() {
        let r = Rect::new(0.0, 0.0, 100.0, 20.0);

        // Hovering just above the top face
        assert!(r.intersects_circle(Vec2::new(50.0, -3.0), 4.0));
        assert!(!r.intersects_circle(Vec2::new(50.0, -5.0), 4.0));

        // Diagonal off the top-left corner: (-3, -3) is ~4.24 away
        assert!(!r.intersects_circle(Vec2::new(-3.0, -3.0), 4.0));
        assert!(r.intersects_circle(Vec2::new(-2.0, -2.0), 4.0));
    }

    #[test]
    fn test_centered() {
        let r = Rect::centered(Vec2::new(0.0, 700.0), Vec2::new(30.0, 50.0));
        assert_eq!(r, Rect::new(-15.0, 675.0, 30.0, 50.0));
        assert_eq!(r.center(), Vec2::new(0.0, 700.0));
    }
}
