//! Smoothed camera that trails the player

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::CAMERA_SMOOTHING;

/// Top-left corner of the view in world space, plus the view size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub pos: Vec2,
    pub viewport: Vec2,
}

impl Camera {
    pub fn new(viewport: Vec2) -> Self {
        Self {
            pos: Vec2::ZERO,
            viewport,
        }
    }

    /// Ease toward centering `target` on screen
    pub fn follow(&mut self, target: Vec2, dt: f32) {
        let goal = target - self.viewport / 2.0;
        self.pos += (goal - self.pos) * CAMERA_SMOOTHING * dt;
    }

    /// World point at the middle of the view
    pub fn center(&self) -> Vec2 {
        self.pos + self.viewport / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follow_converges() {
        let mut cam = Camera::new(Vec2::new(800.0, 600.0));
        let target = Vec2::new(1000.0, 700.0);
        for _ in 0..200 {
            cam.follow(target, 1.0);
        }
        assert!((cam.center() - target).length() < 0.01);
    }

    #[test]
    fn test_follow_zero_dt_is_still() {
        let mut cam = Camera::new(Vec2::new(800.0, 600.0));
        cam.follow(Vec2::new(500.0, 500.0), 0.0);
        assert_eq!(cam.pos, Vec2::ZERO);
    }
}
