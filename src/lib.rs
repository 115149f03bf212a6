//! Sky Command - side-view jetpack combat simulation
//!
//! Core modules:
//! - `sim`: Simulation engine (physics, combat, AI, waves, game state)
//! - `settings`: Runtime configuration for the headless runner
//! - `demo`: Autopilot input source

pub mod demo;
pub mod settings;
pub mod sim;

pub use settings::{QualityPreset, Settings};

use glam::Vec2;

/// Game tuning constants
///
/// Time is measured in baseline frames (1/60 s): `dt = 1.0` is one frame.
/// Distances are world units.
pub mod consts {
    /// Baseline frame length in milliseconds
    pub const BASE_FRAME_MS: f32 = 16.67;
    /// Largest dt a single update may integrate
    pub const MAX_FRAME_DT: f32 = 2.0;
    /// Frames per second the dt scale is normalized to
    pub const BASE_FPS: f32 = 60.0;

    /// Movement
    pub const GRAVITY: f32 = 0.65;
    pub const FRICTION_GROUND: f32 = 0.70;
    pub const FRICTION_AIR: f32 = 0.96;
    pub const MOVE_ACCELERATION: f32 = 2.0;
    pub const JETPACK_FORCE: f32 = 0.95;

    /// Jetpack fuel
    pub const FUEL_MAX: f32 = 100.0;
    pub const FUEL_CONSUMPTION: f32 = 0.6;
    pub const FUEL_REGEN: f32 = 0.8;

    /// Player
    pub const PLAYER_MAX_HEALTH: f32 = 100.0;
    pub const PLAYER_WIDTH: f32 = 30.0;
    pub const PLAYER_HEIGHT: f32 = 50.0;
    /// Passive regeneration per frame while hurt
    pub const PLAYER_REGEN: f32 = 0.1;
    /// Anything below this depth has fallen out of the world
    pub const WORLD_DEPTH_LIMIT: f32 = 2000.0;
    /// Height the player is dropped back in at after a fall revive
    pub const REVIVE_DROP_Y: f32 = 500.0;

    /// Waves
    pub const WAVE_INTERMISSION_TIME: f32 = 180.0;
    pub const WAVE_ENEMY_BASE: u32 = 2;
    pub const WAVE_ENEMY_CAP: u32 = 12;
    pub const WAVE_CLEAR_HEAL: f32 = 25.0;
    /// Bots spawn in a band this wide starting at each far edge
    pub const SPAWN_LEFT_X: f32 = -1500.0;
    pub const SPAWN_RIGHT_X: f32 = 2500.0;
    pub const SPAWN_SPREAD: f32 = 500.0;
    pub const SPAWN_Y: f32 = 0.0;

    /// Bots
    pub const BOT_ACCELERATION: f32 = 0.6;
    pub const BOT_ENGAGE_RANGE: f32 = 600.0;
    pub const BOT_KILL_SCORE: u64 = 150;

    /// Companion drone
    pub const COMPANION_SIZE: f32 = 24.0;
    pub const COMPANION_HEALTH: f32 = 9999.0;
    pub const COMPANION_FOLLOW_X: f32 = 40.0;
    pub const COMPANION_FOLLOW_Y: f32 = 65.0;
    pub const COMPANION_BOB: f32 = 10.0;
    pub const COMPANION_SMOOTHING: f32 = 0.08;
    pub const POINT_DEFENSE_RANGE: f32 = 80.0;
    pub const POINT_DEFENSE_COOLDOWN: f32 = 90.0;
    pub const COMPANION_ATTACK_RANGE: f32 = 500.0;

    /// Projectiles
    pub const PROJECTILE_RADIUS: f32 = 4.0;
    pub const PROJECTILE_CULL_DISTANCE: f32 = 3000.0;
    /// Weapons are held this far above body center
    pub const SHOULDER_HEIGHT: f32 = 12.0;
    pub const MUZZLE_OFFSET: f32 = 30.0;
    pub const MUZZLE_FLASH_TIME: f32 = 3.0;
    /// Rounds an empty magazine is topped back up to outside a reload
    pub const FALLBACK_MAGAZINE: u32 = 10;
    pub const BLAST_POWER_FRIENDLY: f32 = 0.8;
    pub const BLAST_POWER_HOSTILE: f32 = 0.5;

    /// Particles
    pub const PARTICLE_DECAY: f32 = 0.02;
    pub const MAX_PARTICLES: usize = 500;

    /// Camera smoothing per frame
    pub const CAMERA_SMOOTHING: f32 = 0.15;
    pub const VIEWPORT_WIDTH: f32 = 1280.0;
    pub const VIEWPORT_HEIGHT: f32 = 720.0;
}

/// Packed 0xRRGGBB color
pub type Rgb = u32;

/// Palette shared with the renderer
pub mod colors {
    use super::Rgb;

    pub const PLAYER: Rgb = 0x3b82f6;
    pub const COMPANION: Rgb = 0x34d399;
    pub const BOT_MELEE: Rgb = 0xf87171;
    pub const BOT_SHOOTER: Rgb = 0xc084fc;
    pub const BOT_HEAVY: Rgb = 0x475569;
    pub const EXPLOSION: Rgb = 0xff4400;
    pub const PICKUP_FLASH: Rgb = 0xffffff;
}

/// Unit vector pointing along `angle` (radians, +y down)
#[inline]
pub fn direction(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Angle of the vector from `from` to `to`
#[inline]
pub fn angle_between(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}

/// Whether an aim angle points into the right half-plane
#[inline]
pub fn faces_right(angle: f32) -> bool {
    angle.abs() < std::f32::consts::FRAC_PI_2
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_direction_is_unit() {
        for angle in [0.0, 0.5, PI / 2.0, -2.0, PI] {
            assert!((direction(angle).length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_angle_between_axes() {
        assert!(angle_between(Vec2::ZERO, Vec2::new(10.0, 0.0)).abs() < 1e-6);
        assert!((angle_between(Vec2::ZERO, Vec2::new(0.0, 10.0)) - PI / 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_faces_right() {
        assert!(faces_right(0.0));
        assert!(faces_right(-1.0));
        assert!(!faces_right(PI));
        assert!(!faces_right(2.0));
    }
}
