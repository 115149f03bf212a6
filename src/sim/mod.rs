//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame-normalized dt only (1.0 = one 60 Hz frame)
//! - Seeded RNG only
//! - Stable iteration order (roster order)
//! - No rendering or platform dependencies

pub mod ai;
pub mod camera;
pub mod combat;
pub mod geom;
pub mod physics;
pub mod state;
pub mod status;
pub mod tick;
pub mod wave;
pub mod weapons;

pub use camera::Camera;
pub use combat::{Trigger, WeaponAction};
pub use geom::Rect;
pub use state::{
    BotClass, Character, CompanionState, EntityId, GameState, MatchConfig, Movable, Owner,
    Particle, Pickup, Projectile, Role, WaveStatus,
};
pub use status::{StatusSnapshot, WeaponStatus};
pub use tick::{TickInput, frame_dt, tick};
pub use wave::WaveEvent;
pub use weapons::{Weapon, WeaponKind, WeaponStats};
