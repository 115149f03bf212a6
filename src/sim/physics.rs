//! Body integration and axis-separated collision against the static map
//!
//! Each step moves horizontally and resolves, then moves vertically and
//! resolves. Doing the axes separately keeps fast diagonal movement from
//! slipping through platform corners.

use glam::Vec2;

use super::geom::Rect;
use super::state::{Character, Movable};
use crate::consts::*;

/// Axis being resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Horizontal,
    Vertical,
}

/// Integrate one step for a body and resolve it against `map`
pub fn step<M: Movable + ?Sized>(mover: &mut M, dt: f32, map: &[Rect]) {
    let body = mover.body_mut();

    body.vel.x += body.acc.x * dt;
    body.vel.y += GRAVITY * dt;

    let friction = if body.grounded {
        FRICTION_GROUND
    } else {
        FRICTION_AIR
    };
    body.vel.x *= friction.powf(dt);

    body.pos.x += body.vel.x * dt;
    resolve(mover, map, Axis::Horizontal);

    mover.body_mut().grounded = false;
    let body = mover.body_mut();
    body.pos.y += body.vel.y * dt;
    resolve(mover, map, Axis::Vertical);
}

/// Push the body out of every overlapping rectangle along one axis
fn resolve<M: Movable + ?Sized>(mover: &mut M, map: &[Rect], axis: Axis) {
    // Direction is taken before any push zeroes the velocity
    let heading = mover.body().vel;
    for wall in map {
        if !mover.bounds().intersects(wall) {
            continue;
        }
        let body = mover.body_mut();
        let half = body.size / 2.0;
        match axis {
            Axis::Horizontal => {
                body.pos.x = if heading.x > 0.0 {
                    wall.x - half.x
                } else {
                    wall.right() + half.x
                };
                body.vel.x = 0.0;
            }
            Axis::Vertical => {
                if heading.y > 0.0 {
                    body.pos.y = wall.y - half.y;
                    body.grounded = true;
                } else {
                    body.pos.y = wall.bottom() + half.y;
                }
                body.vel.y = 0.0;
            }
        }
    }
}

/// Horizontal acceleration from left/right intent
pub fn move_acceleration(left: bool, right: bool) -> f32 {
    if left {
        -MOVE_ACCELERATION
    } else if right {
        MOVE_ACCELERATION
    } else {
        0.0
    }
}

/// Burn or regenerate jetpack fuel and apply thrust
pub fn jetpack(character: &mut Character, ascend: bool, dt: f32) {
    character.jetpacking = ascend && character.fuel > 0.0;

    if character.jetpacking {
        character.body.vel.y -= JETPACK_FORCE * dt;
        character.fuel = (character.fuel - FUEL_CONSUMPTION * dt).max(0.0);
    } else {
        character.fuel = (character.fuel + FUEL_REGEN * dt).min(character.max_fuel);
    }
}

/// Below the world-depth threshold
pub fn out_of_world(pos: Vec2) -> bool {
    pos.y > WORLD_DEPTH_LIMIT
}
