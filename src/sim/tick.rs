//! Per-frame simulation update
//!
//! `tick` is the single entry point that advances a match. The order of the
//! steps inside it is fixed: wave director, player, companion, bots,
//! projectiles, particles, pickups, camera.

use std::cmp::Ordering;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::combat::{self, Trigger, WeaponAction};
use super::geom::Rect;
use super::state::{GameState, Movable, Owner, PLAYER_START, PickupOutcome};
use super::wave::{self, WaveEvent};
use super::{ai, physics};
use crate::colors;
use crate::consts::*;

/// Normalized input for one frame (keyboard/mouse or touch sticks alike)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    /// Jetpack
    pub ascend: bool,
    /// Fire held
    pub fire: bool,
    /// Fire went down this frame
    pub fire_just_pressed: bool,
    pub reload: bool,
    /// Direct inventory slot selection (0-based)
    pub weapon_slot: Option<usize>,
    /// Step through the inventory (+1 next, -1 previous)
    pub weapon_cycle: Option<i32>,
    /// Aim target in world coordinates
    pub aim_world: Vec2,
}

/// Convert a wall-clock frame interval into simulation dt
///
/// One baseline frame is 1.0; long frames are clamped so a hitch can't
/// carry bodies through thin platforms.
pub fn frame_dt(elapsed_ms: f32) -> f32 {
    (elapsed_ms / BASE_FRAME_MS).clamp(0.0, MAX_FRAME_DT)
}

/// How the player went down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Downed {
    Fell,
    Killed,
}

/// Advance the match by `dt` baseline frames
///
/// Returns the wave transition taken this frame, if any.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Option<WaveEvent> {
    if state.game_over || dt <= 0.0 {
        return None;
    }

    let wave_event = wave::update_waves(state, dt);

    update_player(state, input, dt);
    if state.game_over {
        return wave_event;
    }

    ai::drive_companion(state, dt);
    update_bots(state, dt);

    combat::update_projectiles(state, dt);
    reap_dead_bots(state);
    if state.player.is_dead() {
        player_down(state, Downed::Killed);
        if state.game_over {
            return wave_event;
        }
    }

    update_particles(state, dt);
    collect_pickups(state);
    state.camera.follow(state.player.body.pos, dt);
    wave_event
}

fn update_player(state: &mut GameState, input: &TickInput, dt: f32) {
    let GameState {
        player,
        projectiles,
        rng,
        map,
        ..
    } = state;

    if let Some(slot) = input.weapon_slot {
        player.select_weapon(slot);
    }
    if let Some(delta) = input.weapon_cycle {
        player.cycle_weapon(delta);
    }

    player.body.acc.x = physics::move_acceleration(input.move_left, input.move_right);
    physics::jetpack(player, input.ascend, dt);

    if player.health < player.max_health {
        player.health = (player.health + PLAYER_REGEN * dt).min(player.max_health);
    }

    player.aim_at(input.aim_world);
    let stride = player.body.vel.x.abs();
    let cadence = if stride > 0.5 { stride * 0.15 } else { 0.05 };
    player.anim_timer += cadence * dt;

    let trigger = Trigger {
        held: input.fire,
        just_pressed: input.fire_just_pressed,
        reload: input.reload,
    };
    let action = combat::operate_weapon(player, Owner::Player, trigger, dt, projectiles, rng);
    if action == WeaponAction::Reloaded {
        if let Some(weapon) = player.weapon() {
            log::debug!(
                "Player reloaded {} ({} in reserve)",
                weapon.kind.name(),
                weapon.reserve_ammo
            );
        }
    }
    physics::step(player, dt, map);

    if physics::out_of_world(state.player.body.pos) {
        player_down(state, Downed::Fell);
    }
}

fn update_bots(state: &mut GameState, dt: f32) {
    let GameState {
        bots,
        player,
        map,
        projectiles,
        rng,
        ..
    } = state;

    for bot in bots.iter_mut() {
        ai::drive_bot(bot, player, map, projectiles, rng, dt);
    }
    reap_dead_bots(state);
}

/// Remove dead bots, keeping roster order, and pay out for each
fn reap_dead_bots(state: &mut GameState) {
    let mut fallen = Vec::new();
    state.bots.retain(|bot| {
        if bot.is_dead() {
            fallen.push((bot.id, bot.body.pos));
            false
        } else {
            true
        }
    });

    for (id, pos) in fallen {
        state.score += BOT_KILL_SCORE;
        state.spawn_explosion(pos, 5);
        log::debug!("Bot {} destroyed (score {})", id, state.score);
    }
}

/// Spend the companion's revive charge, or end the match
fn player_down(state: &mut GameState, how: Downed) {
    let revived = match state.companion.companion_state_mut() {
        Some(drone) if drone.can_revive => {
            drone.can_revive = false;
            true
        }
        _ => false,
    };

    if !revived {
        if how == Downed::Fell {
            state.player.health = 0.0;
        }
        state.game_over = true;
        log::info!("Game over: wave {}, score {}", state.wave, state.score);
        return;
    }

    let drop_point = revive_point(state);
    let player = &mut state.player;
    player.health = player.max_health * 0.5;
    player.body.vel = Vec2::ZERO;
    let burst = match how {
        Downed::Fell => {
            player.body.pos = drop_point;
            30
        }
        Downed::Killed => 25,
    };
    let pos = player.body.pos;
    state.spawn_explosion(pos, burst);
    log::info!("Companion revived player ({:?}) at ({:.0}, {:.0})", how, pos.x, pos.y);
}

/// Drop point above the map rectangle horizontally nearest the camera center
fn revive_point(state: &GameState) -> Vec2 {
    let x = state.camera.center().x;
    let half = state.player.body.size / 2.0;
    let gap = |r: &Rect| (r.x - x).max(x - r.right()).max(0.0);
    let ground = state
        .map
        .iter()
        .min_by(|a, b| gap(a).partial_cmp(&gap(b)).unwrap_or(Ordering::Equal));
    let Some(ground) = ground else {
        return PLAYER_START;
    };

    let x = x.max(ground.x + half.x).min(ground.right() - half.x);
    Vec2::new(x, REVIVE_DROP_Y.min(ground.y - half.y))
}

fn update_particles(state: &mut GameState, dt: f32) {
    for p in state.particles.iter_mut() {
        p.pos += p.vel * dt;
        p.life -= PARTICLE_DECAY * dt;
    }
    state.particles.retain(|p| p.life > 0.0);
}

fn collect_pickups(state: &mut GameState) {
    let (taken, remaining): (Vec<_>, Vec<_>) = std::mem::take(&mut state.pickups)
        .into_iter()
        .partition(|p| state.player.contains_point(p.pos));
    state.pickups = remaining;

    for pickup in taken {
        let outcome = state.player.give_weapon(pickup.weapon);
        let size = match outcome {
            PickupOutcome::Restocked => 5.0,
            PickupOutcome::Added => 10.0,
        };
        state.spawn_flash(pickup.pos, Vec2::new(0.0, -1.0), colors::PICKUP_FLASH, size);
        log::debug!("Picked up {} ({:?})", pickup.weapon.name(), outcome);
    }
}
