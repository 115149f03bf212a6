//! Weapons, projectiles, and damage
//!
//! Firing goes through `operate_weapon`, which every shooter (player, bots,
//! companion) calls once per frame. Projectiles are resolved afterwards by
//! `update_projectiles` against terrain, the opposing side, and the
//! companion's point defense.

use glam::Vec2;
use rand::Rng;

use super::state::{Character, GameState, Movable, Owner, Projectile};
use crate::consts::*;
use crate::{colors, direction};

/// Trigger inputs presented to a weapon for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Trigger {
    /// Fire is held down
    pub held: bool,
    /// Fire went down this frame (semi-automatic weapons need this)
    pub just_pressed: bool,
    /// Reload requested
    pub reload: bool,
}

impl Trigger {
    /// AI trigger: every held frame counts as a fresh press
    pub fn eager(held: bool, reload: bool) -> Self {
        Self {
            held,
            just_pressed: true,
            reload,
        }
    }
}

/// What a weapon did this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeaponAction {
    /// No weapon selected
    Unarmed,
    Idle,
    Reloaded,
    Fired,
}

/// Tick weapon timers, then reload or fire according to `trigger`
pub fn operate_weapon<R: Rng>(
    shooter: &mut Character,
    owner: Owner,
    trigger: Trigger,
    dt: f32,
    projectiles: &mut Vec<Projectile>,
    rng: &mut R,
) -> WeaponAction {
    if shooter.muzzle_flash > 0.0 {
        shooter.muzzle_flash = (shooter.muzzle_flash - dt).max(0.0);
    }

    let Some(weapon) = shooter.weapon_mut() else {
        return WeaponAction::Unarmed;
    };
    weapon.refill_if_empty();
    weapon.cool_down(dt);

    if trigger.reload && weapon.reload() {
        return WeaponAction::Reloaded;
    }

    let stats = weapon.stats();
    let pulled = trigger.held && (stats.automatic || trigger.just_pressed);
    if !pulled || weapon.fire_timer > 0.0 || weapon.mag_ammo == 0 {
        return WeaponAction::Idle;
    }

    weapon.mag_ammo -= 1;
    weapon.fire_timer = stats.fire_rate;
    shooter.muzzle_flash = MUZZLE_FLASH_TIME;

    let offset = (rng.random::<f32>() - 0.5) * stats.spread;
    let heading = shooter.aim_angle + offset;
    projectiles.push(Projectile {
        owner,
        pos: shooter.shoulder() + direction(shooter.aim_angle) * MUZZLE_OFFSET,
        vel: direction(heading) * stats.speed,
        radius: PROJECTILE_RADIUS,
        damage: stats.damage,
        color: stats.color,
        explosive: stats.explosive,
        blast_radius: stats.blast_radius,
    });
    WeaponAction::Fired
}

/// Area damage to every bot strictly inside `radius` of `center`
pub fn apply_blast(bots: &mut [Character], center: Vec2, radius: f32, damage: f32) -> usize {
    let mut hit = 0;
    for bot in bots.iter_mut() {
        if bot.body.pos.distance(center) < radius {
            bot.health -= damage;
            hit += 1;
        }
    }
    hit
}

/// How a projectile's frame ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fate {
    Flying,
    Intercepted,
    Impact,
    Culled,
}

/// Advance every projectile and apply its effects
///
/// Surviving projectiles keep their relative order. Bots pushed to zero
/// health stay in the roster; the caller reaps them.
pub fn update_projectiles(state: &mut GameState, dt: f32) {
    let incoming = std::mem::take(&mut state.projectiles);
    let mut survivors = Vec::with_capacity(incoming.len());

    for mut projectile in incoming {
        if resolve_projectile(state, &mut projectile, dt) == Fate::Flying {
            survivors.push(projectile);
        }
    }

    state.projectiles = survivors;
}

fn resolve_projectile(state: &mut GameState, p: &mut Projectile, dt: f32) -> Fate {
    if !p.owner.is_friendly() && try_point_defense(state, p.pos) {
        return Fate::Intercepted;
    }

    p.pos += p.vel * dt;

    let mut hit = state.map.iter().any(|r| r.intersects_circle(p.pos, p.radius));
    if !hit {
        if p.owner.is_friendly() {
            if let Some(bot) = state.bots.iter_mut().find(|b| b.contains_point(p.pos)) {
                bot.health -= p.damage;
                hit = true;
            }
        } else if state.player.contains_point(p.pos) {
            state.player.health -= p.damage;
            hit = true;
        }
    }

    if hit {
        if p.explosive {
            state.spawn_explosion(p.pos, 10);
            let damage = p.damage * p.owner.blast_power();
            let caught = apply_blast(&mut state.bots, p.pos, p.blast_radius, damage);
            log::debug!(
                "Blast at ({:.0}, {:.0}) caught {} bot(s)",
                p.pos.x,
                p.pos.y,
                caught
            );
        }
        return Fate::Impact;
    }

    if (p.pos.x - state.player.body.pos.x).abs() > PROJECTILE_CULL_DISTANCE {
        return Fate::Culled;
    }
    Fate::Flying
}

/// Companion shoots down a hostile round near the player if it can
fn try_point_defense(state: &mut GameState, pos: Vec2) -> bool {
    if pos.distance(state.player.body.pos) >= POINT_DEFENSE_RANGE {
        return false;
    }
    let Some(drone) = state.companion.companion_state_mut() else {
        return false;
    };
    if !drone.point_defense_ready() {
        return false;
    }
    drone.point_defense_cooldown = POINT_DEFENSE_COOLDOWN;
    state.spawn_flash(pos, Vec2::ZERO, colors::COMPANION, 20.0);
    log::debug!("Point defense intercept at ({:.0}, {:.0})", pos.x, pos.y);
    true
}
