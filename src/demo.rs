//! Autopilot: synthesizes player input from the current state
//!
//! Used by the headless runner to exercise the engine without a human.

use std::cmp::Ordering;

use glam::Vec2;

use crate::consts::BOT_ENGAGE_RANGE;
use crate::sim::{GameState, TickInput};

/// Horizontal distance the autopilot tries to keep from its target
const STANDOFF: f32 = 250.0;
/// Don't burn fuel below this
const FUEL_RESERVE: f32 = 30.0;
/// Target must be this far above before the jetpack kicks in
const CLIMB_MARGIN: f32 = 40.0;

/// Pick an input for this frame
pub fn autopilot(state: &GameState) -> TickInput {
    let player = &state.player;
    let pos = player.body.pos;
    let mut input = TickInput::default();

    // Fight the nearest bot; with none around, go collect the nearest pickup
    let nearest_bot = closest(pos, state.bots.iter().map(|b| b.body.pos));
    let goal = nearest_bot.or_else(|| closest(pos, state.pickups.iter().map(|p| p.pos)));
    let Some(goal) = goal else {
        input.aim_world = pos + Vec2::new(if player.facing_right { 100.0 } else { -100.0 }, 0.0);
        return input;
    };

    let dx = goal.x - pos.x;
    let keep_away = if nearest_bot.is_some() { STANDOFF } else { 0.0 };
    if dx.abs() > keep_away.max(10.0) {
        input.move_right = dx > 0.0;
        input.move_left = dx < 0.0;
    }
    input.ascend = goal.y < pos.y - CLIMB_MARGIN && player.fuel > FUEL_RESERVE;
    input.aim_world = goal;

    if nearest_bot.is_some_and(|b| b.distance(pos) < BOT_ENGAGE_RANGE) {
        input.fire = true;
        input.fire_just_pressed = player.weapon().is_some_and(|w| w.fire_timer <= 0.0);
    }

    // Prefer the newest weapon that still has something to shoot
    input.weapon_slot = player
        .inventory
        .iter()
        .rposition(|w| w.mag_ammo > 0 || w.reserve_ammo > 0 || w.stats().infinite_reserve);

    if let Some(weapon) = player.weapon() {
        let low = (weapon.stats().mag_size / 4).max(1);
        input.reload = weapon.mag_ammo < low && !weapon.is_full();
    }

    input
}

fn closest(from: Vec2, points: impl Iterator<Item = Vec2>) -> Option<Vec2> {
    points.min_by(|a, b| {
        a.distance(from)
            .partial_cmp(&b.distance(from))
            .unwrap_or(Ordering::Equal)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::PLAYER_START;
    use crate::sim::{BotClass, Character, WaveStatus, tick};

    fn add_bot(state: &mut GameState, pos: Vec2) {
        let id = state.next_entity_id();
        let bot = Character::bot(id, BotClass::Shooter, pos, &mut state.rng);
        state.bots.push(bot);
    }

    #[test]
    fn test_heads_for_pickup_when_quiet() {
        let state = GameState::new(1);
        let input = autopilot(&state);
        // Nearest starting pickup is the railgun on the left ledge
        assert!(input.move_left);
        assert!(!input.fire);
        assert_eq!(input.aim_world, Vec2::new(-200.0, 600.0));
        assert!(input.ascend);
    }

    #[test]
    fn test_engages_bot_in_range() {
        let mut state = GameState::new(1);
        let target = state.player.body.pos + Vec2::new(-150.0, 0.0);
        add_bot(&mut state, target);
        let input = autopilot(&state);
        assert!(input.fire);
        assert!(input.fire_just_pressed);
        assert_eq!(input.aim_world, target);
        // Inside the standoff distance: hold position
        assert!(!input.move_left && !input.move_right);
    }

    #[test]
    fn test_closes_distance_without_firing() {
        let mut state = GameState::new(1);
        let target = state.player.body.pos + Vec2::new(900.0, 0.0);
        add_bot(&mut state, target);
        let input = autopilot(&state);
        assert!(input.move_right);
        assert!(!input.fire);
    }

    #[test]
    fn test_keeps_fuel_reserve() {
        let mut state = GameState::new(1);
        let target = state.player.body.pos + Vec2::new(100.0, -300.0);
        add_bot(&mut state, target);
        state.player.fuel = FUEL_RESERVE - 1.0;
        assert!(!autopilot(&state).ascend);
        state.player.fuel = state.player.max_fuel;
        assert!(autopilot(&state).ascend);
    }

    #[test]
    fn test_reloads_when_low() {
        let mut state = GameState::new(1);
        state.player.inventory[0].mag_ammo = 2;
        assert!(autopilot(&state).reload);
        state.player.inventory[0].mag_ammo = 12;
        assert!(!autopilot(&state).reload);
    }

    #[test]
    fn test_drives_a_match() {
        let mut state = GameState::new(2024);
        for _ in 0..1200 {
            let input = autopilot(&state);
            tick(&mut state, &input, 1.0);
        }
        assert!(state.wave > 1 || state.wave_status == WaveStatus::Active || state.game_over);
        assert_ne!(state.player.body.pos, PLAYER_START);
    }
}
