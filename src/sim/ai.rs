//! Bot and companion behavior

use rand::Rng;

use super::combat::{Trigger, operate_weapon};
use super::geom::Rect;
use super::physics;
use super::state::{Character, GameState, Owner, Projectile};
use crate::consts::*;
use crate::{angle_between, faces_right};

/// Chase the player, aim at them, fall under physics, and shoot in range
pub fn drive_bot<R: Rng>(
    bot: &mut Character,
    player: &Character,
    map: &[Rect],
    projectiles: &mut Vec<Projectile>,
    rng: &mut R,
    dt: f32,
) {
    let dx = player.body.pos.x - bot.body.pos.x;
    let thrust = BOT_ACCELERATION * bot.speed_mod();
    bot.body.acc.x = if dx > 0.0 { thrust } else { -thrust };
    bot.anim_timer += 0.15 * dt;
    bot.aim_angle = angle_between(bot.body.pos, player.body.pos);
    bot.facing_right = faces_right(bot.aim_angle);

    physics::step(bot, dt, map);
    if physics::out_of_world(bot.body.pos) {
        bot.health = 0.0;
    }

    let in_range = dx.abs() < BOT_ENGAGE_RANGE;
    let dry = bot.weapon().is_some_and(|w| w.mag_ammo == 0);
    let owner = Owner::Bot(bot.id);
    operate_weapon(bot, owner, Trigger::eager(in_range, dry), dt, projectiles, rng);
}

/// Hover beside the player, tick point defense, and engage the nearest bot
pub fn drive_companion(state: &mut GameState, dt: f32) {
    let GameState {
        companion,
        player,
        bots,
        projectiles,
        rng,
        ..
    } = state;

    let side = if player.facing_right {
        -COMPANION_FOLLOW_X
    } else {
        COMPANION_FOLLOW_X
    };
    let bob = (player.anim_timer * 0.5).sin() * COMPANION_BOB;
    let target = player.body.pos + glam::Vec2::new(side, -COMPANION_FOLLOW_Y + bob);
    companion.body.pos += (target - companion.body.pos) * COMPANION_SMOOTHING * dt;
    companion.anim_timer += 0.1 * dt;

    if let Some(drone) = companion.companion_state_mut() {
        if drone.point_defense_cooldown > 0.0 {
            drone.point_defense_cooldown -= dt;
        }
    }

    let origin = companion.body.pos;
    let nearest = bots
        .iter()
        .map(|b| (b.body.pos, b.body.pos.distance(origin)))
        .filter(|&(_, d)| d < COMPANION_ATTACK_RANGE)
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(pos, _)| pos);

    match nearest {
        Some(target) => {
            companion.aim_angle = angle_between(origin, target);
            companion.facing_right = faces_right(companion.aim_angle);
        }
        None => {
            companion.aim_angle = player.aim_angle;
            companion.facing_right = player.facing_right;
        }
    }

    // Always pulling the trigger when there is something to shoot
    let trigger = Trigger::eager(nearest.is_some(), false);
    operate_weapon(companion, Owner::Companion, trigger, dt, projectiles, rng);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{BotClass, generate_map};
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn spawn_bot(state: &mut GameState, pos: Vec2) {
        let id = state.next_entity_id();
        let bot = Character::bot(id, BotClass::Shooter, pos, &mut state.rng);
        state.bots.push(bot);
    }

    #[test]
    fn test_bot_chases_and_fires_in_range() {
        let map = generate_map();
        let mut rng = Pcg32::seed_from_u64(1);
        let player = Character::player(1, Vec2::new(0.0, 775.0));
        let mut bot = Character::bot(2, BotClass::Shooter, Vec2::new(300.0, 775.0), &mut rng);
        let mut projectiles = Vec::new();

        drive_bot(&mut bot, &player, &map, &mut projectiles, &mut rng, 1.0);
        assert!(bot.body.acc.x < 0.0);
        assert!(!bot.facing_right);
        assert_eq!(projectiles.len(), 1);
        assert_eq!(projectiles[0].owner, Owner::Bot(2));
    }

    #[test]
    fn test_bot_holds_fire_out_of_range() {
        let map = generate_map();
        let mut rng = Pcg32::seed_from_u64(1);
        let player = Character::player(1, Vec2::new(0.0, 775.0));
        let mut bot = Character::bot(2, BotClass::Melee, Vec2::new(-900.0, 775.0), &mut rng);
        let mut projectiles = Vec::new();

        drive_bot(&mut bot, &player, &map, &mut projectiles, &mut rng, 1.0);
        assert!(bot.body.acc.x > 0.0);
        assert!((bot.body.acc.x - BOT_ACCELERATION * 1.2).abs() < 1e-6);
        assert!(projectiles.is_empty());
    }

    #[test]
    fn test_bot_falling_out_of_world_dies() {
        let mut rng = Pcg32::seed_from_u64(1);
        let player = Character::player(1, Vec2::ZERO);
        let mut bot = Character::bot(2, BotClass::Shooter, Vec2::new(0.0, 2100.0), &mut rng);
        let mut projectiles = Vec::new();
        drive_bot(&mut bot, &player, &[], &mut projectiles, &mut rng, 1.0);
        assert!(bot.is_dead());
    }

    #[test]
    fn test_companion_follows_behind_player() {
        let mut state = GameState::new(3);
        state.player.facing_right = true;
        state.player.anim_timer = 0.0;
        for _ in 0..300 {
            drive_companion(&mut state, 1.0);
        }
        let expected = state.player.body.pos + Vec2::new(-COMPANION_FOLLOW_X, -COMPANION_FOLLOW_Y);
        assert!((state.companion.body.pos - expected).length() < 0.1);
    }

    #[test]
    fn test_companion_mirrors_player_without_targets() {
        let mut state = GameState::new(3);
        state.player.aim_angle = 2.5;
        state.player.facing_right = false;
        drive_companion(&mut state, 1.0);
        assert_eq!(state.companion.aim_angle, 2.5);
        assert!(!state.companion.facing_right);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_companion_engages_nearest_bot() {
        let mut state = GameState::new(3);
        let drone = state.companion.body.pos;
        spawn_bot(&mut state, drone + Vec2::new(400.0, 0.0));
        spawn_bot(&mut state, drone + Vec2::new(-200.0, 0.0));
        spawn_bot(&mut state, drone + Vec2::new(1000.0, 0.0));

        drive_companion(&mut state, 1.0);
        assert!(!state.companion.facing_right);
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.projectiles[0].owner, Owner::Companion);
        assert!(state.projectiles[0].vel.x < 0.0);
    }

    #[test]
    fn test_point_defense_cooldown_ticks_down() {
        let mut state = GameState::new(3);
        state
            .companion
            .companion_state_mut()
            .unwrap()
            .point_defense_cooldown = 2.0;
        drive_companion(&mut state, 1.0);
        drive_companion(&mut state, 1.0);
        assert!(state.companion.companion_state().unwrap().point_defense_ready());
    }
}
