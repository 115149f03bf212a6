//! Wave director: intermission countdown, bot batches, and clear rewards

use glam::Vec2;
use rand::Rng;

use super::state::{BotClass, Character, GameState, WaveStatus};
use crate::consts::*;

/// Transition taken by the director this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveEvent {
    Started { wave: u32, bots: u32 },
    Cleared { wave: u32 },
}

/// Bots in the batch for `wave`
pub fn spawn_count(wave: u32) -> u32 {
    (WAVE_ENEMY_BASE + wave).min(WAVE_ENEMY_CAP)
}

/// Spawn point for the `index`th bot: even indices on the far left, odd on the far right
pub fn spawn_position<R: Rng>(index: u32, rng: &mut R) -> Vec2 {
    let edge = if index % 2 == 0 {
        SPAWN_LEFT_X
    } else {
        SPAWN_RIGHT_X
    };
    Vec2::new(edge + rng.random::<f32>() * SPAWN_SPREAD, SPAWN_Y)
}

/// Advance the intermission/active state machine
pub fn update_waves(state: &mut GameState, dt: f32) -> Option<WaveEvent> {
    match state.wave_status {
        WaveStatus::Intermission => {
            state.wave_timer -= dt;
            if state.wave_timer > 0.0 {
                return None;
            }
            state.wave_status = WaveStatus::Active;
            let bots = spawn_wave(state);
            log::info!("Wave {} started: {} bots", state.wave, bots);
            Some(WaveEvent::Started {
                wave: state.wave,
                bots,
            })
        }
        WaveStatus::Active if state.bots.is_empty() => {
            let cleared = state.wave;
            state.wave += 1;
            state.wave_status = WaveStatus::Intermission;
            state.wave_timer = WAVE_INTERMISSION_TIME;
            let player = &mut state.player;
            player.health = (player.health + WAVE_CLEAR_HEAL).min(player.max_health);
            log::info!("Wave {} cleared (health {:.0})", cleared, player.health);
            Some(WaveEvent::Cleared { wave: cleared })
        }
        WaveStatus::Active => None,
    }
}

/// Add the current wave's batch to the roster
fn spawn_wave(state: &mut GameState) -> u32 {
    let count = spawn_count(state.wave);
    for index in 0..count {
        let id = state.next_entity_id();
        let pos = spawn_position(index, &mut state.rng);
        let bot = Character::bot(id, BotClass::Shooter, pos, &mut state.rng);
        state.bots.push(bot);
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_count_formula() {
        assert_eq!(spawn_count(1), 3);
        assert_eq!(spawn_count(5), 7);
        assert_eq!(spawn_count(10), 12);
        assert_eq!(spawn_count(40), 12);
    }

    #[test]
    fn test_spawn_sides_alternate() {
        let mut rng = Pcg32::seed_from_u64(9);
        for index in 0..12 {
            let pos = spawn_position(index, &mut rng);
            if index % 2 == 0 {
                assert!((SPAWN_LEFT_X..SPAWN_LEFT_X + SPAWN_SPREAD).contains(&pos.x));
            } else {
                assert!((SPAWN_RIGHT_X..SPAWN_RIGHT_X + SPAWN_SPREAD).contains(&pos.x));
            }
        }
    }

    #[test]
    fn test_intermission_to_active() {
        let mut state = GameState::new(1);
        assert_eq!(update_waves(&mut state, WAVE_INTERMISSION_TIME - 1.0), None);
        assert_eq!(state.wave_status, WaveStatus::Intermission);
        assert!(state.bots.is_empty());

        let event = update_waves(&mut state, 1.0);
        assert_eq!(event, Some(WaveEvent::Started { wave: 1, bots: 3 }));
        assert_eq!(state.wave_status, WaveStatus::Active);
        assert_eq!(state.bots.len(), 3);
    }

    #[test]
    fn test_active_persists_while_bots_remain() {
        let mut state = GameState::new(1);
        update_waves(&mut state, WAVE_INTERMISSION_TIME);
        state.bots.pop();
        for _ in 0..10 {
            assert_eq!(update_waves(&mut state, 1.0), None);
        }
        assert_eq!(state.wave_status, WaveStatus::Active);
        assert_eq!(state.wave, 1);
    }

    #[test]
    fn test_clear_heals_and_resets_timer() {
        let mut state = GameState::new(1);
        update_waves(&mut state, WAVE_INTERMISSION_TIME);
        state.bots.clear();
        state.player.health = 40.0;

        let event = update_waves(&mut state, 1.0);
        assert_eq!(event, Some(WaveEvent::Cleared { wave: 1 }));
        assert_eq!(state.wave, 2);
        assert_eq!(state.wave_status, WaveStatus::Intermission);
        assert_eq!(state.wave_timer, WAVE_INTERMISSION_TIME);
        assert_eq!(state.player.health, 65.0);
    }

    #[test]
    fn test_clear_heal_capped() {
        let mut state = GameState::new(1);
        update_waves(&mut state, WAVE_INTERMISSION_TIME);
        state.bots.clear();
        state.player.health = 90.0;
        update_waves(&mut state, 1.0);
        assert_eq!(state.player.health, state.player.max_health);
    }

    #[test]
    fn test_second_wave_is_bigger() {
        let mut state = GameState::new(1);
        update_waves(&mut state, WAVE_INTERMISSION_TIME);
        state.bots.clear();
        update_waves(&mut state, 1.0);
        let event = update_waves(&mut state, WAVE_INTERMISSION_TIME);
        assert_eq!(event, Some(WaveEvent::Started { wave: 2, bots: 4 }));
        // Fresh IDs for every bot
        let mut ids: Vec<_> = state.bots.iter().map(|b| b.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 4);
    }
}
