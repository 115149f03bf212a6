//! Derived scalars for the status display

use serde::Serialize;

use super::state::{GameState, WaveStatus};
use crate::consts::BASE_FPS;

/// Selected weapon as the HUD shows it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeaponStatus {
    pub name: &'static str,
    pub mag_ammo: u32,
    /// `None` for infinite reserves
    pub reserve_ammo: Option<u32>,
    pub reloading: bool,
}

/// Everything the status display needs, read once per frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusSnapshot {
    pub health: f32,
    pub max_health: f32,
    pub fuel: f32,
    pub max_fuel: f32,
    pub wave: u32,
    /// Whole seconds until the next wave; zero while a wave is active
    pub countdown_secs: u32,
    pub score: u64,
    pub weapon: Option<WeaponStatus>,
    pub revive_available: bool,
    pub game_over: bool,
}

impl GameState {
    pub fn status(&self) -> StatusSnapshot {
        let countdown_secs = match self.wave_status {
            WaveStatus::Intermission => (self.wave_timer / BASE_FPS).ceil().max(0.0) as u32,
            WaveStatus::Active => 0,
        };

        let weapon = self.player.weapon().map(|w| {
            let stats = w.stats();
            WeaponStatus {
                name: stats.name,
                mag_ammo: w.mag_ammo,
                reserve_ammo: (!stats.infinite_reserve).then_some(w.reserve_ammo),
                reloading: w.is_reloading(),
            }
        });

        StatusSnapshot {
            health: self.player.health,
            max_health: self.player.max_health,
            fuel: self.player.fuel,
            max_fuel: self.player.max_fuel,
            wave: self.wave,
            countdown_secs,
            score: self.score,
            weapon,
            revive_available: self.revive_available(),
            game_over: self.game_over,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::weapons::WeaponKind;

    #[test]
    fn test_fresh_match_status() {
        let state = GameState::new(1);
        let status = state.status();
        assert_eq!(status.wave, 1);
        assert_eq!(status.countdown_secs, 3);
        assert_eq!(status.score, 0);
        assert!(status.revive_available);
        assert!(!status.game_over);

        let weapon = status.weapon.unwrap();
        assert_eq!(weapon.name, "M9 PISTOL");
        assert_eq!(weapon.mag_ammo, 12);
        assert_eq!(weapon.reserve_ammo, None);
    }

    #[test]
    fn test_countdown_rounds_up() {
        let mut state = GameState::new(1);
        state.wave_timer = 61.0;
        assert_eq!(state.status().countdown_secs, 2);
        state.wave_timer = 60.0;
        assert_eq!(state.status().countdown_secs, 1);
        state.wave_timer = 0.5;
        assert_eq!(state.status().countdown_secs, 1);
    }

    #[test]
    fn test_countdown_zero_while_active() {
        let mut state = GameState::new(1);
        state.wave_status = WaveStatus::Active;
        assert_eq!(state.status().countdown_secs, 0);
    }

    #[test]
    fn test_finite_reserve_shown() {
        let mut state = GameState::new(1);
        state.player.give_weapon(WeaponKind::Rifle);
        state.player.select_weapon(1);
        let weapon = state.status().weapon.unwrap();
        assert_eq!(weapon.name, "ASSAULT RIFLE");
        assert_eq!(weapon.reserve_ammo, Some(120));
    }
}
