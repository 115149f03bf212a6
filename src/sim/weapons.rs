//! Weapon archetypes and per-character weapon instances

use serde::{Deserialize, Serialize};

use crate::Rgb;
use crate::consts::FALLBACK_MAGAZINE;

/// Weapon archetype identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    Pistol,
    Rifle,
    Shotgun,
    Sniper,
    Rocket,
    Blade,
    Laser,
    Smg,
    Chaingun,
    Railgun,
    Plasma,
}

/// Static stats for a weapon archetype
///
/// `fire_rate` and `reload_time` are in frames; `spread` is the full cone
/// width in radians (shots deviate by up to half of it either way).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaponStats {
    pub name: &'static str,
    pub damage: f32,
    pub fire_rate: f32,
    pub speed: f32,
    pub spread: f32,
    pub mag_size: u32,
    pub reload_time: f32,
    pub color: Rgb,
    pub explosive: bool,
    pub blast_radius: f32,
    /// Fires while the trigger is held rather than once per press
    pub automatic: bool,
    pub infinite_reserve: bool,
    pub start_reserve: u32,
}

impl WeaponKind {
    pub const ALL: [WeaponKind; 11] = [
        WeaponKind::Pistol,
        WeaponKind::Rifle,
        WeaponKind::Shotgun,
        WeaponKind::Sniper,
        WeaponKind::Rocket,
        WeaponKind::Blade,
        WeaponKind::Laser,
        WeaponKind::Smg,
        WeaponKind::Chaingun,
        WeaponKind::Railgun,
        WeaponKind::Plasma,
    ];

    pub fn stats(self) -> &'static WeaponStats {
        match self {
            WeaponKind::Pistol => &PISTOL,
            WeaponKind::Rifle => &RIFLE,
            WeaponKind::Shotgun => &SHOTGUN,
            WeaponKind::Sniper => &SNIPER,
            WeaponKind::Rocket => &ROCKET,
            WeaponKind::Blade => &BLADE,
            WeaponKind::Laser => &LASER,
            WeaponKind::Smg => &SMG,
            WeaponKind::Chaingun => &CHAINGUN,
            WeaponKind::Railgun => &RAILGUN,
            WeaponKind::Plasma => &PLASMA,
        }
    }

    pub fn name(self) -> &'static str {
        self.stats().name
    }
}

const PISTOL: WeaponStats = WeaponStats {
    name: "M9 PISTOL",
    damage: 15.0,
    fire_rate: 15.0,
    speed: 18.0,
    spread: 0.05,
    mag_size: 12,
    reload_time: 60.0,
    color: 0xfbbf24,
    explosive: false,
    blast_radius: 0.0,
    automatic: false,
    infinite_reserve: true,
    start_reserve: 999,
};

const RIFLE: WeaponStats = WeaponStats {
    name: "ASSAULT RIFLE",
    damage: 12.0,
    fire_rate: 6.0,
    speed: 22.0,
    spread: 0.1,
    mag_size: 30,
    reload_time: 90.0,
    color: 0x60a5fa,
    explosive: false,
    blast_radius: 0.0,
    automatic: true,
    infinite_reserve: false,
    start_reserve: 120,
};

const SHOTGUN: WeaponStats = WeaponStats {
    name: "SHOTGUN",
    damage: 8.0,
    fire_rate: 50.0,
    speed: 16.0,
    spread: 0.3,
    mag_size: 6,
    reload_time: 120.0,
    color: 0x94a3b8,
    explosive: false,
    blast_radius: 0.0,
    automatic: false,
    infinite_reserve: false,
    start_reserve: 24,
};

const SNIPER: WeaponStats = WeaponStats {
    name: "SNIPER RIFLE",
    damage: 85.0,
    fire_rate: 70.0,
    speed: 35.0,
    spread: 0.0,
    mag_size: 5,
    reload_time: 150.0,
    color: 0xa3e635,
    explosive: false,
    blast_radius: 0.0,
    automatic: false,
    infinite_reserve: false,
    start_reserve: 10,
};

const ROCKET: WeaponStats = WeaponStats {
    name: "ROCKET LAUNCHER",
    damage: 100.0,
    fire_rate: 90.0,
    speed: 12.0,
    spread: 0.05,
    mag_size: 2,
    reload_time: 180.0,
    color: 0xf87171,
    explosive: true,
    blast_radius: 120.0,
    automatic: false,
    infinite_reserve: false,
    start_reserve: 6,
};

const BLADE: WeaponStats = WeaponStats {
    name: "ENERGY BLADE",
    damage: 25.0,
    fire_rate: 30.0,
    speed: 10.0,
    spread: 0.2,
    mag_size: 999,
    reload_time: 0.0,
    color: 0xef4444,
    explosive: false,
    blast_radius: 0.0,
    automatic: true,
    infinite_reserve: true,
    start_reserve: 999,
};

const LASER: WeaponStats = WeaponStats {
    name: "DRONE LASER",
    damage: 10.0,
    fire_rate: 12.0,
    speed: 25.0,
    spread: 0.02,
    mag_size: 999,
    reload_time: 0.0,
    color: 0x34d399,
    explosive: false,
    blast_radius: 0.0,
    automatic: true,
    infinite_reserve: true,
    start_reserve: 999,
};

const SMG: WeaponStats = WeaponStats {
    name: "VECTOR SMG",
    damage: 9.0,
    fire_rate: 4.0,
    speed: 20.0,
    spread: 0.15,
    mag_size: 40,
    reload_time: 70.0,
    color: 0x22d3ee,
    explosive: false,
    blast_radius: 0.0,
    automatic: true,
    infinite_reserve: false,
    start_reserve: 160,
};

const CHAINGUN: WeaponStats = WeaponStats {
    name: "CHAINGUN",
    damage: 7.0,
    fire_rate: 2.0,
    speed: 22.0,
    spread: 0.2,
    mag_size: 100,
    reload_time: 200.0,
    color: 0xfb923c,
    explosive: false,
    blast_radius: 0.0,
    automatic: true,
    infinite_reserve: false,
    start_reserve: 400,
};

const RAILGUN: WeaponStats = WeaponStats {
    name: "RAILGUN",
    damage: 150.0,
    fire_rate: 120.0,
    speed: 50.0,
    spread: 0.0,
    mag_size: 3,
    reload_time: 150.0,
    color: 0x8b5cf6,
    explosive: false,
    blast_radius: 0.0,
    automatic: false,
    infinite_reserve: false,
    start_reserve: 6,
};

const PLASMA: WeaponStats = WeaponStats {
    name: "PLASMA RIFLE",
    damage: 22.0,
    fire_rate: 10.0,
    speed: 15.0,
    spread: 0.05,
    mag_size: 25,
    reload_time: 90.0,
    color: 0xe879f9,
    explosive: true,
    blast_radius: 60.0,
    automatic: true,
    infinite_reserve: false,
    start_reserve: 100,
};

/// A weapon held in a character's inventory
///
/// Invariant: `mag_ammo <= kind.stats().mag_size`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    pub kind: WeaponKind,
    pub mag_ammo: u32,
    pub reserve_ammo: u32,
    /// Frames left on the reload animation (cosmetic, never gates firing)
    pub reload_timer: f32,
    /// Frames until the next shot is allowed
    pub fire_timer: f32,
}

impl Weapon {
    /// Fresh weapon with a full magazine and the archetype's starting reserve
    pub fn new(kind: WeaponKind) -> Self {
        let stats = kind.stats();
        Self {
            kind,
            mag_ammo: stats.mag_size,
            reserve_ammo: stats.start_reserve,
            reload_timer: 0.0,
            fire_timer: 0.0,
        }
    }

    #[inline]
    pub fn stats(&self) -> &'static WeaponStats {
        self.kind.stats()
    }

    pub fn is_full(&self) -> bool {
        self.mag_ammo >= self.stats().mag_size
    }

    pub fn is_reloading(&self) -> bool {
        self.reload_timer > 0.0
    }

    /// Count down the fire and reload timers
    pub fn cool_down(&mut self, dt: f32) {
        if self.fire_timer > 0.0 {
            self.fire_timer -= dt;
        }
        if self.reload_timer > 0.0 {
            self.reload_timer = (self.reload_timer - dt).max(0.0);
        }
    }

    /// Instantly fill the magazine.
    ///
    /// Finite reserves pay for the rounds but never block the refill.
    /// Returns false when the magazine was already full.
    pub fn reload(&mut self) -> bool {
        let stats = self.stats();
        if self.is_full() {
            return false;
        }
        let needed = stats.mag_size - self.mag_ammo;
        if !stats.infinite_reserve {
            self.reserve_ammo = self.reserve_ammo.saturating_sub(needed);
        }
        self.mag_ammo = stats.mag_size;
        self.reload_timer = stats.reload_time;
        true
    }

    /// Top an empty magazine back up so the holder is never left unable to act
    pub fn refill_if_empty(&mut self) {
        if self.mag_ammo == 0 {
            self.mag_ammo = FALLBACK_MAGAZINE.min(self.stats().mag_size);
        }
    }

    /// Reserve bonus granted by picking up a weapon already owned
    pub fn add_pickup_ammo(&mut self) {
        self.reserve_ammo = self.reserve_ammo.saturating_add(self.stats().mag_size * 2);
    }
}
