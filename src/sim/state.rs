//! Game state and core simulation types
//!
//! `GameState` is the single aggregate a match lives in. It is built fresh by
//! `GameState::new`/`with_config`, mutated only by `tick`, and thrown away
//! wholesale on reset.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::camera::Camera;
use super::geom::Rect;
use super::weapons::{Weapon, WeaponKind};
use crate::consts::*;
use crate::{Rgb, colors};

/// Stable identifier for characters and projectile owners
pub type EntityId = u32;

/// Wave director state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WaveStatus {
    /// Counting down to the next wave
    Intermission,
    /// Bots are in the field
    Active,
}

/// Bot sub-class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BotClass {
    Melee,
    Shooter,
    Heavy,
}

/// Per-class bot stats
#[derive(Debug, Clone, Copy)]
pub struct BotStats {
    pub health: f32,
    pub speed_mod: f32,
    pub width: f32,
    pub height: f32,
    pub color: Rgb,
}

impl BotClass {
    pub fn stats(self) -> BotStats {
        match self {
            BotClass::Melee => BotStats {
                health: 50.0,
                speed_mod: 1.2,
                width: 25.0,
                height: 45.0,
                color: colors::BOT_MELEE,
            },
            BotClass::Shooter => BotStats {
                health: 80.0,
                speed_mod: 0.9,
                width: 30.0,
                height: 50.0,
                color: colors::BOT_SHOOTER,
            },
            BotClass::Heavy => BotStats {
                health: 250.0,
                speed_mod: 0.6,
                width: 45.0,
                height: 60.0,
                color: colors::BOT_HEAVY,
            },
        }
    }
}

/// Companion-only state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompanionState {
    /// Single-use revive charge
    pub can_revive: bool,
    /// Frames until point defense is ready again
    pub point_defense_cooldown: f32,
}

impl CompanionState {
    pub fn point_defense_ready(&self) -> bool {
        self.point_defense_cooldown <= 0.0
    }
}

/// What a character is, with the fields that only make sense for that variant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Role {
    Player,
    Bot(BotClass),
    Companion(CompanionState),
}

/// Kinematic body shared by everything that moves through the map
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Center of the body
    pub pos: Vec2,
    pub vel: Vec2,
    pub acc: Vec2,
    pub size: Vec2,
    /// Landed on something during this frame's vertical resolution
    pub grounded: bool,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            acc: Vec2::ZERO,
            size,
            grounded: false,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::centered(self.pos, self.size)
    }
}

/// Anything with a body that physics can move
pub trait Movable {
    fn body(&self) -> &Body;
    fn body_mut(&mut self) -> &mut Body;

    fn bounds(&self) -> Rect {
        self.body().bounds()
    }

    fn contains_point(&self, p: Vec2) -> bool {
        self.bounds().contains_point(p)
    }
}

/// Result of handing a weapon to a character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickupOutcome {
    /// Already owned: reserve ammo topped up
    Restocked,
    /// New inventory slot appended
    Added,
}

/// Player, companion drone, or hostile bot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub id: EntityId,
    pub role: Role,
    pub body: Body,
    pub color: Rgb,
    /// Not clamped at zero; death is `health <= 0`
    pub health: f32,
    pub max_health: f32,
    pub fuel: f32,
    pub max_fuel: f32,
    pub jetpacking: bool,
    pub facing_right: bool,
    /// Radians, +y down
    pub aim_angle: f32,
    /// Insertion order is the display/cycle order
    pub inventory: Vec<Weapon>,
    pub current_weapon: usize,
    pub anim_timer: f32,
    pub muzzle_flash: f32,
}

impl Movable for Character {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}

impl Character {
    fn with_role(
        id: EntityId,
        role: Role,
        pos: Vec2,
        size: Vec2,
        health: f32,
        color: Rgb,
        weapon: WeaponKind,
    ) -> Self {
        Self {
            id,
            role,
            body: Body::new(pos, size),
            color,
            health,
            max_health: health,
            fuel: FUEL_MAX,
            max_fuel: FUEL_MAX,
            jetpacking: false,
            facing_right: true,
            aim_angle: 0.0,
            inventory: vec![Weapon::new(weapon)],
            current_weapon: 0,
            anim_timer: 0.0,
            muzzle_flash: 0.0,
        }
    }

    pub fn player(id: EntityId, pos: Vec2) -> Self {
        Self::with_role(
            id,
            Role::Player,
            pos,
            Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            PLAYER_MAX_HEALTH,
            colors::PLAYER,
            WeaponKind::Pistol,
        )
    }

    pub fn companion(id: EntityId, pos: Vec2) -> Self {
        Self::with_role(
            id,
            Role::Companion(CompanionState {
                can_revive: true,
                point_defense_cooldown: 0.0,
            }),
            pos,
            Vec2::splat(COMPANION_SIZE),
            COMPANION_HEALTH,
            colors::COMPANION,
            WeaponKind::Laser,
        )
    }

    /// Bot of the given class; shooters and heavies roll a rifle or pistol
    pub fn bot<R: Rng>(id: EntityId, class: BotClass, pos: Vec2, rng: &mut R) -> Self {
        let stats = class.stats();
        let weapon = match class {
            BotClass::Melee => WeaponKind::Blade,
            BotClass::Shooter | BotClass::Heavy => {
                if rng.random::<f32>() > 0.6 {
                    WeaponKind::Rifle
                } else {
                    WeaponKind::Pistol
                }
            }
        };
        Self::with_role(
            id,
            Role::Bot(class),
            pos,
            Vec2::new(stats.width, stats.height),
            stats.health,
            stats.color,
            weapon,
        )
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    pub fn is_bot(&self) -> bool {
        matches!(self.role, Role::Bot(_))
    }

    pub fn companion_state(&self) -> Option<&CompanionState> {
        match &self.role {
            Role::Companion(c) => Some(c),
            _ => None,
        }
    }

    pub fn companion_state_mut(&mut self) -> Option<&mut CompanionState> {
        match &mut self.role {
            Role::Companion(c) => Some(c),
            _ => None,
        }
    }

    /// Speed multiplier for AI-driven movement
    pub fn speed_mod(&self) -> f32 {
        match self.role {
            Role::Bot(class) => class.stats().speed_mod,
            _ => 1.0,
        }
    }

    pub fn weapon(&self) -> Option<&Weapon> {
        self.inventory.get(self.current_weapon)
    }

    pub fn weapon_mut(&mut self) -> Option<&mut Weapon> {
        self.inventory.get_mut(self.current_weapon)
    }

    /// Select an inventory slot; out-of-range slots are ignored
    pub fn select_weapon(&mut self, slot: usize) -> bool {
        if slot < self.inventory.len() {
            self.current_weapon = slot;
            true
        } else {
            false
        }
    }

    /// Step the selection by `delta`, wrapping around the inventory
    pub fn cycle_weapon(&mut self, delta: i32) {
        let len = self.inventory.len() as i32;
        if len == 0 {
            return;
        }
        self.current_weapon = (self.current_weapon as i32 + delta).rem_euclid(len) as usize;
    }

    /// Restock an owned weapon or append a new one (selection unchanged)
    pub fn give_weapon(&mut self, kind: WeaponKind) -> PickupOutcome {
        if let Some(owned) = self.inventory.iter_mut().find(|w| w.kind == kind) {
            owned.add_pickup_ammo();
            PickupOutcome::Restocked
        } else {
            self.inventory.push(Weapon::new(kind));
            PickupOutcome::Added
        }
    }

    /// Point the weapon is held from
    pub fn shoulder(&self) -> Vec2 {
        self.body.pos - Vec2::new(0.0, SHOULDER_HEIGHT)
    }

    /// Aim toward a world point and face that way
    pub fn aim_at(&mut self, target: Vec2) {
        self.aim_angle = crate::angle_between(self.shoulder(), target);
        self.facing_right = crate::faces_right(self.aim_angle);
    }
}

/// Who fired a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Owner {
    Player,
    Companion,
    Bot(EntityId),
}

impl Owner {
    /// Player-side shots hit bots; everything else hits the player
    pub fn is_friendly(self) -> bool {
        matches!(self, Owner::Player | Owner::Companion)
    }

    pub fn blast_power(self) -> f32 {
        if self.is_friendly() {
            BLAST_POWER_FRIENDLY
        } else {
            BLAST_POWER_HOSTILE
        }
    }
}

/// A projectile in flight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub owner: Owner,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub damage: f32,
    pub color: Rgb,
    pub explosive: bool,
    pub blast_radius: f32,
}

/// A particle for visual effects (never read by gameplay)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: f32,
    pub max_life: f32,
    pub color: Rgb,
    pub size: f32,
}

/// A weapon lying in the world
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub weapon: WeaponKind,
    pub pos: Vec2,
}

/// Per-match knobs supplied by the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Renderer viewport in world units (camera target and revive drop point)
    pub viewport: Vec2,
    /// Live cosmetic particle cap
    pub max_particles: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            viewport: Vec2::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT),
            max_particles: MAX_PARTICLES,
        }
    }
}

fn default_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

/// Complete match state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Seed this match was created with
    pub seed: u64,
    /// Match randomness (spread, spawn placement, cosmetic bursts)
    #[serde(skip, default = "default_rng")]
    pub rng: Pcg32,
    pub config: MatchConfig,
    pub player: Character,
    pub companion: Character,
    /// Active bots, iterated in roster order
    pub bots: Vec<Character>,
    pub projectiles: Vec<Projectile>,
    pub particles: Vec<Particle>,
    pub pickups: Vec<Pickup>,
    /// Static map geometry
    pub map: Vec<Rect>,
    pub camera: Camera,
    pub score: u64,
    /// Current wave, starting at 1
    pub wave: u32,
    pub wave_status: WaveStatus,
    /// Frames left in the intermission
    pub wave_timer: f32,
    pub game_over: bool,
    next_id: EntityId,
}

/// Player spawn point
pub const PLAYER_START: Vec2 = Vec2::new(0.0, 700.0);
/// Companion spawn point
pub const COMPANION_START: Vec2 = Vec2::new(-50.0, 650.0);

/// Floor spanning the world plus raised platforms
pub fn generate_map() -> Vec<Rect> {
    vec![
        Rect::new(-5000.0, 800.0, 15000.0, 2000.0),
        Rect::new(-400.0, 650.0, 300.0, 40.0),
        Rect::new(500.0, 720.0, 400.0, 80.0),
        Rect::new(1200.0, 600.0, 600.0, 200.0),
        Rect::new(300.0, 500.0, 200.0, 30.0),
        Rect::new(800.0, 450.0, 300.0, 30.0),
        Rect::new(1400.0, 350.0, 400.0, 30.0),
    ]
}

/// Weapon pickups placed at match start
pub fn starting_pickups() -> Vec<Pickup> {
    [
        (WeaponKind::Rifle, 600.0, 750.0),
        (WeaponKind::Shotgun, 1000.0, 650.0),
        (WeaponKind::Smg, 400.0, 600.0),
        (WeaponKind::Chaingun, 1400.0, 300.0),
        (WeaponKind::Railgun, -200.0, 600.0),
        (WeaponKind::Plasma, 800.0, 400.0),
        (WeaponKind::Rocket, 200.0, 480.0),
    ]
    .into_iter()
    .map(|(weapon, x, y)| Pickup {
        weapon,
        pos: Vec2::new(x, y),
    })
    .collect()
}

impl GameState {
    /// New match with default host config
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, &MatchConfig::default())
    }

    pub fn with_config(seed: u64, config: &MatchConfig) -> Self {
        log::info!("New match (seed {})", seed);
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            config: *config,
            player: Character::player(0, PLAYER_START),
            companion: Character::companion(0, COMPANION_START),
            bots: Vec::new(),
            projectiles: Vec::new(),
            particles: Vec::new(),
            pickups: starting_pickups(),
            map: generate_map(),
            camera: Camera::new(config.viewport),
            score: 0,
            wave: 1,
            wave_status: WaveStatus::Intermission,
            wave_timer: WAVE_INTERMISSION_TIME,
            game_over: false,
            next_id: 1,
        };
        state.player.id = state.next_entity_id();
        state.companion.id = state.next_entity_id();
        state
    }

    /// Discard this match and start a fresh one with the same host config
    pub fn reset(&mut self) {
        let seed = self.rng.random();
        let config = self.config;
        *self = Self::with_config(seed, &config);
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn revive_available(&self) -> bool {
        self.companion
            .companion_state()
            .is_some_and(|c| c.can_revive)
    }

    /// Scatter `count` explosion sparks around `pos`
    pub fn spawn_explosion(&mut self, pos: Vec2, count: usize) {
        for _ in 0..count {
            let vel = Vec2::new(
                (self.rng.random::<f32>() - 0.5) * 10.0,
                (self.rng.random::<f32>() - 0.5) * 10.0,
            );
            let size = 3.0 + self.rng.random::<f32>() * 5.0;
            self.push_particle(Particle {
                pos,
                vel,
                life: 1.0,
                max_life: 1.0,
                color: colors::EXPLOSION,
                size,
            });
        }
    }

    /// Single stationary or drifting flash
    pub fn spawn_flash(&mut self, pos: Vec2, vel: Vec2, color: Rgb, size: f32) {
        self.push_particle(Particle {
            pos,
            vel,
            life: 0.5,
            max_life: 0.5,
            color,
            size,
        });
    }

    fn push_particle(&mut self, particle: Particle) {
        if self.particles.len() < self.config.max_particles {
            self.particles.push(particle);
        }
    }
}
