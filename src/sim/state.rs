//! Game state and core simulation types
//!
//! Everything the simulation mutates lives in `World`; there is no global state.

use std::fmt;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::spawn;
use super::store::{Entity, EntityId, EntityStore};
use crate::consts::*;
use crate::settings::Settings;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, simulation does not advance
    #[default]
    Menu,
    /// Active gameplay
    Playing,
}

/// The single player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    /// Base speed (units per tick), before terrain modifiers
    pub speed: f32,
    /// Index into the weapon catalog
    pub weapon: usize,
    /// Ticks until another wall may be placed
    pub build_cooldown: u32,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            radius: PLAYER_RADIUS,
            speed: PLAYER_SPEED,
            weapon: 0,
            build_cooldown: 0,
        }
    }
}

/// Whether a weapon is meant to fire once per press or while held
///
/// Both currently fire at most once per tick while the fire control is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FireMode {
    Single,
    Auto,
}

/// Remaining ammunition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ammo {
    Unlimited,
    Finite(u32),
}

impl Ammo {
    pub fn is_empty(&self) -> bool {
        matches!(self, Ammo::Finite(0))
    }

    /// Spend one round. Returns false (and changes nothing) when empty.
    pub fn consume(&mut self) -> bool {
        match self {
            Ammo::Unlimited => true,
            Ammo::Finite(0) => false,
            Ammo::Finite(n) => {
                *n -= 1;
                true
            }
        }
    }

    /// Rounds left, `None` when unlimited
    pub fn count(&self) -> Option<u32> {
        match self {
            Ammo::Unlimited => None,
            Ammo::Finite(n) => Some(*n),
        }
    }
}

impl fmt::Display for Ammo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ammo::Unlimited => write!(f, "∞"),
            Ammo::Finite(n) => write!(f, "{n}"),
        }
    }
}

/// Weapon types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeaponKind {
    Pistol,
    Rifle,
    FullAuto,
}

impl WeaponKind {
    /// Catalog order; hotkeys 1/2/3 select by index
    pub const ALL: [WeaponKind; 3] = [WeaponKind::Pistol, WeaponKind::Rifle, WeaponKind::FullAuto];

    pub fn name(self) -> &'static str {
        match self {
            WeaponKind::Pistol => "Pistol",
            WeaponKind::Rifle => "Rifle",
            WeaponKind::FullAuto => "Full-Auto",
        }
    }

    pub fn damage(self) -> i32 {
        match self {
            WeaponKind::Pistol => 1,
            WeaponKind::Rifle => 2,
            WeaponKind::FullAuto => 1,
        }
    }

    pub fn fire_mode(self) -> FireMode {
        match self {
            WeaponKind::Pistol | WeaponKind::Rifle => FireMode::Single,
            WeaponKind::FullAuto => FireMode::Auto,
        }
    }

    pub fn starting_ammo(self) -> Ammo {
        match self {
            WeaponKind::Pistol => Ammo::Unlimited,
            WeaponKind::Rifle => Ammo::Finite(30),
            WeaponKind::FullAuto => Ammo::Finite(50),
        }
    }
}

/// A weapon in the session's catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Weapon {
    pub kind: WeaponKind,
    pub ammo: Ammo,
}

impl Weapon {
    pub fn new(kind: WeaponKind) -> Self {
        Self {
            kind,
            ammo: kind.starting_ammo(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn damage(&self) -> i32 {
        self.kind.damage()
    }
}

/// Fresh weapon catalog with full ammo
pub fn weapon_catalog() -> [Weapon; 3] {
    WeaponKind::ALL.map(Weapon::new)
}

/// A player shot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: EntityId,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub damage: i32,
}

impl Entity for Projectile {
    fn id(&self) -> EntityId {
        self.id
    }
}

/// Enemy types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EnemyKind {
    #[default]
    Normal,
    /// Helmeted, slow and tough
    Armored,
    Fast,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 3] = [EnemyKind::Normal, EnemyKind::Armored, EnemyKind::Fast];

    pub fn speed(self) -> f32 {
        match self {
            EnemyKind::Normal => 1.5,
            EnemyKind::Armored => 1.0,
            EnemyKind::Fast => 2.0,
        }
    }

    pub fn health(self) -> i32 {
        match self {
            EnemyKind::Normal => 1,
            EnemyKind::Armored => 5,
            EnemyKind::Fast => 1,
        }
    }
}

/// A pursuing enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EntityId,
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub health: i32,
}

impl Enemy {
    pub fn new(id: EntityId, kind: EnemyKind, pos: Vec2) -> Self {
        Self {
            id,
            kind,
            pos,
            radius: ENEMY_RADIUS,
            speed: kind.speed(),
            health: kind.health(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }
}

impl Entity for Enemy {
    fn id(&self) -> EntityId {
        self.id
    }
}

/// A blood particle (visual only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub id: EntityId,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Ticks left to live
    pub life: u32,
}

impl Entity for Particle {
    fn id(&self) -> EntityId {
        self.id
    }
}

/// Wall materials
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Material {
    #[default]
    Wood,
    Stone,
}

impl Material {
    pub fn durability(self) -> u32 {
        match self {
            Material::Wood => 5,
            Material::Stone => 10,
        }
    }
}

/// A player-built wall
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: EntityId,
    pub rect: Rect,
    pub material: Material,
    pub durability: u32,
    /// Enemies currently overlapping the wall (bookkeeping only)
    pub enemies_adjacent: u32,
}

impl Obstacle {
    pub fn new(id: EntityId, pos: Vec2, material: Material) -> Self {
        Self {
            id,
            rect: Rect::new(pos.x, pos.y, WALL_WIDTH, WALL_HEIGHT),
            material,
            durability: material.durability(),
            enemies_adjacent: 0,
        }
    }
}

impl Entity for Obstacle {
    fn id(&self) -> EntityId {
        self.id
    }
}

/// Resource counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loot {
    pub wood: u32,
    pub stone: u32,
    pub ammo: u32,
}

/// A lootable building (static)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Building {
    pub rect: Rect,
    pub loot: Loot,
}

/// A pond that slows the player (static)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pond {
    pub rect: Rect,
}

/// Resource types a pickup can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceKind {
    Wood,
    Stone,
    Ammo,
}

/// A resource lying on the ground
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourcePickup {
    pub id: EntityId,
    pub pos: Vec2,
    pub kind: ResourceKind,
    pub amount: u32,
}

impl Entity for ResourcePickup {
    fn id(&self) -> EntityId {
        self.id
    }
}

/// Things that happened during a tick (no gameplay effect)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ShotFired { weapon: WeaponKind },
    EnemyHit { id: EntityId, health: i32 },
    EnemyKilled { id: EntityId, kind: EnemyKind },
    WallBuilt { id: EntityId, material: Material },
    WaveStarted { wave: u32, enemies: usize },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct World {
    /// Session seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    phase: GamePhase,
    /// Map extents (world units)
    pub size: Vec2,
    /// Render viewport, needed to turn the pointer into an aim direction
    pub viewport: Vec2,
    pub player: Player,
    pub weapons: [Weapon; 3],
    pub projectiles: EntityStore<Projectile>,
    pub enemies: EntityStore<Enemy>,
    pub particles: EntityStore<Particle>,
    pub obstacles: EntityStore<Obstacle>,
    pub pickups: EntityStore<ResourcePickup>,
    pub buildings: Vec<Building>,
    pub ponds: Vec<Pond>,
    pub score: u64,
    /// Current wave (starts at 1)
    pub wave: u32,
    /// Playing ticks simulated so far
    pub time_ticks: u64,
    /// Cooldown applied after each wall placement
    pub build_cooldown_ticks: u32,
    /// Particle cap (0 disables hit particles)
    pub max_particles: usize,
    next_id: EntityId,
}

impl World {
    /// Create a session with default tuning: map generated, wave 1 spawned, in the menu
    pub fn new(seed: u64) -> Self {
        let mut world = Self::empty(seed);
        spawn::generate_map(&mut world);
        let wave = world.wave;
        spawn::spawn_wave(&mut world, wave);
        world
    }

    /// Create a session configured from settings
    pub fn from_settings(settings: &Settings) -> Self {
        let mut world = Self::empty(settings.resolved_seed());
        world.viewport = settings.viewport();
        world.build_cooldown_ticks = settings.build_cooldown_ticks;
        world.max_particles = settings.max_particles();
        spawn::generate_map(&mut world);
        let wave = world.wave;
        spawn::spawn_wave(&mut world, wave);
        world
    }

    /// Bare session: player centred, no map features, no enemies
    pub fn empty(seed: u64) -> Self {
        let size = Vec2::new(MAP_WIDTH, MAP_HEIGHT);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Menu,
            size,
            viewport: Vec2::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT),
            player: Player::new(size / 2.0),
            weapons: weapon_catalog(),
            projectiles: EntityStore::new(),
            enemies: EntityStore::new(),
            particles: EntityStore::new(),
            obstacles: EntityStore::new(),
            pickups: EntityStore::new(),
            buildings: Vec::new(),
            ponds: Vec::new(),
            score: 0,
            wave: 1,
            time_ticks: 0,
            build_cooldown_ticks: BUILD_COOLDOWN_TICKS,
            max_particles: 256,
            next_id: 1,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Leave the title screen. Has no effect once playing.
    pub fn start(&mut self) {
        if self.phase == GamePhase::Menu {
            log::info!("Session started (seed {}, wave {})", self.seed, self.wave);
            self.phase = GamePhase::Playing;
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub(crate) fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// The equipped weapon
    pub fn weapon(&self) -> &Weapon {
        &self.weapons[self.player.weapon]
    }

    /// True while the player stands in any pond
    pub fn player_in_water(&self) -> bool {
        self.ponds.iter().any(|p| p.rect.contains(self.player.pos))
    }

    /// Resize the render viewport (adapter reports canvas size)
    pub fn resize_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width.max(1.0), height.max(1.0));
    }
}
