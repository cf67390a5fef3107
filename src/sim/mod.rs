//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per display frame, constants expressed per tick
//! - Seeded RNG only
//! - Stable iteration order (insertion order of each store)
//! - No rendering or platform dependencies

pub mod geometry;
pub mod input;
pub mod spawn;
pub mod state;
pub mod store;
pub mod tick;

pub use geometry::Rect;
pub use input::{InputSnapshot, Key, KeySet};
pub use spawn::{generate_map, spawn_enemy, spawn_wave, wave_size};
pub use state::{
    Ammo, Building, Enemy, EnemyKind, FireMode, GameEvent, GamePhase, Loot, Material, Obstacle,
    Particle, Player, Pond, Projectile, ResourceKind, ResourcePickup, Weapon, WeaponKind, World,
};
pub use store::{Entity, EntityId, EntityStore};
pub use tick::tick;
