//! Map generation and wave spawning
//!
//! All randomness comes from the world's seeded RNG.

use glam::Vec2;
use rand::Rng;

use super::geometry::Rect;
use super::state::{Building, Enemy, EnemyKind, Loot, Pond, World};
use super::store::EntityId;
use crate::consts::*;

/// Scatter buildings and ponds uniformly over the map
///
/// Features may overlap each other; nothing checks for it.
pub fn generate_map(world: &mut World) {
    let size = world.size;
    world.buildings.clear();
    world.ponds.clear();

    for _ in 0..BUILDING_COUNT {
        let pos = random_point(world, size);
        let rng = world.rng();
        let loot = Loot {
            wood: rng.random_range(1..=3),
            stone: rng.random_range(0..=1),
            ammo: rng.random_range(0..=4),
        };
        world.buildings.push(Building {
            rect: Rect::new(pos.x, pos.y, BUILDING_WIDTH, BUILDING_HEIGHT),
            loot,
        });
    }

    for _ in 0..POND_COUNT {
        let pos = random_point(world, size);
        world.ponds.push(Pond {
            rect: Rect::new(pos.x, pos.y, POND_WIDTH, POND_HEIGHT),
        });
    }

    log::debug!(
        "Map generated: {} buildings, {} ponds",
        world.buildings.len(),
        world.ponds.len()
    );
}

/// Number of enemies a wave spawns
#[inline]
pub fn wave_size(wave: u32) -> usize {
    (wave * ENEMIES_PER_WAVE) as usize
}

/// Append `5 * wave` enemies of uniformly random type at uniformly random positions
///
/// Returns how many were spawned.
pub fn spawn_wave(world: &mut World, wave: u32) -> usize {
    let count = wave_size(wave);
    let size = world.size;
    for _ in 0..count {
        let kind = EnemyKind::ALL[world.rng().random_range(0..EnemyKind::ALL.len())];
        let pos = random_point(world, size);
        spawn_enemy(world, kind, pos);
    }
    log::info!("Wave {} spawned {} enemies", wave, count);
    count
}

/// Append a single enemy
pub fn spawn_enemy(world: &mut World, kind: EnemyKind, pos: Vec2) -> EntityId {
    let id = world.next_entity_id();
    world.enemies.push(Enemy::new(id, kind, pos));
    id
}

fn random_point(world: &mut World, extent: Vec2) -> Vec2 {
    let rng = world.rng();
    Vec2::new(rng.random_range(0.0..extent.x), rng.random_range(0.0..extent.y))
}
