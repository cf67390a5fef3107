//! Per-frame simulation tick
//!
//! One call advances the world by exactly one display frame. Order matters:
//! movement, weapon switch, build, fire, projectiles, enemies, walls, particles,
//! then the wave check.

use glam::Vec2;
use rand::Rng;

use super::geometry::{clamp_circle, in_bounds};
use super::input::InputSnapshot;
use super::spawn;
use super::state::{GameEvent, GamePhase, Material, Obstacle, Particle, Projectile, World};
use super::store::EntityId;
use crate::consts::*;

/// Advance the world by one tick. No-op outside `GamePhase::Playing`.
///
/// Returns the events that happened, in order.
pub fn tick(world: &mut World, input: &InputSnapshot) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if world.phase() != GamePhase::Playing {
        return events;
    }

    world.time_ticks += 1;

    move_player(world, input);

    if let Some(slot) = input.weapon_select() {
        world.player.weapon = slot.min(world.weapons.len() - 1);
    }

    build(world, input, &mut events);

    if input.fire {
        fire(world, input.pointer, &mut events);
    }

    advance_projectiles(world, &mut events);
    advance_enemies(world);
    track_wall_contacts(world);
    advance_particles(world);
    check_wave(world, &mut events);

    events
}

/// Movement intent, terrain modifier, then clamp into the map
fn move_player(world: &mut World, input: &InputSnapshot) {
    let dir = input.move_dir();
    if dir == Vec2::ZERO {
        return;
    }

    // Recomputed every tick, never stored on the player
    let mut speed = world.player.speed;
    if world.player_in_water() {
        speed *= WATER_SPEED_FACTOR;
    }

    let player = &mut world.player;
    player.pos = clamp_circle(player.pos + dir * speed, player.radius, world.size);
}

/// Place a wood wall next to the player while the build key is held, rate-limited
fn build(world: &mut World, input: &InputSnapshot, events: &mut Vec<GameEvent>) {
    if world.player.build_cooldown > 0 {
        world.player.build_cooldown -= 1;
    }
    if !input.build() || world.player.build_cooldown > 0 {
        return;
    }

    let id = place_wall(world, Material::Wood);
    world.player.build_cooldown = world.build_cooldown_ticks;
    events.push(GameEvent::WallBuilt {
        id,
        material: Material::Wood,
    });
}

/// Append a wall offset from the player by one radius on both axes
pub fn place_wall(world: &mut World, material: Material) -> EntityId {
    let id = world.next_entity_id();
    let pos = world.player.pos + Vec2::splat(world.player.radius);
    world.obstacles.push(Obstacle::new(id, pos, material));
    log::debug!("Wall {} ({:?}) built at ({:.0}, {:.0})", id, material, pos.x, pos.y);
    id
}

/// Fire the equipped weapon toward the pointer. Silently does nothing without ammo.
///
/// The player is always drawn at the viewport centre, so aim is pointer minus half
/// the viewport. A pointer exactly at the centre fires along +x.
pub fn fire(world: &mut World, pointer: Vec2, events: &mut Vec<GameEvent>) -> Option<EntityId> {
    let slot = world.player.weapon;
    let weapon = &mut world.weapons[slot];
    if !weapon.ammo.consume() {
        return None;
    }
    let kind = weapon.kind;
    let damage = weapon.damage();

    let aim = pointer - world.viewport / 2.0;
    let dir = aim.try_normalize().unwrap_or(Vec2::X);

    let id = world.next_entity_id();
    world.projectiles.push(Projectile {
        id,
        pos: world.player.pos,
        vel: dir * PROJECTILE_SPEED,
        radius: PROJECTILE_RADIUS,
        damage,
    });
    log::trace!("{} fired, ammo {}", kind.name(), world.weapons[slot].ammo);
    events.push(GameEvent::ShotFired { weapon: kind });
    Some(id)
}

/// Move projectiles, resolve hits against enemies, then cull spent and off-map shots
fn advance_projectiles(world: &mut World, events: &mut Vec<GameEvent>) {
    let mut spent: Vec<EntityId> = Vec::new();
    let mut hit_points: Vec<Vec2> = Vec::new();
    let size = world.size;

    for projectile in world.projectiles.iter_mut() {
        projectile.pos += projectile.vel;

        // First qualifying enemy only; the projectile is spent on contact
        let target = world
            .enemies
            .iter_mut()
            .filter(|e| e.is_alive())
            .find(|e| projectile.pos.distance(e.pos) < e.radius);

        let Some(enemy) = target else {
            // Off-map misses are culled
            if !in_bounds(projectile.pos, size) {
                spent.push(projectile.id);
            }
            continue;
        };

        enemy.health -= projectile.damage;
        hit_points.push(enemy.pos);
        spent.push(projectile.id);
        events.push(GameEvent::EnemyHit {
            id: enemy.id,
            health: enemy.health,
        });

        if !enemy.is_alive() {
            world.score += KILL_SCORE;
            log::debug!("Enemy {} ({:?}) killed, score {}", enemy.id, enemy.kind, world.score);
            events.push(GameEvent::EnemyKilled {
                id: enemy.id,
                kind: enemy.kind,
            });
        }
    }

    world.projectiles.remove_all(&spent);
    world.enemies.retain(|e| e.is_alive());

    for pos in hit_points {
        spawn_hit_particle(world, pos);
    }
}

/// Blood splash at `pos`; skipped once the particle cap is reached
pub fn spawn_hit_particle(world: &mut World, pos: Vec2) {
    if world.particles.len() >= world.max_particles {
        return;
    }
    let rng = world.rng();
    let radius = rng.random_range(PARTICLE_MIN_RADIUS..PARTICLE_MAX_RADIUS);
    let vel = Vec2::new(rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0));
    let id = world.next_entity_id();
    world.particles.push(Particle {
        id,
        pos,
        vel,
        radius,
        life: PARTICLE_LIFETIME,
    });
}

/// Pure pursuit: every enemy steps straight at the player
fn advance_enemies(world: &mut World) {
    let target = world.player.pos;
    for enemy in world.enemies.iter_mut() {
        enemy.pos = crate::step_toward(enemy.pos, target, enemy.speed);
    }
}

/// Recount how many enemies overlap each wall
fn track_wall_contacts(world: &mut World) {
    for wall in world.obstacles.iter_mut() {
        wall.enemies_adjacent = world
            .enemies
            .iter()
            .filter(|e| wall.rect.overlaps_circle(e.pos, e.radius))
            .count() as u32;
    }
}

/// Drift particles and expire them on the tick their lifetime hits zero
fn advance_particles(world: &mut World) {
    for particle in world.particles.iter_mut() {
        particle.pos += particle.vel;
        particle.life = particle.life.saturating_sub(1);
    }
    world.particles.retain(|p| p.life > 0);
}

/// Start the next wave once every enemy is gone
fn check_wave(world: &mut World, events: &mut Vec<GameEvent>) {
    if !world.enemies.is_empty() {
        return;
    }
    world.wave += 1;
    let wave = world.wave;
    let enemies = spawn::spawn_wave(world, wave);
    events.push(GameEvent::WaveStarted { wave, enemies });
}
