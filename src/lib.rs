//! Zombie Survival - A top-down survival arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entity stores, spawner, per-tick step)
//! - `renderer`: Backend-agnostic frame builder (camera, geometry, HUD)
//! - `driver`: Input -> simulate -> render loop
//! - `settings`: JSON configuration

pub mod driver;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use driver::{Autopilot, Game, InputSource, RenderSink};
pub use settings::{QualityPreset, Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
///
/// Distances are world units, speeds are units per tick, lifetimes are ticks.
pub mod consts {
    /// Game time covered by one tick (one tick per display frame)
    pub const FRAME_DT: f32 = 1.0 / 60.0;

    /// Map dimensions
    pub const MAP_WIDTH: f32 = 2000.0;
    pub const MAP_HEIGHT: f32 = 2000.0;

    /// Default render viewport
    pub const VIEWPORT_WIDTH: f32 = 800.0;
    pub const VIEWPORT_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 18.0;
    pub const PLAYER_SPEED: f32 = 4.0;
    /// Speed multiplier while standing in water
    pub const WATER_SPEED_FACTOR: f32 = 0.5;

    /// Projectile defaults
    pub const PROJECTILE_SPEED: f32 = 10.0;
    pub const PROJECTILE_RADIUS: f32 = 4.0;

    /// Enemy defaults
    pub const ENEMY_RADIUS: f32 = 16.0;
    /// Enemies spawned per wave number (wave N spawns N * this)
    pub const ENEMIES_PER_WAVE: u32 = 5;
    pub const KILL_SCORE: u64 = 10;

    /// Hit particles
    pub const PARTICLE_LIFETIME: u32 = 30;
    pub const PARTICLE_MIN_RADIUS: f32 = 2.0;
    pub const PARTICLE_MAX_RADIUS: f32 = 5.0;

    /// Player-built walls
    pub const WALL_WIDTH: f32 = 40.0;
    pub const WALL_HEIGHT: f32 = 10.0;
    /// Ticks between two walls while the build key stays held
    pub const BUILD_COOLDOWN_TICKS: u32 = 15;

    /// Static map features
    pub const BUILDING_COUNT: usize = 15;
    pub const BUILDING_WIDTH: f32 = 80.0;
    pub const BUILDING_HEIGHT: f32 = 60.0;
    pub const POND_COUNT: usize = 5;
    pub const POND_WIDTH: f32 = 150.0;
    pub const POND_HEIGHT: f32 = 100.0;
}

/// Step `from` toward `to` by at most `max_step`, never overshooting
#[inline]
pub fn step_toward(from: Vec2, to: Vec2, max_step: f32) -> Vec2 {
    let delta = to - from;
    let dist = delta.length();
    if dist <= max_step || dist <= f32::EPSILON {
        to
    } else {
        from + delta / dist * max_step
    }
}
