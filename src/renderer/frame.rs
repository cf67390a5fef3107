//! Frame building: world state -> screen-space draw data
//!
//! Reads the `World` only. Produces a triangle list plus text items that any
//! backend (GPU, canvas, terminal) can present.

use glam::Vec2;
use serde::Serialize;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::settings::Settings;
use crate::sim::{EnemyKind, GamePhase, Material, ResourceKind, World};

/// Length of the aim indicator drawn from the player
const AIM_LINE_LENGTH: f32 = 25.0;
const AIM_LINE_WIDTH: f32 = 5.0;

/// How much detail to draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    pub shadows: bool,
    pub circle_segments: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            shadows: true,
            circle_segments: 24,
        }
    }
}

impl RenderOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            shadows: settings.quality.shadows_enabled(),
            circle_segments: settings.quality.circle_segments(),
        }
    }
}

/// Camera centred on the player
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Camera {
    /// World position of the viewport's top-left corner
    pub offset: Vec2,
    pub viewport: Vec2,
}

impl Camera {
    pub fn follow(target: Vec2, viewport: Vec2) -> Self {
        Self {
            offset: target - viewport / 2.0,
            viewport,
        }
    }

    #[inline]
    pub fn world_to_screen(&self, p: Vec2) -> Vec2 {
        p - self.offset
    }

    /// True if a shape with the given screen-space half extent can touch the viewport
    pub fn is_visible(&self, screen: Vec2, half_extent: Vec2) -> bool {
        screen.x + half_extent.x >= 0.0
            && screen.y + half_extent.y >= 0.0
            && screen.x - half_extent.x <= self.viewport.x
            && screen.y - half_extent.y <= self.viewport.y
    }
}

/// Horizontal text anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TextAlign {
    Left,
    Center,
}

/// A line of text to draw in screen space
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextItem {
    pub pos: Vec2,
    /// Font size in pixels
    pub size: f32,
    pub align: TextAlign,
    pub color: [f32; 4],
    pub text: String,
}

/// Heads-up display values
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hud {
    pub score: u64,
    pub wave: u32,
    pub weapon: &'static str,
    /// Rounds left, `None` when unlimited
    pub ammo: Option<u32>,
    pub phase: GamePhase,
}

impl Hud {
    pub fn from_world(world: &World) -> Self {
        let weapon = world.weapon();
        Self {
            score: world.score,
            wave: world.wave,
            weapon: weapon.name(),
            ammo: weapon.ammo.count(),
            phase: world.phase(),
        }
    }

    /// The three HUD lines, top to bottom
    pub fn lines(&self) -> [String; 3] {
        let ammo = self
            .ammo
            .map(|n| n.to_string())
            .unwrap_or_else(|| "∞".to_string());
        [
            format!("Score: {}", self.score),
            format!("Wave: {}", self.wave),
            format!("Weapon: {} Ammo: {}", self.weapon, ammo),
        ]
    }
}

/// Everything a backend needs to present one frame
#[derive(Debug, Clone)]
pub struct Frame {
    pub phase: GamePhase,
    pub camera: Camera,
    pub vertices: Vec<Vertex>,
    pub text: Vec<TextItem>,
    pub hud: Hud,
}

impl Frame {
    /// Packed vertex data ready for a GPU upload
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }
}

/// Build the frame for the current world state
///
/// `pointer` is in screen space and only orients the aim indicator.
pub fn build_frame(world: &World, pointer: Vec2, options: &RenderOptions) -> Frame {
    let camera = Camera::follow(world.player.pos, world.viewport);
    let hud = Hud::from_world(world);
    let mut vertices = Vec::new();
    let mut text = Vec::new();

    match world.phase() {
        GamePhase::Menu => draw_menu(&camera, &mut vertices, &mut text),
        GamePhase::Playing => {
            draw_world(world, &camera, pointer, options, &mut vertices);
            for (i, line) in hud.lines().into_iter().enumerate() {
                text.push(TextItem {
                    pos: Vec2::new(10.0, 20.0 + 20.0 * i as f32),
                    size: 18.0,
                    align: TextAlign::Left,
                    color: colors::TEXT,
                    text: line,
                });
            }
        }
    }

    Frame {
        phase: world.phase(),
        camera,
        vertices,
        text,
        hud,
    }
}

fn draw_menu(camera: &Camera, out: &mut Vec<Vertex>, text: &mut Vec<TextItem>) {
    let vp = camera.viewport;
    shapes::rect(out, Vec2::ZERO, vp, colors::MENU_BACKGROUND);
    let center = vp / 2.0;
    text.push(TextItem {
        pos: center - Vec2::new(0.0, 50.0),
        size: 60.0,
        align: TextAlign::Center,
        color: colors::TEXT,
        text: "Zombie Survival".to_string(),
    });
    text.push(TextItem {
        pos: center + Vec2::new(0.0, 10.0),
        size: 30.0,
        align: TextAlign::Center,
        color: colors::TEXT,
        text: "PLAY".to_string(),
    });
    text.push(TextItem {
        pos: Vec2::new(center.x, vp.y - 30.0),
        size: 18.0,
        align: TextAlign::Center,
        color: colors::TEXT,
        text: "Made by BananaMan5902".to_string(),
    });
}

fn draw_world(
    world: &World,
    camera: &Camera,
    pointer: Vec2,
    options: &RenderOptions,
    out: &mut Vec<Vertex>,
) {
    let segs = options.circle_segments;

    shapes::rect(out, Vec2::ZERO, camera.viewport, colors::GROUND);

    for pond in &world.ponds {
        let half = pond.rect.size / 2.0;
        let c = camera.world_to_screen(pond.rect.center());
        if camera.is_visible(c, half) {
            shapes::ellipse(out, c, half, colors::POND_CENTER, colors::POND, segs);
        }
    }

    for building in &world.buildings {
        let min = camera.world_to_screen(building.rect.min());
        let size = building.rect.size;
        if camera.is_visible(min + size / 2.0, size / 2.0) {
            shapes::rect(out, min, size, colors::BUILDING);
            shapes::rect(
                out,
                Vec2::new(min.x + size.x - 8.0, min.y),
                Vec2::new(8.0, size.y),
                colors::BUILDING_SHADE,
            );
        }
    }

    for wall in &world.obstacles {
        let min = camera.world_to_screen(wall.rect.min());
        let size = wall.rect.size;
        if camera.is_visible(min + size / 2.0, size / 2.0) {
            let color = match wall.material {
                Material::Wood => colors::WALL_WOOD,
                Material::Stone => colors::WALL_STONE,
            };
            shapes::rect(out, min, size, color);
        }
    }

    for pickup in &world.pickups {
        let c = camera.world_to_screen(pickup.pos);
        if camera.is_visible(c, Vec2::splat(6.0)) {
            let color = match pickup.kind {
                ResourceKind::Wood => colors::PICKUP_WOOD,
                ResourceKind::Stone => colors::PICKUP_STONE,
                ResourceKind::Ammo => colors::PICKUP_AMMO,
            };
            shapes::rect(out, c - Vec2::splat(6.0), Vec2::splat(12.0), color);
        }
    }

    // Player is always at the viewport centre
    let player = &world.player;
    let pc = camera.world_to_screen(player.pos);
    if options.shadows {
        let shadow = pc + Vec2::new(3.0, 5.0);
        shapes::circle(out, shadow, player.radius, colors::PLAYER_SHADOW, colors::PLAYER_SHADOW, segs);
    }
    shapes::circle(out, pc, player.radius, colors::PLAYER_HIGHLIGHT, colors::PLAYER, segs);
    let aim = (pointer - pc).try_normalize().unwrap_or(Vec2::X);
    shapes::line(out, pc, pc + aim * AIM_LINE_LENGTH, AIM_LINE_WIDTH, colors::AIM_LINE);

    for projectile in &world.projectiles {
        let c = camera.world_to_screen(projectile.pos);
        if camera.is_visible(c, Vec2::splat(projectile.radius)) {
            shapes::circle(out, c, projectile.radius, colors::PROJECTILE, colors::PROJECTILE, segs / 2);
        }
    }

    for enemy in &world.enemies {
        let c = camera.world_to_screen(enemy.pos);
        if !camera.is_visible(c, Vec2::splat(enemy.radius + 4.0)) {
            continue;
        }
        if options.shadows {
            let shadow = c + Vec2::new(2.0, 3.0);
            shapes::circle(out, shadow, enemy.radius, colors::ENEMY_SHADOW, colors::ENEMY_SHADOW, segs);
        }
        shapes::circle(out, c, enemy.radius, colors::ENEMY_HIGHLIGHT, colors::ENEMY, segs);
        if enemy.kind == EnemyKind::Armored {
            shapes::ring(out, c, enemy.radius - 2.0, 3.0, colors::HELMET, segs);
        }
    }

    for particle in &world.particles {
        let c = camera.world_to_screen(particle.pos);
        if camera.is_visible(c, Vec2::splat(particle.radius)) {
            shapes::circle(out, c, particle.radius, colors::BLOOD, colors::BLOOD, segs / 2);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::spawn::spawn_enemy;
    use crate::sim::state::Ammo;

    #[test]
    fn test_camera_centres_player() {
        let cam = Camera::follow(Vec2::new(1000.0, 1000.0), Vec2::new(800.0, 600.0));
        assert_eq!(cam.offset, Vec2::new(600.0, 700.0));
        assert_eq!(cam.world_to_screen(Vec2::new(1000.0, 1000.0)), Vec2::new(400.0, 300.0));
        assert!(cam.is_visible(Vec2::new(-5.0, 10.0), Vec2::splat(10.0)));
        assert!(!cam.is_visible(Vec2::new(-50.0, 10.0), Vec2::splat(10.0)));
    }

    #[test]
    fn test_menu_frame() {
        let world = World::new(5);
        let frame = build_frame(&world, Vec2::ZERO, &RenderOptions::default());
        assert_eq!(frame.phase, GamePhase::Menu);
        assert_eq!(frame.vertices.len(), 6);
        assert_eq!(frame.text[0].text, "Zombie Survival");
        assert_eq!(frame.text[1].text, "PLAY");
        assert!(frame.text.iter().all(|t| t.color == colors::TEXT));
    }

    #[test]
    fn test_hud_lines() {
        let mut world = World::empty(5);
        world.start();
        world.score = 30;
        world.wave = 2;
        let hud = Hud::from_world(&world);
        assert_eq!(hud.lines()[0], "Score: 30");
        assert_eq!(hud.lines()[1], "Wave: 2");
        assert_eq!(hud.lines()[2], "Weapon: Pistol Ammo: ∞");

        world.player.weapon = 1;
        world.weapons[1].ammo = Ammo::Finite(12);
        assert_eq!(Hud::from_world(&world).lines()[2], "Weapon: Rifle Ammo: 12");
    }

    #[test]
    fn test_offscreen_enemies_are_culled() {
        let mut world = World::empty(6);
        world.start();
        let options = RenderOptions {
            shadows: false,
            circle_segments: 8,
        };
        let base = build_frame(&world, Vec2::ZERO, &options).vertices.len();

        spawn_enemy(&mut world, EnemyKind::Normal, Vec2::new(10.0, 10.0));
        assert_eq!(build_frame(&world, Vec2::ZERO, &options).vertices.len(), base);

        let near = world.player.pos + Vec2::new(50.0, 0.0);
        spawn_enemy(&mut world, EnemyKind::Normal, near);
        let frame = build_frame(&world, Vec2::ZERO, &options);
        assert_eq!(frame.vertices.len(), base + 8 * 3);
        assert_eq!(frame.vertex_bytes().len(), frame.vertices.len() * Vertex::STRIDE);
        assert_eq!(frame.text.len(), 3);
    }

    #[test]
    fn test_armored_enemy_has_helmet_ring() {
        let mut world = World::empty(7);
        world.start();
        let options = RenderOptions {
            shadows: false,
            circle_segments: 8,
        };
        let base = build_frame(&world, Vec2::ZERO, &options).vertices.len();
        let near = world.player.pos + Vec2::new(50.0, 0.0);
        spawn_enemy(&mut world, EnemyKind::Armored, near);
        let frame = build_frame(&world, Vec2::ZERO, &options);
        assert_eq!(frame.vertices.len(), base + 8 * 3 + 8 * 6);
    }
}
