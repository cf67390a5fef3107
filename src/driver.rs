//! Game loop driver
//!
//! Once per display frame: take an input snapshot, run one simulation tick, build
//! a frame and hand it to the render sink. The tick for frame N always finishes
//! before frame N is built and before input for frame N+1 is sampled.

use std::cmp::Ordering;
use std::time::{Duration, Instant};

use glam::Vec2;

use crate::renderer::{Frame, RenderOptions, build_frame};
use crate::sim::{GameEvent, GamePhase, InputSnapshot, Key, World, tick};

/// Produces one input snapshot per frame
pub trait InputSource {
    fn snapshot(&mut self, world: &World) -> InputSnapshot;
}

impl<F> InputSource for F
where
    F: FnMut(&World) -> InputSnapshot,
{
    fn snapshot(&mut self, world: &World) -> InputSnapshot {
        self(world)
    }
}

/// Consumes built frames (draws them, records them, or drops them)
pub trait RenderSink {
    fn present(&mut self, frame: &Frame);
}

/// Sink that discards every frame
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn present(&mut self, _frame: &Frame) {}
}

/// Game instance holding the world and its adapters
pub struct Game<I, R> {
    world: World,
    input: I,
    sink: R,
    options: RenderOptions,
    frames: u64,
}

impl<I: InputSource, R: RenderSink> Game<I, R> {
    pub fn new(world: World, input: I, sink: R, options: RenderOptions) -> Self {
        Self {
            world,
            input,
            sink,
            options,
            frames: 0,
        }
    }

    /// Run exactly one frame: input -> tick -> render
    pub fn run_frame(&mut self) -> Vec<GameEvent> {
        let input = self.input.snapshot(&self.world);
        if input.start && self.world.phase() == GamePhase::Menu {
            self.world.start();
        }

        let events = tick(&mut self.world, &input);
        for event in &events {
            log_event(event);
        }

        let frame = build_frame(&self.world, input.pointer, &self.options);
        self.sink.present(&frame);
        self.frames += 1;
        events
    }

    /// Run a fixed number of frames as fast as possible
    pub fn run(&mut self, frames: u64) {
        for _ in 0..frames {
            self.run_frame();
        }
    }

    /// Run a fixed number of frames, sleeping to hold `fps`
    pub fn run_paced(&mut self, frames: u64, fps: u32) {
        let period = Duration::from_secs_f64(1.0 / f64::from(fps.max(1)));
        let mut next = Instant::now();
        for _ in 0..frames {
            self.run_frame();
            next += period;
            let now = Instant::now();
            if next > now {
                std::thread::sleep(next - now);
            } else {
                // Fell behind; don't try to catch up with a burst of frames
                next = now;
            }
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn sink(&self) -> &R {
        &self.sink
    }

    /// Frames run so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn into_world(self) -> World {
        self.world
    }
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::WaveStarted { wave, enemies } => {
            log::info!("Wave {} started with {} enemies", wave, enemies)
        }
        GameEvent::EnemyKilled { id, kind } => log::debug!("Killed {:?} #{}", kind, id),
        GameEvent::WallBuilt { id, material } => log::debug!("Built {:?} wall #{}", material, id),
        GameEvent::EnemyHit { .. } | GameEvent::ShotFired { .. } => log::trace!("{:?}", event),
    }
}

/// Computer player for demos and soak runs
///
/// Starts the game, shoots the nearest enemy, backs away from close ones and
/// builds walls when crowded.
#[derive(Debug, Clone)]
pub struct Autopilot {
    /// Enemies closer than this make the autopilot retreat
    pub flee_distance: f32,
    /// Enemies within `flee_distance` needed before walls go up
    pub build_crowd: usize,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            flee_distance: 150.0,
            build_crowd: 3,
        }
    }
}

impl InputSource for Autopilot {
    fn snapshot(&mut self, world: &World) -> InputSnapshot {
        let center = world.viewport / 2.0;
        let mut input = InputSnapshot {
            pointer: center,
            ..Default::default()
        };

        if world.phase() == GamePhase::Menu {
            input.start = true;
            return input;
        }

        let player = world.player.pos;
        let nearest = world.enemies.iter().min_by(|a, b| {
            a.pos
                .distance_squared(player)
                .partial_cmp(&b.pos.distance_squared(player))
                .unwrap_or(Ordering::Equal)
        });

        if let Some(enemy) = nearest {
            input.pointer = center + (enemy.pos - player);
            input.fire = true;

            if enemy.pos.distance(player) < self.flee_distance {
                press_toward(&mut input, player - enemy.pos);
            }
        }

        // Heaviest weapon that still has rounds
        let slot = [1, 2]
            .into_iter()
            .find(|&i| !world.weapons[i].ammo.is_empty())
            .unwrap_or(0);
        if slot != world.player.weapon {
            input.keys.press([Key::Weapon1, Key::Weapon2, Key::Weapon3][slot]);
        }

        let crowd = world
            .enemies
            .iter()
            .filter(|e| e.pos.distance(player) < self.flee_distance)
            .count();
        if crowd >= self.build_crowd {
            input.keys.press(Key::Build);
        }

        input
    }
}

fn press_toward(input: &mut InputSnapshot, dir: Vec2) {
    if dir.x > 1.0 {
        input.keys.press(Key::Right);
    } else if dir.x < -1.0 {
        input.keys.press(Key::Left);
    }
    if dir.y > 1.0 {
        input.keys.press(Key::Down);
    } else if dir.y < -1.0 {
        input.keys.press(Key::Up);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{EnemyKind, spawn_enemy};

    /// Records a summary of every presented frame
    #[derive(Default)]
    struct Recorder {
        frames: Vec<(GamePhase, u64, usize)>,
    }

    impl RenderSink for Recorder {
        fn present(&mut self, frame: &Frame) {
            self.frames
                .push((frame.phase, frame.hud.score, frame.vertices.len()));
        }
    }

    fn idle(_: &World) -> InputSnapshot {
        InputSnapshot::default()
    }

    #[test]
    fn test_menu_until_start_signal() {
        let mut clicks = 0;
        let input = move |_: &World| {
            clicks += 1;
            InputSnapshot {
                start: clicks == 3,
                ..Default::default()
            }
        };
        let mut game = Game::new(World::new(1), input, Recorder::default(), RenderOptions::default());
        game.run(2);
        assert_eq!(game.world().phase(), GamePhase::Menu);
        assert_eq!(game.world().time_ticks, 0);

        game.run(1);
        assert_eq!(game.world().phase(), GamePhase::Playing);
        assert_eq!(game.world().time_ticks, 1);
        assert_eq!(game.frames(), 3);

        let phases: Vec<_> = game.sink().frames.iter().map(|f| f.0).collect();
        assert_eq!(phases, vec![GamePhase::Menu, GamePhase::Menu, GamePhase::Playing]);
    }

    #[test]
    fn test_frame_reflects_completed_tick() {
        let mut world = World::empty(2);
        world.start();
        let target = world.player.pos + Vec2::new(10.0, 0.0);
        spawn_enemy(&mut world, EnemyKind::Normal, target);
        let far = spawn_enemy(&mut world, EnemyKind::Normal, Vec2::new(5.0, 5.0));
        let center = world.viewport / 2.0;

        let shoot = move |_: &World| InputSnapshot {
            pointer: center + Vec2::new(10.0, 0.0),
            fire: true,
            ..Default::default()
        };
        let mut game = Game::new(world, shoot, Recorder::default(), RenderOptions::default());
        let events = game.run_frame();

        assert!(events.iter().any(|e| matches!(e, GameEvent::EnemyKilled { .. })));
        // The frame presented for this tick already shows the new score
        assert_eq!(game.sink().frames[0].1, 10);
        assert!(game.world().enemies.contains(far));
    }

    #[test]
    fn test_autopilot_starts_and_fights() {
        let world = World::new(77);
        let mut game = Game::new(world, Autopilot::default(), NullSink, RenderOptions::default());
        game.run(600);
        let world = game.into_world();
        assert_eq!(world.phase(), GamePhase::Playing);
        assert_eq!(world.time_ticks, 600);
        assert!(world.score > 0, "autopilot never scored");
        // Rifle is preferred while it has rounds
        assert!(world.weapons[1].ammo.count() < Some(30));
    }

    #[test]
    fn test_autopilot_aims_at_nearest_enemy() {
        let mut world = World::empty(3);
        world.start();
        let p = world.player.pos;
        spawn_enemy(&mut world, EnemyKind::Normal, p + Vec2::new(300.0, 0.0));
        spawn_enemy(&mut world, EnemyKind::Normal, p + Vec2::new(0.0, -100.0));
        let input = Autopilot::default().snapshot(&world);
        assert!(input.fire);
        assert_eq!(input.pointer, world.viewport / 2.0 + Vec2::new(0.0, -100.0));
        // Too close: retreats downward, away from the enemy above
        assert!(input.keys.is_pressed(Key::Down));
        assert!(input.keys.is_pressed(Key::Weapon2));
    }

    #[test]
    fn test_idle_input_leaves_menu_alone() {
        let mut game = Game::new(World::new(4), idle, NullSink, RenderOptions::default());
        game.run(10);
        assert_eq!(game.world().phase(), GamePhase::Menu);
        assert_eq!(game.world().enemies.len(), 5);
    }
}
