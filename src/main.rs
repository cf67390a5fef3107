//! Zombie Survival entry point
//!
//! Native builds run the simulation headless under the autopilot and log the HUD.
//! A windowed or browser front-end plugs in through `InputSource` and `RenderSink`.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use zombie_survival::consts::FRAME_DT;
    use zombie_survival::renderer::{Frame, RenderOptions};
    use zombie_survival::sim::World;
    use zombie_survival::{Autopilot, Game, RenderSink, Settings};

    /// Logs the HUD once a second of game time
    struct HudLogger {
        frames: u64,
        triangles: usize,
    }

    impl RenderSink for HudLogger {
        fn present(&mut self, frame: &Frame) {
            self.frames += 1;
            self.triangles = frame.triangle_count();
            if self.frames % 60 == 0 {
                let [score, wave, weapon] = frame.hud.lines();
                log::info!(
                    "[{:.0}s] {} | {} | {} | {} triangles",
                    self.frames as f32 * FRAME_DT,
                    score,
                    wave,
                    weapon,
                    self.triangles
                );
            }
        }
    }

    pub fn run() {
        env_logger::init();
        log::info!("Zombie Survival (native) starting...");

        let settings = Settings::load();
        let world = World::from_settings(&settings);
        log::info!("Game initialized with seed: {}", world.seed);

        let sink = HudLogger {
            frames: 0,
            triangles: 0,
        };
        let options = RenderOptions::from_settings(&settings);
        let mut game = Game::new(world, Autopilot::default(), sink, options);

        match settings.target_fps {
            Some(fps) => game.run_paced(settings.demo_frames, fps),
            None => game.run(settings.demo_frames),
        }

        let frames = game.frames();
        let world = game.into_world();
        let hud = zombie_survival::renderer::Hud::from_world(&world);
        match serde_json::to_string(&hud) {
            Ok(json) => println!("{json}"),
            Err(e) => log::error!("Failed to serialize final HUD: {e}"),
        }
        log::info!(
            "Finished after {} frames ({:.1}s game time)",
            frames,
            frames as f32 * FRAME_DT
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser builds drive `zombie_survival::Game` from the page's animation frame callback
}
