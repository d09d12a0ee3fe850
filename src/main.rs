//! Jetpack Runner headless entry point
//!
//! Runs the simulation without a renderer, driving it with a scripted touch
//! pattern through the same fixed-timestep accumulator a host frame loop uses.
//!
//! Usage: `jetpack-runner [seed] [settings.json] [seconds]`

use jetpack_runner::Settings;
use jetpack_runner::consts::*;
use jetpack_runner::sim::{GameEvent, GameWorld, TickInput, tick};

/// Host-side loop state
struct Game {
    world: GameWorld,
    accumulator: f32,
    input: TickInput,
    coins: u32,
    enemies: u32,
    recycles: u32,
}

impl Game {
    fn new(seed: u64, settings: Settings) -> Self {
        Self {
            world: GameWorld::new(seed, settings),
            accumulator: 0.0,
            input: TickInput::default(),
            coins: 0,
            enemies: 0,
            recycles: 0,
        }
    }

    /// Touch down/up
    fn set_touch(&mut self, held: bool) {
        self.input.thrust = held;
    }

    fn fire(&mut self) {
        self.input.fire = true;
    }

    /// Run simulation ticks for one frame
    fn update(&mut self, dt: f32) {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = self.input.clone();
            tick(&mut self.world, &input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.fire = false;

            for event in &self.world.events {
                match event {
                    GameEvent::CoinCollected { .. } => self.coins += 1,
                    GameEvent::EnemyDestroyed { .. } => self.enemies += 1,
                    GameEvent::SegmentRecycled { index, .. } => {
                        self.recycles += 1;
                        let tiles = self.world.segments[*index].ground_tiles(self.world.settings.ground_height);
                        log::debug!(
                            "Segment {} ground tiles start at {:?}",
                            index,
                            tiles.map(|tile| tile.min().x)
                        );
                    }
                    GameEvent::EffectSkipped { asset } => log::debug!("Skipped effect {}", asset),
                }
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0x5EED);
    let settings = match args.next() {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };
    let seconds = args
        .next()
        .and_then(|s| s.parse::<f32>().ok())
        .unwrap_or(30.0);

    log::info!("Jetpack Runner (headless) starting with seed {}", seed);
    let mut game = Game::new(seed, settings);

    // Render-rate frames, slightly uneven like a real display
    let frames = (seconds * 60.0) as u32;
    for frame in 0..frames {
        // Hold the jetpack for half a second out of every second and a half
        game.set_touch(frame % 90 < 30);
        if frame % 45 == 0 {
            game.fire();
        }

        let dt = if frame % 7 == 0 { 1.0 / 55.0 } else { 1.0 / 60.0 };
        game.update(dt);

        if frame % 600 == 0 {
            log::info!(
                "t={:.1}s x={:.0} score={}",
                frame as f32 / 60.0,
                game.world.camera_x,
                game.world.score
            );
        }
    }

    println!(
        "seed {}: distance {:.0}, score {}, coins {}, enemies destroyed {}, segments recycled {}",
        seed,
        game.world.camera_x,
        game.world.score,
        game.coins,
        game.enemies,
        game.recycles
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No browser host is provided; the library is driven by an embedding engine
}
