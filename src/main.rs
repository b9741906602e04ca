//! jumper: a tiny side-scrolling platformer
//!
//! Run and jump across procedurally generated terrain. The interesting
//! part is the main loop: simulation advances at a fixed 25Hz regardless
//! of the rendering rate, and frames are drawn from positions
//! interpolated between the last two simulation steps, as described in
//! http://gafferongames.com/game-physics/fix-your-timestep/

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod camera;
mod config;
mod game;
mod hud;
mod input;
mod level;
mod sprites;

use config::{Config, SCREEN_HEIGHT, SCREEN_WIDTH};
use game::{Game, SimulationClock};
use macroquad::prelude::*;
use sprites::SpriteManager;

const CONFIG_PATH: &str = "assets/config.ron";
const ATLAS_PATH: &str = "assets/sprites.ron";

/// Sprites the scene cannot draw without
const REQUIRED_SPRITES: [&str; 4] = ["sky", "grass", "dirt", "player"];

fn window_conf() -> Conf {
    Conf {
        window_title: format!("jumper v{}", VERSION),
        window_width: SCREEN_WIDTH as i32,
        window_height: SCREEN_HEIGHT as i32,
        window_resizable: false,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    // Crash logging first, before anything can panic
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    // There is no degraded mode for a real-time loop: a missing config
    // file falls back to defaults, but anything else aborts startup.
    let config = match Config::load(CONFIG_PATH) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load {}: {}", CONFIG_PATH, e);
            std::process::exit(2);
        }
    };
    let sprites = match SpriteManager::load(ATLAS_PATH).await {
        Ok(sprites) => sprites,
        Err(e) => {
            eprintln!("Failed to load sprite atlas: {}", e);
            std::process::exit(2);
        }
    };
    if let Err(e) = sprites.require(&REQUIRED_SPRITES) {
        eprintln!("Sprite atlas is incomplete: {}", e);
        std::process::exit(2);
    }

    let seed = config
        .seed
        .unwrap_or_else(|| (get_time() * 1000.0) as u64 ^ 0x5eed);
    println!("Generating level with seed {}", seed);

    let mut game = Game::new(&config, level::Level::generate(seed));
    let mut clock = SimulationClock::new(config.tick_hz);

    // Route window close through the game-over flag so the frame in
    // flight always completes before teardown
    prevent_quit();

    let start_time = get_time();
    let mut last_time = start_time;

    loop {
        let now = get_time();
        let frame_delta = now - last_time;
        last_time = now;

        // Input is sampled once per rendered frame; the intent it
        // produces is latched until a simulation step consumes it
        game.queue_input(input::sample());

        let ticks = clock.advance(frame_delta);
        for _ in 0..ticks.steps {
            game.update();
        }
        game.interpolate(ticks.alpha);

        let status = hud::status_line(frame_delta, now - start_time);
        game.draw(&sprites, &status, config.debug);

        if game.is_over() {
            break;
        }
        next_frame().await;
    }

    println!("Quitting after {:.0}s of game time", get_time() - start_time);
}
