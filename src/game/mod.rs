//! Game simulation core
//!
//! The fixed-timestep clock, the player simulation, and the `Game`
//! context object that owns everything one frame touches. State is passed
//! down explicitly; nothing lives in globals.

pub mod clock;
pub mod player;

pub use clock::{SimulationClock, Ticks};
pub use player::Player;

use crate::camera::Camera;
use crate::config::{Config, TILE_SIZE};
use crate::hud;
use crate::input::{Intent, KeySnapshot};
use crate::level::Level;
use crate::sprites::SpriteManager;
use macroquad::prelude::*;

/// Spawn column, a little in from the left wall
const SPAWN_COLUMN: usize = 2;

/// Everything that participates in the simulate/interpolate/draw cycle
pub trait GameObject {
    /// Advance one fixed simulation step
    fn update(&mut self, intent: &mut Intent, level: &Level);
    /// Blend previous and current simulation state for rendering
    fn interpolate(&mut self, alpha: f32);
    /// Draw at the interpolated state
    fn draw(&self, sprites: &SpriteManager, camera: &Camera);
}

/// The owned simulation context: level, player, camera, and the pending
/// input intent. One instance is created at startup and threaded through
/// every phase of the frame. Render resources (the sprite atlas) live
/// outside and are only borrowed while drawing, so the simulation can
/// run without a rendering backend behind it.
pub struct Game {
    level: Level,
    player: Player,
    camera: Camera,
    intent: Intent,
    game_over: bool,
}

impl Game {
    pub fn new(config: &Config, level: Level) -> Self {
        let spawn = vec2(
            SPAWN_COLUMN as f32 * TILE_SIZE,
            level.surface_y(SPAWN_COLUMN) - player::PLAYER_SIZE,
        );
        let camera = Camera::new(level.pixel_width(), level.pixel_height());

        Self {
            level,
            player: Player::new(spawn, config.tuning),
            camera,
            intent: Intent::default(),
            game_over: false,
        }
    }

    /// Fold this frame's input into the pending intent. A quit request
    /// finishes the current frame before the loop exits.
    pub fn queue_input(&mut self, snapshot: KeySnapshot) {
        if snapshot.quit {
            self.game_over = true;
        }
        self.intent.merge(snapshot.intent());
    }

    /// One fixed simulation step
    pub fn update(&mut self) {
        self.player.update(&mut self.intent, &self.level);
    }

    /// Blend render state and re-aim the camera. Runs once per rendered
    /// frame, after zero or more simulation steps.
    pub fn interpolate(&mut self, alpha: f32) {
        self.player.interpolate(alpha);
        let center = self.player.render_pos() + Vec2::splat(player::PLAYER_SIZE / 2.0);
        self.camera.follow(center);
    }

    /// Draw the whole scene plus the diagnostic line
    pub fn draw(&self, sprites: &SpriteManager, status: &str, debug: bool) {
        clear_background(BLACK);
        if let Some(sky) = sprites.sprite("sky") {
            sprites.draw_backdrop(sky);
        }

        self.level.draw(sprites, &self.camera);
        self.player.draw(sprites, &self.camera);

        hud::draw_status_line(status);
        if debug {
            hud::draw_debug_overlay(self.player.bbox(), &self.level, &self.camera);
        }
    }

    pub fn is_over(&self) -> bool {
        self.game_over
    }
}
