//! Player simulation
//!
//! The player's physics state advances only inside fixed simulation
//! steps; rendering reads a position blended between the previous and
//! current step. Horizontal speed is set directly from the held direction
//! with no acceleration ramp - that is the intended feel, not a shortcut.

use crate::camera::Camera;
use crate::config::{Tuning, SCALE};
use crate::game::GameObject;
use crate::input::{Direction, Intent};
use crate::level::Level;
use crate::sprites::SpriteManager;
use macroquad::prelude::*;

/// Player bounding box side, one tile (16px art at SCALE)
pub const PLAYER_SIZE: f32 = 16.0 * SCALE;

/// Linear interpolation between the previous and current simulation
/// positions. alpha is the leftover accumulator fraction in [0, 1).
pub fn blend(prev: Vec2, current: Vec2, alpha: f32) -> Vec2 {
    prev + (current - prev) * alpha
}

pub struct Player {
    prev_pos: Vec2,
    pos: Vec2,
    vel: Vec2,
    /// Blended position the renderer draws from
    render_pos: Vec2,
    direction: Direction,
    /// Which way the sprite faces; keeps the last run direction
    facing_left: bool,
    grounded: bool,
    tuning: Tuning,
}

impl Player {
    pub fn new(spawn: Vec2, tuning: Tuning) -> Self {
        Self {
            prev_pos: spawn,
            pos: spawn,
            vel: Vec2::ZERO,
            render_pos: spawn,
            direction: Direction::Stopped,
            facing_left: false,
            grounded: false,
            tuning,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.pos
    }

    pub fn velocity(&self) -> Vec2 {
        self.vel
    }

    pub fn render_pos(&self) -> Vec2 {
        self.render_pos
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn bbox(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, PLAYER_SIZE, PLAYER_SIZE)
    }

    /// Advance one fixed simulation step.
    ///
    /// Order matters and is fixed:
    /// 1. snapshot the previous position (what interpolation blends from)
    /// 2. horizontal speed from the held direction
    /// 3. gravity, clamped to terminal velocity
    /// 4. jump impulse, only while grounded; the request is consumed
    ///    either way so a held-over press can't fire later in midair
    /// 5. integrate (semi-implicit Euler: velocity first, then position)
    /// 6. collide against the tile grid, vertical axis then horizontal
    fn step(&mut self, intent: &mut Intent, level: &Level) {
        self.prev_pos = self.pos;

        self.direction = intent.direction;
        self.vel.x = match self.direction {
            Direction::Left => {
                self.facing_left = true;
                -self.tuning.run_speed
            }
            Direction::Right => {
                self.facing_left = false;
                self.tuning.run_speed
            }
            Direction::Stopped => 0.0,
        };

        self.vel.y = (self.vel.y + self.tuning.gravity).min(self.tuning.top_speed);

        if intent.take_jump() && self.grounded {
            self.vel.y = self.tuning.jump_speed;
            self.grounded = false;
        }

        let sweep = level.sweep(self.bbox(), self.vel);
        self.pos = sweep.pos;

        if sweep.hit_floor {
            self.vel.y = 0.0;
            self.grounded = true;
        } else {
            // Walking off a ledge un-grounds without any collision
            self.grounded = false;
            if sweep.hit_ceiling {
                self.vel.y = 0.0;
            }
        }
        if sweep.hit_wall {
            self.vel.x = 0.0;
        }
    }
}

impl GameObject for Player {
    fn update(&mut self, intent: &mut Intent, level: &Level) {
        self.step(intent, level);
    }

    fn interpolate(&mut self, alpha: f32) {
        self.render_pos = blend(self.prev_pos, self.pos, alpha);
    }

    fn draw(&self, sprites: &SpriteManager, camera: &Camera) {
        if let Some(sprite) = sprites.sprite("player") {
            sprites.draw_flipped(sprite, camera.to_screen(self.render_pos), self.facing_left);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TILE_SIZE;

    /// Flat ground with the surface at row 8
    fn flat_level() -> Level {
        Level::from_surface(vec![8; 40], 16)
    }

    /// Ground level for the player's top edge
    const GROUND_Y: f32 = 8.0 * TILE_SIZE - PLAYER_SIZE;

    fn grounded_player() -> (Player, Level) {
        let level = flat_level();
        let mut player = Player::new(vec2(5.0 * TILE_SIZE, GROUND_Y), Tuning::default());
        // One settling step so the grounded flag reflects the floor contact
        player.step(&mut Intent::default(), &level);
        assert!(player.is_grounded());
        (player, level)
    }

    fn held(direction: Direction) -> Intent {
        Intent {
            direction,
            jump: false,
        }
    }

    #[test]
    fn test_spawned_player_falls_until_landing() {
        let level = flat_level();
        let mut player = Player::new(vec2(5.0 * TILE_SIZE, GROUND_Y - 200.0), Tuning::default());

        for _ in 0..40 {
            player.step(&mut Intent::default(), &level);
        }
        assert!(player.is_grounded());
        assert_eq!(player.position().y, GROUND_Y);
        assert_eq!(player.velocity().y, 0.0);
    }

    #[test]
    fn test_terminal_velocity_is_never_exceeded() {
        // No ground anywhere near: sustained free fall
        let level = Level::from_surface(vec![1000; 40], 2000);
        let mut player = Player::new(vec2(5.0 * TILE_SIZE, 0.0), Tuning::default());

        let mut peak: f32 = 0.0;
        for _ in 0..100 {
            player.step(&mut Intent::default(), &level);
            peak = peak.max(player.velocity().y);
        }
        assert_eq!(peak, Tuning::default().top_speed);
        assert_eq!(player.velocity().y, Tuning::default().top_speed);
    }

    #[test]
    fn test_running_right_for_ten_steps() {
        let (mut player, level) = grounded_player();
        let mut last_x = player.position().x;

        for _ in 0..10 {
            player.step(&mut held(Direction::Right), &level);
            assert_eq!(player.velocity().x, 15.0);
            assert!(player.position().x > last_x, "x must increase every step");
            last_x = player.position().x;
        }

        // Releasing the key stops on the next step
        player.step(&mut held(Direction::Stopped), &level);
        assert_eq!(player.velocity().x, 0.0);
    }

    #[test]
    fn test_jump_only_fires_while_grounded() {
        let (mut player, level) = grounded_player();

        let mut intent = Intent {
            direction: Direction::Stopped,
            jump: true,
        };
        player.step(&mut intent, &level);
        assert!(!player.is_grounded());
        assert_eq!(player.velocity().y, Tuning::default().jump_speed);
        assert!(!intent.jump, "the step must consume the request");

        // Airborne jump is a no-op on vertical velocity
        let vy_before = player.velocity().y;
        let mut midair = Intent {
            direction: Direction::Stopped,
            jump: true,
        };
        player.step(&mut midair, &level);
        assert_eq!(player.velocity().y, vy_before + Tuning::default().gravity);
        assert!(!midair.jump, "airborne requests are consumed, not buffered");
    }

    #[test]
    fn test_landing_resets_vertical_state() {
        let (mut player, level) = grounded_player();
        player.step(
            &mut Intent {
                direction: Direction::Stopped,
                jump: true,
            },
            &level,
        );

        // Ride the jump until touchdown
        let mut steps = 0;
        while !player.is_grounded() {
            player.step(&mut Intent::default(), &level);
            steps += 1;
            assert!(steps < 100, "jump arc must come back down");
        }
        assert_eq!(player.velocity().y, 0.0);
        assert_eq!(player.position().y, GROUND_Y);
    }

    #[test]
    fn test_prev_pos_snapshot_happens_per_step() {
        let (mut player, level) = grounded_player();

        player.step(&mut held(Direction::Right), &level);
        let after_first = player.position();
        player.step(&mut held(Direction::Right), &level);

        // Interpolation must blend between the last two steps only
        assert_eq!(blend(after_first, player.position(), 0.0), after_first);
        player.interpolate(0.0);
        assert_eq!(player.render_pos(), after_first);
    }

    #[test]
    fn test_blend_boundaries() {
        let prev = vec2(10.0, 20.0);
        let current = vec2(20.0, 40.0);

        assert_eq!(blend(prev, current, 0.0), prev);
        let near_one = blend(prev, current, 1.0 - 1e-6);
        assert!((near_one - current).length() < 1e-3);
        assert_eq!(blend(prev, current, 0.5), vec2(15.0, 30.0));
    }

    #[test]
    fn test_identical_steps_are_deterministic() {
        // The same intents produce the same trajectory, however the
        // wall-clock deltas were chunked to schedule those steps.
        let level = flat_level();
        let intents = [
            Direction::Right,
            Direction::Right,
            Direction::Stopped,
            Direction::Left,
            Direction::Right,
            Direction::Right,
        ];

        let run = || {
            let mut player = Player::new(vec2(5.0 * TILE_SIZE, GROUND_Y), Tuning::default());
            intents
                .iter()
                .map(|&direction| {
                    player.step(&mut held(direction), &level);
                    player.position()
                })
                .collect::<Vec<_>>()
        };

        assert_eq!(run(), run());
    }
}
