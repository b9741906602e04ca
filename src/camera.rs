//! Follow camera
//!
//! A plain scrolling offset: it centers on whatever it is told to follow
//! (the player's interpolated position) and is clamped to the level
//! bounds so the view never shows past the edges of the map.

use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH, TILE_SIZE};
use macroquad::prelude::*;

#[derive(Debug, Clone, Copy)]
pub struct Camera {
    offset: Vec2,
    /// Level size in pixels; the offset is clamped to bounds - screen
    bounds: Vec2,
}

impl Camera {
    pub fn new(level_width: f32, level_height: f32) -> Self {
        Self {
            offset: Vec2::ZERO,
            bounds: vec2(level_width, level_height),
        }
    }

    /// Center the view on a world position, clamped to the level bounds.
    /// Called once per rendered frame, after interpolation.
    pub fn follow(&mut self, target: Vec2) {
        let max = (self.bounds - vec2(SCREEN_WIDTH, SCREEN_HEIGHT)).max(Vec2::ZERO);
        self.offset = (target - vec2(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0))
            .clamp(Vec2::ZERO, max);
    }

    /// World position to screen position
    pub fn to_screen(&self, world: Vec2) -> Vec2 {
        world - self.offset
    }

    /// Range of tile columns currently in view, with one column of slack
    /// on the right so a partially visible column still draws.
    pub fn visible_columns(&self, columns: usize) -> (usize, usize) {
        let first = (self.offset.x / TILE_SIZE).floor().max(0.0) as usize;
        let count = (SCREEN_WIDTH / TILE_SIZE) as usize + 2;
        (first.min(columns), (first + count).min(columns))
    }
}
