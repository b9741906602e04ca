//! Tile-based level
//!
//! The level is a column heightfield: one surface row per tile column,
//! solid ground from the surface row down. It draws itself through the
//! camera and answers the collision query the player's simulation step
//! runs against the grid.

pub mod gen;

use crate::camera::Camera;
use crate::config::TILE_SIZE;
use crate::game::GameObject;
use crate::input::Intent;
use crate::sprites::SpriteManager;
use macroquad::prelude::*;

/// Outcome of sweeping a bounding box through the tile grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sweep {
    /// Corrected top-left position after the move
    pub pos: Vec2,
    /// Landed on a tile from above
    pub hit_floor: bool,
    /// Bumped a tile from below
    pub hit_ceiling: bool,
    /// Ran into a tile sideways
    pub hit_wall: bool,
}

/// Keeps an edge exactly on a tile boundary out of the neighboring tile
const EDGE_EPS: f32 = 0.001;

fn tile_at(v: f32) -> i32 {
    (v / TILE_SIZE).floor() as i32
}

pub struct Level {
    /// First solid row per column; rows grow downward
    surface: Vec<usize>,
    rows: usize,
}

impl Level {
    /// Build a level from generated terrain
    pub fn generate(seed: u64) -> Self {
        Self::from_surface(gen::surface_rows(seed), gen::MAP_ROWS)
    }

    /// Build a level from explicit surface rows
    pub fn from_surface(surface: Vec<usize>, rows: usize) -> Self {
        Self { surface, rows }
    }

    pub fn columns(&self) -> usize {
        self.surface.len()
    }

    /// Level width in pixels
    pub fn pixel_width(&self) -> f32 {
        self.surface.len() as f32 * TILE_SIZE
    }

    /// Level height in pixels
    pub fn pixel_height(&self) -> f32 {
        self.rows as f32 * TILE_SIZE
    }

    /// Y coordinate of the ground surface at a column, in pixels
    pub fn surface_y(&self, column: usize) -> f32 {
        self.surface[column] as f32 * TILE_SIZE
    }

    /// Whether the tile at (column, row) is solid.
    ///
    /// Everything outside the horizontal bounds and below the last row is
    /// solid, so the level is walled in at its ends and has a floor; the
    /// sky above row 0 is open.
    pub fn is_solid(&self, column: i32, row: i32) -> bool {
        if column < 0 || column as usize >= self.surface.len() {
            return true;
        }
        if row < 0 {
            return false;
        }
        if row as usize >= self.rows {
            return true;
        }
        row as usize >= self.surface[column as usize]
    }

    fn solid_in_columns(&self, row: i32, x0: f32, x1: f32) -> bool {
        let c0 = tile_at(x0);
        let c1 = tile_at(x1 - EDGE_EPS);
        (c0..=c1).any(|c| self.is_solid(c, row))
    }

    fn solid_in_rows(&self, column: i32, y0: f32, y1: f32) -> bool {
        let r0 = tile_at(y0);
        let r1 = tile_at(y1 - EDGE_EPS);
        (r0..=r1).any(|r| self.is_solid(column, r))
    }

    /// Move a bounding box by `delta` through the grid, clamping against
    /// solid tiles. Axes are resolved independently, vertical first, and
    /// that order is fixed: resolving them in a varying order makes
    /// corner collisions dependent on approach direction.
    ///
    /// Assumes `delta` never exceeds one tile per axis per step, which
    /// the terminal-velocity clamp guarantees (24px against 48px tiles).
    pub fn sweep(&self, bbox: Rect, delta: Vec2) -> Sweep {
        let mut pos = vec2(bbox.x, bbox.y);
        let mut hit_floor = false;
        let mut hit_ceiling = false;
        let mut hit_wall = false;

        // Vertical axis
        let y_new = bbox.y + delta.y;
        if delta.y >= 0.0 {
            let row = tile_at(y_new + bbox.h - EDGE_EPS);
            if self.solid_in_columns(row, bbox.x, bbox.x + bbox.w) {
                pos.y = row as f32 * TILE_SIZE - bbox.h;
                hit_floor = true;
            } else {
                pos.y = y_new;
            }
        } else {
            let row = tile_at(y_new);
            if self.solid_in_columns(row, bbox.x, bbox.x + bbox.w) {
                pos.y = (row + 1) as f32 * TILE_SIZE;
                hit_ceiling = true;
            } else {
                pos.y = y_new;
            }
        }

        // Horizontal axis, against the already-resolved vertical position
        let x_new = bbox.x + delta.x;
        if delta.x > 0.0 {
            let column = tile_at(x_new + bbox.w - EDGE_EPS);
            if self.solid_in_rows(column, pos.y, pos.y + bbox.h) {
                pos.x = column as f32 * TILE_SIZE - bbox.w;
                hit_wall = true;
            } else {
                pos.x = x_new;
            }
        } else if delta.x < 0.0 {
            let column = tile_at(x_new);
            if self.solid_in_rows(column, pos.y, pos.y + bbox.h) {
                pos.x = (column + 1) as f32 * TILE_SIZE;
                hit_wall = true;
            } else {
                pos.x = x_new;
            }
        }

        Sweep {
            pos,
            hit_floor,
            hit_ceiling,
            hit_wall,
        }
    }

    fn draw_tiles(&self, sprites: &SpriteManager, camera: &Camera) {
        let (Some(grass), Some(dirt)) = (sprites.sprite("grass"), sprites.sprite("dirt"))
        else {
            return;
        };

        let (first, last) = camera.visible_columns(self.surface.len());
        for column in first..last {
            for row in self.surface[column]..self.rows {
                let world = vec2(column as f32 * TILE_SIZE, row as f32 * TILE_SIZE);
                let sprite = if row == self.surface[column] { grass } else { dirt };
                sprites.draw(sprite, camera.to_screen(world));
            }
        }
    }
}

impl GameObject for Level {
    // The terrain is static; it only participates in drawing.
    fn update(&mut self, _intent: &mut Intent, _level: &Level) {}

    fn interpolate(&mut self, _alpha: f32) {}

    fn draw(&self, sprites: &SpriteManager, camera: &Camera) {
        self.draw_tiles(sprites, camera);
    }
}
