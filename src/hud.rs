//! Diagnostic overlay
//!
//! One line of frame statistics drawn every frame, plus an optional debug
//! view of collision boxes when enabled in the config.

use crate::camera::Camera;
use crate::config::TILE_SIZE;
use crate::level::Level;
use macroquad::prelude::*;

const TEXT_POS: Vec2 = vec2(50.0, 50.0);
const TEXT_SIZE: f32 = 24.0;

/// Format the per-frame status line. Pure, so the formatting is testable.
pub fn status_line(frame_delta: f64, elapsed: f64) -> String {
    let fps = if frame_delta > 0.001 {
        format!("FPS : {:.2}", 1.0 / frame_delta)
    } else {
        "FPS : 00".to_string()
    };
    format!("{}  ELAPSED GAMETIME: {}", fps, elapsed as u64)
}

/// Draw the status line at its fixed screen position
pub fn draw_status_line(line: &str) {
    draw_text(line, TEXT_POS.x, TEXT_POS.y, TEXT_SIZE, WHITE);
}

/// Outline the player's bounding box and the solid tiles around it
pub fn draw_debug_overlay(player_bbox: Rect, level: &Level, camera: &Camera) {
    let screen = camera.to_screen(vec2(player_bbox.x, player_bbox.y));
    draw_rectangle_lines(screen.x, screen.y, player_bbox.w, player_bbox.h, 2.0, RED);

    let (first, last) = camera.visible_columns(level.columns());
    for column in first..last {
        let top = level.surface_y(column);
        let pos = camera.to_screen(vec2(column as f32 * TILE_SIZE, top));
        draw_rectangle_lines(pos.x, pos.y, TILE_SIZE, TILE_SIZE, 1.0, GREEN);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_line_formats_fps() {
        let line = status_line(0.025, 12.7);
        assert_eq!(line, "FPS : 40.00  ELAPSED GAMETIME: 12");
    }

    #[test]
    fn test_status_line_handles_tiny_deltas() {
        // A sub-millisecond frame would print an absurd FPS figure
        let line = status_line(0.0001, 3.0);
        assert!(line.starts_with("FPS : 00"));
    }
}
