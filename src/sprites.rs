//! Sprite atlas
//!
//! Sprites live on a single sheet texture described by a RON file naming
//! each sprite's source rectangle. Drawing scales everything by SCALE and
//! uses nearest-neighbor filtering to keep the pixel art crisp.

use crate::config::{SCALE, SCREEN_HEIGHT, SCREEN_WIDTH};
use macroquad::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;

/// Error type for atlas loading
#[derive(Debug)]
pub enum SpriteError {
    IoError(String),
    ParseError(ron::error::SpannedError),
    ValidationError(String),
    Missing(String),
}

impl From<ron::error::SpannedError> for SpriteError {
    fn from(e: ron::error::SpannedError) -> Self {
        SpriteError::ParseError(e)
    }
}

impl std::fmt::Display for SpriteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpriteError::IoError(e) => write!(f, "IO error: {}", e),
            SpriteError::ParseError(e) => write!(f, "Parse error: {}", e),
            SpriteError::ValidationError(e) => write!(f, "Validation error: {}", e),
            SpriteError::Missing(name) => write!(f, "No sprite named '{}' in atlas", name),
        }
    }
}

/// One entry in the atlas descriptor
#[derive(Debug, Clone, Copy, Deserialize)]
struct Region {
    x: f32,
    y: f32,
    w: f32,
    h: f32,
}

/// The `assets/sprites.ron` descriptor
#[derive(Debug, Deserialize)]
struct AtlasDesc {
    /// Path to the sheet image, relative to the working directory
    sheet: String,
    sprites: HashMap<String, Region>,
}

fn parse_atlas(text: &str) -> Result<AtlasDesc, SpriteError> {
    let desc: AtlasDesc = ron::from_str(text)?;
    if desc.sheet.is_empty() {
        return Err(SpriteError::ValidationError("empty sheet path".into()));
    }
    for (name, r) in &desc.sprites {
        if r.w <= 0.0 || r.h <= 0.0 {
            return Err(SpriteError::ValidationError(format!(
                "sprite '{}' has a degenerate rect {}x{}",
                name, r.w, r.h
            )));
        }
    }
    Ok(desc)
}

/// A drawable region of the sheet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub source: Rect,
}

pub struct SpriteManager {
    texture: Texture2D,
    sprites: HashMap<String, Rect>,
}

impl SpriteManager {
    /// Load the atlas descriptor and its sheet texture
    pub async fn load(path: &str) -> Result<SpriteManager, SpriteError> {
        let text = load_string(path)
            .await
            .map_err(|e| SpriteError::IoError(format!("{}: {}", path, e)))?;
        let desc = parse_atlas(&text)?;

        let texture = load_texture(&desc.sheet)
            .await
            .map_err(|e| SpriteError::IoError(format!("{}: {}", desc.sheet, e)))?;
        texture.set_filter(FilterMode::Nearest);

        for (name, r) in &desc.sprites {
            if r.x + r.w > texture.width() || r.y + r.h > texture.height() {
                return Err(SpriteError::ValidationError(format!(
                    "sprite '{}' extends past the {}x{} sheet",
                    name,
                    texture.width(),
                    texture.height()
                )));
            }
        }

        println!("Loaded {} sprites from {}", desc.sprites.len(), path);
        Ok(SpriteManager {
            texture,
            sprites: desc
                .sprites
                .into_iter()
                .map(|(name, r)| (name, Rect::new(r.x, r.y, r.w, r.h)))
                .collect(),
        })
    }

    /// Look up a sprite by name
    pub fn sprite(&self, name: &str) -> Option<Sprite> {
        self.sprites.get(name).map(|&source| Sprite { source })
    }

    /// Check that every sprite the game draws is present, so a missing
    /// asset aborts startup instead of leaving holes in the scene
    pub fn require(&self, names: &[&str]) -> Result<(), SpriteError> {
        for name in names {
            if !self.sprites.contains_key(*name) {
                return Err(SpriteError::Missing(name.to_string()));
            }
        }
        Ok(())
    }

    /// Draw a sprite at a screen position, scaled by SCALE
    pub fn draw(&self, sprite: Sprite, screen_pos: Vec2) {
        self.draw_flipped(sprite, screen_pos, false);
    }

    /// Draw a sprite, optionally mirrored horizontally
    pub fn draw_flipped(&self, sprite: Sprite, screen_pos: Vec2, flip_x: bool) {
        draw_texture_ex(
            &self.texture,
            screen_pos.x,
            screen_pos.y,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(sprite.source.w * SCALE, sprite.source.h * SCALE)),
                source: Some(sprite.source),
                flip_x,
                ..Default::default()
            },
        );
    }

    /// Stretch a sprite over the whole window (the sky backdrop)
    pub fn draw_backdrop(&self, sprite: Sprite) {
        draw_texture_ex(
            &self.texture,
            0.0,
            0.0,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(SCREEN_WIDTH, SCREEN_HEIGHT)),
                source: Some(sprite.source),
                ..Default::default()
            },
        );
    }
}
