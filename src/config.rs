//! Runtime configuration
//!
//! Loaded from `assets/config.ron` when the file exists, otherwise every
//! field falls back to its default. Physics tuning lives here as plain
//! serde data so the feel of the game can be adjusted without a rebuild.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Pixel-art scale factor. Sprites are authored at 16px and drawn at 48px.
pub const SCALE: f32 = 3.0;
/// Window width in pixels
pub const SCREEN_WIDTH: f32 = 1024.0;
/// Window height in pixels
pub const SCREEN_HEIGHT: f32 = 768.0;
/// Size of one level tile in screen pixels (16px art at SCALE)
pub const TILE_SIZE: f32 = 16.0 * SCALE;

/// Error type for configuration loading
#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
    ValidationError(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(e: ron::error::SpannedError) -> Self {
        ConfigError::ParseError(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "Parse error: {}", e),
            ConfigError::ValidationError(e) => write!(f, "Validation error: {}", e),
        }
    }
}

/// Physics tuning, in pixels per simulation tick.
///
/// The simulation integrates velocity once per fixed tick with no dt
/// factor, so these are per-tick quantities, not per-second ones.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Horizontal speed while a direction key is held
    pub run_speed: f32,
    /// Vertical impulse applied on jump (negative = up)
    pub jump_speed: f32,
    /// Downward acceleration applied every tick
    pub gravity: f32,
    /// Terminal falling speed
    pub top_speed: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            run_speed: SCALE * 5.0,
            jump_speed: -(SCALE * 8.0),
            gravity: SCALE * 0.6,
            top_speed: SCALE * 8.0,
        }
    }
}

/// Top-level game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Simulation ticks per second (the fixed logic rate)
    pub tick_hz: f64,
    /// Level generator seed; None picks one from the wall clock
    pub seed: Option<u64>,
    /// Draw collision boxes and tile outlines
    pub debug: bool,
    pub tuning: Tuning,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            // The original logic frame was 40ms
            tick_hz: 25.0,
            seed: None,
            debug: false,
            tuning: Tuning::default(),
        }
    }
}

impl Config {
    /// Load configuration from a RON file.
    ///
    /// A missing file is not an error (defaults apply); a file that exists
    /// but does not parse is, so typos don't silently revert the tuning.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            println!("No config at {}, using defaults", path.display());
            return Ok(Config::default());
        }
        let contents = std::fs::read_to_string(path)?;
        let config: Config = ron::from_str(&contents)?;
        validate(&config).map_err(ConfigError::ValidationError)?;
        Ok(config)
    }
}

/// Reject values the simulation cannot survive: a non-positive tick rate
/// makes the accumulator drain spin or stall, and any per-tick speed of a
/// tile or more breaks the one-tile-per-step assumption the collision
/// sweep relies on (tunneling).
fn validate(config: &Config) -> Result<(), String> {
    if !config.tick_hz.is_finite() || config.tick_hz <= 0.0 {
        return Err(format!("tick_hz must be positive, got {}", config.tick_hz));
    }

    let t = &config.tuning;
    for (name, value) in [
        ("run_speed", t.run_speed),
        ("gravity", t.gravity),
        ("top_speed", t.top_speed),
    ] {
        if !value.is_finite() || value <= 0.0 {
            return Err(format!("{} must be positive, got {}", name, value));
        }
    }
    if !t.jump_speed.is_finite() || t.jump_speed >= 0.0 {
        return Err(format!(
            "jump_speed must be negative (up), got {}",
            t.jump_speed
        ));
    }

    for (name, value) in [
        ("run_speed", t.run_speed),
        ("top_speed", t.top_speed),
        ("jump_speed", -t.jump_speed),
    ] {
        if value >= TILE_SIZE {
            return Err(format!(
                "{} must stay under one tile ({}px) per tick, got {}",
                name, TILE_SIZE, value
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_tuning_matches_scale() {
        let t = Tuning::default();
        assert_eq!(t.run_speed, 15.0);
        assert_eq!(t.jump_speed, -24.0);
        assert!((t.gravity - 1.8).abs() < 1e-6);
        assert_eq!(t.top_speed, 24.0);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = Config::load("does/not/exist.ron").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_partial_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "(debug: true, seed: Some(7))").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert!(config.debug);
        assert_eq!(config.seed, Some(7));
        // Unspecified fields keep their defaults
        assert_eq!(config.tick_hz, 25.0);
        assert_eq!(config.tuning, Tuning::default());
    }

    #[test]
    fn test_nonpositive_tick_rate_is_rejected() {
        // A negative step would make the accumulator drain loop spin
        // forever; zero would freeze the simulation silently
        for bad in ["(tick_hz: -25.0)", "(tick_hz: 0.0)"] {
            let mut file = tempfile::NamedTempFile::new().unwrap();
            write!(file, "{}", bad).unwrap();
            assert!(
                matches!(Config::load(file.path()), Err(ConfigError::ValidationError(_))),
                "{} must be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_tunneling_speeds_are_rejected() {
        // Per-tick speeds of a full tile or more can skip solid tiles
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "(tuning: (top_speed: 48.0))").unwrap();
        assert!(matches!(
            Config::load(file.path()),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_defaults_pass_validation() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_parse_error_is_reported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "(debug: maybe)").unwrap();

        assert!(matches!(
            Config::load(file.path()),
            Err(ConfigError::ParseError(_))
        ));
    }
}
