//! Procedural terrain generation
//!
//! The surface is a sum of randomly parameterized sinusoids, sampled once
//! per tile column and clamped so no two neighboring columns differ by
//! more than a jumpable height. Seeded explicitly, so the same seed
//! always produces the same level.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::FRAC_PI_2;

/// Level width in tile columns
pub const MAP_COLUMNS: usize = 400;
/// Level height in tile rows (16 rows of 48px fill the 768px window)
pub const MAP_ROWS: usize = 16;

/// Number of sinusoids summed into the surface function
const WAVES: usize = 100;
/// Wave amplitude range, in tiles
const AMPLITUDE: i32 = 4;
const MIN_DILATION: f32 = 0.01;
const MAX_DILATION: f32 = 0.05;
const MIN_PHASE: f32 = 0.0;
const MAX_PHASE: f32 = FRAC_PI_2;
/// Maximum height difference between neighboring columns, in tiles
const MAX_STEEPNESS: i32 = 3;

/// Row the surface oscillates around
const BASE_ROW: i32 = 11;
/// Highest row the surface may reach (leaves headroom for jumping)
const MIN_SURFACE_ROW: i32 = 2;
/// Lowest row the surface may reach (keeps some ground below)
const MAX_SURFACE_ROW: i32 = MAP_ROWS as i32 - 2;

#[derive(Debug, Clone, Copy)]
struct Wave {
    amplitude: f32,
    phase: f32,
    dilation: f32,
}

impl Wave {
    fn sample(&self, x: f32) -> f32 {
        self.amplitude * (self.dilation * (x - self.phase)).sin()
    }
}

/// Generate one surface row index per column, seeded.
///
/// Row indices grow downward; everything at or below the surface row is
/// solid ground.
pub fn surface_rows(seed: u64) -> Vec<usize> {
    let mut rng = StdRng::seed_from_u64(seed);
    let waves: Vec<Wave> = (0..WAVES)
        .map(|_| Wave {
            amplitude: rng.gen_range(-AMPLITUDE..=AMPLITUDE) as f32,
            phase: rng.gen_range(MIN_PHASE..=MAX_PHASE),
            dilation: rng.gen_range(MIN_DILATION..=MAX_DILATION),
        })
        .collect();

    let mut heights: Vec<i32> = (0..MAP_COLUMNS)
        .map(|col| {
            let x = col as f32;
            waves.iter().map(|w| w.sample(x)).sum::<f32>() as i32
        })
        .collect();

    // Flatten anything the player could not jump or fall across safely
    for i in 1..heights.len() {
        let previous = heights[i - 1];
        if heights[i] > previous + MAX_STEEPNESS {
            heights[i] = previous + MAX_STEEPNESS;
        }
        if heights[i] < previous - MAX_STEEPNESS {
            heights[i] = previous - MAX_STEEPNESS;
        }
    }

    heights
        .into_iter()
        .map(|h| (BASE_ROW - h).clamp(MIN_SURFACE_ROW, MAX_SURFACE_ROW) as usize)
        .collect()
}
