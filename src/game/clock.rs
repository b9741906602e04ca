//! Fixed-timestep simulation clock
//!
//! Implements the accumulator pattern from
//! http://gafferongames.com/game-physics/fix-your-timestep/
//!
//! The clock converts variable render-frame deltas into a whole number of
//! fixed-size simulation steps plus a leftover fraction (alpha) used to
//! interpolate the render state between the last two simulation states.
//! The wall clock is read by the caller; `advance` is a pure function of
//! the delta it is handed, which keeps the step math testable.

/// Longest frame delta the clock will accept, in seconds. A stall
/// (breakpoint, OS preemption, window drag) would otherwise queue an
/// unbounded number of catch-up steps; the excess time is discarded.
pub const MAX_FRAME_DELTA: f64 = 0.25;

/// Drain tolerance for accumulated float drift. Summing frame deltas can
/// land one ulp short of a whole step, which would drop that step and
/// report an alpha just under 1 instead of just over 0.
const STEP_EPS: f64 = 1e-9;

/// Result of advancing the clock by one render frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ticks {
    /// Number of fixed simulation steps to run this frame (may be zero)
    pub steps: u32,
    /// Fraction of a step left in the accumulator, in [0, 1)
    pub alpha: f32,
}

/// Accumulates wall-clock time and drains it in fixed-size steps.
///
/// Time is kept in f64 seconds throughout, matching macroquad's
/// `get_time()`; integer milliseconds never enter the math.
#[derive(Debug)]
pub struct SimulationClock {
    fixed_step: f64,
    accumulator: f64,
    max_frame_delta: f64,
}

impl SimulationClock {
    /// Create a clock running `tick_hz` simulation steps per second
    pub fn new(tick_hz: f64) -> Self {
        Self {
            fixed_step: 1.0 / tick_hz,
            accumulator: 0.0,
            max_frame_delta: MAX_FRAME_DELTA,
        }
    }

    /// Feed one render frame's wall-clock delta into the accumulator.
    ///
    /// Returns how many fixed steps the caller must run and the
    /// interpolation alpha for the leftover. After this call the
    /// accumulator always holds less than one step; partial steps are
    /// never simulated.
    pub fn advance(&mut self, frame_delta: f64) -> Ticks {
        let delta = frame_delta.clamp(0.0, self.max_frame_delta);
        self.accumulator += delta;

        let mut steps = 0;
        while self.accumulator >= self.fixed_step - STEP_EPS {
            self.accumulator -= self.fixed_step;
            steps += 1;
        }
        // The tolerance can leave a hair of negative time behind
        self.accumulator = self.accumulator.max(0.0);

        Ticks {
            steps,
            alpha: (self.accumulator / self.fixed_step) as f32,
        }
    }
}
