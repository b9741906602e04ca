//! Input sampling
//!
//! Reads macroquad key state once per rendered frame and turns it into an
//! `Intent` for the simulation. The mapping itself is a pure function of a
//! `KeySnapshot` so the edge/level semantics can be tested without a
//! window.
//!
//! - Direction is level-triggered: whichever movement key is held right
//!   now, `Stopped` when neither or both are.
//! - Jump is edge-triggered: it fires once per press and is latched in
//!   the pending intent until a simulation step consumes it, so a tap
//!   inside a frame that runs zero steps is not lost.

use macroquad::prelude::*;

/// Horizontal movement state requested by the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    Left,
    Right,
    #[default]
    Stopped,
}

/// Per-frame directive handed to the next simulation step.
///
/// The direction field is overwritten every frame; the jump flag sticks
/// until `take_jump` clears it.
#[derive(Debug, Clone, Copy, Default)]
pub struct Intent {
    pub direction: Direction,
    pub jump: bool,
}

impl Intent {
    /// Fold a freshly sampled intent into the pending one
    pub fn merge(&mut self, sampled: Intent) {
        self.direction = sampled.direction;
        self.jump |= sampled.jump;
    }

    /// Consume the latched jump request, clearing it
    pub fn take_jump(&mut self) -> bool {
        std::mem::take(&mut self.jump)
    }
}

/// Raw key state for one rendered frame
#[derive(Debug, Clone, Copy, Default)]
pub struct KeySnapshot {
    pub left_held: bool,
    pub right_held: bool,
    /// Space went down this frame (transition, not held state)
    pub jump_pressed: bool,
    /// Escape or window close requested
    pub quit: bool,
}

impl KeySnapshot {
    /// Translate raw key state into a movement intent
    pub fn intent(&self) -> Intent {
        let direction = match (self.left_held, self.right_held) {
            (true, false) => Direction::Left,
            (false, true) => Direction::Right,
            _ => Direction::Stopped,
        };
        Intent {
            direction,
            jump: self.jump_pressed,
        }
    }
}

/// Poll macroquad for this frame's key state. Call once per frame.
pub fn sample() -> KeySnapshot {
    KeySnapshot {
        left_held: is_key_down(KeyCode::Left) || is_key_down(KeyCode::A),
        right_held: is_key_down(KeyCode::Right) || is_key_down(KeyCode::D),
        jump_pressed: is_key_pressed(KeyCode::Space),
        quit: is_key_pressed(KeyCode::Escape) || is_quit_requested(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(left: bool, right: bool, jump: bool) -> KeySnapshot {
        KeySnapshot {
            left_held: left,
            right_held: right,
            jump_pressed: jump,
            quit: false,
        }
    }

    #[test]
    fn test_direction_is_level_triggered() {
        assert_eq!(snap(true, false, false).intent().direction, Direction::Left);
        assert_eq!(snap(false, true, false).intent().direction, Direction::Right);
        assert_eq!(snap(false, false, false).intent().direction, Direction::Stopped);
    }

    #[test]
    fn test_both_keys_held_means_stopped() {
        assert_eq!(snap(true, true, false).intent().direction, Direction::Stopped);
    }

    #[test]
    fn test_jump_latches_across_frames() {
        let mut pending = Intent::default();
        // Press frame
        pending.merge(snap(false, false, true).intent());
        // Two more frames without the key (e.g. zero simulation steps ran)
        pending.merge(snap(false, false, false).intent());
        pending.merge(snap(false, true, false).intent());

        assert!(pending.jump, "jump must survive until a step consumes it");
        assert_eq!(pending.direction, Direction::Right);
    }

    #[test]
    fn test_take_jump_clears_the_latch() {
        let mut pending = Intent {
            direction: Direction::Stopped,
            jump: true,
        };
        assert!(pending.take_jump());
        assert!(!pending.take_jump());
    }

    #[test]
    fn test_merge_overwrites_direction() {
        let mut pending = Intent {
            direction: Direction::Left,
            jump: false,
        };
        pending.merge(snap(false, false, false).intent());
        assert_eq!(pending.direction, Direction::Stopped);
    }
}
