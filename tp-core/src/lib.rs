//! tp-core: Ten-pin bowling rules, roll log, and frame scoring.

pub mod frame;
pub mod game;
pub mod scoring;
pub mod sim;

pub use frame::{Frame, MAX_PINS, MAX_ROLLS, NUM_FRAMES};
pub use game::{Game, InvalidRollError};
pub use scoring::{frame_scores, total_score, FrameScore, IncompleteGameError};
pub use sim::random_game;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_nonempty() {
        assert!(!VERSION.is_empty());
    }
}

#[cfg(test)]
mod frame_tests;
