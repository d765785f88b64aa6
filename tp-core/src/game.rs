//! Game state: the append-only roll log and its scoring surface.
//!
//! This module is the single place that mutates the roll log.

use crate::frame::MAX_PINS;
use crate::scoring::{self, FrameScore, IncompleteGameError};
use thiserror::Error;

/// A roll outside the valid pin range.
///
/// The unsigned input type already excludes negative counts; this error
/// covers the upper bound.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("invalid roll: {pins} pins (a delivery knocks down at most 10)")]
pub struct InvalidRollError {
    pub pins: u8,
}

/// One ten-pin game: an append-only roll log, scored on demand.
///
/// Recording and scoring are not gated against each other: rolls may be
/// recorded before or after scoring, and every score call recomputes from
/// the full log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Game {
    rolls: Vec<u8>,
}

impl Game {
    /// New game with an empty roll log.
    pub fn new() -> Self {
        Self { rolls: Vec::new() }
    }

    /// Record the pins knocked down by one delivery, in call order.
    ///
    /// Rolls above ten pins are rejected and leave the log untouched.
    /// Cross-frame legality (two rolls of one frame summing past ten) is
    /// intentionally not checked.
    pub fn record(&mut self, pins: u8) -> Result<(), InvalidRollError> {
        if pins > MAX_PINS {
            return Err(InvalidRollError { pins });
        }
        self.rolls.push(pins);
        Ok(())
    }

    /// Read-only view of the roll log, in recording order.
    pub fn rolls(&self) -> &[u8] {
        &self.rolls
    }

    /// Total score over exactly ten frames.
    ///
    /// Fails if the log is too short for the scan's lookahead (mid-game, or
    /// missing tenth-frame bonus rolls). Rolls beyond what ten frames
    /// consume are ignored.
    pub fn total_score(&self) -> Result<u16, IncompleteGameError> {
        scoring::total_score(&self.rolls)
    }

    /// Per-frame scorecard through all ten frames.
    pub fn frame_scores(&self) -> Result<Vec<FrameScore>, IncompleteGameError> {
        scoring::frame_scores(&self.rolls)
    }
}
