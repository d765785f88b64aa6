//! Frame scoring over a flat roll log.
//!
//! The scan keeps a cursor into the log and classifies exactly ten frames by
//! arithmetic on the rolls. Every lookahead access is bounds-checked, so an
//! incomplete game surfaces a typed error instead of a panic, and rolls
//! beyond what ten frames consume are ignored.

use crate::frame::{Frame, MAX_PINS, NUM_FRAMES};
use thiserror::Error;

/// Scoring ran out of rolls: the game was not played to completion,
/// including any bonus rolls owed to a tenth-frame strike or spare.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("incomplete game: frame {frame} needs roll index {roll_index} but only {rolls_recorded} rolls are recorded")]
pub struct IncompleteGameError {
    /// 1-based frame that could not be scored.
    pub frame: usize,
    /// Roll-log index the scan tried to read.
    pub roll_index: usize,
    /// Rolls actually recorded.
    pub rolls_recorded: usize,
}

/// One scored frame: its classification, its score, and the running total
/// through it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameScore {
    pub frame: Frame,
    pub score: u16,
    pub running_total: u16,
}

/// Total score of a complete game.
///
/// - Strike frames score `10 +` the next two rolls and advance the cursor
///   by one; spares score `10 +` the next roll and advance by two; open
///   frames score their own two rolls.
/// - The result is in `0..=300`.
/// - Always recomputed fresh from the full log; no cached state.
pub fn total_score(rolls: &[u8]) -> Result<u16, IncompleteGameError> {
    let mut total = 0u16;
    let mut roll_index = 0usize;

    for frame in 0..NUM_FRAMES {
        let (_, score, advance) = score_frame(rolls, roll_index, frame + 1)?;
        total += score;
        roll_index += advance;
    }

    Ok(total)
}

/// Per-frame breakdown in frame order, with running totals.
///
/// Fails on the same incomplete logs as [`total_score`]; on success the last
/// entry's `running_total` equals the total score.
pub fn frame_scores(rolls: &[u8]) -> Result<Vec<FrameScore>, IncompleteGameError> {
    let mut out = Vec::with_capacity(NUM_FRAMES);
    let mut total = 0u16;
    let mut roll_index = 0usize;

    for frame in 0..NUM_FRAMES {
        let (classified, score, advance) = score_frame(rolls, roll_index, frame + 1)?;
        total += score;
        out.push(FrameScore {
            frame: classified,
            score,
            running_total: total,
        });
        roll_index += advance;
    }

    Ok(out)
}

/// Classify and score the frame starting at `roll_index`.
///
/// Returns `(frame, score, cursor advance)`. `frame_no` is 1-based and used
/// only for error reporting.
fn score_frame(
    rolls: &[u8],
    roll_index: usize,
    frame_no: usize,
) -> Result<(Frame, u16, usize), IncompleteGameError> {
    let first = roll_at(rolls, roll_index, frame_no)?;

    if first == MAX_PINS {
        let bonus = u16::from(roll_at(rolls, roll_index + 1, frame_no)?)
            + u16::from(roll_at(rolls, roll_index + 2, frame_no)?);
        return Ok((Frame::Strike, u16::from(MAX_PINS) + bonus, 1));
    }

    let second = roll_at(rolls, roll_index + 1, frame_no)?;
    let pair = u16::from(first) + u16::from(second);

    if pair == u16::from(MAX_PINS) {
        let bonus = u16::from(roll_at(rolls, roll_index + 2, frame_no)?);
        Ok((Frame::Spare { first }, u16::from(MAX_PINS) + bonus, 2))
    } else {
        Ok((Frame::Open { first, second }, pair, 2))
    }
}

#[inline]
fn roll_at(rolls: &[u8], roll_index: usize, frame_no: usize) -> Result<u8, IncompleteGameError> {
    rolls.get(roll_index).copied().ok_or(IncompleteGameError {
        frame: frame_no,
        roll_index,
        rolls_recorded: rolls.len(),
    })
}
