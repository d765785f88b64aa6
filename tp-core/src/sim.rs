//! Random legal game generation for simulation and property tests.

use crate::frame::{MAX_PINS, MAX_ROLLS, NUM_FRAMES};
use rand::Rng;

/// Generate the roll log of one random, legal, complete game.
///
/// Frames one through nine bound the second roll by the pins still
/// standing; the tenth frame appends the bonus rolls its strike or spare is
/// owed (the rack resets after each strike). The result always scores
/// cleanly.
pub fn random_game<R: Rng>(rng: &mut R) -> Vec<u8> {
    let mut rolls = Vec::with_capacity(MAX_ROLLS);

    for _ in 0..NUM_FRAMES - 1 {
        let first = rng.gen_range(0..=MAX_PINS);
        rolls.push(first);
        if first < MAX_PINS {
            rolls.push(rng.gen_range(0..=MAX_PINS - first));
        }
    }

    // Tenth frame.
    let first = rng.gen_range(0..=MAX_PINS);
    rolls.push(first);
    if first == MAX_PINS {
        let bonus1 = rng.gen_range(0..=MAX_PINS);
        rolls.push(bonus1);
        let bonus2_max = if bonus1 == MAX_PINS {
            MAX_PINS
        } else {
            MAX_PINS - bonus1
        };
        rolls.push(rng.gen_range(0..=bonus2_max));
    } else {
        let second = rng.gen_range(0..=MAX_PINS - first);
        rolls.push(second);
        if first + second == MAX_PINS {
            rolls.push(rng.gen_range(0..=MAX_PINS));
        }
    }

    rolls
}
