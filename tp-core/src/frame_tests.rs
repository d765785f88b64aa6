#[cfg(test)]
mod tests {
    use crate::frame::{Frame, MAX_PINS, MAX_ROLLS, NUM_FRAMES};

    #[test]
    fn game_shape_constants() {
        assert_eq!(NUM_FRAMES, 10);
        assert_eq!(MAX_PINS, 10);
        // Nine two-roll frames + tenth frame with up to two bonus rolls.
        assert_eq!(MAX_ROLLS, 21);
    }

    #[test]
    fn pins_downed_per_variant() {
        assert_eq!(Frame::Strike.pins_downed(), 10);
        assert_eq!(Frame::Spare { first: 7 }.pins_downed(), 10);
        assert_eq!(Frame::Open { first: 3, second: 4 }.pins_downed(), 7);
    }

    #[test]
    fn rolls_consumed_per_variant() {
        assert_eq!(Frame::Strike.rolls_consumed(), 1);
        assert_eq!(Frame::Spare { first: 9 }.rolls_consumed(), 2);
        assert_eq!(Frame::Open { first: 0, second: 0 }.rolls_consumed(), 2);
    }
}
