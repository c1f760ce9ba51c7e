use kyria_nyx_types::key_stroke::KeyStroke;

/// The encoder direction is either `Clockwise` or `CounterClockwise`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// A clockwise turn
    Clockwise,
    /// A counterclockwise turn
    CounterClockwise,
}

impl Direction {
    pub fn from_clockwise(clockwise: bool) -> Self {
        if clockwise {
            Direction::Clockwise
        } else {
            Direction::CounterClockwise
        }
    }
}

/// EncoderAction is the keystroke tapped for each turn of an encoder
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncoderAction {
    clockwise: KeyStroke,
    counter_clockwise: KeyStroke,
}

impl EncoderAction {
    pub const fn new(clockwise: KeyStroke, counter_clockwise: KeyStroke) -> Self {
        Self {
            clockwise,
            counter_clockwise,
        }
    }

    pub fn action(&self, direction: Direction) -> KeyStroke {
        match direction {
            Direction::Clockwise => self.clockwise,
            Direction::CounterClockwise => self.counter_clockwise,
        }
    }
}

/// Keystroke for a turn of encoder `index`, `None` for unknown encoders
pub fn encoder_action(map: &[EncoderAction], index: u8, direction: Direction) -> Option<KeyStroke> {
    map.get(index as usize).map(|encoder| encoder.action(direction))
}
