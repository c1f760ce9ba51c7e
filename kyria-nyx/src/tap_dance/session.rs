/// State of one dance, from the first press until it is reset.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DanceSession {
    /// Number of presses in this dance
    pub count: u8,
    /// Another key was pressed before the dance resolved
    pub interrupted: bool,
    /// The key is physically held down
    pub pressed: bool,
    /// The finished handler has run for this dance
    pub finished: bool,
}

impl DanceSession {
    pub const fn new(count: u8, interrupted: bool, pressed: bool) -> Self {
        Self {
            count,
            interrupted,
            pressed,
            finished: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.count > 0
    }

    pub(crate) fn press(&mut self) {
        self.count = self.count.saturating_add(1);
        self.pressed = true;
    }

    pub(crate) fn release(&mut self) {
        self.pressed = false;
    }

    pub(crate) fn interrupt(&mut self) {
        self.interrupted = true;
    }

    pub(crate) fn finish(&mut self) {
        self.finished = true;
    }

    /// End the dance, keeping only the physical key state
    pub(crate) fn clear(&mut self) {
        *self = Self {
            pressed: self.pressed,
            ..Self::default()
        };
    }
}
