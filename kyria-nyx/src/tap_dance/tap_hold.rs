use kyria_nyx_types::key_stroke::KeyStroke;
use log::debug;

use super::session::DanceSession;
use crate::host::KeyboardHost;

/// One key, one decision: `tap` or `hold`.
///
/// A tap is sent on release straight away. Holding the key past the tapping term asserts
/// `hold`; tapping once and then holding asserts `tap`, so the tap keycode can still
/// auto-repeat.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TapHoldDance {
    pub tap: KeyStroke,
    pub hold: KeyStroke,
    /// The keystroke asserted at finish, if any
    pub(crate) held: Option<KeyStroke>,
}

impl TapHoldDance {
    pub const fn new(tap: KeyStroke, hold: KeyStroke) -> Self {
        Self { tap, hold, held: None }
    }

    pub fn held(&self) -> Option<KeyStroke> {
        self.held
    }

    pub fn on_finished<H: KeyboardHost>(&mut self, session: &DanceSession, permissive_hold: bool, host: &mut H) {
        if !session.pressed {
            return;
        }
        let key = if session.count == 1 && (permissive_hold || !session.interrupted) {
            self.hold
        } else {
            self.tap
        };
        debug!("Tap-hold asserts {:?}", key);
        host.register_key(key);
        self.held = Some(key);
    }

    /// Send the tap now and let the dance go on, so that a following press can still be held
    pub fn on_early_release<H: KeyboardHost>(&mut self, host: &mut H) {
        host.tap_key(self.tap);
    }

    pub fn on_reset<H: KeyboardHost>(&mut self, host: &mut H) {
        if let Some(key) = self.held.take() {
            host.unregister_key(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use kyria_nyx_types::keycode::HidKeyCode;
    use kyria_nyx_types::modifier::HidModifiers;

    use super::*;
    use crate::state::{HostEvent, KeyboardState};

    fn colon() -> TapHoldDance {
        TapHoldDance::new(KeyStroke::COLON, KeyStroke::new(HidKeyCode::Semicolon))
    }

    #[test]
    fn test_hold_round_trip() {
        let mut host = KeyboardState::new();
        let mut dance = colon();
        let semicolon = KeyStroke::new(HidKeyCode::Semicolon);

        dance.on_finished(&DanceSession::new(1, false, true), false, &mut host);
        assert_eq!(dance.held(), Some(semicolon));
        assert_eq!(host.pop_event(), Some(HostEvent::KeyDown(semicolon, HidModifiers::new())));

        dance.on_reset(&mut host);
        assert_eq!(dance.held(), None);
        assert_eq!(host.pop_event(), Some(HostEvent::KeyUp(semicolon)));
        assert_eq!(host.pop_event(), None);
    }

    #[test]
    fn test_tap_round_trip() {
        let mut host = KeyboardState::new();
        let mut dance = colon();
        let lshift = HidModifiers::new().with_left_shift(true);

        // Tap, then press again and hold
        dance.on_finished(&DanceSession::new(2, false, true), false, &mut host);
        assert_eq!(dance.held(), Some(KeyStroke::COLON));
        assert_eq!(host.pop_event(), Some(HostEvent::KeyDown(KeyStroke::COLON, lshift)));

        dance.on_reset(&mut host);
        assert_eq!(dance.held(), None);
        assert_eq!(host.pop_event(), Some(HostEvent::KeyUp(KeyStroke::COLON)));
        assert_eq!(host.pop_event(), None);
    }

    #[test]
    fn test_interrupted_single_press() {
        let mut host = KeyboardState::new();
        let mut dance = colon();
        let session = DanceSession::new(1, true, true);

        dance.on_finished(&session, false, &mut host);
        assert_eq!(dance.held(), Some(KeyStroke::COLON));
        dance.on_reset(&mut host);

        dance.on_finished(&session, true, &mut host);
        assert_eq!(dance.held(), Some(KeyStroke::new(HidKeyCode::Semicolon)));
    }

    #[test]
    fn test_finish_after_release_asserts_nothing() {
        let mut host = KeyboardState::new();
        let mut dance = colon();
        dance.on_finished(&DanceSession::new(1, false, false), false, &mut host);
        assert_eq!(dance.held(), None);

        // Reset with nothing held is a no-op, twice over
        dance.on_reset(&mut host);
        dance.on_reset(&mut host);
        assert_eq!(host.pop_event(), None);
    }
}
