use kyria_nyx_types::key_stroke::KeyStroke;
use log::debug;

use super::hold::HoldAction;
use super::session::DanceSession;
use super::{DanceOutcome, classify_fast};
use crate::host::KeyboardHost;

/// A tap-dance key that answers a tap on release instead of waiting for the tapping term.
///
/// Only a single tap and a single hold are resolved: the hold is engaged when the term
/// expires with the key still down, the tap is sent as soon as the key comes up.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FastDance {
    /// Sent once on a tap
    pub tap: KeyStroke,
    /// Engaged while held
    pub hold: HoldAction,
    /// Outcome recorded at finish, read back at reset
    pub(crate) status: DanceOutcome,
}

impl FastDance {
    pub const fn new(tap: KeyStroke, hold: HoldAction) -> Self {
        Self {
            tap,
            hold,
            status: DanceOutcome::None,
        }
    }

    pub fn status(&self) -> DanceOutcome {
        self.status
    }

    /// The tapping term expired or another key interrupted the dance
    pub fn on_finished<H: KeyboardHost>(&mut self, session: &DanceSession, host: &mut H) {
        self.status = classify_fast(session);
        if self.status == DanceOutcome::SingleHold {
            self.hold.engage(host);
        }
    }

    /// The key came up before the dance finished.
    ///
    /// The caller resets the dance right after this.
    pub fn on_early_release(&mut self) {
        debug!("Early release, resolving as a tap");
        self.status = DanceOutcome::SingleTap;
    }

    /// The dance ended, undo or complete what `status` says
    pub fn on_reset<H: KeyboardHost>(&mut self, host: &mut H) {
        match self.status {
            DanceOutcome::SingleTap => host.tap_key(self.tap),
            DanceOutcome::SingleHold => self.hold.disengage(host),
            _ => {}
        }
        self.status = DanceOutcome::None;
    }
}

#[cfg(test)]
mod tests {
    use kyria_nyx_types::keycode::HidKeyCode;
    use kyria_nyx_types::modifier::HidModifiers;

    use super::*;
    use crate::layer::Layer;
    use crate::state::{HostEvent, KeyboardState};

    fn nav_thumb() -> FastDance {
        FastDance::new(KeyStroke::new(HidKeyCode::Space), HoldAction::EngageLayer(Layer::Nav))
    }

    #[test]
    fn test_reset_without_outcome_does_nothing() {
        let mut host = KeyboardState::new();
        host.layer_on(Layer::Nav);
        let mut dance = nav_thumb();

        dance.on_reset(&mut host);
        assert_eq!(dance.status(), DanceOutcome::None);

        dance.status = DanceOutcome::Unknown;
        dance.on_reset(&mut host);
        assert_eq!(dance.status(), DanceOutcome::None);

        assert!(host.layer_state().is_on(Layer::Nav));
        assert_eq!(host.pop_event(), None);
    }

    #[test]
    fn test_finish_after_release_is_unknown() {
        let mut host = KeyboardState::new();
        let mut dance = nav_thumb();
        dance.on_finished(&DanceSession::new(1, false, false), &mut host);
        assert_eq!(dance.status(), DanceOutcome::Unknown);
        assert_eq!(host.layer_state().bits(), 0);

        dance.on_reset(&mut host);
        assert_eq!(host.pop_event(), None);
    }

    #[test]
    fn test_hold_then_reset() {
        let mut host = KeyboardState::new();
        let mut dance = nav_thumb();
        dance.on_finished(&DanceSession::new(1, false, true), &mut host);
        assert_eq!(dance.status(), DanceOutcome::SingleHold);
        assert!(host.layer_state().is_on(Layer::Nav));

        dance.on_reset(&mut host);
        assert_eq!(dance.status(), DanceOutcome::None);
        assert!(!host.layer_state().is_on(Layer::Nav));
        assert_eq!(host.pop_event(), None);
    }

    #[test]
    fn test_double_hold_engages_nothing() {
        let mut host = KeyboardState::new();
        let mut dance = nav_thumb();
        dance.on_finished(&DanceSession::new(2, false, true), &mut host);
        assert_eq!(dance.status(), DanceOutcome::DoubleHold);
        assert_eq!(host.layer_state().bits(), 0);
        dance.on_reset(&mut host);
        assert_eq!(dance.status(), DanceOutcome::None);
        assert_eq!(host.pop_event(), None);
    }

    #[test]
    fn test_early_release_taps_at_reset() {
        let mut host = KeyboardState::new();
        let mut dance = nav_thumb();
        dance.on_early_release();
        assert_eq!(dance.status(), DanceOutcome::SingleTap);
        assert_eq!(host.pop_event(), None);

        dance.on_reset(&mut host);
        let space = KeyStroke::new(HidKeyCode::Space);
        assert_eq!(host.pop_event(), Some(HostEvent::KeyDown(space, HidModifiers::new())));
        assert_eq!(host.pop_event(), Some(HostEvent::KeyUp(space)));
        assert_eq!(host.pop_event(), None);
        assert_eq!(dance.status(), DanceOutcome::None);
    }
}
