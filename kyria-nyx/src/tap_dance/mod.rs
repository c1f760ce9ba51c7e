//! Tap dance: telling taps, holds and repeated taps of one key apart.
//!
//! [`classify`] and [`classify_fast`] are pure functions of a [`DanceSession`]. The per-key
//! behaviors ([`FastDance`], [`TapHoldDance`]) turn an outcome into host actions, and
//! [`TapDances`] drives the sessions from key events and time.
mod dispatcher;
mod fast;
mod hold;
mod session;
mod tap_hold;

pub use dispatcher::{TAP_DANCE_MAX_NUM, TapDances};
pub use fast::FastDance;
pub use hold::HoldAction;
pub use session::DanceSession;
pub use tap_hold::TapHoldDance;

use crate::host::KeyboardHost;

/// What the user meant with a dance
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DanceOutcome {
    /// Nothing recorded
    #[default]
    None,
    /// More presses than the classifier knows about
    Unknown,
    SingleTap,
    SingleHold,
    DoubleTap,
    DoubleHold,
    /// Two separate taps while typing, not a double-tap gesture. Replay the key twice.
    DoubleSingleTap,
    TripleTap,
    TripleHold,
}

/// Classify a dance when it is adjudicated.
///
/// An interruption means the user was typing, so it always counts as a tap. A key still down
/// without interruption is a hold.
pub fn classify(session: &DanceSession) -> DanceOutcome {
    match session.count {
        1 if session.interrupted || !session.pressed => DanceOutcome::SingleTap,
        1 => DanceOutcome::SingleHold,
        2 if session.interrupted => DanceOutcome::DoubleSingleTap,
        2 if session.pressed => DanceOutcome::DoubleHold,
        2 => DanceOutcome::DoubleTap,
        3 if session.interrupted || !session.pressed => DanceOutcome::TripleTap,
        3 => DanceOutcome::TripleHold,
        _ => DanceOutcome::Unknown,
    }
}

/// Classify only holds, for keys whose taps are resolved on release.
///
/// Interruption is not considered: a key still down at finish is held.
pub fn classify_fast(session: &DanceSession) -> DanceOutcome {
    if !session.pressed {
        return DanceOutcome::Unknown;
    }
    match session.count {
        1 => DanceOutcome::SingleHold,
        2 => DanceOutcome::DoubleHold,
        3 => DanceOutcome::TripleHold,
        _ => DanceOutcome::Unknown,
    }
}

/// Behavior bound to a tap-dance key
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TapDance {
    Fast(FastDance),
    TapHold(TapHoldDance),
}

impl TapDance {
    pub(crate) fn on_finished<H: KeyboardHost>(&mut self, session: &DanceSession, permissive_hold: bool, host: &mut H) {
        match self {
            TapDance::Fast(dance) => dance.on_finished(session, host),
            TapDance::TapHold(dance) => dance.on_finished(session, permissive_hold, host),
        }
    }

    pub(crate) fn on_reset<H: KeyboardHost>(&mut self, host: &mut H) {
        match self {
            TapDance::Fast(dance) => dance.on_reset(host),
            TapDance::TapHold(dance) => dance.on_reset(host),
        }
    }
}
