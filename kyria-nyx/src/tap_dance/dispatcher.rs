use embassy_time::{Duration, Instant};
use heapless::Vec;
use log::{debug, warn};

use kyria_nyx_types::modifier::HidModifiers;

use super::session::DanceSession;
use super::{DanceOutcome, HoldAction, TapDance};
use crate::config::BehaviorConfig;
use crate::host::KeyboardHost;

// Max number of tap dance keys
pub const TAP_DANCE_MAX_NUM: usize = 8;

#[derive(Debug)]
struct TapDanceSlot {
    dance: TapDance,
    session: DanceSession,
    /// When the tapping term of the pending dance expires
    deadline: Option<Instant>,
}

impl TapDanceSlot {
    fn is_pending(&self) -> bool {
        self.session.is_active() && !self.session.finished
    }

    fn finish<H: KeyboardHost>(&mut self, permissive_hold: bool, host: &mut H) {
        debug!("Tap dance finished: {:?}", self.session);
        self.session.finish();
        self.deadline = None;
        self.dance.on_finished(&self.session, permissive_hold, host);
    }

    fn reset<H: KeyboardHost>(&mut self, host: &mut H) {
        debug!("Tap dance reset: {:?}", self.session);
        self.dance.on_reset(host);
        self.session.clear();
        self.deadline = None;
    }
}

/// Drives the dance of every tap-dance key.
///
/// Each key owns one session and one behavior for the lifetime of the keyboard. For every
/// session, finish runs at most once and before reset, and reset always runs once the key is
/// up and the dance is over.
#[derive(Debug)]
pub struct TapDances {
    slots: Vec<TapDanceSlot, TAP_DANCE_MAX_NUM>,
    tapping_term: Duration,
    permissive_hold: bool,
}

impl TapDances {
    pub fn new<I: IntoIterator<Item = TapDance>>(dances: I, behavior: &BehaviorConfig) -> Self {
        let mut slots = Vec::new();
        for dance in dances {
            let slot = TapDanceSlot {
                dance,
                session: DanceSession::default(),
                deadline: None,
            };
            if slots.push(slot).is_err() {
                warn!("More than {} tap dances defined, the rest are ignored", TAP_DANCE_MAX_NUM);
                break;
            }
        }
        Self {
            slots,
            tapping_term: behavior.tapping_term,
            permissive_hold: behavior.permissive_hold,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn dance(&self, index: u8) -> Option<&TapDance> {
        self.slots.get(index as usize).map(|slot| &slot.dance)
    }

    pub fn session(&self, index: u8) -> Option<&DanceSession> {
        self.slots.get(index as usize).map(|slot| &slot.session)
    }

    /// Whether any dance is waiting for its tapping term
    pub fn is_dancing(&self) -> bool {
        self.slots.iter().any(TapDanceSlot::is_pending)
    }

    /// Earliest pending deadline, for the event loop's timer
    pub fn next_deadline(&self) -> Option<Instant> {
        self.slots.iter().filter_map(|slot| slot.deadline).min()
    }

    /// Modifiers asserted by dances resolved to a hold
    pub fn held_mods(&self) -> HidModifiers {
        self.slots
            .iter()
            .filter_map(|slot| match &slot.dance {
                TapDance::Fast(dance) if dance.status() == DanceOutcome::SingleHold => match dance.hold {
                    HoldAction::AssertModifier(mods) => Some(mods),
                    HoldAction::EngageLayer(_) => None,
                },
                _ => None,
            })
            .fold(HidModifiers::new(), |acc, mods| acc | mods)
    }

    /// The key of dance `index` went down
    pub fn press<H: KeyboardHost>(&mut self, index: u8, now: Instant, host: &mut H) {
        let Some(slot) = self.slots.get_mut(index as usize) else {
            warn!("Press of undefined tap dance {}", index);
            return;
        };
        if slot.session.finished {
            // The previous dance never saw its release
            slot.reset(host);
        }
        slot.session.press();
        slot.deadline = Some(now + self.tapping_term);
        debug!("Tap dance {} pressed: {:?}", index, slot.session);
    }

    /// The key of dance `index` came up
    pub fn release<H: KeyboardHost>(&mut self, index: u8, host: &mut H) {
        let Some(slot) = self.slots.get_mut(index as usize) else {
            warn!("Release of undefined tap dance {}", index);
            return;
        };
        slot.session.release();
        if !slot.session.is_active() {
            return;
        }
        if slot.session.finished {
            slot.reset(host);
            return;
        }
        match &mut slot.dance {
            TapDance::Fast(dance) => {
                dance.on_early_release();
                slot.reset(host);
            }
            TapDance::TapHold(dance) => dance.on_early_release(host),
        }
    }

    /// Another key went down: every pending dance except `except` is interrupted and finished
    pub fn interrupt<H: KeyboardHost>(&mut self, except: Option<u8>, host: &mut H) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if Some(index as u8) == except || !slot.is_pending() {
                continue;
            }
            slot.session.interrupt();
            slot.finish(self.permissive_hold, host);
            if !slot.session.pressed {
                slot.reset(host);
            }
        }
    }

    /// Finish every dance whose tapping term expired at `now`
    pub fn tick<H: KeyboardHost>(&mut self, now: Instant, host: &mut H) {
        for slot in self.slots.iter_mut() {
            let expired = slot.deadline.is_some_and(|deadline| now >= deadline);
            if !expired || !slot.is_pending() {
                continue;
            }
            slot.finish(self.permissive_hold, host);
            if !slot.session.pressed {
                slot.reset(host);
            }
        }
    }
}
