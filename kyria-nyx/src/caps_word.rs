use embassy_time::{Duration, Instant};
use kyria_nyx_types::keycode::HidKeyCode;
use kyria_nyx_types::key_stroke::KeyStroke;
use log::debug;

use crate::keymap::{KeyAction, TapDanceId};

/// What caps word does with a pressed key
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CapsWordDecision {
    /// Keep going and shift this key
    Shift,
    /// Keep going, key is sent as is
    Continue,
    /// Caps word ends, key is sent as is
    End,
}

/// Capitalize letters until a word-breaking key is pressed
#[derive(Debug, Default)]
pub struct CapsWord {
    /// Time of the last key press while active, `None` when inactive
    last_press: Option<Instant>,
}

impl CapsWord {
    pub fn is_active(&self) -> bool {
        self.last_press.is_some()
    }

    pub fn toggle(&mut self, now: Instant) {
        if self.is_active() {
            self.deactivate();
        } else {
            debug!("Caps word on");
            self.last_press = Some(now);
        }
    }

    pub fn deactivate(&mut self) {
        if self.last_press.take().is_some() {
            debug!("Caps word off");
        }
    }

    /// Decide about a pressed key. Inactive caps word lets everything through.
    pub fn process(&mut self, action: &KeyAction, now: Instant) -> CapsWordDecision {
        if !self.is_active() {
            return CapsWordDecision::Continue;
        }
        let decision = Self::decide(action);
        match decision {
            CapsWordDecision::End => self.deactivate(),
            _ => self.last_press = Some(now),
        }
        decision
    }

    /// Turn off after `timeout` without key presses
    pub fn tick(&mut self, now: Instant, timeout: Duration) {
        if let Some(last) = self.last_press
            && now.checked_duration_since(last).is_some_and(|idle| idle >= timeout)
        {
            self.deactivate();
        }
    }

    fn decide(action: &KeyAction) -> CapsWordDecision {
        match action {
            KeyAction::Key(key) if key.modifiers.is_empty() && key.code.is_letter() => CapsWordDecision::Shift,
            KeyAction::Key(key) if *key == KeyStroke::UNDERSCORE => CapsWordDecision::Continue,
            KeyAction::Key(key)
                if key.modifiers.is_empty()
                    && (key.code.is_digit() || matches!(key.code, HidKeyCode::Backspace | HidKeyCode::Delete)) =>
            {
                CapsWordDecision::Continue
            }
            KeyAction::TapDance(TapDanceId::ThumbLeft2 | TapDanceId::ThumbRight2) => CapsWordDecision::Continue,
            _ => CapsWordDecision::End,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: HidKeyCode) -> KeyAction {
        KeyAction::Key(KeyStroke::new(code))
    }

    #[test]
    fn test_caps_word_decisions() {
        let now = Instant::from_millis(0);
        let mut caps_word = CapsWord::default();
        caps_word.toggle(now);
        assert_eq!(caps_word.process(&key(HidKeyCode::A), now), CapsWordDecision::Shift);
        assert_eq!(caps_word.process(&key(HidKeyCode::Kc5), now), CapsWordDecision::Continue);
        assert_eq!(caps_word.process(&KeyAction::Key(KeyStroke::UNDERSCORE), now), CapsWordDecision::Continue);
        assert_eq!(
            caps_word.process(&KeyAction::TapDance(TapDanceId::ThumbLeft2), now),
            CapsWordDecision::Continue
        );
        assert!(caps_word.is_active());
        assert_eq!(caps_word.process(&key(HidKeyCode::Space), now), CapsWordDecision::End);
        assert!(!caps_word.is_active());
        // Inactive caps word passes keys through
        assert_eq!(caps_word.process(&key(HidKeyCode::A), now), CapsWordDecision::Continue);
    }

    #[test]
    fn test_thumb_space_ends_caps_word() {
        let now = Instant::from_millis(0);
        let mut caps_word = CapsWord::default();
        caps_word.toggle(now);
        assert_eq!(
            caps_word.process(&KeyAction::TapDance(TapDanceId::ThumbLeft3), now),
            CapsWordDecision::End
        );
    }

    #[test]
    fn test_caps_word_idle_timeout() {
        let mut caps_word = CapsWord::default();
        caps_word.toggle(Instant::from_millis(0));
        caps_word.process(&key(HidKeyCode::A), Instant::from_millis(1000));
        caps_word.tick(Instant::from_millis(5999), Duration::from_millis(5000));
        assert!(caps_word.is_active());
        caps_word.tick(Instant::from_millis(6000), Duration::from_millis(5000));
        assert!(!caps_word.is_active());
    }
}
