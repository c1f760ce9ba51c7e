use embassy_time::Instant;
use heapless::Vec;
use kyria_nyx_types::key_stroke::KeyStroke;
use kyria_nyx_types::modifier::HidModifiers;
use log::{debug, warn};

use crate::caps_word::{CapsWord, CapsWordDecision};
use crate::config::NyxConfig;
use crate::encoder::{Direction, EncoderAction, encoder_action};
use crate::host::KeyboardHost;
use crate::key_override::{KeyOverrides, find_override};
use crate::keymap::{KeyAction, encoder_map, key_overrides, tap_dances};
use crate::raw_hid::{RawHidReport, process_raw_hid};
use crate::tap_dance::TapDances;

// Max number of keys held at the same time
pub const HELD_KEYS_MAX_NUM: usize = 16;

/// A pressed key and what its release has to undo
#[derive(Debug, Copy, Clone)]
struct HeldKey {
    action: KeyAction,
    /// Keystroke registered for a plain key, `None` for modifiers and tap dances
    sent: Option<KeyStroke>,
    /// Modifiers lifted by a key override
    suppressed: HidModifiers,
    /// Pressed while a one-shot layer was waiting, its release ends the one-shot layer
    consumes_oneshot: bool,
}

/// Per-key processing of the board: tap dances, caps word, key overrides, one-shot layers,
/// encoders and the raw HID channel.
///
/// Key events come with the time they happened. The caller runs [`Keyboard::tick`] at
/// [`Keyboard::next_deadline`] at the latest.
pub struct Keyboard<H: KeyboardHost> {
    host: H,
    config: NyxConfig,
    dances: TapDances,
    overrides: KeyOverrides,
    encoders: [EncoderAction; 2],
    caps_word: CapsWord,
    held_keys: Vec<HeldKey, HELD_KEYS_MAX_NUM>,
    /// Modifiers of physically held modifier keys
    held_mods: HidModifiers,
    /// When the waiting one-shot layer was set
    oneshot_since: Option<Instant>,
}

impl<H: KeyboardHost> Keyboard<H> {
    pub fn new(host: H, config: NyxConfig) -> Self {
        let dances = TapDances::new(tap_dances(), &config.behavior);
        Self {
            host,
            config,
            dances,
            overrides: key_overrides(),
            encoders: encoder_map(),
            caps_word: CapsWord::default(),
            held_keys: Vec::new(),
            held_mods: HidModifiers::new(),
            oneshot_since: None,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn config(&self) -> &NyxConfig {
        &self.config
    }

    pub fn tap_dances(&self) -> &TapDances {
        &self.dances
    }

    pub fn is_caps_word_active(&self) -> bool {
        self.caps_word.is_active()
    }

    /// Process a key event
    pub fn process_key(&mut self, action: KeyAction, pressed: bool, now: Instant) {
        debug!("Processing {:?}, pressed: {}", action, pressed);
        if pressed {
            self.process_key_pressed(action, now);
        } else {
            self.process_key_released(action);
        }
    }

    /// Advance tap-dance deadlines and timeouts
    pub fn tick(&mut self, now: Instant) {
        self.dances.tick(now, &mut self.host);
        self.caps_word.tick(now, self.config.behavior.caps_word_idle_timeout);
        if let Some(since) = self.oneshot_since
            && now >= since + self.config.behavior.oneshot_timeout
        {
            debug!("One-shot layer timed out");
            self.clear_oneshot();
        }
    }

    /// The earliest time [`Keyboard::tick`] has something to do
    pub fn next_deadline(&self) -> Option<Instant> {
        let oneshot = self
            .oneshot_since
            .map(|since| since + self.config.behavior.oneshot_timeout);
        match (self.dances.next_deadline(), oneshot) {
            (Some(dance), Some(oneshot)) => Some(dance.min(oneshot)),
            (dance, oneshot) => dance.or(oneshot),
        }
    }

    /// Tap the key bound to a turn of encoder `index`. Returns false for unknown encoders.
    pub fn process_encoder(&mut self, index: u8, direction: Direction) -> bool {
        match encoder_action(&self.encoders, index, direction) {
            Some(key) => {
                debug!("Encoder {} {:?}: {:?}", index, direction, key);
                self.host.tap_key(key);
                true
            }
            None => {
                warn!("Turn of undefined encoder {}", index);
                false
            }
        }
    }

    /// Run a raw HID buffer and send the acknowledgment. Returns false if the buffer was dropped.
    pub fn process_raw_hid<const N: usize>(&mut self, data: &[u8; N]) -> bool {
        let Some(ack) = process_raw_hid(data, &mut self.host) else {
            return false;
        };
        // Moving layers ends any one-shot layer
        self.oneshot_since = None;
        self.host.send_raw_hid(&ack);
        true
    }

    /// Run the output part of a raw HID report
    pub fn process_raw_hid_report(&mut self, report: &RawHidReport) -> bool {
        self.process_raw_hid(&report.output_data)
    }

    fn process_key_pressed(&mut self, action: KeyAction, now: Instant) {
        let dance = match action {
            KeyAction::TapDance(id) => Some(id.index()),
            _ => None,
        };
        self.dances.interrupt(dance, &mut self.host);

        match action {
            KeyAction::No | KeyAction::Transparent => {
                self.clear_oneshot();
                return;
            }
            KeyAction::CapsWordToggle => {
                self.caps_word.toggle(now);
                return;
            }
            KeyAction::OneShotLayer(layer) => {
                debug!("One-shot layer {:?}", layer);
                self.host.set_oneshot_layer(layer);
                self.oneshot_since = Some(now);
                return;
            }
            KeyAction::Key(_) | KeyAction::TapDance(_) => {}
        }

        let consumes_oneshot = self.oneshot_since.is_some();
        match action {
            KeyAction::TapDance(id) => {
                self.caps_word.process(&action, now);
                self.dances.press(id.index(), now, &mut self.host);
                self.hold_key(HeldKey {
                    action,
                    sent: None,
                    suppressed: HidModifiers::new(),
                    consumes_oneshot,
                });
            }
            KeyAction::Key(key) if key.code.is_modifier() && key.modifiers.is_empty() => {
                let mods = HidModifiers::from_keycode(key.code);
                self.held_mods |= mods;
                self.host.register_mods(mods);
                self.hold_key(HeldKey {
                    action,
                    sent: None,
                    suppressed: HidModifiers::new(),
                    consumes_oneshot: false,
                });
            }
            KeyAction::Key(key) => {
                if self.caps_word.process(&action, now) == CapsWordDecision::Shift {
                    self.host.add_weak_mods(HidModifiers::new().with_left_shift(true));
                }
                let (sent, suppressed) = match find_override(&self.overrides, key, self.host.mods()) {
                    Some(active) => {
                        debug!("Key override {:?} -> {:?}", key, active.replacement);
                        self.host.unregister_mods(active.suppressed);
                        (active.replacement, active.suppressed)
                    }
                    None => (key, HidModifiers::new()),
                };
                self.host.register_key(sent);
                self.hold_key(HeldKey {
                    action,
                    sent: Some(sent),
                    suppressed,
                    consumes_oneshot,
                });
            }
            _ => {}
        }
    }

    fn process_key_released(&mut self, action: KeyAction) {
        let held = self
            .held_keys
            .iter()
            .position(|held| held.action == action)
            .map(|pos| self.held_keys.swap_remove(pos));

        match (action, held) {
            (KeyAction::TapDance(id), _) => self.dances.release(id.index(), &mut self.host),
            (
                KeyAction::Key(_),
                Some(HeldKey {
                    sent: Some(sent),
                    suppressed,
                    ..
                }),
            ) => {
                self.host.unregister_key(sent);
                let restore = suppressed & (self.held_mods | self.dances.held_mods());
                if !restore.is_empty() {
                    self.host.register_mods(restore);
                }
            }
            (KeyAction::Key(key), _) if key.code.is_modifier() && key.modifiers.is_empty() => {
                let mods = HidModifiers::from_keycode(key.code);
                self.held_mods &= !mods;
                self.host.unregister_mods(mods);
            }
            (KeyAction::Key(key), None) => {
                debug!("Release of {:?} without a recorded press", key);
                self.host.unregister_key(key);
            }
            _ => {}
        }

        if held.is_some_and(|held| held.consumes_oneshot) {
            self.clear_oneshot();
        }
    }

    fn hold_key(&mut self, held: HeldKey) {
        if self.held_keys.push(held).is_err() {
            warn!("More than {} keys held, release of {:?} is not tracked", HELD_KEYS_MAX_NUM, held.action);
        }
    }

    fn clear_oneshot(&mut self) {
        if self.oneshot_since.take().is_some() || self.host.is_oneshot_layer_active() {
            self.host.clear_oneshot_layer();
        }
    }
}
