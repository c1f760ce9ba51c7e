#![allow(dead_code)]

use embassy_time::{Duration, Instant};
use kyria_nyx::config::NyxConfig;
use kyria_nyx::keymap::{KeyAction, TapDanceId};
use kyria_nyx::{HostEvent, Keyboard, KeyboardState};
use kyria_nyx_types::key_stroke::KeyStroke;
use kyria_nyx_types::keycode::HidKeyCode;
use kyria_nyx_types::modifier::HidModifiers;

// Init logger for tests
#[ctor::ctor]
pub fn init_log() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}

pub const LSHIFT: HidModifiers = HidModifiers::new().with_left_shift(true);
pub const RSHIFT: HidModifiers = HidModifiers::new().with_right_shift(true);
pub const NO_MODS: HidModifiers = HidModifiers::new();

// Time after the last event to let pending dances finish
pub const SETTLE: u64 = 500;

#[derive(Debug, Clone)]
pub struct TestKeyPress {
    pub action: KeyAction,
    pub pressed: bool,
    pub delay: u64, // Delay before this key event in milliseconds
}

pub fn press(action: KeyAction, delay: u64) -> TestKeyPress {
    TestKeyPress {
        action,
        pressed: true,
        delay,
    }
}

pub fn release(action: KeyAction, delay: u64) -> TestKeyPress {
    TestKeyPress {
        action,
        pressed: false,
        delay,
    }
}

pub fn create_keyboard() -> Keyboard<KeyboardState> {
    Keyboard::new(KeyboardState::new(), NyxConfig::default())
}

pub fn create_keyboard_with(config: NyxConfig) -> Keyboard<KeyboardState> {
    Keyboard::new(KeyboardState::new(), config)
}

pub fn at(ms: u64) -> Instant {
    Instant::from_millis(ms)
}

pub fn key(code: HidKeyCode) -> KeyAction {
    KeyAction::Key(KeyStroke::new(code))
}

pub fn dance(id: TapDanceId) -> KeyAction {
    KeyAction::TapDance(id)
}

pub fn down(key: impl Into<KeyStroke>, mods: HidModifiers) -> HostEvent {
    HostEvent::KeyDown(key.into(), mods)
}

pub fn up(key: impl Into<KeyStroke>) -> HostEvent {
    HostEvent::KeyUp(key.into())
}

pub fn drain(keyboard: &mut Keyboard<KeyboardState>) -> Vec<HostEvent> {
    keyboard.host_mut().drain_events().into_iter().collect()
}

/// Feed `key_sequence` starting at time 0, ticking before every event, then settle.
/// Returns every host event produced.
pub fn run_key_sequence(keyboard: &mut Keyboard<KeyboardState>, key_sequence: &[TestKeyPress]) -> Vec<HostEvent> {
    let mut now = Instant::from_millis(0);
    let mut events = Vec::new();
    for key in key_sequence {
        now += Duration::from_millis(key.delay);
        keyboard.tick(now);
        keyboard.process_key(key.action, key.pressed, now);
        events.extend(drain(keyboard));
    }
    keyboard.tick(now + Duration::from_millis(SETTLE));
    events.extend(drain(keyboard));
    events
}
