//! Per-key configuration of this board: tap dances, key overrides and encoders.
use kyria_nyx_types::key_stroke::KeyStroke;
use kyria_nyx_types::keycode::HidKeyCode;
use kyria_nyx_types::modifier::HidModifiers;
use serde::{Deserialize, Serialize};
use strum::FromRepr;

use crate::encoder::EncoderAction;
use crate::key_override::{KeyOverride, KeyOverrides};
use crate::layer::Layer;
use crate::tap_dance::{FastDance, HoldAction, TapDance, TapHoldDance};

/// Tap-dance keys, in the order of [`tap_dances`]
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, FromRepr, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TapDanceId {
    /// `:` on tap, `;` on hold
    ColonSemicolon = 0,
    /// Space, Nav layer on hold
    ThumbLeft3,
    /// Backspace, Num layer on hold
    ThumbLeft2,
    /// Escape, Sym layer on hold
    ThumbRight2,
    /// Space, right shift on hold
    ThumbRight3,
}

impl TapDanceId {
    pub const fn index(self) -> u8 {
        self as u8
    }
}

/// What the framework resolved for a pressed key position
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyAction {
    No,
    Transparent,
    Key(KeyStroke),
    TapDance(TapDanceId),
    CapsWordToggle,
    /// Layer active until the next key is released
    OneShotLayer(Layer),
}

impl From<HidKeyCode> for KeyAction {
    fn from(code: HidKeyCode) -> Self {
        KeyAction::Key(KeyStroke::new(code))
    }
}

/// Tap dances, indexed by [`TapDanceId`]
pub fn tap_dances() -> [TapDance; 5] {
    [
        TapDance::TapHold(TapHoldDance::new(KeyStroke::COLON, KeyStroke::new(HidKeyCode::Semicolon))),
        TapDance::Fast(FastDance::new(
            KeyStroke::new(HidKeyCode::Space),
            HoldAction::EngageLayer(Layer::Nav),
        )),
        TapDance::Fast(FastDance::new(
            KeyStroke::new(HidKeyCode::Backspace),
            HoldAction::EngageLayer(Layer::Num),
        )),
        TapDance::Fast(FastDance::new(
            KeyStroke::new(HidKeyCode::Escape),
            HoldAction::EngageLayer(Layer::Sym),
        )),
        TapDance::Fast(FastDance::new(
            KeyStroke::new(HidKeyCode::Space),
            HoldAction::AssertModifier(HidModifiers::from_keycode(HidKeyCode::RShift)),
        )),
    ]
}

/// With shift held: `,` sends `?`, `.` sends `!`, `:` sends `;`
pub fn key_overrides() -> KeyOverrides {
    let mut overrides = KeyOverrides::new();
    for key_override in [
        KeyOverride::basic(HidModifiers::SHIFT, HidKeyCode::Comma.into(), KeyStroke::QUESTION),
        KeyOverride::basic(HidModifiers::SHIFT, HidKeyCode::Dot.into(), KeyStroke::EXCLAIM),
        KeyOverride::basic(HidModifiers::SHIFT, KeyStroke::COLON, HidKeyCode::Semicolon.into()),
    ] {
        // Three entries always fit
        let _ = overrides.push(key_override);
    }
    overrides
}

/// Encoder 0 is volume, encoder 1 scrolls pages
pub const fn encoder_map() -> [EncoderAction; 2] {
    [
        EncoderAction::new(
            KeyStroke::new(HidKeyCode::KbVolumeUp),
            KeyStroke::new(HidKeyCode::KbVolumeDown),
        ),
        EncoderAction::new(
            KeyStroke::new(HidKeyCode::PageDown),
            KeyStroke::new(HidKeyCode::PageUp),
        ),
    ]
}
