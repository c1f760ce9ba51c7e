use serde::{Deserialize, Serialize};

use crate::keycode::HidKeyCode;
use crate::modifier::ModifierCombination;

/// A keycode plus the modifiers sent along with it.
///
/// This is the 16-bit keycode of QMK: `KC_QUES` is `/` with shift.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyStroke {
    pub code: HidKeyCode,
    pub modifiers: ModifierCombination,
}

impl KeyStroke {
    pub const QUESTION: Self = Self::shifted(HidKeyCode::Slash);
    pub const EXCLAIM: Self = Self::shifted(HidKeyCode::Kc1);
    pub const COLON: Self = Self::shifted(HidKeyCode::Semicolon);
    pub const UNDERSCORE: Self = Self::shifted(HidKeyCode::Minus);

    pub const fn new(code: HidKeyCode) -> Self {
        Self {
            code,
            modifiers: ModifierCombination::new(),
        }
    }

    pub const fn with_modifiers(code: HidKeyCode, modifiers: ModifierCombination) -> Self {
        Self { code, modifiers }
    }

    pub const fn shifted(code: HidKeyCode) -> Self {
        Self::with_modifiers(code, ModifierCombination::SHIFT)
    }
}

impl From<HidKeyCode> for KeyStroke {
    fn from(code: HidKeyCode) -> Self {
        Self::new(code)
    }
}
