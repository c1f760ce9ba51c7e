//! Modifier state.
//!
//! [`ModifierCombination`] is what a single keystroke carries (QMK's `S(KC_SLASH)`),
//! [`HidModifiers`] is the modifier byte of a keyboard report.
use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};

use bitfield_struct::bitfield;
use serde::{Deserialize, Serialize};

use crate::keycode::HidKeyCode;

/// To represent all combinations of modifiers, at least 5 bits are needed.
/// 1 bit for Left/Right, 4 bits for modifier type. Represented in LSB format.
///
/// | bit4 | bit3 | bit2 | bit1 | bit0 |
/// | --- | --- | --- | --- | --- |
/// | L/R | GUI | ALT |SHIFT| CTRL|
#[bitfield(u8, order = Lsb, defmt = cfg(feature = "defmt"))]
#[derive(Serialize, Deserialize, Eq, PartialEq)]
pub struct ModifierCombination {
    #[bits(1)]
    pub ctrl: bool,
    #[bits(1)]
    pub shift: bool,
    #[bits(1)]
    pub alt: bool,
    #[bits(1)]
    pub gui: bool,
    #[bits(1)]
    pub right: bool,
    #[bits(3)]
    _reserved: u8,
}

impl BitOr for ModifierCombination {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self::from_bits(self.into_bits() | rhs.into_bits())
    }
}

impl ModifierCombination {
    pub const CTRL: Self = Self::new().with_ctrl(true);
    pub const SHIFT: Self = Self::new().with_shift(true);
    pub const ALT: Self = Self::new().with_alt(true);
    pub const GUI: Self = Self::new().with_gui(true);
    pub const RIGHT: Self = Self::new().with_right(true);

    pub const fn is_empty(self) -> bool {
        self.into_bits() == 0
    }

    /// Get modifier hid report bits from modifier combination
    pub const fn to_hid_modifiers(self) -> HidModifiers {
        if !self.right() {
            HidModifiers::new()
                .with_left_ctrl(self.ctrl())
                .with_left_shift(self.shift())
                .with_left_alt(self.alt())
                .with_left_gui(self.gui())
        } else {
            HidModifiers::new()
                .with_right_ctrl(self.ctrl())
                .with_right_shift(self.shift())
                .with_right_alt(self.alt())
                .with_right_gui(self.gui())
        }
    }
}

/// The modifier byte of a HID keyboard report
#[bitfield(u8, order = Lsb, defmt = cfg(feature = "defmt"))]
#[derive(Serialize, Deserialize, Eq, PartialEq)]
pub struct HidModifiers {
    #[bits(1)]
    pub left_ctrl: bool,
    #[bits(1)]
    pub left_shift: bool,
    #[bits(1)]
    pub left_alt: bool,
    #[bits(1)]
    pub left_gui: bool,
    #[bits(1)]
    pub right_ctrl: bool,
    #[bits(1)]
    pub right_shift: bool,
    #[bits(1)]
    pub right_alt: bool,
    #[bits(1)]
    pub right_gui: bool,
}

impl BitOr for HidModifiers {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self::from_bits(self.into_bits() | rhs.into_bits())
    }
}
impl BitAnd for HidModifiers {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self::from_bits(self.into_bits() & rhs.into_bits())
    }
}
impl Not for HidModifiers {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self::from_bits(!self.into_bits())
    }
}
impl BitAndAssign for HidModifiers {
    fn bitand_assign(&mut self, rhs: Self) {
        *self = *self & rhs;
    }
}
impl BitOrAssign for HidModifiers {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = *self | rhs;
    }
}

impl HidModifiers {
    /// Either shift, QMK's `MOD_MASK_SHIFT`
    pub const SHIFT: Self = Self::new().with_left_shift(true).with_right_shift(true);
    pub const CTRL: Self = Self::new().with_left_ctrl(true).with_right_ctrl(true);
    pub const ALT: Self = Self::new().with_left_alt(true).with_right_alt(true);
    pub const GUI: Self = Self::new().with_left_gui(true).with_right_gui(true);

    /// The bit of a single modifier key, QMK's `MOD_BIT()`.
    ///
    /// Non-modifier keycodes give an empty set.
    pub const fn from_keycode(code: HidKeyCode) -> Self {
        let code = code as u8;
        if code >= HidKeyCode::LCtrl as u8 && code <= HidKeyCode::RGui as u8 {
            Self::from_bits(1 << (code - HidKeyCode::LCtrl as u8))
        } else {
            Self::new()
        }
    }

    pub const fn is_empty(self) -> bool {
        self.into_bits() == 0
    }

    /// Whether any bit of `mask` is set
    pub const fn intersects(self, mask: Self) -> bool {
        self.into_bits() & mask.into_bits() != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mod_bit() {
        assert_eq!(HidModifiers::from_keycode(HidKeyCode::LCtrl).into_bits(), 0x01);
        assert_eq!(HidModifiers::from_keycode(HidKeyCode::RShift).into_bits(), 0x20);
        assert!(HidModifiers::from_keycode(HidKeyCode::A).is_empty());
    }

    #[test]
    fn test_shift_mask() {
        let rshift = HidModifiers::from_keycode(HidKeyCode::RShift);
        assert!(rshift.intersects(HidModifiers::SHIFT));
        assert!(!rshift.intersects(HidModifiers::CTRL));
    }

    #[test]
    fn test_combination_to_hid() {
        let left_shift = ModifierCombination::SHIFT.to_hid_modifiers();
        assert!(left_shift.left_shift());
        assert!(!left_shift.right_shift());

        let right_ctrl = (ModifierCombination::RIGHT | ModifierCombination::CTRL).to_hid_modifiers();
        assert_eq!(right_ctrl, HidModifiers::new().with_right_ctrl(true));
    }
}
