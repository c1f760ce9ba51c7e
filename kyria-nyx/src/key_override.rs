use heapless::Vec;
use kyria_nyx_types::key_stroke::KeyStroke;
use kyria_nyx_types::modifier::HidModifiers;

// Max number of key overrides
pub const KEY_OVERRIDE_MAX_NUM: usize = 8;

pub type KeyOverrides = Vec<KeyOverride, KEY_OVERRIDE_MAX_NUM>;

/// Replace a key when certain modifiers are held.
///
/// While any of `trigger_mods` is held, pressing `trigger` sends `replacement` instead, with
/// `suppressed_mods` lifted for as long as the replacement is down.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyOverride {
    pub trigger: KeyStroke,
    pub trigger_mods: HidModifiers,
    pub suppressed_mods: HidModifiers,
    pub replacement: KeyStroke,
}

/// A replacement decided at key press, undone at release
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ActiveOverride {
    pub replacement: KeyStroke,
    /// Modifiers that were held and are lifted until release
    pub suppressed: HidModifiers,
}

impl KeyOverride {
    /// Modifiers in `trigger_mods` trigger the override and are suppressed while it is active
    pub const fn basic(trigger_mods: HidModifiers, trigger: KeyStroke, replacement: KeyStroke) -> Self {
        Self {
            trigger,
            trigger_mods,
            suppressed_mods: trigger_mods,
            replacement,
        }
    }

    pub fn apply(&self, key: KeyStroke, active_mods: HidModifiers) -> Option<ActiveOverride> {
        if key != self.trigger || !active_mods.intersects(self.trigger_mods) {
            return None;
        }
        Some(ActiveOverride {
            replacement: self.replacement,
            suppressed: active_mods & self.suppressed_mods,
        })
    }
}

/// First override in `overrides` that matches
pub fn find_override(overrides: &[KeyOverride], key: KeyStroke, active_mods: HidModifiers) -> Option<ActiveOverride> {
    overrides.iter().find_map(|o| o.apply(key, active_mods))
}
