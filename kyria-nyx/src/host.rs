//! Boundary to the host firmware.
//!
//! Everything the keymap asks of the firmware goes through [`KeyboardHost`]: sending keys,
//! toggling layers, asserting modifiers and answering on the raw HID channel. Matrix scanning,
//! USB transport and the event loop stay on the other side of this trait.
use kyria_nyx_types::key_stroke::KeyStroke;
use kyria_nyx_types::modifier::HidModifiers;

use crate::layer::Layer;

pub trait KeyboardHost {
    /// Press `key` and keep it pressed until [`unregister_key`](Self::unregister_key)
    fn register_key(&mut self, key: KeyStroke);

    fn unregister_key(&mut self, key: KeyStroke);

    /// Press and release `key`
    fn tap_key(&mut self, key: KeyStroke) {
        self.register_key(key);
        self.unregister_key(key);
    }

    fn register_mods(&mut self, mods: HidModifiers);

    fn unregister_mods(&mut self, mods: HidModifiers);

    /// Modifiers applied to the next registered key only
    fn add_weak_mods(&mut self, mods: HidModifiers);

    /// Currently asserted modifiers
    fn mods(&self) -> HidModifiers;

    fn layer_on(&mut self, layer: Layer);

    fn layer_off(&mut self, layer: Layer);

    /// Turn on `layer` and turn off all others
    fn layer_move(&mut self, layer: Layer);

    /// Turn on `layer` until the next key is released
    fn set_oneshot_layer(&mut self, layer: Layer);

    fn clear_oneshot_layer(&mut self);

    fn is_oneshot_layer_active(&self) -> bool;

    fn send_raw_hid(&mut self, data: &[u8]);
}
