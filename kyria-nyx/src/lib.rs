//! Keymap behaviors of the Kyria split keyboard.
//!
//! The crate holds the decision logic only: it turns key events, encoder turns and raw HID
//! buffers into calls on a [`host::KeyboardHost`], which owns the USB reports, the layer
//! state and the display. [`keyboard::Keyboard`] is the entry point.
#![cfg_attr(not(test), no_std)]

pub mod caps_word;
pub mod config;
pub mod encoder;
pub mod host;
pub mod key_override;
pub mod keyboard;
pub mod keymap;
pub mod layer;
pub mod oled;
pub mod raw_hid;
pub mod state;
pub mod tap_dance;

pub use keyboard::Keyboard;
pub use state::{HostEvent, KeyboardState};
