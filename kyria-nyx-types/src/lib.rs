//! # kyria-nyx types
//!
//! Value types shared by the keymap crate.
//!
//! - [`keycode`] - HID keyboard usage codes
//! - [`modifier`] - Per-keystroke modifier combinations and the HID modifier byte
//! - [`key_stroke`] - A keycode together with the modifiers it carries
//! - [`led_indicator`] - Host LED indicator state

#![no_std]

pub mod key_stroke;
pub mod keycode;
pub mod led_indicator;
pub mod modifier;
