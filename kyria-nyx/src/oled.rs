//! Status text for the OLED.
//!
//! The primary half shows the top layer, held modifiers and host LEDs. The secondary half shows
//! the board logo, which the display driver owns.
use core::fmt::Write;

use heapless::String;
use kyria_nyx_types::led_indicator::LedIndicator;
use kyria_nyx_types::modifier::HidModifiers;

use crate::layer::Layer;

/// Capacity of the rendered status text
pub const OLED_TEXT_CAPACITY: usize = 96;

pub type StatusText = String<OLED_TEXT_CAPACITY>;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OledRotation {
    R0,
    R90,
    R180,
    R270,
}

/// What the status screen needs to know about the keyboard
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusSnapshot {
    /// Highest of the active and default layers
    pub layer: Option<Layer>,
    pub modifiers: HidModifiers,
    pub leds: LedIndicator,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OledContent {
    Status(StatusText),
    Logo,
}

pub fn oled_content(is_master: bool, snapshot: &StatusSnapshot) -> OledContent {
    if is_master {
        OledContent::Status(render_status(snapshot))
    } else {
        OledContent::Logo
    }
}

/// Render the status screen, one line per row:
///
/// ```text
/// Layer: Navigation
///
/// CTRL SHFT GUI ALT
/// NUM CAP SCR
/// ```
///
/// Flags that are off are padded with blanks so that the others keep their column.
pub fn render_status(snapshot: &StatusSnapshot) -> StatusText {
    let mut text = StatusText::new();
    let layer = snapshot.layer.map_or("Undefined", Layer::name);
    let mods = snapshot.modifiers;
    let leds = snapshot.leds;
    // Every piece fits in OLED_TEXT_CAPACITY
    let _ = write!(text, "Layer: {}\n\n", layer);
    let _ = write!(
        text,
        "{}{}{}{}\n",
        flag(mods.intersects(HidModifiers::CTRL), "CTRL "),
        flag(mods.intersects(HidModifiers::SHIFT), "SHFT "),
        flag(mods.intersects(HidModifiers::GUI), "GUI "),
        flag(mods.intersects(HidModifiers::ALT), "ALT "),
    );
    let _ = write!(
        text,
        "{}{}{}",
        flag(leds.num_lock(), "NUM "),
        flag(leds.caps_lock(), "CAP "),
        flag(leds.scroll_lock(), "SCR "),
    );
    text
}

fn flag(on: bool, label: &'static str) -> Blank {
    Blank { on, label }
}

/// `label`, or as many spaces when off
struct Blank {
    on: bool,
    label: &'static str,
}

impl core::fmt::Display for Blank {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.on {
            f.write_str(self.label)
        } else {
            for _ in 0..self.label.len() {
                f.write_char(' ')?;
            }
            Ok(())
        }
    }
}

#[cfg(feature = "display")]
pub use self::display::draw_status;

#[cfg(feature = "display")]
mod display {
    use embedded_graphics::mono_font::MonoTextStyle;
    use embedded_graphics::mono_font::ascii::FONT_6X10;
    use embedded_graphics::pixelcolor::BinaryColor;
    use embedded_graphics::prelude::*;
    use embedded_graphics::text::{Baseline, Text};

    use super::{StatusSnapshot, render_status};

    /// Draw the status text at the top-left corner of `target`
    pub fn draw_status<D>(target: &mut D, snapshot: &StatusSnapshot) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        target.clear(BinaryColor::Off)?;
        let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
        Text::with_baseline(&render_status(snapshot), Point::zero(), style, Baseline::Top).draw(target)?;
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use embedded_graphics::mock_display::MockDisplay;
        use kyria_nyx_types::led_indicator::LedIndicator;
        use kyria_nyx_types::modifier::HidModifiers;

        use super::*;
        use crate::layer::Layer;

        fn lit_rows(display: &MockDisplay<BinaryColor>) -> impl Iterator<Item = i32> + '_ {
            (0..64).filter(move |&y| (0..64).any(|x| display.get_pixel(Point::new(x, y)) == Some(BinaryColor::On)))
        }

        #[test]
        fn test_draw_status() {
            let mut display = MockDisplay::new();
            display.set_allow_overdraw(true);
            display.set_allow_out_of_bounds_drawing(true);
            let snapshot = StatusSnapshot {
                layer: Some(Layer::Game),
                modifiers: HidModifiers::new(),
                leds: LedIndicator::new(),
            };
            draw_status(&mut display, &snapshot).unwrap();

            // Only the layer line has text, the flag lines are blank
            assert!(lit_rows(&display).all(|y| y < 10));
            assert!(lit_rows(&display).next().is_some());
            assert_eq!(display.get_pixel(Point::new(63, 63)), Some(BinaryColor::Off));
        }

        #[test]
        fn test_draw_flags() {
            let mut display = MockDisplay::new();
            display.set_allow_overdraw(true);
            display.set_allow_out_of_bounds_drawing(true);
            let snapshot = StatusSnapshot {
                layer: Some(Layer::Game),
                modifiers: HidModifiers::new().with_left_ctrl(true),
                leds: LedIndicator::CAPS_LOCK,
            };
            draw_status(&mut display, &snapshot).unwrap();

            // Lines 3 and 4 start at 20 and 30 pixels
            assert!(lit_rows(&display).any(|y| (20..30).contains(&y)));
            assert!(lit_rows(&display).any(|y| (30..40).contains(&y)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_idle_status() {
        let snapshot = StatusSnapshot {
            layer: Some(Layer::Colemak),
            modifiers: HidModifiers::new(),
            leds: LedIndicator::new(),
        };
        assert_eq!(
            render_status(&snapshot).as_str(),
            "Layer: Colemak\n\n                  \n            "
        );
    }

    #[test]
    fn test_render_flags_keep_columns() {
        let snapshot = StatusSnapshot {
            layer: Some(Layer::NumLh),
            modifiers: HidModifiers::new().with_right_shift(true).with_left_alt(true),
            leds: LedIndicator::CAPS_LOCK,
        };
        assert_eq!(
            render_status(&snapshot).as_str(),
            "Layer: LH Numpad\n\n     SHFT     ALT \n    CAP     "
        );
    }

    #[test]
    fn test_render_undefined_layer() {
        let snapshot = StatusSnapshot {
            layer: None,
            modifiers: HidModifiers::new(),
            leds: LedIndicator::new(),
        };
        assert!(render_status(&snapshot).starts_with("Layer: Undefined\n"));
    }

    #[test]
    fn test_secondary_shows_logo() {
        let snapshot = StatusSnapshot {
            layer: Some(Layer::Game),
            modifiers: HidModifiers::new(),
            leds: LedIndicator::new(),
        };
        assert_eq!(oled_content(false, &snapshot), OledContent::Logo);
        assert!(matches!(oled_content(true, &snapshot), OledContent::Status(_)));
    }
}
