use serde::{Deserialize, Serialize};
use strum::FromRepr;

/// Layers of the board, in keymap order.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, FromRepr, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Layer {
    Colemak = 0,
    Qwerty,
    DefaultDvorak,
    DefaultNav,
    DefaultSym,
    DefaultFunction,
    Adjust,
    Game,
    Arrows,
    Num,
    Fun,
    Sym,
    Nav,
    Wasd,
    NumLh,
}

impl Layer {
    /// The layer the keyboard boots into
    pub const DEFAULT: Layer = Layer::Colemak;

    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Label shown on the OLED
    pub fn name(self) -> &'static str {
        match self {
            Layer::Colemak => "Colemak",
            Layer::Qwerty => "Qwerty",
            Layer::DefaultDvorak => "Dvorak",
            Layer::DefaultNav => "Nav",
            Layer::DefaultSym => "Sym",
            Layer::DefaultFunction => "Function",
            Layer::Adjust => "Adjust",
            Layer::Game => "Game",
            Layer::Arrows => "Arrows",
            Layer::Num => "Numpad",
            Layer::Fun => "Functions",
            Layer::Sym => "Symbols",
            Layer::Nav => "Navigation",
            Layer::Wasd => "Wasd",
            Layer::NumLh => "LH Numpad",
        }
    }
}

/// Active layers as a 16-bit mask, bit `n` is layer `n`.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LayerState(u16);

impl LayerState {
    pub const fn new() -> Self {
        Self(0)
    }

    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u16 {
        self.0
    }

    pub fn on(&mut self, layer: Layer) {
        self.0 |= 1 << layer.index();
    }

    pub fn off(&mut self, layer: Layer) {
        self.0 &= !(1 << layer.index());
    }

    /// Turn on `layer` and turn off every other layer
    pub fn move_to(&mut self, layer: Layer) {
        self.0 = 1 << layer.index();
    }

    pub fn is_on(self, layer: Layer) -> bool {
        self.0 & (1 << layer.index()) != 0
    }

    /// Highest active layer.
    ///
    /// Bits without a matching [`Layer`] are ignored.
    pub fn highest(self) -> Option<Layer> {
        (0..16u8).rev().filter(|&i| self.0 & (1 << i) != 0).find_map(Layer::from_repr)
    }

    pub fn union(self, other: LayerState) -> LayerState {
        LayerState(self.0 | other.0)
    }
}
