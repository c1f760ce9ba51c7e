use kyria_nyx_types::modifier::HidModifiers;
use log::debug;

use crate::host::KeyboardHost;
use crate::layer::Layer;

/// What a tap-dance key does while it is held
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HoldAction {
    /// Turn a layer on while held
    EngageLayer(Layer),
    /// Assert modifiers while held
    AssertModifier(HidModifiers),
}

impl HoldAction {
    pub fn engage<H: KeyboardHost>(&self, host: &mut H) {
        debug!("Engage hold action: {:?}", self);
        match *self {
            HoldAction::EngageLayer(layer) => host.layer_on(layer),
            HoldAction::AssertModifier(mods) => host.register_mods(mods),
        }
    }

    pub fn disengage<H: KeyboardHost>(&self, host: &mut H) {
        debug!("Disengage hold action: {:?}", self);
        match *self {
            HoldAction::EngageLayer(layer) => host.layer_off(layer),
            HoldAction::AssertModifier(mods) => host.unregister_mods(mods),
        }
    }
}
