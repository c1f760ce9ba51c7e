use heapless::{Deque, Vec};
use kyria_nyx_types::key_stroke::KeyStroke;
use kyria_nyx_types::led_indicator::LedIndicator;
use kyria_nyx_types::modifier::HidModifiers;
use log::{debug, warn};

use crate::host::KeyboardHost;
use crate::layer::{Layer, LayerState};
use crate::oled::StatusSnapshot;
use crate::raw_hid::RAW_EPSIZE;

/// Max number of host events kept before the oldest ones are dropped
pub const HOST_EVENT_QUEUE_SIZE: usize = 32;

/// What the keymap handed to the host, in order
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HostEvent {
    /// Key pressed, with the full modifier byte it is reported with
    KeyDown(KeyStroke, HidModifiers),
    KeyUp(KeyStroke),
    RawHid(Vec<u8, RAW_EPSIZE>),
}

/// In-memory [`KeyboardHost`].
///
/// Tracks layers, modifiers and LEDs the way the firmware does, and queues every outbound
/// event so that a transport (or a test) can drain them.
#[derive(Debug)]
pub struct KeyboardState {
    layer_state: LayerState,
    default_layer_state: LayerState,
    oneshot_layer: Option<Layer>,
    modifiers: HidModifiers,
    weak_modifiers: HidModifiers,
    leds: LedIndicator,
    events: Deque<HostEvent, HOST_EVENT_QUEUE_SIZE>,
}

impl Default for KeyboardState {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyboardState {
    pub fn new() -> Self {
        let mut default_layer_state = LayerState::new();
        default_layer_state.on(Layer::DEFAULT);
        Self {
            layer_state: LayerState::new(),
            default_layer_state,
            oneshot_layer: None,
            modifiers: HidModifiers::new(),
            weak_modifiers: HidModifiers::new(),
            leds: LedIndicator::new(),
            events: Deque::new(),
        }
    }

    pub fn layer_state(&self) -> LayerState {
        self.layer_state
    }

    /// Highest layer among active and default layers
    pub fn highest_layer(&self) -> Option<Layer> {
        self.layer_state.union(self.default_layer_state).highest()
    }

    pub fn set_leds(&mut self, leds: LedIndicator) {
        self.leds = leds;
    }

    pub fn snapshot(&self) -> StatusSnapshot {
        StatusSnapshot {
            layer: self.highest_layer(),
            modifiers: self.modifiers,
            leds: self.leds,
        }
    }

    pub fn pop_event(&mut self) -> Option<HostEvent> {
        self.events.pop_front()
    }

    /// Drain every queued event
    pub fn drain_events(&mut self) -> Vec<HostEvent, HOST_EVENT_QUEUE_SIZE> {
        let mut drained = Vec::new();
        while let Some(event) = self.events.pop_front() {
            // Both containers share the same capacity
            let _ = drained.push(event);
        }
        drained
    }

    fn push_event(&mut self, event: HostEvent) {
        if self.events.is_full() {
            warn!("Host event queue full, dropping the oldest event");
            self.events.pop_front();
        }
        let _ = self.events.push_back(event);
    }
}

impl KeyboardHost for KeyboardState {
    fn register_key(&mut self, key: KeyStroke) {
        let mods = self.modifiers | self.weak_modifiers | key.modifiers.to_hid_modifiers();
        self.weak_modifiers = HidModifiers::new();
        self.push_event(HostEvent::KeyDown(key, mods));
    }

    fn unregister_key(&mut self, key: KeyStroke) {
        self.push_event(HostEvent::KeyUp(key));
    }

    fn register_mods(&mut self, mods: HidModifiers) {
        self.modifiers |= mods;
    }

    fn unregister_mods(&mut self, mods: HidModifiers) {
        self.modifiers &= !mods;
    }

    fn add_weak_mods(&mut self, mods: HidModifiers) {
        self.weak_modifiers |= mods;
    }

    fn mods(&self) -> HidModifiers {
        self.modifiers
    }

    fn layer_on(&mut self, layer: Layer) {
        debug!("Layer on: {:?}", layer);
        self.layer_state.on(layer);
    }

    fn layer_off(&mut self, layer: Layer) {
        debug!("Layer off: {:?}", layer);
        self.layer_state.off(layer);
    }

    fn layer_move(&mut self, layer: Layer) {
        debug!("Layer move: {:?}", layer);
        self.layer_state.move_to(layer);
        self.oneshot_layer = None;
    }

    fn set_oneshot_layer(&mut self, layer: Layer) {
        self.clear_oneshot_layer();
        self.layer_state.on(layer);
        self.oneshot_layer = Some(layer);
    }

    fn clear_oneshot_layer(&mut self) {
        if let Some(layer) = self.oneshot_layer.take() {
            self.layer_state.off(layer);
        }
    }

    fn is_oneshot_layer_active(&self) -> bool {
        self.oneshot_layer.is_some()
    }

    fn send_raw_hid(&mut self, data: &[u8]) {
        match Vec::from_slice(data) {
            Ok(data) => self.push_event(HostEvent::RawHid(data)),
            Err(_) => warn!("Raw HID report of {} bytes exceeds {} bytes, dropped", data.len(), RAW_EPSIZE),
        }
    }
}
