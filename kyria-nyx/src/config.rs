use embassy_time::Duration;

use crate::oled::OledRotation;

/// The config struct for the keymap.
///
/// There are 2 types of configs:
/// 1. `BehaviorConfig`: Timing and decision policy of tap dances, one-shot layers and caps word.
/// 2. `OledConfig`: Orientation of the status display.
#[derive(Clone, Debug, Default)]
pub struct NyxConfig {
    pub behavior: BehaviorConfig,
    pub oled: OledConfig,
}

/// Config for configurable action behavior
#[derive(Clone, Debug)]
pub struct BehaviorConfig {
    /// A press shorter than this is a tap, longer is a hold
    pub tapping_term: Duration,
    /// Tap-hold keys resolve to hold even if another key interrupted them
    pub permissive_hold: bool,
    /// A one-shot layer that nothing consumed turns off after this
    pub oneshot_timeout: Duration,
    /// Caps word turns off after this long without a key press
    pub caps_word_idle_timeout: Duration,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            tapping_term: Duration::from_millis(180),
            permissive_hold: false,
            oneshot_timeout: Duration::from_millis(5000),
            caps_word_idle_timeout: Duration::from_millis(5000),
        }
    }
}

#[derive(Clone, Debug)]
pub struct OledConfig {
    /// Handed to the display driver at init, the crate itself draws unrotated
    pub rotation: OledRotation,
}

impl Default for OledConfig {
    fn default() -> Self {
        Self {
            rotation: OledRotation::R180,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = NyxConfig::default();
        assert_eq!(config.behavior.tapping_term, Duration::from_millis(180));
        assert!(!config.behavior.permissive_hold);
        assert_eq!(config.behavior.oneshot_timeout, Duration::from_secs(5));
        assert_eq!(config.behavior.caps_word_idle_timeout, Duration::from_secs(5));
        assert_eq!(config.oled.rotation, OledRotation::R180);
    }
}
