//! System configuration parameters
//!
//! All tunable parameters for the thermostat.
//! Values can be overridden by a config blob stored in NVS; otherwise the
//! compiled-in defaults below apply.

use serde::{Deserialize, Serialize};

use crate::app::ports::ConfigError;
use crate::drivers::watchdog::WATCHDOG_TIMEOUT_MS;
use crate::thresholds::{SENTINEL, ThresholdLimits, ThresholdPair};

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThermostatConfig {
    // --- Threshold band ---
    /// Lowest temperature (°C) either threshold may be set to
    pub min_threshold_c: i16,
    /// Highest temperature (°C) either threshold may be set to
    pub max_threshold_c: i16,
    /// Low threshold written when the stored value is missing or corrupt
    pub default_low_c: i16,
    /// High threshold written when the stored value is missing or corrupt
    pub default_high_c: i16,
    /// Minimum gap between low and high (`low <= high - min_band_c`)
    pub min_band_c: i16,

    // --- User interface ---
    /// Idle time in an edit mode before falling back to Run (milliseconds)
    pub interaction_timeout_ms: u32,
    /// Minimum stable time for the push button (milliseconds)
    pub button_debounce_ms: u32,
    /// Minimum stable time for the rotary pulse line (milliseconds)
    pub rotary_debounce_ms: u32,
    /// How long the mode badge is shown after entering an edit mode (milliseconds)
    pub mode_badge_ms: u32,
    /// Time each mode is shown during the boot announce (milliseconds)
    pub announce_step_ms: u32,

    // --- Timing ---
    /// Minimum time between temperature polls (milliseconds)
    pub temp_poll_interval_ms: u32,
    /// Main loop yield per iteration (milliseconds)
    pub poll_period_ms: u32,
}

impl Default for ThermostatConfig {
    fn default() -> Self {
        Self {
            // Threshold band
            min_threshold_c: 19,
            max_threshold_c: 30,
            default_low_c: 24,
            default_high_c: 25,
            min_band_c: 1,

            // User interface
            interaction_timeout_ms: 4000,
            button_debounce_ms: 5,
            rotary_debounce_ms: 1,
            mode_badge_ms: 500,
            announce_step_ms: 800,

            // Timing
            temp_poll_interval_ms: 4000,
            poll_period_ms: 1,
        }
    }
}

impl ThermostatConfig {
    /// Threshold limits handed to the [`ThresholdStore`](crate::thresholds::ThresholdStore).
    pub fn limits(&self) -> ThresholdLimits {
        ThresholdLimits {
            min_c: self.min_threshold_c,
            max_c: self.max_threshold_c,
            min_band_c: self.min_band_c,
            defaults: ThresholdPair {
                low: self.default_low_c,
                high: self.default_high_c,
            },
        }
    }

    /// Total blocking time of the boot announce: two mode badges and three
    /// value steps.
    pub fn announce_duration_ms(&self) -> u64 {
        2 * u64::from(self.mode_badge_ms) + 3 * u64::from(self.announce_step_ms)
    }

    /// Range-check every field.  Called before a config is persisted and
    /// after one is loaded.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_threshold_c < 0 || self.max_threshold_c >= i16::from(SENTINEL) {
            return Err(ConfigError::ValidationFailed(
                "threshold range must fit in one byte below the 0xFF sentinel",
            ));
        }
        if self.min_band_c < 0 {
            return Err(ConfigError::ValidationFailed("min_band_c must be >= 0"));
        }
        if self.min_threshold_c.saturating_add(self.min_band_c) > self.max_threshold_c {
            return Err(ConfigError::ValidationFailed(
                "min_threshold_c + min_band_c must be <= max_threshold_c",
            ));
        }
        if !self.limits().is_valid(self.limits().defaults) {
            return Err(ConfigError::ValidationFailed(
                "default thresholds must lie inside the range and respect min_band_c",
            ));
        }
        if self.interaction_timeout_ms == 0 {
            return Err(ConfigError::ValidationFailed(
                "interaction_timeout_ms must be > 0",
            ));
        }
        if self.temp_poll_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed(
                "temp_poll_interval_ms must be > 0",
            ));
        }
        if self.mode_badge_ms >= self.interaction_timeout_ms {
            return Err(ConfigError::ValidationFailed(
                "mode_badge_ms must be shorter than interaction_timeout_ms",
            ));
        }
        if self.announce_duration_ms() >= u64::from(WATCHDOG_TIMEOUT_MS) {
            return Err(ConfigError::ValidationFailed(
                "boot announce must finish within the watchdog timeout",
            ));
        }
        if !(1..=50).contains(&self.poll_period_ms) {
            return Err(ConfigError::ValidationFailed("poll_period_ms must be 1–50"));
        }
        Ok(())
    }
}
