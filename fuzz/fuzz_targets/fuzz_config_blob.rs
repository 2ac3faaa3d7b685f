//! Fuzz target: config blob decode + `ThermostatConfig::validate`
//!
//! Any blob that decodes and validates must produce defaults the
//! threshold store accepts without repair.
//!
//! cargo fuzz run fuzz_config_blob

#![no_main]

use libfuzzer_sys::fuzz_target;
use thermostat::config::ThermostatConfig;

fuzz_target!(|data: &[u8]| {
    let Ok(cfg) = postcard::from_bytes::<ThermostatConfig>(data) else {
        return;
    };
    if cfg.validate().is_err() {
        return;
    }

    let limits = cfg.limits();
    assert!(limits.is_valid(limits.defaults));
    assert!(cfg.mode_badge_ms < cfg.interaction_timeout_ms);
});
