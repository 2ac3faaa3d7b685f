//! Sensor subsystem.
//!
//! Only one sensor on this board: a DS18B20 probe ([`temperature`]).
//! Every raw reading goes through [`plausible_celsius`] before the domain
//! sees it.

pub mod temperature;

use crate::error::SensorError;

/// DS18B20 datasheet measuring range.
pub const MIN_PLAUSIBLE_C: f32 = -55.0;
pub const MAX_PLAUSIBLE_C: f32 = 125.0;

/// Reject readings the probe cannot produce (the -127 °C "disconnected"
/// value, NaN) and truncate the rest toward zero.
pub fn plausible_celsius(raw: f32) -> Result<i16, SensorError> {
    if !(MIN_PLAUSIBLE_C..=MAX_PLAUSIBLE_C).contains(&raw) {
        return Err(SensorError::OutOfRange);
    }
    Ok(raw as i16)
}
