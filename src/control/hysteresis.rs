//! Hysteresis (bang-bang) relay control.
//!
//! ```text
//!   relay ON  ◀── T < low
//!   unchanged ◀── low <= T <= high
//!   relay OFF ◀── T > high
//! ```
//!
//! Sampling is rate limited by timestamp comparison, never by sleeping: a
//! tick before the poll interval has elapsed does nothing at all.  A
//! missing reading leaves the relay exactly as it was.

use log::{debug, warn};

use crate::app::ports::{RelayPort, TemperatureSensor};
use crate::fsm::context::ThermostatState;
use crate::thresholds::ThresholdPair;

/// What the band says about one reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayDecision {
    On,
    Off,
    Hold,
}

pub fn decide(celsius: i16, band: ThresholdPair) -> RelayDecision {
    if celsius < band.low {
        RelayDecision::On
    } else if celsius > band.high {
        RelayDecision::Off
    } else {
        RelayDecision::Hold
    }
}

/// `true` if a poll is due at `now_ms`.  The very first poll always is.
pub fn is_due(last_poll_ms: Option<u64>, now_ms: u64, interval_ms: u32) -> bool {
    last_poll_ms.is_none_or(|last| now_ms.saturating_sub(last) >= u64::from(interval_ms))
}

/// Result of one completed poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlOutcome {
    /// `None` on a sensor fault.
    pub reading: Option<i16>,
    /// New relay state if it changed.
    pub switched: Option<bool>,
}

/// Poll the sensor and drive the relay if the interval has elapsed.
/// Returns `None` when no poll was due.
pub fn tick(
    state: &mut ThermostatState,
    hw: &mut (impl TemperatureSensor + RelayPort),
) -> Option<ControlOutcome> {
    if !is_due(state.last_poll_ms, state.now_ms, state.config.temp_poll_interval_ms) {
        return None;
    }
    state.last_poll_ms = Some(state.now_ms);

    let Some(celsius) = hw.read_celsius() else {
        warn!("Control: no reading, relay held {}", if state.relay_on { "on" } else { "off" });
        return Some(ControlOutcome {
            reading: None,
            switched: None,
        });
    };
    state.last_reading = Some(celsius);

    let band = state.thresholds.pair();
    let on = match decide(celsius, band) {
        RelayDecision::On => true,
        RelayDecision::Off => false,
        RelayDecision::Hold => {
            debug!("Control: {}C inside {}..{}, holding", celsius, band.low, band.high);
            return Some(ControlOutcome {
                reading: Some(celsius),
                switched: None,
            });
        }
    };

    hw.set_relay(on);
    let switched = (state.relay_on != on).then_some(on);
    state.relay_on = on;

    Some(ControlOutcome {
        reading: Some(celsius),
        switched,
    })
}
