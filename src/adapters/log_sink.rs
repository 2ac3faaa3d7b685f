//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing one line per application event to
//! the `log` facade (UART / USB-CDC through `esp_idf_logger` on the
//! board).  This is the thermostat's diagnostic text output.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { mode, thresholds } => {
                info!(
                    "START | mode={} | low={}C high={}C",
                    mode.name(),
                    thresholds.low,
                    thresholds.high
                );
            }
            AppEvent::ModeChanged { from, to } => {
                info!("MODE | {} -> {}", from.name(), to.name());
            }
            AppEvent::EditTimedOut(mode) => {
                info!("MODE | {} timed out", mode.name());
            }
            AppEvent::ThresholdAdjusted { which, value } => {
                info!("SET | {}={}C", which.name(), value);
            }
            AppEvent::TemperatureSampled(c) => {
                info!("TEMP | {}C", c);
            }
            AppEvent::SensorFault => {
                warn!("TEMP | no reading");
            }
            AppEvent::RelaySwitched(on) => {
                info!("RELAY | {}", if *on { "on" } else { "off" });
            }
        }
    }
}
