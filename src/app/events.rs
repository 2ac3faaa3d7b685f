//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them (serial log, test recorder).

use crate::fsm::StateId;
use crate::thresholds::{Threshold, ThresholdPair};

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The service has started (carries the initial mode and band).
    Started {
        mode: StateId,
        thresholds: ThresholdPair,
    },

    /// The UI mode changed, by button or timeout.
    ModeChanged { from: StateId, to: StateId },

    /// An edit mode was left because nobody touched the controls.
    /// Always followed by the matching `ModeChanged`.
    EditTimedOut(StateId),

    /// A threshold was stepped and persisted.
    ThresholdAdjusted { which: Threshold, value: i16 },

    /// A poll produced a valid reading (whole °C).
    TemperatureSampled(i16),

    /// A poll found no usable reading; the relay was left alone.
    SensorFault,

    /// The relay changed state.
    RelaySwitched(bool),
}
