//! Shared mutable state threaded through every FSM handler.
//!
//! `ThermostatState` is the single struct that state handlers, the control
//! loop and the presenter read from and write to.  It holds the per-tick
//! input edges, timing bookkeeping, the threshold store, the last sensor
//! reading and the relay state.  Think of it as the "blackboard" in a
//! blackboard architecture; nothing else in the firmware keeps domain state.

use crate::config::ThermostatConfig;
use crate::drivers::edges::InputEdges;
use crate::thresholds::{Threshold, ThresholdStore};

/// The shared context passed to every state handler function.
pub struct ThermostatState {
    // -- Timing --
    /// Monotonic time of the current tick (milliseconds since boot).
    pub now_ms: u64,
    /// When the current mode was entered.
    pub mode_entered_ms: u64,
    /// Last time the user touched an edit control.  `None` while in Run.
    pub last_interaction_ms: Option<u64>,
    /// When the temperature was last polled.  `None` until the first poll.
    pub last_poll_ms: Option<u64>,

    // -- Inputs (written before each FSM tick) --
    pub inputs: InputEdges,

    // -- Requests from handlers (drained by the service after each tick) --
    /// Threshold step requested by a rotary edge.
    pub pending_adjust: Option<(Threshold, i16)>,
    /// Set when an edit mode gave up waiting for input.
    pub timed_out: bool,

    // -- Domain data --
    pub thresholds: ThresholdStore,
    /// Last valid reading (whole °C).  Survives sensor faults.
    pub last_reading: Option<i16>,
    /// Commanded relay state.
    pub relay_on: bool,

    // -- Configuration --
    pub config: ThermostatConfig,
}

impl ThermostatState {
    pub fn new(config: ThermostatConfig, thresholds: ThresholdStore) -> Self {
        Self {
            now_ms: 0,
            mode_entered_ms: 0,
            last_interaction_ms: None,
            last_poll_ms: None,
            inputs: InputEdges::default(),
            pending_adjust: None,
            timed_out: false,
            thresholds,
            last_reading: None,
            relay_on: false,
            config,
        }
    }

    /// Milliseconds since the current mode was entered.
    pub fn ms_in_mode(&self) -> u64 {
        self.now_ms.saturating_sub(self.mode_entered_ms)
    }

    /// Milliseconds since the last edit interaction, if one is being tracked.
    pub fn ms_since_interaction(&self) -> Option<u64> {
        self.last_interaction_ms
            .map(|t| self.now_ms.saturating_sub(t))
    }
}
