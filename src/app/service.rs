//! Application service: the hexagonal core.
//!
//! [`AppService`] owns the UI mode FSM, the edge source, the presenter and
//! the shared [`ThermostatState`].  All I/O flows through port traits
//! injected at call sites, making the entire service testable with mock
//! adapters.
//!
//! ```text
//!      InputPort ──▶ ┌──────────────────────────────┐ ──▶ EventSink
//! TemperatureSensor ─▶│          AppService          │
//!      RelayPort ◀── │ Edges · FSM · Hysteresis ·   │ ◀─▶ PersistencePort
//!    DisplayPort ◀── │ Presenter                    │
//!                    └──────────────────────────────┘
//! ```

use embedded_hal::delay::DelayNs;
use log::info;

use crate::config::ThermostatConfig;
use crate::control::hysteresis;
use crate::display::{self, Frame, Presenter};
use crate::drivers::edges::EdgeSource;
use crate::fsm::context::ThermostatState;
use crate::fsm::states::build_state_table;
use crate::fsm::{Fsm, StateId};
use crate::thresholds::{ThresholdPair, ThresholdStore};

use super::events::AppEvent;
use super::ports::{
    DisplayPort, EventSink, InputPort, PersistencePort, RelayPort, TemperatureSensor,
};

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct AppService {
    fsm: Fsm,
    state: ThermostatState,
    edges: EdgeSource,
    presenter: Presenter,
    tick_count: u64,
}

impl AppService {
    /// Construct the service around an already-loaded threshold store.
    ///
    /// Does **not** start the FSM.  Call [`announce`](Self::announce)
    /// (optional) and then [`start`](Self::start).
    pub fn new(config: ThermostatConfig, thresholds: ThresholdStore) -> Self {
        let edges = EdgeSource::new(&config);
        let state = ThermostatState::new(config, thresholds);
        let fsm = Fsm::new(build_state_table(), StateId::Run);

        Self {
            fsm,
            state,
            edges,
            presenter: Presenter::new(),
            tick_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Boot announce: show each mode in turn with its value.  The only
    /// place the firmware blocks on purpose.
    pub fn announce(&mut self, display: &mut impl DisplayPort, delay: &mut impl DelayNs) {
        let plan = display::announce_plan(self.state.thresholds.pair(), &self.state.config);
        let mut last = Frame::Blank;
        for &(frame, hold_ms) in &plan {
            frame.show(display);
            delay.delay_ms(hold_ms);
            last = frame;
        }
        self.presenter.assume_shown(last);
    }

    /// Enter Run.  `now_ms` is the monotonic time of the first tick.
    /// Controls held at this moment are not reported as presses.
    pub fn start(&mut self, now_ms: u64, inputs: &mut impl InputPort, sink: &mut impl EventSink) {
        self.edges.seed(inputs);
        self.state.now_ms = now_ms;
        self.fsm.start(&mut self.state);
        sink.emit(&AppEvent::Started {
            mode: self.fsm.current_state(),
            thresholds: self.state.thresholds.pair(),
        });
        info!("AppService started in {:?}", self.fsm.current_state());
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one pass of the loop: edges → FSM → threshold update →
    /// control (Run only) → display.
    ///
    /// `hw` satisfies every hardware port at once, which avoids handing
    /// out several mutable borrows of the same adapter.
    pub fn tick(
        &mut self,
        now_ms: u64,
        hw: &mut (impl InputPort + TemperatureSensor + RelayPort + DisplayPort),
        persistence: &mut impl PersistencePort,
        sink: &mut impl EventSink,
    ) {
        self.tick_count += 1;
        let prev_mode = self.fsm.current_state();

        // 1. Debounced edges
        self.state.now_ms = now_ms;
        self.state.inputs = self.edges.poll(hw, now_ms);

        // 2. UI mode FSM
        self.fsm.tick(&mut self.state);
        let mode = self.fsm.current_state();

        // 3. Apply a requested threshold step
        if let Some((which, delta)) = self.state.pending_adjust.take() {
            let value = self.state.thresholds.adjust(which, delta, persistence);
            sink.emit(&AppEvent::ThresholdAdjusted { which, value });
            self.presenter.invalidate();
        }

        // 4. Report mode changes
        if mode != prev_mode {
            if core::mem::take(&mut self.state.timed_out) {
                sink.emit(&AppEvent::EditTimedOut(prev_mode));
            }
            sink.emit(&AppEvent::ModeChanged {
                from: prev_mode,
                to: mode,
            });
            self.presenter.invalidate();
        }

        // 5. Hysteresis control, Run only
        if !mode.is_edit() {
            if let Some(outcome) = hysteresis::tick(&mut self.state, hw) {
                match outcome.reading {
                    Some(c) => sink.emit(&AppEvent::TemperatureSampled(c)),
                    None => sink.emit(&AppEvent::SensorFault),
                }
                if let Some(on) = outcome.switched {
                    sink.emit(&AppEvent::RelaySwitched(on));
                }
                self.presenter.invalidate();
            }
        }

        // 6. Display
        self.presenter.refresh(mode, &self.state, hw);
    }

    // ── Queries ───────────────────────────────────────────────

    /// Current UI mode.
    pub fn mode(&self) -> StateId {
        self.fsm.current_state()
    }

    pub fn thresholds(&self) -> ThresholdPair {
        self.state.thresholds.pair()
    }

    /// Commanded relay state.
    pub fn relay_on(&self) -> bool {
        self.state.relay_on
    }

    /// Last valid temperature, if any poll has succeeded.
    pub fn last_reading(&self) -> Option<i16> {
        self.state.last_reading
    }

    /// Last frame sent to the display.
    pub fn shown(&self) -> Option<Frame> {
        self.presenter.shown()
    }

    /// Loop passes executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}
