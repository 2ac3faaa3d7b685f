//! Function-pointer finite state machine engine for the UI mode.
//!
//! Classic embedded FSM pattern ported to Rust:
//!
//! ```text
//! ┌────────────────────────────────────────────────┐
//! │  StateTable                                    │
//! │  ┌──────────┬───────────┬───────────────────┐  │
//! │  │ StateId  │ on_enter  │ on_update         │  │
//! │  ├──────────┼───────────┼───────────────────┤  │
//! │  │ EditLow  │ fn(ctx)   │ fn(ctx)->Option<> │  │
//! │  │ EditHigh │ fn(ctx)   │ fn(ctx)->Option<> │  │
//! │  │ Run      │ fn(ctx)   │ fn(ctx)->Option<> │  │
//! │  └──────────┴───────────┴───────────────────┘  │
//! └────────────────────────────────────────────────┘
//! ```
//!
//! Each tick the engine calls `on_update` for the **current** state.
//! If it returns `Some(next_id)`, the engine moves the current pointer
//! and runs `on_enter` for the next state.  All functions receive `&mut ThermostatState`.

pub mod context;
pub mod states;

use context::ThermostatState;
use log::info;

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// The three UI modes.
/// Must stay in sync with the state table built in [`states::build_state_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StateId {
    EditLow = 0,
    EditHigh = 1,
    Run = 2,
}

impl StateId {
    /// Total number of states, used to size the table array.
    pub const COUNT: usize = 3;

    /// Convert an index back to `StateId`.  Asserts in debug builds;
    /// returns `Run` in release.
    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::EditLow,
            1 => Self::EditHigh,
            2 => Self::Run,
            _ => {
                debug_assert!(false, "invalid state index: {idx}");
                Self::Run
            }
        }
    }

    /// The mode a button press leads to: `(mode + 1) mod 3`.
    pub fn next(self) -> Self {
        Self::from_index((self as usize + 1) % Self::COUNT)
    }

    pub fn is_edit(self) -> bool {
        !matches!(self, Self::Run)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::EditLow => "EditLow",
            Self::EditHigh => "EditHigh",
            Self::Run => "Run",
        }
    }
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Signature for `on_enter` actions.
/// Runs exactly once on each state transition.
pub type StateActionFn = fn(&mut ThermostatState);

/// Signature for the per-tick update handler.
/// Returns `Some(next)` to trigger a transition, or `None` to stay.
pub type StateUpdateFn = fn(&mut ThermostatState) -> Option<StateId>;

// ---------------------------------------------------------------------------
// State descriptor (one row in the table)
// ---------------------------------------------------------------------------

/// Static descriptor for a single FSM state.
/// Stored in a fixed-size array, with no heap and no `dyn`.
pub struct StateDescriptor {
    pub id: StateId,
    pub on_enter: StateActionFn,
    pub on_update: StateUpdateFn,
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

/// The finite state machine engine.
pub struct Fsm {
    /// Fixed-size table indexed by `StateId as usize`.
    table: [StateDescriptor; StateId::COUNT],
    /// Index of the currently active state.
    current: usize,
}

impl Fsm {
    /// Construct a new FSM with the given state table, starting in `initial`.
    pub fn new(table: [StateDescriptor; StateId::COUNT], initial: StateId) -> Self {
        debug_assert!(
            table.iter().enumerate().all(|(i, d)| d.id as usize == i),
            "state table out of order"
        );
        Self {
            table,
            current: initial as usize,
        }
    }

    /// Run the initial `on_enter` for the starting state.
    /// Call once after construction, before the first `tick()`.
    pub fn start(&mut self, ctx: &mut ThermostatState) {
        info!("FSM starting in state: {}", self.current_state().name());
        (self.table[self.current].on_enter)(ctx);
    }

    /// Advance the FSM by one tick.
    ///
    /// 1. Call `on_update` for the current state.
    /// 2. If it returns `Some(next)`, update the pointer and run
    ///    `on_enter(next)`.
    pub fn tick(&mut self, ctx: &mut ThermostatState) {
        let next = (self.table[self.current].on_update)(ctx);

        if let Some(next_id) = next {
            self.transition(next_id, ctx);
        }
    }

    /// The current state's identity.
    pub fn current_state(&self) -> StateId {
        StateId::from_index(self.current)
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn transition(&mut self, next_id: StateId, ctx: &mut ThermostatState) {
        let next_idx = next_id as usize;

        info!(
            "FSM transition: {} -> {}",
            self.current_state().name(),
            next_id.name()
        );

        self.current = next_idx;

        (self.table[self.current].on_enter)(ctx);
    }
}
