//! Concrete state handler functions and table builder.
//!
//! Each state is defined by plain `fn` pointers, with no closures, no dynamic
//! dispatch, no heap.
//!
//! ```text
//!        ┌──────────[button]──────────┐
//!        ▼                            │
//!  EDIT_LOW ──[button]──▶ EDIT_HIGH ──[button]──▶ RUN
//!     │  ▲                  │  ▲                   │
//!     │  └──[rotary: ±1]────┼──┘ (low / high)      │
//!     │                     │                      │
//!     └──[idle > timeout]───┴────────────────────▶ RUN
//! ```
//!
//! Handlers never touch hardware or persistence.  A rotary step is left in
//! `pending_adjust` for the service to apply against the threshold store.

use super::context::ThermostatState;
use super::{StateDescriptor, StateId};
use crate::thresholds::Threshold;
use log::{debug, info};

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table.  Called once at startup.
pub fn build_state_table() -> [StateDescriptor; StateId::COUNT] {
    [
        // Index 0: EditLow
        StateDescriptor {
            id: StateId::EditLow,
            on_enter: edit_enter,
            on_update: edit_low_update,
        },
        // Index 1: EditHigh
        StateDescriptor {
            id: StateId::EditHigh,
            on_enter: edit_enter,
            on_update: edit_high_update,
        },
        // Index 2: Run
        StateDescriptor {
            id: StateId::Run,
            on_enter: run_enter,
            on_update: run_update,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  EDIT states
// ═══════════════════════════════════════════════════════════════════════════

fn edit_enter(ctx: &mut ThermostatState) {
    ctx.mode_entered_ms = ctx.now_ms;
    ctx.last_interaction_ms = Some(ctx.now_ms);
}

fn edit_low_update(ctx: &mut ThermostatState) -> Option<StateId> {
    edit_update(ctx, StateId::EditLow, Threshold::Low)
}

fn edit_high_update(ctx: &mut ThermostatState) -> Option<StateId> {
    edit_update(ctx, StateId::EditHigh, Threshold::High)
}

fn edit_update(ctx: &mut ThermostatState, me: StateId, which: Threshold) -> Option<StateId> {
    if ctx.inputs.button {
        return Some(me.next());
    }

    let timeout = u64::from(ctx.config.interaction_timeout_ms);
    if ctx.ms_since_interaction().is_some_and(|idle| idle > timeout) {
        info!("Edit {}: no input for {} ms, leaving", which.name(), timeout);
        ctx.timed_out = true;
        return Some(StateId::Run);
    }

    if let Some(dir) = ctx.inputs.rotary {
        debug!("Edit {}: rotary {:?}", which.name(), dir);
        ctx.pending_adjust = Some((which, dir.delta()));
        ctx.last_interaction_ms = Some(ctx.now_ms);
    }

    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  RUN state
// ═══════════════════════════════════════════════════════════════════════════

fn run_enter(ctx: &mut ThermostatState) {
    ctx.mode_entered_ms = ctx.now_ms;
    ctx.last_interaction_ms = None;
}

/// Rotary input is ignored here; the control loop runs from the service.
fn run_update(ctx: &mut ThermostatState) -> Option<StateId> {
    ctx.inputs.button.then_some(StateId::EditLow)
}
