//! Stable-interval debouncer for a single digital line.
//!
//! The raw level has to hold unchanged for `interval_ms` before it is
//! accepted as the new stable level.  Every bounce restarts the wait.
//!
//! ```text
//!   raw     ▔▔▔╲_╱▔╲____________╱▔╲_╱▔▔▔▔▔▔▔▔▔
//!   stable  ▔▔▔▔▔▔▔▔▔▔▔╲__________________╱▔▔▔
//!                      ▲ Fell             ▲ Rose
//!                 |<-->| interval    |<-->|
//! ```
//!
//! `update()` is called from the main loop with a monotonic timestamp; it
//! reports each accepted change exactly once.

/// An accepted change of the stable level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Stable level went low → high.
    Rose,
    /// Stable level went high → low.
    Fell,
}

pub struct Debouncer {
    interval_ms: u64,
    stable: bool,
    last_raw: bool,
    raw_since_ms: u64,
}

impl Debouncer {
    /// `initial` is taken as already stable, so the level present at boot
    /// never produces a transition.
    pub fn new(interval_ms: u32, initial: bool) -> Self {
        Self {
            interval_ms: u64::from(interval_ms),
            stable: initial,
            last_raw: initial,
            raw_since_ms: 0,
        }
    }

    /// Feed one raw sample taken at `now_ms`.
    pub fn update(&mut self, raw: bool, now_ms: u64) -> Option<Transition> {
        if raw != self.last_raw {
            self.last_raw = raw;
            self.raw_since_ms = now_ms;
            return None;
        }

        if raw != self.stable && now_ms.saturating_sub(self.raw_since_ms) >= self.interval_ms {
            self.stable = raw;
            return Some(if raw {
                Transition::Rose
            } else {
                Transition::Fell
            });
        }

        None
    }

    /// Current debounced level.
    pub fn is_high(&self) -> bool {
        self.stable
    }
}
