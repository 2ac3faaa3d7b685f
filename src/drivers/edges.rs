//! Debounced edge source for the push button and rotary encoder.
//!
//! Turns raw logical levels from an [`InputPort`] into at most one clean
//! event per input per poll:
//!
//! | Input            | Debounced | Event on                     |
//! |------------------|-----------|------------------------------|
//! | Button           | yes       | press (becomes asserted)     |
//! | Rotary pulse (A) | yes       | pulse becomes asserted       |
//! | Rotary dir (B)   | no        | sampled when A fires         |
//!
//! Edge-triggered: holding a control down yields a single event.  There is
//! no queue; an edge that comes and goes between polls is lost.

use crate::app::ports::InputPort;
use crate::config::ThermostatConfig;

use super::debounce::{Debouncer, Transition};

/// One rotary detent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDirection {
    Up,
    Down,
}

impl StepDirection {
    /// Threshold delta for one detent.
    pub const fn delta(self) -> i16 {
        match self {
            Self::Up => 1,
            Self::Down => -1,
        }
    }
}

/// Edges seen during one poll.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputEdges {
    pub button: bool,
    pub rotary: Option<StepDirection>,
}

pub struct EdgeSource {
    button_ms: u32,
    rotary_ms: u32,
    button: Debouncer,
    rotary: Debouncer,
}

impl EdgeSource {
    /// Both controls count as released until [`seed`](Self::seed) reads
    /// the live levels.
    pub fn new(config: &ThermostatConfig) -> Self {
        Self {
            button_ms: config.button_debounce_ms,
            rotary_ms: config.rotary_debounce_ms,
            button: Debouncer::new(config.button_debounce_ms, false),
            rotary: Debouncer::new(config.rotary_debounce_ms, false),
        }
    }

    /// Take the current levels as the stable baseline.  A control already
    /// held at this point produces no edge until it is released and
    /// pressed again.
    pub fn seed(&mut self, inputs: &mut impl InputPort) {
        self.button = Debouncer::new(self.button_ms, inputs.button_asserted());
        self.rotary = Debouncer::new(self.rotary_ms, inputs.rotary_pulse_asserted());
    }

    /// Sample every input once.
    pub fn poll(&mut self, inputs: &mut impl InputPort, now_ms: u64) -> InputEdges {
        let button = matches!(
            self.button.update(inputs.button_asserted(), now_ms),
            Some(Transition::Rose)
        );

        let rotary = match self.rotary.update(inputs.rotary_pulse_asserted(), now_ms) {
            Some(Transition::Rose) => Some(if inputs.rotary_direction_high() {
                StepDirection::Up
            } else {
                StepDirection::Down
            }),
            _ => None,
        };

        InputEdges { button, rotary }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Levels {
        button: bool,
        pulse: bool,
        dir: bool,
    }

    impl InputPort for Levels {
        fn button_asserted(&mut self) -> bool {
            self.button
        }

        fn rotary_pulse_asserted(&mut self) -> bool {
            self.pulse
        }

        fn rotary_direction_high(&mut self) -> bool {
            self.dir
        }
    }

    fn source() -> EdgeSource {
        EdgeSource::new(&ThermostatConfig::default())
    }

    #[test]
    fn held_button_yields_one_edge() {
        let mut src = source();
        let mut io = Levels {
            button: true,
            ..Levels::default()
        };
        let mut presses = 0;
        for t in 0..1000 {
            if src.poll(&mut io, t).button {
                presses += 1;
            }
        }
        assert_eq!(presses, 1);
    }

    #[test]
    fn release_is_not_an_edge() {
        let mut src = source();
        let mut io = Levels {
            button: true,
            ..Levels::default()
        };
        for t in 0..20 {
            src.poll(&mut io, t);
        }
        io.button = false;
        for t in 20..40 {
            assert!(!src.poll(&mut io, t).button);
        }
    }

    #[test]
    fn rotary_direction_sampled_on_pulse() {
        let mut src = source();
        let mut io = Levels {
            pulse: true,
            dir: true,
            ..Levels::default()
        };
        src.poll(&mut io, 0);
        assert_eq!(src.poll(&mut io, 1).rotary, Some(StepDirection::Up));

        io.pulse = false;
        src.poll(&mut io, 10);
        src.poll(&mut io, 11);

        io.pulse = true;
        io.dir = false;
        src.poll(&mut io, 20);
        assert_eq!(src.poll(&mut io, 21).rotary, Some(StepDirection::Down));
    }

    #[test]
    fn button_held_through_seed_needs_a_fresh_press() {
        let mut src = source();
        let mut io = Levels {
            button: true,
            pulse: true,
            ..Levels::default()
        };
        src.seed(&mut io);
        for t in 0..100 {
            let edges = src.poll(&mut io, t);
            assert!(!edges.button);
            assert_eq!(edges.rotary, None);
        }

        io.button = false;
        for t in 100..120 {
            assert!(!src.poll(&mut io, t).button);
        }
        io.button = true;
        let presses = (120..200).filter(|&t| src.poll(&mut io, t).button).count();
        assert_eq!(presses, 1);
    }

    #[test]
    fn button_bounce_shorter_than_interval_ignored() {
        let mut src = source();
        let mut io = Levels::default();
        for (t, level) in [(0, true), (1, false), (2, true), (3, false), (4, false)] {
            io.button = level;
            assert!(!src.poll(&mut io, t).button);
        }
        for t in 5..50 {
            assert!(!src.poll(&mut io, t).button);
        }
    }
}
