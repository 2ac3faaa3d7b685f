//! Button and rotary encoder lines.
//!
//! ## Hardware
//!
//! Button and encoder channel A are momentary contacts to ground with
//! pull-ups, so a low level means "asserted".  Channel B is read as a plain
//! level when A pulses: high = clockwise.
//!
//! A pin read error is reported as "not asserted".

use embedded_hal::digital::InputPin;

use crate::app::ports::InputPort;

pub struct InputPins<P: InputPin> {
    button: P,
    rotary_a: P,
    rotary_b: P,
}

impl<P: InputPin> InputPins<P> {
    pub fn new(button: P, rotary_a: P, rotary_b: P) -> Self {
        Self {
            button,
            rotary_a,
            rotary_b,
        }
    }
}

impl<P: InputPin> InputPort for InputPins<P> {
    fn button_asserted(&mut self) -> bool {
        self.button.is_low().unwrap_or(false)
    }

    fn rotary_pulse_asserted(&mut self) -> bool {
        self.rotary_a.is_low().unwrap_or(false)
    }

    fn rotary_direction_high(&mut self) -> bool {
        self.rotary_b.is_high().unwrap_or(false)
    }
}
