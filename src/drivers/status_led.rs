//! Single discrete status LED.
//!
//! Mirrors the relay so the heater/cooler state is visible at a glance.

use embedded_hal::digital::{OutputPin, PinState};

pub struct StatusLed<P: OutputPin> {
    pin: P,
    lit: bool,
}

impl<P: OutputPin> StatusLed<P> {
    pub fn new(pin: P) -> Self {
        Self { pin, lit: false }
    }

    pub fn set(&mut self, on: bool) {
        if self.pin.set_state(PinState::from(on)).is_err() {
            log::warn!("StatusLed: pin write failed");
        }
        self.lit = on;
    }

    pub fn is_lit(&self) -> bool {
        self.lit
    }
}
