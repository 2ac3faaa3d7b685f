//! Relay driver (heater or cooler contactor).
//!
//! Active-high output.  The status LED follows every command.
//!
//! ## Safety contract
//!
//! The relay is a dumb actuator.  When to switch is decided by the
//! hysteresis control loop; this driver only guarantees the relay is
//! released at construction.

use embedded_hal::digital::{OutputPin, PinState};
use log::warn;

use crate::drivers::status_led::StatusLed;

pub struct RelayDriver<P: OutputPin> {
    pin: P,
    led: StatusLed<P>,
    energised: bool,
}

impl<P: OutputPin> RelayDriver<P> {
    pub fn new(pin: P, led: P) -> Self {
        let mut relay = Self {
            pin,
            led: StatusLed::new(led),
            energised: false,
        };
        relay.set(false);
        relay
    }

    pub fn set(&mut self, on: bool) {
        if self.pin.set_state(PinState::from(on)).is_err() {
            warn!("Relay: pin write failed");
        }
        self.led.set(on);
        self.energised = on;
    }

    pub fn is_energised(&self) -> bool {
        self.energised
    }

    pub fn led_lit(&self) -> bool {
        self.led.is_lit()
    }
}
