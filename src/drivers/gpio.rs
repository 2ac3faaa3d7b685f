//! `embedded-hal` pin handle over the raw [`hw_init`] register helpers.
//!
//! Drivers are generic over `InputPin` / `OutputPin`; on the board they
//! get a `RawPin`, in tests any fake implementing the traits.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

use crate::drivers::hw_init;

/// A GPIO number configured by [`hw_init::init_peripherals`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawPin(pub i32);

impl ErrorType for RawPin {
    type Error = Infallible;
}

impl InputPin for RawPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(hw_init::gpio_read(self.0))
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!hw_init::gpio_read(self.0))
    }
}

impl OutputPin for RawPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        hw_init::gpio_write(self.0, false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        hw_init::gpio_write(self.0, true);
        Ok(())
    }
}
