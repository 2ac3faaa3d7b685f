//! Hardware adapter: bridges the board peripherals to domain port traits.
//!
//! Owns the probe, the relay, the display and the input lines, exposing
//! them through [`TemperatureSensor`], [`RelayPort`], [`DisplayPort`] and
//! [`InputPort`].  Generic over the probe and the pin types so the same
//! wiring runs against `RawPin` on the board and against fakes in tests.

use embedded_hal::digital::{InputPin, OutputPin};

use crate::app::ports::{DisplayPort, InputPort, RelayPort, TemperatureSensor};
use crate::display::Glyph;
use crate::drivers::gpio::RawPin;
use crate::drivers::inputs::InputPins;
use crate::drivers::relay::RelayDriver;
use crate::drivers::seven_segment::SevenSegment;
use crate::pins;
use crate::sensors::temperature::TemperatureProbe;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<S, I: InputPin, O: OutputPin> {
    probe: S,
    inputs: InputPins<I>,
    relay: RelayDriver<O>,
    display: SevenSegment<O>,
}

/// The adapter as wired on the thermostat board.
pub type BoardHardware = HardwareAdapter<TemperatureProbe, RawPin, RawPin>;

impl<S, I: InputPin, O: OutputPin> HardwareAdapter<S, I, O> {
    pub fn new(
        probe: S,
        inputs: InputPins<I>,
        relay: RelayDriver<O>,
        display: SevenSegment<O>,
    ) -> Self {
        Self {
            probe,
            inputs,
            relay,
            display,
        }
    }

    pub fn segments(&self) -> u8 {
        self.display.mask()
    }
}

impl BoardHardware {
    /// Wire every driver to the GPIOs in [`pins`].  GPIOs must already be
    /// configured by `hw_init::init_peripherals`.
    pub fn board(probe: TemperatureProbe) -> Self {
        Self::new(
            probe,
            InputPins::new(
                RawPin(pins::BUTTON_GPIO),
                RawPin(pins::ROTARY_A_GPIO),
                RawPin(pins::ROTARY_B_GPIO),
            ),
            RelayDriver::new(RawPin(pins::RELAY_GPIO), RawPin(pins::STATUS_LED_GPIO)),
            SevenSegment::new(pins::SEGMENT_GPIOS.map(RawPin)),
        )
    }
}

// ── TemperatureSensor ─────────────────────────────────────────

impl<S: TemperatureSensor, I: InputPin, O: OutputPin> TemperatureSensor for HardwareAdapter<S, I, O> {
    fn read_celsius(&mut self) -> Option<i16> {
        self.probe.read_celsius()
    }
}

// ── RelayPort ─────────────────────────────────────────────────

impl<S, I: InputPin, O: OutputPin> RelayPort for HardwareAdapter<S, I, O> {
    fn set_relay(&mut self, on: bool) {
        self.relay.set(on);
    }

    fn is_relay_on(&self) -> bool {
        self.relay.is_energised()
    }
}

// ── DisplayPort ───────────────────────────────────────────────

impl<S, I: InputPin, O: OutputPin> DisplayPort for HardwareAdapter<S, I, O> {
    fn render(&mut self, glyph: Glyph) {
        self.display.render(glyph);
    }

    fn blank(&mut self) {
        self.display.blank();
    }
}

// ── InputPort ─────────────────────────────────────────────────

impl<S, I: InputPin, O: OutputPin> InputPort for HardwareAdapter<S, I, O> {
    fn button_asserted(&mut self) -> bool {
        self.inputs.button_asserted()
    }

    fn rotary_pulse_asserted(&mut self) -> bool {
        self.inputs.rotary_pulse_asserted()
    }

    fn rotary_direction_high(&mut self) -> bool {
        self.inputs.rotary_direction_high()
    }
}
