//! Single-digit seven-segment display, one GPIO per segment.
//!
//! Segment masks are `0b abcdefg0` (bit 7 = segment a, bit 1 = segment g,
//! bit 0 is the unused decimal point).

use embedded_hal::digital::{OutputPin, PinState};
use log::warn;

use crate::app::ports::DisplayPort;
use crate::display::Glyph;

const DIGITS: [u8; 10] = [
    0b1111_1100, // 0
    0b0110_0000, // 1
    0b1101_1010, // 2
    0b1111_0010, // 3
    0b0110_0110, // 4
    0b1011_0110, // 5
    0b1011_1110, // 6
    0b1110_0000, // 7
    0b1111_1110, // 8
    0b1111_0110, // 9
];

/// Segment d only.
const TOO_LOW: u8 = 0b0001_0000;
/// Segment a only.
const TOO_HIGH: u8 = 0b1000_0000;

pub fn segments(glyph: Glyph) -> u8 {
    match glyph {
        Glyph::TooLow => TOO_LOW,
        Glyph::TooHigh => TOO_HIGH,
        Glyph::Digit(d) => DIGITS.get(usize::from(d)).copied().unwrap_or(TOO_HIGH),
    }
}

pub struct SevenSegment<P: OutputPin> {
    /// `a` through `g`.
    pins: [P; 7],
    mask: u8,
}

impl<P: OutputPin> SevenSegment<P> {
    pub fn new(pins: [P; 7]) -> Self {
        let mut display = Self { pins, mask: 0xFF };
        display.write_mask(0);
        display
    }

    fn write_mask(&mut self, mask: u8) {
        let mut failed = false;
        for (i, pin) in self.pins.iter_mut().enumerate() {
            let lit = mask & (0x80 >> i) != 0;
            failed |= pin.set_state(PinState::from(lit)).is_err();
        }
        if failed {
            warn!("SevenSegment: segment write failed");
        }
        self.mask = mask;
    }

    /// Segments currently lit.
    pub fn mask(&self) -> u8 {
        self.mask
    }
}

impl<P: OutputPin> DisplayPort for SevenSegment<P> {
    fn render(&mut self, glyph: Glyph) {
        self.write_mask(segments(glyph));
    }

    fn blank(&mut self) {
        self.write_mask(0);
    }
}
