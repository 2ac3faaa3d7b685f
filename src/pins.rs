//! GPIO / peripheral pin assignments for the thermostat board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Temperature probe (DS18B20, 4.7 kΩ pull-up on the data line)
// ---------------------------------------------------------------------------

/// One-wire data line.
pub const ONE_WIRE_GPIO: i32 = 10;

// ---------------------------------------------------------------------------
// Relay + status indicator
// ---------------------------------------------------------------------------

/// Digital output: HIGH = relay energised.
pub const RELAY_GPIO: i32 = 11;
/// Discrete LED that mirrors the relay.
pub const STATUS_LED_GPIO: i32 = 13;

// ---------------------------------------------------------------------------
// User controls (active-low with internal pull-ups)
// ---------------------------------------------------------------------------

/// Momentary push-button: cycles the UI mode.
pub const BUTTON_GPIO: i32 = 1;
/// Rotary encoder channel A: one pulse per detent.
pub const ROTARY_A_GPIO: i32 = 2;
/// Rotary encoder channel B: sampled on each A pulse for direction.
pub const ROTARY_B_GPIO: i32 = 3;

// ---------------------------------------------------------------------------
// Seven-segment display (common cathode, one digit)
// ---------------------------------------------------------------------------

/// Segment lines in `a, b, c, d, e, f, g` order.
pub const SEGMENT_GPIOS: [i32; 7] = [7, 8, 4, 5, 6, 14, 15];

/// Every output pin, for one-shot configuration at boot.
pub const OUTPUT_GPIOS: [i32; 9] = [
    RELAY_GPIO,
    STATUS_LED_GPIO,
    SEGMENT_GPIOS[0],
    SEGMENT_GPIOS[1],
    SEGMENT_GPIOS[2],
    SEGMENT_GPIOS[3],
    SEGMENT_GPIOS[4],
    SEGMENT_GPIOS[5],
    SEGMENT_GPIOS[6],
];

/// Every pulled-up input pin.
pub const INPUT_GPIOS: [i32; 3] = [BUTTON_GPIO, ROTARY_A_GPIO, ROTARY_B_GPIO];

/// Highest GPIO number used on this board (sizes the host simulation).
pub const MAX_GPIO: usize = 16;
