//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (probe, relay, display, inputs, EEPROM, event sinks)
//! implement these traits.  The [`AppService`](super::service::AppService)
//! consumes them via generics, so the domain core never touches hardware
//! directly and every port can be faked in tests.

use crate::config::ThermostatConfig;
use crate::display::Glyph;
use crate::thresholds::Threshold;

// ───────────────────────────────────────────────────────────────
// Temperature port (driven adapter: probe → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port for the temperature probe.
pub trait TemperatureSensor {
    /// Whole degrees Celsius, truncated toward zero.
    /// `None` means no valid reading is available this time.
    fn read_celsius(&mut self) -> Option<i16>;
}

// ───────────────────────────────────────────────────────────────
// Relay port (driven adapter: domain → actuator)
// ───────────────────────────────────────────────────────────────

pub trait RelayPort {
    /// Energise (`true`) or release (`false`) the relay.
    fn set_relay(&mut self, on: bool);

    fn is_relay_on(&self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Display port (driven adapter: domain → single-digit display)
// ───────────────────────────────────────────────────────────────

pub trait DisplayPort {
    /// Show one glyph.
    fn render(&mut self, glyph: Glyph);

    /// Turn every segment off.
    fn blank(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Input port (driven adapter: switches → domain)
// ───────────────────────────────────────────────────────────────

/// Raw, undebounced logical input levels.
///
/// Implementations translate electrical polarity: `true` always means
/// "the user is acting on this control".
pub trait InputPort {
    /// Push button held down.
    fn button_asserted(&mut self) -> bool;

    /// Rotary encoder pulse line active.
    fn rotary_pulse_asserted(&mut self) -> bool;

    /// Rotary direction line level.  High means clockwise (increase).
    fn rotary_direction_high(&mut self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Persistence port (driven adapter: domain ↔ EEPROM / NVS)
// ───────────────────────────────────────────────────────────────

/// Two one-byte slots that survive power loss.
///
/// A slot that has never been written reads as
/// [`SENTINEL`](crate::thresholds::SENTINEL).  Neither operation fails at
/// this layer: backends log and swallow I/O errors after boot.
pub trait PersistencePort {
    fn read_slot(&self, slot: Threshold) -> u8;

    fn write_slot(&mut self, slot: Threshold, value: u8);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: domain ↔ persistent config)
// ───────────────────────────────────────────────────────────────

/// Loads and persists system configuration.
///
/// Implementations MUST validate config values before persisting.
/// Invalid ranges are rejected with [`ConfigError::ValidationFailed`],
/// not silently clamped.
pub trait ConfigPort {
    /// Load configuration from persistent storage.
    /// Returns [`ThermostatConfig::default()`] if no stored config exists.
    fn load(&self) -> Result<ThermostatConfig, ConfigError>;

    /// Validate and persist configuration.
    fn save(&mut self, config: &ThermostatConfig) -> Result<(), ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`ConfigPort`] operations.
#[derive(Debug)]
pub enum ConfigError {
    /// Stored config failed deserialization.
    Corrupted,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
    /// Generic I/O error from the storage backend.
    IoError,
}

/// Errors from opening or writing the persistence backend.
#[derive(Debug)]
pub enum StorageError {
    /// The NVS partition could not be taken or initialised.
    Unavailable,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl core::fmt::Display for StorageError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Unavailable => write!(f, "storage unavailable"),
        }
    }
}
