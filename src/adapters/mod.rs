//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements         | Connects to                   |
//! |------------|--------------------|-------------------------------|
//! | `hardware` | TemperatureSensor  | DS18B20 probe                 |
//! |            | RelayPort          | relay + status LED GPIOs      |
//! |            | DisplayPort        | seven-segment GPIOs           |
//! |            | InputPort          | button / rotary GPIOs         |
//! | `log_sink` | EventSink          | Serial log output             |
//! | `nvs`      | PersistencePort    | NVS / in-memory store         |
//! |            | ConfigPort         |                               |
//! | `time`     | (clock, DelayNs)   | ESP32 system timer            |

pub mod hardware;
pub mod log_sink;
pub mod nvs;
pub mod time;
