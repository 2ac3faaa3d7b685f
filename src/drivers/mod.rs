//! Pin-level drivers, input conditioning and hardware initialisation.

pub mod debounce;
pub mod edges;
pub mod gpio;
pub mod hw_init;
pub mod inputs;
pub mod relay;
pub mod seven_segment;
pub mod status_led;
pub mod watchdog;
