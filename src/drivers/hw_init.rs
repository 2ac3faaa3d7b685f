//! One-shot hardware peripheral initialization.
//!
//! Configures GPIO directions and pulls using raw ESP-IDF sys calls, and
//! exposes the two register-level helpers every pin wrapper builds on.
//! Called once from `main()` before the control loop starts.
//!
//! Off target the same functions drive an in-memory level table so tests
//! and host runs can inject switch positions (`sim_set_level`) and observe
//! outputs (`sim_level`).

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicBool, Ordering};

use log::info;

use crate::pins;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    GpioConfigFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
        }
    }
}

impl From<HwInitError> for crate::error::Error {
    fn from(_: HwInitError) -> Self {
        Self::Init("gpio configuration")
    }
}

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before the loop; single-threaded.
    unsafe {
        init_gpio_inputs()?;
        init_gpio_outputs()?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), HwInitError> {
    // Pull-ups hold every input high until something pulls it down.
    for &pin in &pins::INPUT_GPIOS {
        sim_set_level(pin, true);
    }
    for &pin in &pins::OUTPUT_GPIOS {
        sim_set_level(pin, false);
    }
    info!("hw_init(sim): levels reset");
    Ok(())
}

// ── GPIO Inputs ───────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_inputs() -> Result<(), HwInitError> {
    for &pin in &pins::INPUT_GPIOS {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_INPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 {
            return Err(HwInitError::GpioConfigFailed(ret));
        }
    }

    info!("hw_init: GPIO inputs configured (button, rotary A/B)");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_read(pin: i32) -> bool {
    // SAFETY: gpio_get_level is a read-only register access on an
    // already-configured input pin.
    (unsafe { gpio_get_level(pin) }) != 0
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_read(pin: i32) -> bool {
    sim_level(pin)
}

// ── GPIO Outputs ──────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_outputs() -> Result<(), HwInitError> {
    for &pin in &pins::OUTPUT_GPIOS {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_OUTPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 {
            return Err(HwInitError::GpioConfigFailed(ret));
        }
        unsafe { gpio_set_level(pin, 0) };
    }

    info!("hw_init: GPIO outputs configured (relay, LED, segments)");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) {
    // SAFETY: gpio_set_level writes to an output pin configured in
    // init_gpio_outputs(). Main-loop only.
    unsafe {
        gpio_set_level(pin, u32::from(high));
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(pin: i32, high: bool) {
    sim_set_level(pin, high);
}

// ── Host simulation ───────────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
static SIM_LEVELS: [AtomicBool; pins::MAX_GPIO] = [const { AtomicBool::new(false) }; pins::MAX_GPIO];

/// Force a pin level in the simulation (switch positions, test setup).
/// Out-of-range pins are ignored.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_level(pin: i32, high: bool) {
    if let Some(slot) = usize::try_from(pin).ok().and_then(|i| SIM_LEVELS.get(i)) {
        slot.store(high, Ordering::Relaxed);
    }
}

/// Current simulated level; out-of-range pins read low.
#[cfg(not(target_os = "espidf"))]
pub fn sim_level(pin: i32) -> bool {
    usize::try_from(pin)
        .ok()
        .and_then(|i| SIM_LEVELS.get(i))
        .is_some_and(|slot| slot.load(Ordering::Relaxed))
}
