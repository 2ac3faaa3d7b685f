//! Task Watchdog Timer (TWDT).
//!
//! The control loop feeds it once per iteration; a loop that stops
//! returning (stuck sensor bus, runaway handler) resets the board.
//! Off target it only counts feeds.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

use log::info;
#[cfg(target_os = "espidf")]
use log::warn;

/// Reset after this long without a feed.
pub const WATCHDOG_TIMEOUT_MS: u32 = 5_000;

pub struct Watchdog {
    #[cfg(target_os = "espidf")]
    subscribed: bool,
    #[cfg(not(target_os = "espidf"))]
    feeds: core::cell::Cell<u64>,
}

impl Default for Watchdog {
    fn default() -> Self {
        Self::new()
    }
}

impl Watchdog {
    /// Configure the TWDT and subscribe the calling task.
    /// Failure is logged; the firmware keeps running unguarded.
    pub fn new() -> Self {
        #[cfg(target_os = "espidf")]
        {
            // SAFETY: plain FFI calls from the main task during boot.
            unsafe {
                let cfg = esp_task_wdt_config_t {
                    timeout_ms: WATCHDOG_TIMEOUT_MS,
                    idle_core_mask: 0,
                    trigger_panic: true,
                };
                let ret = esp_task_wdt_reconfigure(&cfg);
                if ret != ESP_OK {
                    warn!("Watchdog: reconfigure returned {} (may already be configured)", ret);
                }

                let ret = esp_task_wdt_add(core::ptr::null_mut());
                let subscribed = ret == ESP_OK;
                if subscribed {
                    info!("Watchdog: subscribed ({} ms, panic on trigger)", WATCHDOG_TIMEOUT_MS);
                } else {
                    warn!("Watchdog: failed to subscribe ({})", ret);
                }

                Self { subscribed }
            }
        }

        #[cfg(not(target_os = "espidf"))]
        {
            info!("Watchdog(sim): {} ms, counting feeds only", WATCHDOG_TIMEOUT_MS);
            Self {
                feeds: core::cell::Cell::new(0),
            }
        }
    }

    pub fn feed(&self) {
        #[cfg(target_os = "espidf")]
        if self.subscribed {
            // SAFETY: resets the TWDT entry of the subscribed calling task.
            unsafe {
                esp_task_wdt_reset();
            }
        }

        #[cfg(not(target_os = "espidf"))]
        self.feeds.set(self.feeds.get() + 1);
    }

    /// Feeds so far (simulation only).
    #[cfg(not(target_os = "espidf"))]
    pub fn feeds(&self) -> u64 {
        self.feeds.get()
    }
}
