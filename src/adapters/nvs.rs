//! NVS (Non-Volatile Storage) adapter.
//!
//! Implements both [`PersistencePort`] (the two threshold bytes) and
//! [`ConfigPort`] (the postcard-encoded [`ThermostatConfig`] blob).
//!
//! | Key   | Type | Content                         |
//! |-------|------|---------------------------------|
//! | `tl`  | u8   | low threshold (slot 0)          |
//! | `th`  | u8   | high threshold (slot 1)         |
//! | `cfg` | blob | `ThermostatConfig`, postcard    |
//!
//! All keys live in the `thermostat` namespace.  A key that was never
//! written reads as [`SENTINEL`], the same as a blank EEPROM cell.
//!
//! Failure policy: opening NVS at boot is the only fallible step.  After
//! that, slot read/write errors are logged and swallowed so the control
//! loop never stops on a flash hiccup.

use crate::app::ports::{ConfigError, ConfigPort, PersistencePort, StorageError};
use crate::config::ThermostatConfig;
use crate::thresholds::{SENTINEL, Threshold};
use log::info;
#[cfg(target_os = "espidf")]
use log::warn;

#[cfg(not(target_os = "espidf"))]
use std::collections::HashMap;

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

const NAMESPACE: &str = "thermostat";
const CONFIG_KEY: &str = "cfg";

#[cfg(target_os = "espidf")]
const MAX_BLOB_SIZE: usize = 256;

// esp_err_t codes as the signed type every NVS call returns.
#[cfg(target_os = "espidf")]
const OK: i32 = ESP_OK as i32;
#[cfg(target_os = "espidf")]
const NOT_FOUND: i32 = ESP_ERR_NVS_NOT_FOUND as i32;

fn slot_key(slot: Threshold) -> &'static str {
    match slot {
        Threshold::Low => "tl",
        Threshold::High => "th",
    }
}

pub struct NvsAdapter {
    #[cfg(not(target_os = "espidf"))]
    store: std::cell::RefCell<HashMap<String, Vec<u8>>>,
}

impl NvsAdapter {
    /// Create a new NvsAdapter and initialise NVS flash.
    ///
    /// On a version mismatch or a full partition the partition is erased
    /// and re-initialised; anything else is [`StorageError::Unavailable`].
    pub fn new() -> Result<Self, StorageError> {
        #[cfg(target_os = "espidf")]
        {
            // SAFETY: nvs_flash_init / nvs_flash_erase are called from the
            // single main-task context before any other NVS access.
            let ret = unsafe { nvs_flash_init() };
            if ret == ESP_ERR_NVS_NO_FREE_PAGES as i32 || ret == ESP_ERR_NVS_NEW_VERSION_FOUND as i32 {
                warn!("NVS: erasing and re-initialising flash partition");
                if unsafe { nvs_flash_erase() } != OK {
                    return Err(StorageError::Unavailable);
                }
                if unsafe { nvs_flash_init() } != OK {
                    return Err(StorageError::Unavailable);
                }
            } else if ret != OK {
                return Err(StorageError::Unavailable);
            }
            info!("NvsAdapter: ESP-IDF NVS initialised");
        }

        #[cfg(not(target_os = "espidf"))]
        info!("NvsAdapter: simulation backend");

        Ok(Self {
            #[cfg(not(target_os = "espidf"))]
            store: std::cell::RefCell::new(HashMap::new()),
        })
    }

    #[cfg(not(target_os = "espidf"))]
    fn composite_key(key: &str) -> String {
        format!("{}::{}", NAMESPACE, key)
    }

    /// Open the namespace, run `f` with the handle, then close.
    #[cfg(target_os = "espidf")]
    fn with_nvs_handle<F, T>(write: bool, f: F) -> Result<T, i32>
    where
        F: FnOnce(nvs_handle_t) -> Result<T, i32>,
    {
        let mut ns_buf = [0u8; 16];
        let ns_bytes = NAMESPACE.as_bytes();
        let len = ns_bytes.len().min(15);
        ns_buf[..len].copy_from_slice(&ns_bytes[..len]);

        let mut handle: nvs_handle_t = 0;
        let mode = if write {
            nvs_open_mode_t_NVS_READWRITE
        } else {
            nvs_open_mode_t_NVS_READONLY
        };

        // SAFETY: ns_buf is NUL-terminated; handle is a valid out-pointer.
        let ret = unsafe { nvs_open(ns_buf.as_ptr() as *const _, mode, &mut handle) };
        if ret != OK {
            return Err(ret);
        }

        let result = f(handle);
        // SAFETY: handle was opened above and is not used afterwards.
        unsafe {
            nvs_close(handle);
        }
        result
    }

    /// NUL-terminated copy of a short key.
    #[cfg(target_os = "espidf")]
    fn key_buf(key: &str) -> [u8; 16] {
        let mut buf = [0u8; 16];
        let kb = key.as_bytes();
        let kl = kb.len().min(15);
        buf[..kl].copy_from_slice(&kb[..kl]);
        buf
    }
}

// ── Threshold slots ───────────────────────────────────────────

impl PersistencePort for NvsAdapter {
    fn read_slot(&self, slot: Threshold) -> u8 {
        let key = slot_key(slot);

        #[cfg(not(target_os = "espidf"))]
        {
            self.store
                .borrow()
                .get(&Self::composite_key(key))
                .and_then(|v| v.first().copied())
                .unwrap_or(SENTINEL)
        }

        #[cfg(target_os = "espidf")]
        {
            let result = Self::with_nvs_handle(false, |handle| {
                let key_buf = Self::key_buf(key);
                let mut value: u8 = SENTINEL;
                // SAFETY: key_buf is NUL-terminated; value is a valid out-pointer.
                let ret = unsafe { nvs_get_u8(handle, key_buf.as_ptr() as *const _, &mut value) };
                match ret {
                    OK => Ok(value),
                    NOT_FOUND => Ok(SENTINEL),
                    e => Err(e),
                }
            });
            match result {
                Ok(v) => v,
                // Namespace does not exist before the first write.
                Err(NOT_FOUND) => SENTINEL,
                Err(e) => {
                    warn!("NvsAdapter: read {} failed ({}), treating as blank", key, e);
                    SENTINEL
                }
            }
        }
    }

    fn write_slot(&mut self, slot: Threshold, value: u8) {
        let key = slot_key(slot);

        #[cfg(not(target_os = "espidf"))]
        {
            self.store
                .borrow_mut()
                .insert(Self::composite_key(key), vec![value]);
        }

        #[cfg(target_os = "espidf")]
        {
            let result = Self::with_nvs_handle(true, |handle| {
                let key_buf = Self::key_buf(key);
                // SAFETY: key_buf is NUL-terminated; handle is open read-write.
                let ret = unsafe { nvs_set_u8(handle, key_buf.as_ptr() as *const _, value) };
                if ret != OK {
                    return Err(ret);
                }
                let ret = unsafe { nvs_commit(handle) };
                if ret != OK {
                    return Err(ret);
                }
                Ok(())
            });
            if let Err(e) = result {
                warn!("NvsAdapter: write {}={} failed ({})", key, value, e);
            }
        }
    }
}

// ── Config blob ───────────────────────────────────────────────

impl ConfigPort for NvsAdapter {
    fn load(&self) -> Result<ThermostatConfig, ConfigError> {
        #[cfg(not(target_os = "espidf"))]
        let stored: Option<Vec<u8>> = self
            .store
            .borrow()
            .get(&Self::composite_key(CONFIG_KEY))
            .cloned();

        #[cfg(target_os = "espidf")]
        let stored: Option<Vec<u8>> = {
            let result = Self::with_nvs_handle(false, |handle| {
                let key_buf = Self::key_buf(CONFIG_KEY);
                let mut size: usize = 0;

                // First call: get size
                // SAFETY: null data pointer asks NVS for the length only.
                let ret = unsafe {
                    nvs_get_blob(
                        handle,
                        key_buf.as_ptr() as *const _,
                        core::ptr::null_mut(),
                        &mut size,
                    )
                };
                if ret != OK {
                    return Err(ret);
                }
                if size == 0 || size > MAX_BLOB_SIZE {
                    return Err(ESP_ERR_NVS_INVALID_LENGTH as i32);
                }

                let mut buf = vec![0u8; size];
                // SAFETY: buf holds exactly `size` bytes.
                let ret = unsafe {
                    nvs_get_blob(
                        handle,
                        key_buf.as_ptr() as *const _,
                        buf.as_mut_ptr() as *mut _,
                        &mut size,
                    )
                };
                if ret != OK {
                    return Err(ret);
                }
                Ok(buf)
            });

            match result {
                Ok(bytes) => Some(bytes),
                Err(NOT_FOUND) => None,
                Err(e) => {
                    warn!("NvsAdapter: config read error {}", e);
                    return Err(ConfigError::IoError);
                }
            }
        };

        match stored {
            Some(bytes) => {
                let cfg: ThermostatConfig =
                    postcard::from_bytes(&bytes).map_err(|_| ConfigError::Corrupted)?;
                cfg.validate()?;
                info!("NvsAdapter: loaded config ({} bytes)", bytes.len());
                Ok(cfg)
            }
            None => {
                info!("NvsAdapter: no stored config, using defaults");
                Ok(ThermostatConfig::default())
            }
        }
    }

    fn save(&mut self, config: &ThermostatConfig) -> Result<(), ConfigError> {
        config.validate()?;
        let bytes = postcard::to_allocvec(config).map_err(|_| ConfigError::IoError)?;

        #[cfg(not(target_os = "espidf"))]
        {
            self.store
                .borrow_mut()
                .insert(Self::composite_key(CONFIG_KEY), bytes);
            info!("NvsAdapter: config saved (simulation)");
            Ok(())
        }

        #[cfg(target_os = "espidf")]
        {
            let result = Self::with_nvs_handle(true, |handle| {
                let key_buf = Self::key_buf(CONFIG_KEY);
                // SAFETY: bytes outlives the call; key_buf is NUL-terminated.
                let ret = unsafe {
                    nvs_set_blob(
                        handle,
                        key_buf.as_ptr() as *const _,
                        bytes.as_ptr() as *const _,
                        bytes.len(),
                    )
                };
                if ret != OK {
                    return Err(ret);
                }
                let ret = unsafe { nvs_commit(handle) };
                if ret != OK {
                    return Err(ret);
                }
                Ok(())
            });
            match result {
                Ok(()) => {
                    info!("NvsAdapter: config saved ({} bytes)", bytes.len());
                    Ok(())
                }
                Err(e) => {
                    warn!("NvsAdapter: config write error {}", e);
                    Err(ConfigError::IoError)
                }
            }
        }
    }
}

#[cfg(all(test, not(target_os = "espidf")))]
impl NvsAdapter {
    /// Plant raw bytes under a key (simulation only).
    fn poke(&self, key: &str, bytes: &[u8]) {
        self.store
            .borrow_mut()
            .insert(Self::composite_key(key), bytes.to_vec());
    }
}
