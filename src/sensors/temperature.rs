//! DS18B20 temperature probe on a one-wire bus.
//!
//! ## Non-blocking conversion
//!
//! A 12-bit conversion takes up to 750 ms, far longer than one loop
//! iteration.  The probe therefore works in two phases: every read
//! collects the result of the conversion started by the previous read and
//! immediately starts the next one.  The poll interval (seconds) is much
//! longer than the conversion time, so each value is at most one poll old.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: `one-wire-bus` + `ds18b20` over an open-drain GPIO.
//! On host/test: reads from a static atomic for injection.

use log::warn;

use crate::app::ports::TemperatureSensor;
use crate::error::SensorError;

#[cfg(target_os = "espidf")]
mod hw {
    use ds18b20::Ds18b20;
    use esp_idf_hal::delay::Ets;
    use esp_idf_hal::gpio::{AnyIOPin, InputOutput, PinDriver, Pull};
    use log::{info, warn};
    use one_wire_bus::{Address, OneWire};

    use crate::error::SensorError;
    use crate::pins;

    pub struct Bus {
        one_wire: OneWire<PinDriver<'static, AnyIOPin, InputOutput>>,
        address: Option<Address>,
        converting: bool,
        delay: Ets,
    }

    impl Bus {
        pub fn new(pin: AnyIOPin) -> Result<Self, SensorError> {
            let mut line = PinDriver::input_output_od(pin).map_err(|_| SensorError::BusFault)?;
            line.set_pull(Pull::Up).map_err(|_| SensorError::BusFault)?;
            line.set_high().map_err(|_| SensorError::BusFault)?;
            let one_wire = OneWire::new(line).map_err(|_| SensorError::BusFault)?;

            let mut bus = Self {
                one_wire,
                address: None,
                converting: false,
                delay: Ets,
            };
            if bus.find_probe().is_ok() {
                bus.start_conversion();
            }
            Ok(bus)
        }

        fn find_probe(&mut self) -> Result<Address, SensorError> {
            let mut found = None;
            for addr in self.one_wire.devices(false, &mut self.delay) {
                match addr {
                    Ok(a) if a.family_code() == ds18b20::FAMILY_CODE => {
                        found = Some(a);
                        break;
                    }
                    Ok(_) => {}
                    Err(err) => {
                        warn!("Probe: one-wire scan failed: {err:?}");
                        return Err(SensorError::BusFault);
                    }
                }
            }
            self.address = found;
            match found {
                Some(a) => {
                    info!("Probe: DS18B20 {:?} on GPIO{}", a, pins::ONE_WIRE_GPIO);
                    Ok(a)
                }
                None => Err(SensorError::NotFound),
            }
        }

        fn start_conversion(&mut self) {
            self.converting =
                ds18b20::start_simultaneous_temp_measurement(&mut self.one_wire, &mut self.delay)
                    .is_ok();
        }

        /// Collect the pending conversion and start the next one.
        pub fn read_raw(&mut self) -> Result<f32, SensorError> {
            let address = match self.address {
                Some(a) => a,
                None => self.find_probe()?,
            };

            if !self.converting {
                self.start_conversion();
                return Err(SensorError::BusFault);
            }

            let probe = Ds18b20::new::<core::convert::Infallible>(address).map_err(|_| {
                self.address = None;
                SensorError::NotFound
            })?;
            let result = probe.read_data(&mut self.one_wire, &mut self.delay);
            self.start_conversion();

            match result {
                Ok(data) => Ok(data.temperature),
                Err(_) => {
                    self.address = None;
                    Err(SensorError::BusFault)
                }
            }
        }
    }
}

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicI32, Ordering};

/// Injected reading in 1/16 °C (DS18B20 native resolution).
#[cfg(not(target_os = "espidf"))]
static SIM_SIXTEENTHS: AtomicI32 = AtomicI32::new(NO_PROBE);
#[cfg(not(target_os = "espidf"))]
const NO_PROBE: i32 = i32::MIN;

/// Set the simulated probe reading; `None` unplugs it.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_celsius(celsius: Option<f32>) {
    let raw = celsius.map_or(NO_PROBE, |c| (c * 16.0) as i32);
    SIM_SIXTEENTHS.store(raw, Ordering::Relaxed);
}

pub struct TemperatureProbe {
    #[cfg(target_os = "espidf")]
    bus: hw::Bus,
}

impl TemperatureProbe {
    /// Open the bus and kick off the first conversion.  A missing probe is
    /// not an error here; it is searched for again on every read.
    #[cfg(target_os = "espidf")]
    pub fn new(pin: esp_idf_hal::gpio::AnyIOPin) -> Result<Self, SensorError> {
        Ok(Self {
            bus: hw::Bus::new(pin)?,
        })
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn new() -> Result<Self, SensorError> {
        Ok(Self {})
    }

    /// One validated reading, whole degrees truncated toward zero.
    pub fn read(&mut self) -> Result<i16, SensorError> {
        super::plausible_celsius(self.read_raw()?)
    }

    #[cfg(target_os = "espidf")]
    fn read_raw(&mut self) -> Result<f32, SensorError> {
        self.bus.read_raw()
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_raw(&mut self) -> Result<f32, SensorError> {
        match SIM_SIXTEENTHS.load(Ordering::Relaxed) {
            NO_PROBE => Err(SensorError::NotFound),
            raw => Ok(raw as f32 / 16.0),
        }
    }
}

impl TemperatureSensor for TemperatureProbe {
    fn read_celsius(&mut self) -> Option<i16> {
        match self.read() {
            Ok(c) => Some(c),
            Err(e) => {
                warn!("Probe: {}", e);
                None
            }
        }
    }
}
