//! Relay Thermostat Firmware: Main Entry Point
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter          LogEventSink   NvsAdapter            │
//! │  (Sensor+Relay+Display    (EventSink)    (Persistence+Config)  │
//! │   +Input)                                MonotonicClock        │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              AppService (pure logic)                   │    │
//! │  │  Edges · Mode FSM · Thresholds · Hysteresis · Display  │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::gpio::IOPin;
use esp_idf_hal::peripherals::Peripherals;
use log::{info, warn};

use thermostat::adapters::hardware::BoardHardware;
use thermostat::adapters::log_sink::LogEventSink;
use thermostat::adapters::nvs::NvsAdapter;
use thermostat::adapters::time::MonotonicClock;
use thermostat::app::ports::ConfigPort;
use thermostat::app::service::AppService;
use thermostat::config::ThermostatConfig;
use thermostat::drivers::{hw_init, watchdog::Watchdog};
use thermostat::error::Error;
use thermostat::sensors::temperature::TemperatureProbe;
use thermostat::thresholds::ThresholdStore;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("Relay thermostat v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Peripherals ────────────────────────────────────────
    hw_init::init_peripherals().map_err(Error::from)?;
    let watchdog = Watchdog::new();
    let clock = MonotonicClock::new();

    // ── 3. Persistence and configuration ──────────────────────
    let mut nvs = NvsAdapter::new().map_err(Error::from)?;
    let config = match nvs.load() {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!("Config load failed ({}), using defaults", e);
            ThermostatConfig::default()
        }
    };
    let thresholds = ThresholdStore::load(&mut nvs, config.limits());

    // ── 4. Hardware adapter ───────────────────────────────────
    let peripherals = Peripherals::take()?;
    let probe = TemperatureProbe::new(peripherals.pins.gpio10.downgrade()).map_err(Error::from)?;
    let mut hw = BoardHardware::board(probe);
    let mut log_sink = LogEventSink::new();

    // ── 5. App service ────────────────────────────────────────
    let poll_period_ms = config.poll_period_ms;
    let mut app = AppService::new(config, thresholds);
    let mut delay = MonotonicClock::new();
    app.announce(&mut hw, &mut delay);
    app.start(clock.uptime_ms(), &mut hw, &mut log_sink);

    info!("System ready. Entering control loop.");

    // ── 6. Control loop ───────────────────────────────────────
    loop {
        app.tick(clock.uptime_ms(), &mut hw, &mut nvs, &mut log_sink);
        watchdog.feed();
        clock.pause(poll_period_ms);
    }
}
