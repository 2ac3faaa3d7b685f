//! Mock adapters for integration tests.
//!
//! Records every relay write, display frame and EEPROM write so tests can
//! assert on the full history without touching real GPIOs.

use std::collections::VecDeque;

use embedded_hal::delay::DelayNs;
use thermostat::app::events::AppEvent;
use thermostat::app::ports::{
    DisplayPort, EventSink, InputPort, PersistencePort, RelayPort, TemperatureSensor,
};
use thermostat::app::service::AppService;
use thermostat::config::ThermostatConfig;
use thermostat::display::{Frame, Glyph};
use thermostat::thresholds::{Threshold, ThresholdStore};

// ── MockHardware ──────────────────────────────────────────────

/// Scripted input levels, queued sensor readings and recorded outputs.
#[derive(Default)]
pub struct MockHardware {
    pub button: bool,
    pub pulse: bool,
    pub direction_high: bool,
    /// Readings returned in order; once empty, `fallback` is returned.
    pub readings: VecDeque<Option<i16>>,
    pub fallback: Option<i16>,
    pub reads: usize,
    pub relay: bool,
    pub relay_writes: Vec<bool>,
    pub frames: Vec<Frame>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn reading(celsius: i16) -> Self {
        Self {
            fallback: Some(celsius),
            ..Self::default()
        }
    }

    pub fn last_frame(&self) -> Option<Frame> {
        self.frames.last().copied()
    }
}

impl InputPort for MockHardware {
    fn button_asserted(&mut self) -> bool {
        self.button
    }

    fn rotary_pulse_asserted(&mut self) -> bool {
        self.pulse
    }

    fn rotary_direction_high(&mut self) -> bool {
        self.direction_high
    }
}

impl TemperatureSensor for MockHardware {
    fn read_celsius(&mut self) -> Option<i16> {
        self.reads += 1;
        self.readings.pop_front().unwrap_or(self.fallback)
    }
}

impl RelayPort for MockHardware {
    fn set_relay(&mut self, on: bool) {
        self.relay = on;
        self.relay_writes.push(on);
    }

    fn is_relay_on(&self) -> bool {
        self.relay
    }
}

impl DisplayPort for MockHardware {
    fn render(&mut self, glyph: Glyph) {
        self.frames.push(Frame::Glyph(glyph));
    }

    fn blank(&mut self) {
        self.frames.push(Frame::Blank);
    }
}

// ── MockEeprom ────────────────────────────────────────────────

pub struct MockEeprom {
    pub slots: [u8; 2],
    pub writes: Vec<(Threshold, u8)>,
}

impl MockEeprom {
    pub fn with(low: u8, high: u8) -> Self {
        Self {
            slots: [low, high],
            writes: Vec::new(),
        }
    }

    pub fn blank() -> Self {
        Self::with(0xFF, 0xFF)
    }
}

impl PersistencePort for MockEeprom {
    fn read_slot(&self, slot: Threshold) -> u8 {
        self.slots[slot.slot() as usize]
    }

    fn write_slot(&mut self, slot: Threshold, value: u8) {
        self.slots[slot.slot() as usize] = value;
        self.writes.push((slot, value));
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn contains(&self, event: &AppEvent) -> bool {
        self.events.contains(event)
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── MockDelay ─────────────────────────────────────────────────

/// Records requested delays instead of sleeping.
#[derive(Default)]
pub struct MockDelay {
    pub waits_ms: Vec<u32>,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.waits_ms.push(ns / 1_000_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.waits_ms.push(ms);
    }
}

// ── Bench ─────────────────────────────────────────────────────

/// A started service plus its mocks, driven one millisecond per tick.
pub struct Bench {
    pub app: AppService,
    pub hw: MockHardware,
    pub eeprom: MockEeprom,
    pub sink: RecordingSink,
    pub now: u64,
}

#[allow(dead_code)]
impl Bench {
    pub fn new(hw: MockHardware, eeprom: MockEeprom) -> Self {
        let mut hw = hw;
        let config = ThermostatConfig::default();
        let mut eeprom = eeprom;
        let store = ThresholdStore::load(&mut eeprom, config.limits());
        let mut app = AppService::new(config, store);
        let mut sink = RecordingSink::default();
        app.start(0, &mut hw, &mut sink);
        Self {
            app,
            hw,
            eeprom,
            sink,
            now: 0,
        }
    }

    /// Default thresholds, probe reading `celsius`.
    pub fn at(celsius: i16) -> Self {
        Self::new(MockHardware::reading(celsius), MockEeprom::blank())
    }

    pub fn tick(&mut self) {
        self.app
            .tick(self.now, &mut self.hw, &mut self.eeprom, &mut self.sink);
        self.now += 1;
    }

    pub fn run_for(&mut self, ms: u64) {
        for _ in 0..ms {
            self.tick();
        }
    }

    /// Tick up to and including `t`.
    pub fn run_until(&mut self, t: u64) {
        while self.now <= t {
            self.tick();
        }
    }

    /// Press and release the button.  Returns the time the press registered.
    pub fn press(&mut self) -> u64 {
        self.hw.button = true;
        self.run_for(6);
        let at = self.now - 1;
        self.hw.button = false;
        self.run_for(6);
        at
    }

    /// One rotary detent.  Returns the time the step registered.
    pub fn turn(&mut self, up: bool) -> u64 {
        self.hw.direction_high = up;
        self.hw.pulse = true;
        self.run_for(2);
        let at = self.now - 1;
        self.hw.pulse = false;
        self.run_for(2);
        at
    }
}
