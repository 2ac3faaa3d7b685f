//! Fuzz target: `ThresholdStore::load` + `adjust`
//!
//! The first two bytes are the EEPROM slots, every following byte is one
//! rotary step (low bit: direction, next bit: which threshold).  Asserts
//! the pair stays inside the range and band after load and after every
//! step, and that the slots always mirror the in-memory value.
//!
//! cargo fuzz run fuzz_threshold_store

#![no_main]

use libfuzzer_sys::fuzz_target;
use thermostat::app::ports::PersistencePort;
use thermostat::config::ThermostatConfig;
use thermostat::thresholds::{Threshold, ThresholdStore};

struct Slots([u8; 2]);

impl PersistencePort for Slots {
    fn read_slot(&self, slot: Threshold) -> u8 {
        self.0[slot.slot() as usize]
    }

    fn write_slot(&mut self, slot: Threshold, value: u8) {
        self.0[slot.slot() as usize] = value;
    }
}

fuzz_target!(|data: &[u8]| {
    let [low, high, steps @ ..] = data else {
        return;
    };

    let limits = ThermostatConfig::default().limits();
    let mut slots = Slots([*low, *high]);
    let mut store = ThresholdStore::load(&mut slots, limits);
    assert!(limits.is_valid(store.pair()));

    for step in steps {
        let which = if step & 0b10 == 0 { Threshold::Low } else { Threshold::High };
        let delta = if step & 0b01 == 0 { -1 } else { 1 };
        let value = store.adjust(which, delta, &mut slots);

        assert!(limits.is_valid(store.pair()));
        assert_eq!(slots.0[which.slot() as usize], value as u8);
    }
});
