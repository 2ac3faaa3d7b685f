//! Hysteresis threshold store.
//!
//! Owns the low/high pair, repairs missing or corrupt persisted bytes on
//! load, and writes every change straight back through the
//! [`PersistencePort`].
//!
//! Invariant kept by every mutation:
//!
//! ```text
//!   min_c <= low <= high - min_band_c <= max_c - min_band_c
//! ```

use log::{info, warn};

use crate::app::ports::PersistencePort;

/// Byte value of a slot that has never been written.
pub const SENTINEL: u8 = 0xFF;

/// Which edge of the hysteresis band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Threshold {
    Low,
    High,
}

impl Threshold {
    /// Persistence slot index.
    pub const fn slot(self) -> u8 {
        match self {
            Self::Low => 0,
            Self::High => 1,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::High => "high",
        }
    }
}

/// The two thresholds, whole degrees Celsius.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdPair {
    pub low: i16,
    pub high: i16,
}

impl ThresholdPair {
    pub const fn get(&self, which: Threshold) -> i16 {
        match which {
            Threshold::Low => self.low,
            Threshold::High => self.high,
        }
    }

    fn set(&mut self, which: Threshold, value: i16) {
        match which {
            Threshold::Low => self.low = value,
            Threshold::High => self.high = value,
        }
    }
}

/// Range and band rules for a [`ThresholdPair`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdLimits {
    pub min_c: i16,
    pub max_c: i16,
    pub min_band_c: i16,
    /// Written in place of a missing or corrupt slot.
    pub defaults: ThresholdPair,
}

impl ThresholdLimits {
    pub fn in_range(&self, value: i16) -> bool {
        (self.min_c..=self.max_c).contains(&value)
    }

    /// Both values in range and ordered with at least `min_band_c` between them.
    pub fn is_valid(&self, pair: ThresholdPair) -> bool {
        self.in_range(pair.low) && self.in_range(pair.high) && pair.low <= pair.high - self.min_band_c
    }

    /// Allowed interval for `which`, given the current value of the other one.
    fn bounds(&self, which: Threshold, pair: ThresholdPair) -> (i16, i16) {
        match which {
            Threshold::Low => (self.min_c, pair.high - self.min_band_c),
            Threshold::High => (pair.low + self.min_band_c, self.max_c),
        }
    }
}

/// Owned threshold state.  Created once at boot by [`ThresholdStore::load`].
#[derive(Debug, Clone)]
pub struct ThresholdStore {
    pair: ThresholdPair,
    limits: ThresholdLimits,
}

impl ThresholdStore {
    /// Read both slots, repairing anything unusable.
    ///
    /// * A slot holding [`SENTINEL`] or an out-of-range byte is replaced by
    ///   its default, and the default is written back once.
    /// * If the pair is then out of order, both fall back to the defaults and
    ///   any slot whose stored byte differs is rewritten.
    pub fn load(persistence: &mut impl PersistencePort, limits: ThresholdLimits) -> Self {
        let mut stored = [0u8; 2];
        let mut pair = limits.defaults;

        for which in [Threshold::Low, Threshold::High] {
            let raw = persistence.read_slot(which);
            let value = i16::from(raw);
            if raw == SENTINEL || !limits.in_range(value) {
                let repaired = limits.defaults.get(which);
                warn!(
                    "Thresholds: {} slot holds 0x{:02X}, restoring {}C",
                    which.name(),
                    raw,
                    repaired
                );
                persistence.write_slot(which, repaired as u8);
                stored[which.slot() as usize] = repaired as u8;
                pair.set(which, repaired);
            } else {
                stored[which.slot() as usize] = raw;
                pair.set(which, value);
            }
        }

        if !limits.is_valid(pair) {
            warn!(
                "Thresholds: {}..{} violates the band, restoring defaults",
                pair.low, pair.high
            );
            pair = limits.defaults;
            for which in [Threshold::Low, Threshold::High] {
                let byte = pair.get(which) as u8;
                if stored[which.slot() as usize] != byte {
                    persistence.write_slot(which, byte);
                }
            }
        }

        info!("Thresholds: low={}C high={}C", pair.low, pair.high);
        Self { pair, limits }
    }

    /// Step one threshold by `delta`, clamped to the range and to the band
    /// relative to the other threshold.  Persists the result (exactly one
    /// write, even when clamping leaves the value unchanged) and returns it.
    pub fn adjust(
        &mut self,
        which: Threshold,
        delta: i16,
        persistence: &mut impl PersistencePort,
    ) -> i16 {
        let (lo, hi) = self.limits.bounds(which, self.pair);
        let value = self.pair.get(which).saturating_add(delta).clamp(lo, hi);
        self.pair.set(which, value);
        persistence.write_slot(which, value as u8);
        value
    }

    pub fn pair(&self) -> ThresholdPair {
        self.pair
    }

    pub fn get(&self, which: Threshold) -> i16 {
        self.pair.get(which)
    }

    pub fn limits(&self) -> ThresholdLimits {
        self.limits
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
