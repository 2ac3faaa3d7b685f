//! Display presenter: decides what the single-digit display shows.
//!
//! | Mode     | First `mode_badge_ms`   | Afterwards              |
//! |----------|-------------------------|-------------------------|
//! | EditLow  | too-low badge           | low threshold           |
//! | EditHigh | too-high badge          | high threshold          |
//! | Run      | last reading (or blank) | last reading (or blank) |
//!
//! The badge is cut short by the first rotary step.  Temperatures map to
//! glyphs through [`Glyph::for_celsius`]: one digit covers 20–29 °C, the
//! two end symbols cover everything outside.

use crate::app::ports::DisplayPort;
use crate::config::ThermostatConfig;
use crate::fsm::StateId;
use crate::fsm::context::ThermostatState;
use crate::thresholds::{Threshold, ThresholdPair};

/// Lowest temperature shown as a digit (digit 0).
const DIGIT_BASE_C: i16 = 20;

/// Something the display can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    /// Bottom bar: at or below 19 °C, also the EditLow badge.
    TooLow,
    /// `0`–`9` standing for 20–29 °C.
    Digit(u8),
    /// Top bar: 30 °C and above, also the EditHigh badge.
    TooHigh,
}

impl Glyph {
    pub fn for_celsius(celsius: i16) -> Self {
        match celsius.saturating_sub(DIGIT_BASE_C) {
            d if d < 0 => Self::TooLow,
            d if d > 9 => Self::TooHigh,
            d => Self::Digit(d as u8),
        }
    }
}

/// One display state, including "everything off".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    Glyph(Glyph),
    Blank,
}

impl Frame {
    pub fn show(self, display: &mut impl DisplayPort) {
        match self {
            Self::Glyph(g) => display.render(g),
            Self::Blank => display.blank(),
        }
    }
}

fn badge(mode: StateId) -> Option<Glyph> {
    match mode {
        StateId::EditLow => Some(Glyph::TooLow),
        StateId::EditHigh => Some(Glyph::TooHigh),
        StateId::Run => None,
    }
}

fn edited(mode: StateId) -> Option<Threshold> {
    match mode {
        StateId::EditLow => Some(Threshold::Low),
        StateId::EditHigh => Some(Threshold::High),
        StateId::Run => None,
    }
}

/// Frame the display should show right now for `mode`.
pub fn frame_for(mode: StateId, state: &ThermostatState) -> Frame {
    match (edited(mode), badge(mode)) {
        (Some(which), Some(glyph)) => {
            let untouched = state.last_interaction_ms == Some(state.mode_entered_ms);
            if untouched && state.ms_in_mode() < u64::from(state.config.mode_badge_ms) {
                Frame::Glyph(glyph)
            } else {
                Frame::Glyph(Glyph::for_celsius(state.thresholds.get(which)))
            }
        }
        _ => state
            .last_reading
            .map_or(Frame::Blank, |t| Frame::Glyph(Glyph::for_celsius(t))),
    }
}

/// Keeps the display in sync with the state without redrawing every tick.
#[derive(Debug, Default)]
pub struct Presenter {
    shown: Option<Frame>,
    dirty: bool,
}

impl Presenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Force a redraw on the next [`refresh`](Self::refresh), even if the
    /// frame is unchanged.
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    /// Draw if the frame changed or a redraw was requested.  Returns the
    /// frame drawn, if any.
    pub fn refresh(
        &mut self,
        mode: StateId,
        state: &ThermostatState,
        display: &mut impl DisplayPort,
    ) -> Option<Frame> {
        let frame = frame_for(mode, state);
        if !self.dirty && self.shown == Some(frame) {
            return None;
        }
        frame.show(display);
        self.shown = Some(frame);
        self.dirty = false;
        Some(frame)
    }

    /// Record a frame drawn outside the presenter (boot announce).
    pub fn assume_shown(&mut self, frame: Frame) {
        self.shown = Some(frame);
    }

    pub fn shown(&self) -> Option<Frame> {
        self.shown
    }
}

/// Frames and hold times of the boot announce: each mode in turn, the way
/// it looks when entered, ending blank in Run.
pub fn announce_plan(pair: ThresholdPair, config: &ThermostatConfig) -> heapless::Vec<(Frame, u32), 5> {
    let step = config.announce_step_ms;
    let badge = config.mode_badge_ms;
    heapless::Vec::from_iter([
        (Frame::Glyph(Glyph::TooLow), badge),
        (Frame::Glyph(Glyph::for_celsius(pair.low)), step),
        (Frame::Glyph(Glyph::TooHigh), badge),
        (Frame::Glyph(Glyph::for_celsius(pair.high)), step),
        (Frame::Blank, step),
    ])
}
