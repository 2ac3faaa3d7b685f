//! Integration tests for the inputs → mode FSM → thresholds → relay →
//! display pipeline, driven through [`AppService::tick`] one millisecond
//! at a time.

use super::mock_hw::{Bench, MockEeprom, MockHardware};

use thermostat::app::events::AppEvent;
use thermostat::display::{Frame, Glyph};
use thermostat::fsm::StateId;
use thermostat::thresholds::Threshold;

// ── Control loop ──────────────────────────────────────────────

#[test]
fn first_run_tick_polls_immediately() {
    let mut bench = Bench::at(23);
    assert_eq!(bench.app.mode(), StateId::Run);

    bench.tick();

    assert_eq!(bench.hw.reads, 1);
    assert_eq!(bench.app.last_reading(), Some(23));
    assert!(bench.sink.contains(&AppEvent::TemperatureSampled(23)));
    assert_eq!(bench.app.shown(), Some(Frame::Glyph(Glyph::Digit(3))));
}

#[test]
fn polls_once_per_interval() {
    let mut bench = Bench::at(24);
    bench.run_until(3999);
    assert_eq!(bench.hw.reads, 1, "no second poll before 4000 ms");

    bench.tick();
    assert_eq!(bench.hw.reads, 2);
}

#[test]
fn cold_room_closes_relay_and_warm_room_opens_it() {
    let mut hw = MockHardware::reading(26);
    hw.readings.push_back(Some(20));
    let mut bench = Bench::new(hw, MockEeprom::blank());

    bench.tick();
    assert!(bench.app.relay_on());
    assert!(bench.hw.relay);
    assert!(bench.sink.contains(&AppEvent::RelaySwitched(true)));

    bench.run_until(4000);
    assert!(!bench.app.relay_on());
    assert!(!bench.hw.relay);
    assert!(bench.sink.contains(&AppEvent::RelaySwitched(false)));
}

#[test]
fn reading_inside_band_leaves_relay_untouched() {
    let mut bench = Bench::at(24);
    bench.run_until(8000);

    assert!(bench.hw.relay_writes.is_empty());
    assert!(!bench.app.relay_on());
    assert!(
        !bench
            .sink
            .events
            .iter()
            .any(|e| matches!(e, AppEvent::RelaySwitched(_)))
    );
}

#[test]
fn repeated_cold_readings_rewrite_relay_but_report_once() {
    let mut bench = Bench::at(19);
    bench.run_until(8000);

    assert_eq!(bench.hw.relay_writes, vec![true, true, true]);
    let switched = bench
        .sink
        .events
        .iter()
        .filter(|e| matches!(e, AppEvent::RelaySwitched(_)))
        .count();
    assert_eq!(switched, 1);
}

#[test]
fn sensor_fault_holds_relay_and_last_reading() {
    let mut hw = MockHardware::reading(22);
    hw.readings.push_back(Some(20));
    hw.readings.push_back(None);
    let mut bench = Bench::new(hw, MockEeprom::blank());

    bench.tick();
    assert!(bench.app.relay_on());

    bench.run_until(4000);
    assert!(bench.sink.contains(&AppEvent::SensorFault));
    assert!(bench.app.relay_on(), "relay must hold through a fault");
    assert_eq!(bench.hw.relay_writes, vec![true]);
    assert_eq!(bench.app.last_reading(), Some(20));
    assert_eq!(bench.app.shown(), Some(Frame::Glyph(Glyph::Digit(0))));
}

#[test]
fn extreme_readings_show_range_bars() {
    let mut hw = MockHardware::reading(31);
    hw.readings.push_back(Some(12));
    let mut bench = Bench::new(hw, MockEeprom::blank());

    bench.tick();
    assert_eq!(bench.app.shown(), Some(Frame::Glyph(Glyph::TooLow)));

    bench.run_until(4000);
    assert_eq!(bench.app.shown(), Some(Frame::Glyph(Glyph::TooHigh)));
}

// ── Mode cycle ────────────────────────────────────────────────

#[test]
fn button_cycles_through_all_modes() {
    let mut bench = Bench::at(24);
    bench.tick();

    bench.press();
    assert_eq!(bench.app.mode(), StateId::EditLow);
    bench.press();
    assert_eq!(bench.app.mode(), StateId::EditHigh);
    bench.press();
    assert_eq!(bench.app.mode(), StateId::Run);

    let changes: Vec<_> = bench
        .sink
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::ModeChanged { from, to } => Some((*from, *to)),
            _ => None,
        })
        .collect();
    assert_eq!(
        changes,
        vec![
            (StateId::Run, StateId::EditLow),
            (StateId::EditLow, StateId::EditHigh),
            (StateId::EditHigh, StateId::Run),
        ]
    );
}

#[test]
fn held_button_advances_only_once() {
    let mut bench = Bench::at(24);
    bench.hw.button = true;
    bench.run_for(3000);
    assert_eq!(bench.app.mode(), StateId::EditLow);
}

#[test]
fn button_held_at_boot_is_not_a_press() {
    let mut hw = MockHardware::reading(24);
    hw.button = true;
    let mut bench = Bench::new(hw, MockEeprom::blank());

    bench.run_for(3000);
    assert_eq!(bench.app.mode(), StateId::Run);

    bench.hw.button = false;
    bench.run_for(10);
    assert_eq!(bench.app.mode(), StateId::Run);

    bench.press();
    assert_eq!(bench.app.mode(), StateId::EditLow);
}

#[test]
fn rotary_pulse_held_at_boot_is_not_a_step() {
    let mut hw = MockHardware::reading(24);
    hw.pulse = true;
    hw.direction_high = true;
    let mut bench = Bench::new(hw, MockEeprom::blank());
    let before = bench.app.thresholds();
    let writes = bench.eeprom.writes.len();

    bench.press();
    assert_eq!(bench.app.mode(), StateId::EditLow);
    bench.run_for(100);

    assert_eq!(bench.app.thresholds(), before);
    assert_eq!(bench.eeprom.writes.len(), writes);
}

#[test]
fn edit_modes_do_not_poll_the_sensor() {
    let mut bench = Bench::at(24);
    bench.tick();
    bench.press();
    let reads = bench.hw.reads;

    bench.run_for(3000);
    assert_eq!(bench.hw.reads, reads);
}

#[test]
fn idle_edit_mode_times_out_to_run() {
    let mut bench = Bench::at(24);
    let entered = bench.press();
    assert_eq!(bench.app.mode(), StateId::EditLow);

    bench.run_until(entered + 4000);
    assert_eq!(bench.app.mode(), StateId::EditLow, "exactly 4000 ms is not a timeout");

    bench.tick();
    assert_eq!(bench.app.mode(), StateId::Run);
    assert!(bench.sink.contains(&AppEvent::EditTimedOut(StateId::EditLow)));
}

#[test]
fn rotary_activity_extends_edit_timeout() {
    let mut bench = Bench::at(24);
    let entered = bench.press();
    bench.run_until(entered + 3000);
    let turned = bench.turn(false);

    bench.run_until(entered + 4500);
    assert_eq!(bench.app.mode(), StateId::EditLow);

    bench.run_until(turned + 4001);
    assert_eq!(bench.app.mode(), StateId::Run);
}

// ── Threshold editing ─────────────────────────────────────────

#[test]
fn rotary_steps_low_threshold_and_persists() {
    let mut bench = Bench::at(24);
    bench.press();
    bench.eeprom.writes.clear();

    bench.turn(false);
    bench.turn(false);

    assert_eq!(bench.app.thresholds().low, 22);
    assert_eq!(bench.eeprom.slots[0], 22);
    assert_eq!(
        bench.eeprom.writes,
        vec![(Threshold::Low, 23), (Threshold::Low, 22)]
    );
    assert!(bench.sink.contains(&AppEvent::ThresholdAdjusted {
        which: Threshold::Low,
        value: 22,
    }));
    assert_eq!(bench.app.shown(), Some(Frame::Glyph(Glyph::Digit(2))));
}

#[test]
fn low_threshold_cannot_reach_high() {
    let mut bench = Bench::at(24);
    bench.press();
    bench.eeprom.writes.clear();

    bench.turn(true);

    assert_eq!(bench.app.thresholds().low, 24);
    assert_eq!(bench.eeprom.writes, vec![(Threshold::Low, 24)]);
}

#[test]
fn high_threshold_clamps_at_range_top() {
    let mut bench = Bench::new(MockHardware::reading(24), MockEeprom::with(24, 29));
    bench.press();
    bench.press();
    assert_eq!(bench.app.mode(), StateId::EditHigh);

    for _ in 0..3 {
        bench.turn(true);
    }

    assert_eq!(bench.app.thresholds().high, 30);
    assert_eq!(bench.eeprom.slots[1], 30);
}

#[test]
fn new_band_applies_on_return_to_run() {
    let mut hw = MockHardware::reading(23);
    hw.readings.push_back(Some(23));
    let mut bench = Bench::new(hw, MockEeprom::blank());
    bench.tick();
    assert!(bench.app.relay_on());

    bench.press();
    bench.turn(false);
    bench.turn(false);
    bench.press();
    bench.press();
    assert_eq!(bench.app.mode(), StateId::Run);

    bench.run_until(4000);
    assert_eq!(bench.app.thresholds().low, 22);
    assert!(bench.app.relay_on(), "23 inside 22..25 holds the relay");
    assert_eq!(bench.hw.relay_writes, vec![true]);
}

// ── Display in edit modes ─────────────────────────────────────

#[test]
fn edit_mode_shows_badge_then_value() {
    let mut bench = Bench::at(24);
    bench.tick();
    let entered = bench.press();

    bench.run_until(entered + 499);
    assert_eq!(bench.app.shown(), Some(Frame::Glyph(Glyph::TooLow)));

    bench.tick();
    assert_eq!(bench.app.shown(), Some(Frame::Glyph(Glyph::Digit(4))));
}

#[test]
fn turning_during_badge_shows_value_at_once() {
    let mut bench = Bench::at(24);
    bench.tick();
    bench.press();
    bench.press();
    assert_eq!(bench.app.shown(), Some(Frame::Glyph(Glyph::TooHigh)));

    bench.turn(true);
    assert_eq!(bench.app.shown(), Some(Frame::Glyph(Glyph::Digit(6))));
}

#[test]
fn unchanged_frame_is_not_redrawn() {
    let mut bench = Bench::at(24);
    bench.tick();
    let drawn = bench.hw.frames.len();

    bench.run_for(1000);
    assert_eq!(bench.hw.frames.len(), drawn);
}
