//! Boot-path tests: threshold repair, the announce sequence and the
//! `Started` event.

use super::mock_hw::{MockDelay, MockEeprom, MockHardware, RecordingSink};

use thermostat::adapters::log_sink::LogEventSink;
use thermostat::adapters::nvs::NvsAdapter;
use thermostat::app::events::AppEvent;
use thermostat::app::ports::{ConfigPort, EventSink};
use thermostat::app::service::AppService;
use thermostat::config::ThermostatConfig;
use thermostat::display::{Frame, Glyph};
use thermostat::fsm::StateId;
use thermostat::thresholds::{Threshold, ThresholdPair, ThresholdStore};

fn load(eeprom: &mut MockEeprom) -> ThresholdStore {
    ThresholdStore::load(eeprom, ThermostatConfig::default().limits())
}

// ── Threshold repair ──────────────────────────────────────────

#[test]
fn factory_fresh_eeprom_gets_defaults_written() {
    let mut eeprom = MockEeprom::blank();
    let store = load(&mut eeprom);

    assert_eq!(store.pair(), ThresholdPair { low: 24, high: 25 });
    assert_eq!(eeprom.slots, [24, 25]);
    assert_eq!(
        eeprom.writes,
        vec![(Threshold::Low, 24), (Threshold::High, 25)]
    );
}

#[test]
fn one_blank_slot_is_repaired_alone() {
    let mut eeprom = MockEeprom::with(21, 0xFF);
    let store = load(&mut eeprom);

    assert_eq!(store.pair(), ThresholdPair { low: 21, high: 25 });
    assert_eq!(eeprom.writes, vec![(Threshold::High, 25)]);
}

#[test]
fn stored_thresholds_load_without_writes() {
    let mut eeprom = MockEeprom::with(22, 27);
    let store = load(&mut eeprom);

    assert_eq!(store.pair(), ThresholdPair { low: 22, high: 27 });
    assert!(eeprom.writes.is_empty());
}

#[test]
fn inverted_pair_falls_back_to_defaults() {
    let mut eeprom = MockEeprom::with(28, 21);
    let store = load(&mut eeprom);

    assert_eq!(store.pair(), ThresholdPair { low: 24, high: 25 });
    assert_eq!(eeprom.slots, [24, 25]);
}

#[test]
fn repaired_thresholds_survive_a_reboot() {
    let mut eeprom = MockEeprom::blank();
    let first = load(&mut eeprom).pair();
    eeprom.writes.clear();

    let second = load(&mut eeprom).pair();
    assert_eq!(first, second);
    assert!(eeprom.writes.is_empty());
}

#[test]
fn nvs_adapter_repairs_first_boot() {
    let mut nvs = NvsAdapter::new().expect("host NVS");
    let store = ThresholdStore::load(&mut nvs, ThermostatConfig::default().limits());
    assert_eq!(store.pair(), ThresholdPair { low: 24, high: 25 });

    let again = ThresholdStore::load(&mut nvs, ThermostatConfig::default().limits());
    assert_eq!(again.pair(), store.pair());
}

#[test]
fn nvs_adapter_serves_default_config_until_saved() {
    let mut nvs = NvsAdapter::new().expect("host NVS");
    assert_eq!(nvs.load().expect("defaults"), ThermostatConfig::default());

    let mut cfg = ThermostatConfig::default();
    cfg.interaction_timeout_ms = 6000;
    nvs.save(&cfg).expect("save");
    assert_eq!(nvs.load().expect("load").interaction_timeout_ms, 6000);
}

// ── Announce and start ────────────────────────────────────────

#[test]
fn announce_walks_through_every_mode() {
    let mut eeprom = MockEeprom::with(22, 27);
    let store = load(&mut eeprom);
    let mut app = AppService::new(ThermostatConfig::default(), store);
    let mut hw = MockHardware::reading(23);
    let mut delay = MockDelay::default();

    app.announce(&mut hw, &mut delay);

    assert_eq!(
        hw.frames,
        vec![
            Frame::Glyph(Glyph::TooLow),
            Frame::Glyph(Glyph::Digit(2)),
            Frame::Glyph(Glyph::TooHigh),
            Frame::Glyph(Glyph::Digit(7)),
            Frame::Blank,
        ]
    );
    assert_eq!(delay.waits_ms, vec![500, 800, 500, 800, 800]);
    assert_eq!(app.shown(), Some(Frame::Blank));
    assert_eq!(hw.reads, 0, "announce never touches the probe");
    assert!(hw.relay_writes.is_empty());
}

#[test]
fn start_enters_run_and_reports_thresholds() {
    let mut eeprom = MockEeprom::with(22, 27);
    let store = load(&mut eeprom);
    let mut app = AppService::new(ThermostatConfig::default(), store);
    let mut sink = RecordingSink::default();

    app.start(0, &mut MockHardware::default(), &mut sink);

    assert_eq!(app.mode(), StateId::Run);
    assert_eq!(
        sink.events,
        vec![AppEvent::Started {
            mode: StateId::Run,
            thresholds: ThresholdPair { low: 22, high: 27 },
        }]
    );
}

#[test]
fn first_tick_after_announce_shows_reading() {
    let mut eeprom = MockEeprom::blank();
    let store = load(&mut eeprom);
    let mut app = AppService::new(ThermostatConfig::default(), store);
    let mut hw = MockHardware::reading(26);
    let mut sink = RecordingSink::default();

    app.announce(&mut hw, &mut MockDelay::default());
    app.start(4100, &mut hw, &mut sink);
    app.tick(4100, &mut hw, &mut eeprom, &mut sink);

    assert_eq!(hw.last_frame(), Some(Frame::Glyph(Glyph::Digit(6))));
    assert_eq!(app.tick_count(), 1);
}

#[test]
fn log_sink_accepts_every_event() {
    let mut sink = LogEventSink::new();
    let pair = ThresholdPair { low: 24, high: 25 };
    for event in [
        AppEvent::Started {
            mode: StateId::Run,
            thresholds: pair,
        },
        AppEvent::ModeChanged {
            from: StateId::Run,
            to: StateId::EditLow,
        },
        AppEvent::EditTimedOut(StateId::EditHigh),
        AppEvent::ThresholdAdjusted {
            which: Threshold::High,
            value: 26,
        },
        AppEvent::TemperatureSampled(23),
        AppEvent::SensorFault,
        AppEvent::RelaySwitched(true),
    ] {
        sink.emit(&event);
    }
}
