//! Integration tests: MonitorService → ports, full operator scenarios.
//!
//! Everything runs on the host against mock adapters; the reset primitive
//! is intercepted and counted instead of rebooting anything.

use std::collections::VecDeque;

use envsentry::alert::AlertMode;
use envsentry::app::events::MonitorEvent;
use envsentry::app::ports::{EventSink, IndicatorPort, ResetPort, SensorPort};
use envsentry::app::service::MonitorService;
use envsentry::config::{DisplayMode, MonitorConfig};
use envsentry::console::line::{LineReceiver, RxAction};
use envsentry::console::session::SessionPhase;
use envsentry::error::{DecodeError, ProtocolPhase};
use envsentry::sensors::RawReading;

// ── Mock implementations ──────────────────────────────────────

/// Sensor returning a scripted sequence of results, then a safe fallback.
struct ScriptedSensor {
    script: VecDeque<Result<RawReading, DecodeError>>,
    samples_taken: u32,
}

impl ScriptedSensor {
    fn new() -> Self {
        Self {
            script: VecDeque::new(),
            samples_taken: 0,
        }
    }

    fn push_ok(&mut self, temperature_c: u8, humidity_pct: u8) {
        self.script.push_back(Ok(RawReading {
            humidity_pct,
            temperature_c,
        }));
    }

    fn push_err(&mut self, e: DecodeError) {
        self.script.push_back(Err(e));
    }
}

impl SensorPort for ScriptedSensor {
    fn sample(&mut self) -> Result<RawReading, DecodeError> {
        self.samples_taken += 1;
        self.script.pop_front().unwrap_or(Ok(RawReading {
            humidity_pct: 40,
            temperature_c: 22,
        }))
    }
}

#[derive(Default)]
struct MockIndicator {
    sets: Vec<bool>,
    toggles: u32,
}

impl IndicatorPort for MockIndicator {
    fn set(&mut self, on: bool) {
        self.sets.push(on);
    }
    fn toggle(&mut self) {
        self.toggles += 1;
    }
}

#[derive(Default)]
struct MockReset {
    resets: u32,
}

impl ResetPort for MockReset {
    fn system_reset(&mut self) {
        self.resets += 1;
    }
}

#[derive(Default)]
struct RecordingSink {
    events: Vec<MonitorEvent>,
}

impl RecordingSink {
    fn count(&self, pred: impl Fn(&MonitorEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &MonitorEvent) {
        self.events.push(*event);
    }
}

// ── Test rig ──────────────────────────────────────────────────

/// Base ticks per sampling cycle at the default 100 ms tick.
fn ticks_per_sample(period_s: u8) -> u32 {
    u32::from(period_s) * 10
}

struct Rig {
    service: MonitorService,
    sensor: ScriptedSensor,
    indicator: MockIndicator,
    reset: MockReset,
    sink: RecordingSink,
}

impl Rig {
    fn new() -> Self {
        Self {
            service: MonitorService::new(MonitorConfig::default()),
            sensor: ScriptedSensor::new(),
            indicator: MockIndicator::default(),
            reset: MockReset::default(),
            sink: RecordingSink::default(),
        }
    }

    /// A rig that has already passed the credential gate and sent the
    /// calibration code `"9012345"` (digits 4 + 5 = 9).
    fn monitoring() -> Self {
        let mut rig = Self::new();
        rig.line("1234");
        rig.line("9012345");
        assert_eq!(rig.service.phase(), SessionPhase::Monitoring);
        rig
    }

    fn line(&mut self, line: &str) {
        self.service.on_line(line, &mut self.sink);
    }

    fn tick(&mut self, n: u32) {
        for _ in 0..n {
            let _ = self.service.on_base_tick(
                &mut self.sensor,
                &mut self.indicator,
                &mut self.reset,
                &mut self.sink,
            );
        }
    }

    /// Run exactly one full sampling cycle at the current period.
    fn run_sample(&mut self) {
        self.tick(ticks_per_sample(self.service.sampling_period_s()));
    }

    fn touch(&mut self) {
        self.service.on_touch(&mut self.sink);
    }
}

// ── Operator session ──────────────────────────────────────────

#[test]
fn credential_gate_rejects_until_match() {
    let mut rig = Rig::new();

    rig.line("0000");
    assert_eq!(rig.service.phase(), SessionPhase::AwaitingPassword);
    rig.line("9999");
    assert_eq!(rig.service.phase(), SessionPhase::AwaitingPassword);
    assert_eq!(
        rig.sink
            .count(|e| matches!(e, MonitorEvent::CredentialRejected)),
        2
    );

    rig.line("1234");
    assert_eq!(rig.service.phase(), SessionPhase::AwaitingCalibrationCode);
    assert_eq!(
        rig.sink
            .count(|e| matches!(e, MonitorEvent::CredentialAccepted)),
        1
    );
}

#[test]
fn credential_gate_has_no_attempt_limit() {
    let mut rig = Rig::new();
    for _ in 0..100 {
        rig.line("wrong");
    }
    assert_eq!(rig.service.phase(), SessionPhase::AwaitingPassword);
    rig.line("1234");
    assert_eq!(rig.service.phase(), SessionPhase::AwaitingCalibrationCode);
}

#[test]
fn calibration_line_advances_unconditionally() {
    let mut rig = Rig::new();
    rig.line("1234");
    rig.line("9012345");
    assert_eq!(rig.service.phase(), SessionPhase::Monitoring);

    let cal = rig.service.calibration();
    assert_eq!((cal.digit1, cal.digit2, cal.sum), (4, 5, 9));
}

#[test]
fn short_calibration_line_is_safe() {
    let mut rig = Rig::new();
    rig.line("1234");
    rig.line("");
    assert_eq!(rig.service.phase(), SessionPhase::Monitoring);
    assert_eq!(rig.service.calibration().sum, 0);
}

#[test]
fn commands_are_not_parsed_before_monitoring() {
    let mut rig = Rig::new();
    // "a" is a credential attempt here, not a command.
    rig.line("a");
    assert_eq!(rig.service.sampling_period_s(), 5);
    assert_eq!(
        rig.sink
            .count(|e| matches!(e, MonitorEvent::CredentialRejected)),
        1
    );
}

// ── Monitoring commands ───────────────────────────────────────

#[test]
fn period_commands_respect_bounds_with_distinct_reports() {
    let mut rig = Rig::monitoring();

    // Walk down to the floor.
    rig.line("a");
    rig.line("a");
    rig.line("a");
    assert_eq!(rig.service.sampling_period_s(), 2);
    assert_eq!(
        rig.sink
            .count(|e| matches!(e, MonitorEvent::SamplingPeriodChanged(_))),
        3
    );

    // Floor: no-op with its own report.
    rig.line("a");
    assert_eq!(rig.service.sampling_period_s(), 2);
    assert_eq!(
        rig.sink
            .count(|e| matches!(e, MonitorEvent::SamplingPeriodAtMinimum)),
        1
    );

    // Walk up to the ceiling.
    for _ in 0..8 {
        rig.line("b");
    }
    assert_eq!(rig.service.sampling_period_s(), 10);
    rig.line("b");
    assert_eq!(rig.service.sampling_period_s(), 10);
    assert_eq!(
        rig.sink
            .count(|e| matches!(e, MonitorEvent::SamplingPeriodAtMaximum)),
        1
    );
}

#[test]
fn display_mode_cycles_and_wraps_every_third() {
    let mut rig = Rig::monitoring();
    assert_eq!(rig.service.current_config().display_mode, DisplayMode::Both);

    rig.line("c");
    assert_eq!(
        rig.service.current_config().display_mode,
        DisplayMode::Temperature
    );
    rig.line("c");
    assert_eq!(
        rig.service.current_config().display_mode,
        DisplayMode::Humidity
    );
    rig.line("c");
    assert_eq!(rig.service.current_config().display_mode, DisplayMode::Both);
}

#[test]
fn settings_report_carries_live_config() {
    let mut rig = Rig::monitoring();
    rig.line("a");
    rig.line("d");

    let report = rig
        .sink
        .events
        .iter()
        .find_map(|e| match e {
            MonitorEvent::SettingsReport {
                sampling_period_s,
                display_mode,
                alert_mode,
                ..
            } => Some((*sampling_period_s, *display_mode, *alert_mode)),
            _ => None,
        })
        .expect("settings report emitted");
    assert_eq!(report, (4, DisplayMode::Both, AlertMode::Normal));
}

#[test]
fn status_is_case_insensitive_and_reports_presses() {
    let mut rig = Rig::monitoring();
    rig.touch();
    rig.touch();

    rig.line("STATUS");
    let report = rig
        .sink
        .events
        .iter()
        .find_map(|e| match e {
            MonitorEvent::StatusReport {
                alert_mode,
                touch_presses,
                ..
            } => Some((*alert_mode, *touch_presses)),
            _ => None,
        })
        .expect("status report emitted");
    assert_eq!(report, (AlertMode::Normal, 2));
}

#[test]
fn unknown_lines_are_rejected_without_state_change() {
    let mut rig = Rig::monitoring();
    rig.line("A");
    rig.line("restart");
    rig.line("");
    assert_eq!(
        rig.sink.count(|e| matches!(e, MonitorEvent::UnknownCommand)),
        3
    );
    assert_eq!(rig.service.sampling_period_s(), 5);
    assert_eq!(rig.service.phase(), SessionPhase::Monitoring);
}

// ── Sampling ──────────────────────────────────────────────────

#[test]
fn no_sampling_before_monitoring_phase() {
    let mut rig = Rig::new();
    rig.tick(500);
    assert_eq!(rig.sensor.samples_taken, 0);
}

#[test]
fn sample_updates_reading_and_reports_per_display_mode() {
    let mut rig = Rig::monitoring();
    rig.sensor.push_ok(22, 30);

    rig.run_sample();
    assert_eq!(rig.sensor.samples_taken, 1);

    let last = rig.service.last_reading();
    assert_eq!((last.temperature_c, last.humidity_pct), (22, 30));
    assert!(last.tick > 0);

    assert_eq!(
        rig.sink.count(|e| matches!(
            e,
            MonitorEvent::ReadingSampled {
                display_mode: DisplayMode::Both,
                ..
            }
        )),
        1
    );
}

#[test]
fn decode_failure_retains_previous_reading() {
    let mut rig = Rig::monitoring();
    rig.sensor.push_ok(22, 30);
    rig.sensor
        .push_err(DecodeError::Timeout(ProtocolPhase::Ack));
    rig.sensor.push_err(DecodeError::ChecksumMismatch);

    rig.run_sample();
    let before = rig.service.last_reading();

    rig.run_sample();
    rig.run_sample();
    assert_eq!(rig.service.last_reading(), before);
    assert_eq!(
        rig.sink.count(|e| matches!(e, MonitorEvent::ReadFailed(_))),
        2
    );
    // No immediate retry: three cycles, three attempts.
    assert_eq!(rig.sensor.samples_taken, 3);
}

#[test]
fn period_change_takes_effect_for_subsequent_cycles() {
    let mut rig = Rig::monitoring();

    rig.run_sample();
    assert_eq!(rig.sensor.samples_taken, 1);

    rig.line("a"); // 5 s → 4 s
    rig.tick(ticks_per_sample(4));
    assert_eq!(rig.sensor.samples_taken, 2);
}

// ── Panic escalation ──────────────────────────────────────────

#[test]
fn three_consecutive_breaches_trigger_exactly_one_reset() {
    let mut rig = Rig::monitoring();
    for _ in 0..3 {
        rig.sensor.push_ok(40, 50); // temperature breach
    }

    rig.run_sample();
    rig.run_sample();
    assert_eq!(rig.reset.resets, 0);

    rig.run_sample();
    assert_eq!(rig.reset.resets, 1);
    assert_eq!(
        rig.sink
            .count(|e| matches!(e, MonitorEvent::PanicReset { .. })),
        1
    );
}

#[test]
fn safe_reading_between_breaches_prevents_the_reset() {
    let mut rig = Rig::monitoring();
    rig.sensor.push_ok(40, 50);
    rig.sensor.push_ok(40, 50);
    rig.sensor.push_ok(22, 40); // safe — strike counter back to zero
    rig.sensor.push_ok(40, 50);
    rig.sensor.push_ok(40, 50);

    for _ in 0..5 {
        rig.run_sample();
    }
    assert_eq!(rig.reset.resets, 0);
}

#[test]
fn decode_failure_does_not_clear_the_strike_counter() {
    let mut rig = Rig::monitoring();
    rig.sensor.push_ok(40, 90);
    rig.sensor.push_ok(40, 90);
    rig.sensor
        .push_err(DecodeError::Timeout(ProtocolPhase::BitHigh));
    rig.sensor.push_ok(40, 90);

    for _ in 0..4 {
        rig.run_sample();
    }
    // The failed cycle neither counts as a breach nor as a safe reading.
    assert_eq!(rig.reset.resets, 1);
}

#[test]
fn humidity_alone_can_escalate() {
    let mut rig = Rig::monitoring();
    for _ in 0..3 {
        rig.sensor.push_ok(20, 85);
    }
    for _ in 0..3 {
        rig.run_sample();
    }
    assert_eq!(rig.reset.resets, 1);
}

// ── Alert mode, touch, blink ──────────────────────────────────

#[test]
fn touch_flips_mode_and_every_third_press_rederives_period() {
    let mut rig = Rig::monitoring();

    rig.touch();
    assert_eq!(rig.service.alert_mode(), AlertMode::Alert);
    rig.touch();
    assert_eq!(rig.service.alert_mode(), AlertMode::Normal);
    assert_eq!(rig.service.sampling_period_s(), 5);

    rig.touch(); // third press: period = clamp(4 + 5, 2, 10) = 9
    assert_eq!(rig.service.sampling_period_s(), 9);
    assert_eq!(
        rig.sink
            .count(|e| matches!(e, MonitorEvent::SamplingPeriodFromCalibration(9))),
        1
    );
    assert_eq!(
        rig.sink
            .count(|e| matches!(e, MonitorEvent::AlertModeToggled { .. })),
        3
    );
}

#[test]
fn calibration_sum_is_clamped_into_period_bounds() {
    let mut rig = Rig::new();
    rig.line("1234");
    rig.line("code00"); // digits 0 + 0 → sum 0 → clamped to 2
    for _ in 0..3 {
        rig.touch();
    }
    assert_eq!(rig.service.sampling_period_s(), 2);
}

#[test]
fn touch_is_ignored_before_monitoring() {
    let mut rig = Rig::new();
    rig.touch();
    rig.touch();
    rig.line("1234");
    rig.line("55");
    rig.line("status");

    let presses = rig
        .sink
        .events
        .iter()
        .find_map(|e| match e {
            MonitorEvent::StatusReport { touch_presses, .. } => Some(*touch_presses),
            _ => None,
        })
        .expect("status report emitted");
    assert_eq!(presses, 0);
}

#[test]
fn blink_toggles_only_while_alert_condition_holds() {
    let mut rig = Rig::monitoring();

    // Normal mode, safe reading: a full cycle produces no toggles.
    rig.sensor.push_ok(22, 40);
    rig.run_sample();
    assert_eq!(rig.indicator.toggles, 0);

    // Alert mode armed with an alert-tier (not panic) reading held.
    rig.touch();
    rig.sensor.push_ok(30, 50);
    rig.run_sample();
    let toggles_after_breach = rig.indicator.toggles;
    assert!(toggles_after_breach > 0);

    // Back in range: the blink stops driving the indicator; recovery takes
    // over after five consecutive normals.
    for _ in 0..5 {
        rig.sensor.push_ok(22, 40);
        rig.run_sample();
    }
    assert_eq!(rig.indicator.sets, vec![false]);
}

// ── Line receiver wiring ──────────────────────────────────────

#[test]
fn receiver_feeds_service_line_by_line() {
    let mut rig = Rig::new();
    let mut rx = LineReceiver::new();

    for b in b"1234\r" {
        rx.on_byte(*b);
    }
    let line = rx.take_line().expect("line pending");
    rig.line(&line);
    assert_eq!(rig.service.phase(), SessionPhase::AwaitingCalibrationCode);
}

#[test]
fn receiver_echo_protocol_matches_acceptance() {
    let mut rx = LineReceiver::new();
    assert_eq!(rx.on_byte(b'1'), RxAction::Echo(b'1'));
    assert_eq!(rx.on_byte(0x1b), RxAction::Dropped); // escape byte
    assert_eq!(rx.on_byte(b'\r'), RxAction::LineReady);
    assert_eq!(rx.take_line().unwrap().as_str(), "1");
}
