//! Application service — the domain core.
//!
//! [`MonitorService`] owns the operator session state machine, the alert
//! engine, the tick scheduler, and the latest reading. It exposes one entry
//! point per event source; the main loop drains its flag sources in fixed
//! order and calls these in turn:
//!
//! ```text
//!  SensorPort ──▶ ┌──────────────────────────────┐ ──▶ EventSink
//!                 │        MonitorService        │
//!  base ticks ──▶ │  session · alert · schedule  │ ──▶ IndicatorPort
//!  lines/touch ─▶ └──────────────────────────────┘ ──▶ ResetPort
//! ```
//!
//! All I/O flows through port traits injected at call sites, making the
//! entire service testable with mock adapters.

use log::{info, warn};

use crate::alert::{AlertEngine, AlertMode, PanicOutcome, Reading};
use crate::config::{MonitorConfig, SAMPLING_PERIOD_MAX_S, SAMPLING_PERIOD_MIN_S};
use crate::console::session::{CalibrationDerived, Command, SessionPhase};
use crate::error::CommandError;
use crate::scheduler::TickScheduler;

use super::events::MonitorEvent;
use super::ports::{EventSink, IndicatorPort, ResetPort, SensorPort};

/// The application service orchestrates all domain logic.
pub struct MonitorService {
    config: MonitorConfig,
    phase: SessionPhase,
    /// Derived once from the calibration line; zeroes until then.
    calibration: CalibrationDerived,
    alert: AlertEngine,
    scheduler: TickScheduler,
    /// Most recent successful reading; retained across decode failures.
    last: Reading,
    total_ticks: u64,
}

impl MonitorService {
    pub fn new(config: MonitorConfig) -> Self {
        let alert = AlertEngine::new(&config);
        let scheduler = TickScheduler::new(config.base_tick_interval_ms);
        Self {
            config,
            phase: SessionPhase::AwaitingPassword,
            calibration: CalibrationDerived::default(),
            alert,
            scheduler,
            last: Reading::default(),
            total_ticks: 0,
        }
    }

    /// Announce boot. The session starts at the credential gate.
    pub fn start(&mut self, sink: &mut impl EventSink) {
        info!("monitor service started, awaiting credential");
        sink.emit(&MonitorEvent::Started);
    }

    // ── Base tick ─────────────────────────────────────────────

    /// One base tick: derive sampling/blink events and act on them.
    ///
    /// Inert until the session reaches the monitoring phase — the sensor is
    /// not sampled while the operator gate is open. Returns
    /// [`PanicOutcome::ResetIssued`] when the sample tripped the safety
    /// reset; on hardware the call never actually returns.
    pub fn on_base_tick(
        &mut self,
        sensor: &mut impl SensorPort,
        indicator: &mut impl IndicatorPort,
        reset: &mut impl ResetPort,
        sink: &mut impl EventSink,
    ) -> PanicOutcome {
        if self.phase != SessionPhase::Monitoring {
            return PanicOutcome::Continue;
        }

        self.total_ticks += 1;
        let events = self.scheduler.on_tick(self.config.sampling_period_s);

        if events.sample {
            match sensor.sample() {
                Ok(raw) => {
                    let reading = Reading {
                        temperature_c: raw.temperature_c,
                        humidity_pct: raw.humidity_pct,
                        tick: self.total_ticks,
                    };
                    self.last = reading;

                    if self.alert.check_panic(&reading, reset, sink)
                        == PanicOutcome::ResetIssued
                    {
                        return PanicOutcome::ResetIssued;
                    }

                    sink.emit(&MonitorEvent::ReadingSampled {
                        reading,
                        display_mode: self.config.display_mode,
                    });
                    self.alert.track_recovery(&reading, indicator);
                }
                Err(e) => {
                    // Previous reading retained; next attempt on the next
                    // sampling tick.
                    warn!("sensor read failed: {e}");
                    sink.emit(&MonitorEvent::ReadFailed(e));
                }
            }
        }

        if events.blink {
            self.alert.on_blink_tick(&self.last, indicator);
        }

        PanicOutcome::Continue
    }

    // ── Completed line ────────────────────────────────────────

    /// Dispatch one completed operator line according to the session phase.
    pub fn on_line(&mut self, line: &str, sink: &mut impl EventSink) {
        match self.phase {
            SessionPhase::AwaitingPassword => {
                if line == self.config.credential.as_str() {
                    info!("credential accepted");
                    self.phase = SessionPhase::AwaitingCalibrationCode;
                    sink.emit(&MonitorEvent::CredentialAccepted);
                } else {
                    warn!("operator line rejected: {}", CommandError::CredentialMismatch);
                    sink.emit(&MonitorEvent::CredentialRejected);
                }
            }

            SessionPhase::AwaitingCalibrationCode => {
                self.calibration = CalibrationDerived::from_line(line);
                info!(
                    "calibration digits {} + {} = {}",
                    self.calibration.digit1, self.calibration.digit2, self.calibration.sum
                );
                self.phase = SessionPhase::Monitoring;
                sink.emit(&MonitorEvent::CalibrationStored(self.calibration));
            }

            SessionPhase::Monitoring => self.on_command(line, sink),
        }
    }

    fn on_command(&mut self, line: &str, sink: &mut impl EventSink) {
        match Command::parse(line) {
            Ok(Command::PeriodDown) => {
                if self.config.sampling_period_s > SAMPLING_PERIOD_MIN_S {
                    self.config.sampling_period_s -= 1;
                    sink.emit(&MonitorEvent::SamplingPeriodChanged(
                        self.config.sampling_period_s,
                    ));
                } else {
                    sink.emit(&MonitorEvent::SamplingPeriodAtMinimum);
                }
            }
            Ok(Command::PeriodUp) => {
                if self.config.sampling_period_s < SAMPLING_PERIOD_MAX_S {
                    self.config.sampling_period_s += 1;
                    sink.emit(&MonitorEvent::SamplingPeriodChanged(
                        self.config.sampling_period_s,
                    ));
                } else {
                    sink.emit(&MonitorEvent::SamplingPeriodAtMaximum);
                }
            }
            Ok(Command::CycleDisplayMode) => {
                self.config.display_mode = self.config.display_mode.next();
                sink.emit(&MonitorEvent::DisplayModeChanged(self.config.display_mode));
            }
            Ok(Command::ShowSettings) => {
                sink.emit(&MonitorEvent::SettingsReport {
                    sampling_period_s: self.config.sampling_period_s,
                    display_mode: self.config.display_mode,
                    alert_mode: self.alert.mode(),
                    reading: self.last,
                });
            }
            Ok(Command::Status) => {
                sink.emit(&MonitorEvent::StatusReport {
                    alert_mode: self.alert.mode(),
                    reading: self.last,
                    touch_presses: self.alert.touch_presses(),
                });
            }
            Err(e) => {
                warn!("operator line rejected: {e}");
                sink.emit(&MonitorEvent::UnknownCommand);
            }
        }
    }

    // ── Touch edge ────────────────────────────────────────────

    /// One debounced touch press: flip the alert mode, and on every third
    /// press re-derive the sampling period from the calibration digits.
    ///
    /// The touch input is only armed once monitoring starts, so presses in
    /// earlier phases are ignored.
    pub fn on_touch(&mut self, sink: &mut impl EventSink) {
        if self.phase != SessionPhase::Monitoring {
            return;
        }

        let (mode, presses) = self.alert.register_touch();

        if presses % 3 == 0 {
            let period = self
                .calibration
                .sum
                .clamp(SAMPLING_PERIOD_MIN_S, SAMPLING_PERIOD_MAX_S);
            self.config.sampling_period_s = period;
            sink.emit(&MonitorEvent::SamplingPeriodFromCalibration(period));
        }

        sink.emit(&MonitorEvent::AlertModeToggled {
            mode,
            touch_presses: presses,
        });
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn alert_mode(&self) -> AlertMode {
        self.alert.mode()
    }

    pub fn last_reading(&self) -> Reading {
        self.last
    }

    pub fn sampling_period_s(&self) -> u8 {
        self.config.sampling_period_s
    }

    pub fn calibration(&self) -> CalibrationDerived {
        self.calibration
    }

    /// Clone of the live configuration (for read-back or reporting).
    pub fn current_config(&self) -> MonitorConfig {
        self.config.clone()
    }
}
