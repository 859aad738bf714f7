//! Alert escalation engine.
//!
//! Runs after every successful sensor sample and on every one-second blink
//! boundary. Two severity tiers are tracked independently:
//!
//! - **Panic tier** (both modes): three consecutive readings above the panic
//!   thresholds trigger an unconditional system reset through [`ResetPort`].
//!   Any in-range reading zeroes the strike counter.
//! - **Alert tier** (alert mode only): readings above the alert thresholds
//!   keep the indicator blinking; five consecutive in-range readings force
//!   it off.
//!
//! Decode failures never reach this engine — the caller retains the previous
//! reading and retries on the next sampling tick.

use crate::app::events::MonitorEvent;
use crate::app::ports::{EventSink, IndicatorPort, ResetPort};
use crate::config::MonitorConfig;
use log::{error, info};

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

/// One calibrated sensor sample. Overwritten each sampling cycle; the alert
/// engine and the status reports only ever see the most recent value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reading {
    /// Integer temperature, °C.
    pub temperature_c: u8,
    /// Integer relative humidity, %.
    pub humidity_pct: u8,
    /// Base tick at which the sample was taken.
    pub tick: u64,
}

impl Default for Reading {
    /// Room-condition placeholder shown before the first successful sample.
    fn default() -> Self {
        Self {
            temperature_c: 20,
            humidity_pct: 30,
            tick: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Alert mode
// ---------------------------------------------------------------------------

/// Whether the lower-severity alert tier is armed. Flips only on a debounced
/// touch press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertMode {
    Normal,
    Alert,
}

/// Outcome of a panic evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanicOutcome {
    /// Processing continues normally.
    Continue,
    /// The reset was issued; the running session is over. Callers must not
    /// touch the engine again this cycle — on hardware the device reboots.
    ResetIssued,
}

// ---------------------------------------------------------------------------
// AlertEngine
// ---------------------------------------------------------------------------

/// Holds alert-mode state and applies the two-tier escalation rules.
pub struct AlertEngine {
    mode: AlertMode,
    /// Consecutive in-range readings while in alert mode.
    consecutive_normal: u8,
    /// Consecutive panic-tier breaches. Never exceeds the trip count — the
    /// reset fires the moment it is reached.
    panic_count: u8,
    /// Debounced touch presses since boot.
    touch_presses: u8,

    alert_temp_c: u8,
    alert_humidity_pct: u8,
    recovery_readings: u8,
    panic_temp_c: u8,
    panic_humidity_pct: u8,
    panic_trip_count: u8,
}

impl AlertEngine {
    pub fn new(config: &MonitorConfig) -> Self {
        Self {
            mode: AlertMode::Normal,
            consecutive_normal: 0,
            panic_count: 0,
            touch_presses: 0,
            alert_temp_c: config.alert_temp_c,
            alert_humidity_pct: config.alert_humidity_pct,
            recovery_readings: config.recovery_readings,
            panic_temp_c: config.panic_temp_c,
            panic_humidity_pct: config.panic_humidity_pct,
            panic_trip_count: config.panic_trip_count,
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn mode(&self) -> AlertMode {
        self.mode
    }

    pub fn touch_presses(&self) -> u8 {
        self.touch_presses
    }

    pub fn panic_count(&self) -> u8 {
        self.panic_count
    }

    // ── Per-sample evaluation ─────────────────────────────────

    /// Panic-tier check. Runs for every successful sample in both modes.
    ///
    /// Returns [`PanicOutcome::ResetIssued`] after calling
    /// `reset.system_reset()`; the caller must stop processing the cycle.
    pub fn check_panic(
        &mut self,
        reading: &Reading,
        reset: &mut impl ResetPort,
        sink: &mut impl EventSink,
    ) -> PanicOutcome {
        if self.breaches_panic(reading) {
            self.panic_count += 1;
            error!(
                "panic breach {}/{}: {}°C / {}%",
                self.panic_count, self.panic_trip_count, reading.temperature_c, reading.humidity_pct
            );
            if self.panic_count >= self.panic_trip_count {
                sink.emit(&MonitorEvent::PanicReset {
                    reading: *reading,
                    strikes: self.panic_count,
                });
                reset.system_reset();
                return PanicOutcome::ResetIssued;
            }
        } else {
            self.panic_count = 0;
        }
        PanicOutcome::Continue
    }

    /// Alert-tier recovery bookkeeping. Runs after the panic check, only
    /// while alert mode is armed.
    ///
    /// A breach zeroes the recovery counter; otherwise the counter climbs,
    /// and once it reaches the configured count the indicator is forced off.
    /// Forcing off is idempotent and never turns the indicator on.
    pub fn track_recovery(&mut self, reading: &Reading, indicator: &mut impl IndicatorPort) {
        if self.mode != AlertMode::Alert {
            return;
        }
        if self.breaches_alert(reading) {
            self.consecutive_normal = 0;
        } else {
            self.consecutive_normal = self.consecutive_normal.saturating_add(1);
            if self.consecutive_normal >= self.recovery_readings {
                indicator.set(false);
            }
        }
    }

    // ── Blink tick ────────────────────────────────────────────

    /// One-second boundary. Toggles the indicator only while alert mode is
    /// armed *and* the last reading currently holds the alert condition; in
    /// every other case the blink tick does not drive the indicator at all.
    pub fn on_blink_tick(&mut self, last: &Reading, indicator: &mut impl IndicatorPort) {
        if self.mode == AlertMode::Alert && self.breaches_alert(last) {
            indicator.toggle();
        }
    }

    // ── Touch bookkeeping ─────────────────────────────────────

    /// Register one debounced touch press: flip the mode, bump the counter.
    /// Returns the new mode and the total press count.
    pub fn register_touch(&mut self) -> (AlertMode, u8) {
        self.mode = match self.mode {
            AlertMode::Normal => AlertMode::Alert,
            AlertMode::Alert => AlertMode::Normal,
        };
        self.touch_presses = self.touch_presses.wrapping_add(1);
        info!(
            "alert mode {:?} (press #{})",
            self.mode, self.touch_presses
        );
        (self.mode, self.touch_presses)
    }

    // ── Internal ──────────────────────────────────────────────

    fn breaches_panic(&self, r: &Reading) -> bool {
        r.temperature_c > self.panic_temp_c || r.humidity_pct > self.panic_humidity_pct
    }

    fn breaches_alert(&self, r: &Reading) -> bool {
        r.temperature_c > self.alert_temp_c || r.humidity_pct > self.alert_humidity_pct
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
