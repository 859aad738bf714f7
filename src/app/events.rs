//! Outbound application events.
//!
//! The [`MonitorService`](super::service::MonitorService) emits these
//! through the [`EventSink`](super::ports::EventSink) port. Adapters on the
//! other side decide what to do with them — write operator text to the UART,
//! log to the host console, or record them for assertions. The exact wording
//! is the adapter's business; the data carried here is the contract.

use crate::alert::{AlertMode, Reading};
use crate::config::DisplayMode;
use crate::console::session::CalibrationDerived;
use crate::error::DecodeError;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorEvent {
    /// Boot: the service is up and waiting for the credential.
    Started,

    // ── Operator session ──────────────────────────────────────
    /// Credential accepted; the calibration code is expected next.
    CredentialAccepted,
    /// Credential mismatch; the phase is retained, the operator may retry.
    CredentialRejected,
    /// Calibration digits derived and stored; monitoring begins.
    CalibrationStored(CalibrationDerived),

    // ── Monitoring-phase commands ─────────────────────────────
    /// Sampling period changed by an operator command.
    SamplingPeriodChanged(u8),
    /// `a` at the floor — nothing changed.
    SamplingPeriodAtMinimum,
    /// `b` at the ceiling — nothing changed.
    SamplingPeriodAtMaximum,
    /// Display mode cycled.
    DisplayModeChanged(DisplayMode),
    /// `d`: current settings and latest reading.
    SettingsReport {
        sampling_period_s: u8,
        display_mode: DisplayMode,
        alert_mode: AlertMode,
        reading: Reading,
    },
    /// `status`: mode, latest reading, touch-press count.
    StatusReport {
        alert_mode: AlertMode,
        reading: Reading,
        touch_presses: u8,
    },
    /// Line recognised by no phase rule.
    UnknownCommand,

    // ── Sampling ──────────────────────────────────────────────
    /// A sample succeeded; shown according to the active display mode.
    ReadingSampled {
        reading: Reading,
        display_mode: DisplayMode,
    },
    /// The decode failed; the previous reading is retained.
    ReadFailed(DecodeError),

    // ── Touch ─────────────────────────────────────────────────
    /// Debounced press: the alert mode flipped.
    AlertModeToggled {
        mode: AlertMode,
        touch_presses: u8,
    },
    /// Every third press re-derives the sampling period from the
    /// calibration digits.
    SamplingPeriodFromCalibration(u8),

    // ── Safety ────────────────────────────────────────────────
    /// Sustained panic breach — the hardware reset is being issued.
    PanicReset { reading: Reading, strikes: u8 },
}
