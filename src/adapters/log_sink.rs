//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured monitor events to the
//! logger (UART / USB-CDC in production, captured output on the host). The
//! serial console adapter implements the same trait with operator-facing
//! text; this one is the debug/simulation surface.

use log::{info, warn};

use crate::app::events::MonitorEvent;
use crate::app::ports::EventSink;
use crate::config::DisplayMode;

/// Adapter that logs every [`MonitorEvent`].
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &MonitorEvent) {
        match event {
            MonitorEvent::Started => {
                info!("READY | awaiting credential");
            }
            MonitorEvent::CredentialAccepted => {
                info!("AUTH  | credential accepted");
            }
            MonitorEvent::CredentialRejected => {
                warn!("AUTH  | credential rejected, retry");
            }
            MonitorEvent::CalibrationStored(cal) => {
                info!(
                    "CALIB | digits {} + {} = {}",
                    cal.digit1, cal.digit2, cal.sum
                );
            }
            MonitorEvent::SamplingPeriodChanged(secs) => {
                info!("CONF  | sampling period {}s", secs);
            }
            MonitorEvent::SamplingPeriodAtMinimum => {
                info!("CONF  | already at minimum period");
            }
            MonitorEvent::SamplingPeriodAtMaximum => {
                info!("CONF  | already at maximum period");
            }
            MonitorEvent::DisplayModeChanged(mode) => {
                info!("CONF  | display mode {:?}", mode);
            }
            MonitorEvent::SettingsReport {
                sampling_period_s,
                display_mode,
                alert_mode,
                reading,
            } => {
                info!(
                    "CONF  | period={}s display={:?} mode={:?} last={}°C/{}%",
                    sampling_period_s,
                    display_mode,
                    alert_mode,
                    reading.temperature_c,
                    reading.humidity_pct,
                );
            }
            MonitorEvent::StatusReport {
                alert_mode,
                reading,
                touch_presses,
            } => {
                info!(
                    "STAT  | mode={:?} temp={}°C hum={}% presses={}",
                    alert_mode, reading.temperature_c, reading.humidity_pct, touch_presses
                );
            }
            MonitorEvent::UnknownCommand => {
                warn!("CMD   | unknown command");
            }
            MonitorEvent::ReadingSampled {
                reading,
                display_mode,
            } => match display_mode {
                DisplayMode::Temperature => info!("READ  | {}°C", reading.temperature_c),
                DisplayMode::Humidity => info!("READ  | {}%", reading.humidity_pct),
                DisplayMode::Both => info!(
                    "READ  | {}°C | {}%",
                    reading.temperature_c, reading.humidity_pct
                ),
            },
            MonitorEvent::ReadFailed(e) => {
                warn!("READ  | failed: {}", e);
            }
            MonitorEvent::AlertModeToggled {
                mode,
                touch_presses,
            } => {
                info!("TOUCH | alert mode {:?}, presses {}", mode, touch_presses);
            }
            MonitorEvent::SamplingPeriodFromCalibration(secs) => {
                info!("TOUCH | calibration-derived period {}s", secs);
            }
            MonitorEvent::PanicReset { reading, strikes } => {
                log::error!(
                    "PANIC | {}°C/{}% sustained for {} samples — resetting",
                    reading.temperature_c, reading.humidity_pct, strikes
                );
            }
        }
    }
}
