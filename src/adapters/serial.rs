//! Operator serial console adapter (ESP-IDF only).
//!
//! Owns the UART driver and bridges both directions:
//!
//! - inbound: drains the driver's receive buffer into the [`LineReceiver`],
//!   echoing accepted bytes back to the operator;
//! - outbound: implements [`EventSink`] with the operator-facing text for
//!   every monitor event.
//!
//! The UART peripheral's own interrupt/ring buffer absorbs bytes that
//! arrive while the loop is inside the blocking sensor handshake; `poll`
//! drains them on the next pass.

use esp_idf_svc::hal::delay::NON_BLOCK;
use esp_idf_svc::hal::uart::UartDriver;

use crate::app::events::MonitorEvent;
use crate::app::ports::EventSink;
use crate::alert::AlertMode;
use crate::config::DisplayMode;
use crate::console::line::{LineReceiver, RxAction};

pub struct SerialConsole<'d> {
    uart: UartDriver<'d>,
}

impl<'d> SerialConsole<'d> {
    pub fn new(uart: UartDriver<'d>) -> Self {
        Self { uart }
    }

    /// Drain pending receive bytes into the line receiver, echoing as the
    /// receiver accepts them.
    pub fn poll(&mut self, rx: &mut LineReceiver) {
        let mut buf = [0u8; 16];
        loop {
            let n = match self.uart.read(&mut buf, NON_BLOCK) {
                Ok(0) | Err(_) => return,
                Ok(n) => n,
            };
            for &byte in &buf[..n] {
                match rx.on_byte(byte) {
                    RxAction::Echo(b) => self.write_bytes(&[b]),
                    RxAction::LineReady => self.write_str("\r\n"),
                    RxAction::Dropped => {}
                }
            }
        }
    }

    fn write_bytes(&mut self, bytes: &[u8]) {
        let _ = self.uart.write(bytes);
    }

    fn write_str(&mut self, s: &str) {
        self.write_bytes(s.as_bytes());
    }

    fn mode_label(mode: AlertMode) -> &'static str {
        match mode {
            AlertMode::Alert => "B (Alert)",
            AlertMode::Normal => "A (Normal)",
        }
    }
}

impl EventSink for SerialConsole<'_> {
    fn emit(&mut self, event: &MonitorEvent) {
        let text = match event {
            MonitorEvent::Started => {
                "\r\n=== Environmental Control System ===\r\nEnter password: ".to_string()
            }
            MonitorEvent::CredentialAccepted => {
                "Password accepted.\r\nEnter calibration code: ".to_string()
            }
            MonitorEvent::CredentialRejected => {
                "Incorrect password. Try again.\r\nEnter password: ".to_string()
            }
            MonitorEvent::CalibrationStored(cal) => format!(
                "Last 2 digits: {} and {} (Sum = {})\r\nCommands: a b c d status\r\n",
                cal.digit1, cal.digit2, cal.sum
            ),
            MonitorEvent::SamplingPeriodChanged(secs) => {
                format!("New sampling period: {}s\r\n", secs)
            }
            MonitorEvent::SamplingPeriodAtMinimum => {
                "Already at minimum period (2s)\r\n".to_string()
            }
            MonitorEvent::SamplingPeriodAtMaximum => {
                "Already at maximum period (10s)\r\n".to_string()
            }
            MonitorEvent::DisplayModeChanged(mode) => {
                format!("Display mode set to: {:?}\r\n", mode)
            }
            MonitorEvent::SettingsReport {
                sampling_period_s,
                display_mode,
                alert_mode,
                reading,
            } => format!(
                "System status: Sampling = {}s, Display = {:?}, Mode = {}\r\n\
                 Latest values: Temp = {} °C, Humidity = {} %\r\n",
                sampling_period_s,
                display_mode,
                Self::mode_label(*alert_mode),
                reading.temperature_c,
                reading.humidity_pct
            ),
            MonitorEvent::StatusReport {
                alert_mode,
                reading,
                touch_presses,
            } => format!(
                "[STATUS]\r\nMode: {}\r\nTemp: {} °C\r\nHum: {} %\r\nProfile changes: {}\r\n",
                Self::mode_label(*alert_mode),
                reading.temperature_c,
                reading.humidity_pct,
                touch_presses
            ),
            MonitorEvent::UnknownCommand => "Unknown command.\r\n".to_string(),
            MonitorEvent::ReadingSampled {
                reading,
                display_mode,
            } => match display_mode {
                DisplayMode::Temperature => format!("[TEMP] {} °C\r\n", reading.temperature_c),
                DisplayMode::Humidity => format!("[HUM]  {} %\r\n", reading.humidity_pct),
                DisplayMode::Both => format!(
                    "[TEMP] {} °C | [HUM] {} %\r\n",
                    reading.temperature_c, reading.humidity_pct
                ),
            },
            MonitorEvent::ReadFailed(_) => "Sensor read failed.\r\n".to_string(),
            MonitorEvent::AlertModeToggled {
                mode,
                touch_presses,
            } => format!(
                "Touch detected. Alert mode {}. Total presses: {}\r\n",
                if *mode == AlertMode::Alert { "ON" } else { "OFF" },
                touch_presses
            ),
            MonitorEvent::SamplingPeriodFromCalibration(secs) => {
                format!("Touch x3 -> New sampling period: {}s\r\n", secs)
            }
            MonitorEvent::PanicReset { .. } => {
                "[PANIC] Unsafe environment! Resetting system...\r\n".to_string()
            }
        };
        self.write_str(&text);
    }
}
