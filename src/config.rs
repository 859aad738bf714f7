//! System configuration parameters
//!
//! All tunable parameters for the EnvSentry controller. The credential and
//! the severity thresholds are configuration, not literals — they can be
//! overridden at provisioning time before the firmware is flashed.

use serde::{Deserialize, Serialize};

/// Lowest accepted sampling period, seconds.
pub const SAMPLING_PERIOD_MIN_S: u8 = 2;
/// Highest accepted sampling period, seconds.
pub const SAMPLING_PERIOD_MAX_S: u8 = 10;

/// What the periodic reading report contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayMode {
    Temperature,
    Humidity,
    Both,
}

impl DisplayMode {
    /// Advance to the next mode in the fixed cycle
    /// Temperature → Humidity → Both → Temperature.
    pub fn next(self) -> Self {
        match self {
            Self::Temperature => Self::Humidity,
            Self::Humidity => Self::Both,
            Self::Both => Self::Temperature,
        }
    }
}

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    // --- Operator session ---
    /// Credential the operator must send before any other line is parsed.
    /// Compared byte-for-byte, no normalisation.
    pub credential: heapless::String<16>,

    // --- Sampling ---
    /// Sensor sampling period in seconds, always within
    /// [`SAMPLING_PERIOD_MIN_S`, `SAMPLING_PERIOD_MAX_S`].
    pub sampling_period_s: u8,
    /// What the per-sample report shows.
    pub display_mode: DisplayMode,

    // --- Alert thresholds (lower severity tier) ---
    /// Temperature above which the alert condition holds (°C).
    pub alert_temp_c: u8,
    /// Humidity above which the alert condition holds (%).
    pub alert_humidity_pct: u8,
    /// Consecutive in-range readings required before the indicator is
    /// forced off while in alert mode.
    pub recovery_readings: u8,

    // --- Panic thresholds (higher severity tier) ---
    /// Temperature above which a reading counts as a panic breach (°C).
    pub panic_temp_c: u8,
    /// Humidity above which a reading counts as a panic breach (%).
    pub panic_humidity_pct: u8,
    /// Consecutive panic breaches that trigger the safety reset.
    pub panic_trip_count: u8,

    // --- Timing ---
    /// Base hardware tick interval (milliseconds). Sampling and blink
    /// periods are derived from this.
    pub base_tick_interval_ms: u32,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            credential: heapless::String::try_from("1234").unwrap_or_default(),

            sampling_period_s: 5,
            display_mode: DisplayMode::Both,

            alert_temp_c: 25,
            alert_humidity_pct: 60,
            recovery_readings: 5,

            panic_temp_c: 35,
            panic_humidity_pct: 80,
            panic_trip_count: 3,

            base_tick_interval_ms: 100, // 10 Hz
        }
    }
}
