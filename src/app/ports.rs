//! Port traits — the boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ MonitorService (domain)
//! ```
//!
//! Driven adapters (the sensor decoder, the indicator LED, the reset
//! primitive, event sinks) implement these traits. The
//! [`MonitorService`](super::service::MonitorService) consumes them via
//! generics, so the domain core never touches hardware directly — and the
//! test suite can intercept the reset instead of rebooting the host.

use crate::error::DecodeError;
use crate::sensors::RawReading;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// One blocking sensor conversion. Implemented by the single-wire decoder
/// on hardware and by scripted mocks in tests.
pub trait SensorPort {
    fn sample(&mut self) -> Result<RawReading, DecodeError>;
}

// ───────────────────────────────────────────────────────────────
// Indicator port (driven adapter: domain → alert LED)
// ───────────────────────────────────────────────────────────────

/// The alert indicator. `set(false)` must be idempotent — the recovery
/// debounce calls it on every in-range reading past the threshold.
pub trait IndicatorPort {
    fn set(&mut self, on: bool);
    fn toggle(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Reset port (driven adapter: domain → SoC reset)
// ───────────────────────────────────────────────────────────────

/// The unconditional safety reset. On hardware this never returns; test
/// implementations record the call and do return, so callers must treat the
/// invocation as terminal regardless.
pub trait ResetPort {
    fn system_reset(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → operator console / log)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`MonitorEvent`](super::events::MonitorEvent)s
/// through this port. Adapters decide where they go — the UART console in
/// production, the log facade or a recording vector elsewhere.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::MonitorEvent);
}
