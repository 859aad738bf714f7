//! Tick-derived event scheduler.
//!
//! The hardware timer raises one base tick every 100 ms; this module turns
//! those ticks into the two coarse periodic events the control loop acts on:
//!
//! ```text
//! ┌────────────┐    ┌───────────────┐    ┌─────────────────────────┐
//! │ Base tick  │───▶│ TickScheduler │───▶│ sample  (period × 1 s)  │
//! │ (100 ms)   │    │               │───▶│ blink   (every 1 s)     │
//! └────────────┘    └───────────────┘    └─────────────────────────┘
//! ```
//!
//! The sampling comparison reads the live period value each tick: the
//! elapsed-tick counter is never reset when the period changes, so a new
//! period takes effect on the next full cycle rather than re-synchronising
//! mid-cycle.

/// Events derived from a single base tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickEvents {
    /// Time to run a sensor sample.
    pub sample: bool,
    /// One-second boundary for the alert indicator blink.
    pub blink: bool,
}

/// Derives sampling and blink events from the base tick stream.
#[derive(Debug)]
pub struct TickScheduler {
    /// Base ticks per second (1000 / base interval).
    ticks_per_second: u32,
    /// Ticks elapsed since the last sampling event.
    sample_ticks: u32,
    /// Ticks elapsed since the last blink event.
    blink_ticks: u32,
}

impl TickScheduler {
    pub fn new(base_tick_interval_ms: u32) -> Self {
        Self {
            ticks_per_second: 1000 / base_tick_interval_ms.max(1),
            sample_ticks: 0,
            blink_ticks: 0,
        }
    }

    /// Advance by one base tick.
    ///
    /// `sampling_period_s` is read fresh on every call so operator and touch
    /// changes are picked up without resetting the cycle in progress.
    pub fn on_tick(&mut self, sampling_period_s: u8) -> TickEvents {
        let mut events = TickEvents::default();

        self.sample_ticks += 1;
        if self.sample_ticks >= u32::from(sampling_period_s) * self.ticks_per_second {
            self.sample_ticks = 0;
            events.sample = true;
        }

        self.blink_ticks += 1;
        if self.blink_ticks >= self.ticks_per_second {
            self.blink_ticks = 0;
            events.blink = true;
        }

        events
    }
}
