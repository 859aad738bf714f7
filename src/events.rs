//! Interrupt-to-loop event notifications.
//!
//! Three asynchronous sources feed the single control loop:
//!
//! ```text
//! ┌──────────────┐
//! │ Base tick    │──▶ pending-tick counter (this module)
//! │ UART byte    │──▶ LineReceiver ready flag (console::line)
//! │ Touch edge   │──▶ edge timestamp atomic (drivers::touch)
//! └──────────────┘         │
//!                          ▼
//!                 main loop, fixed drain order:
//!                 ticks → completed line → touch edge
//! ```
//!
//! Handlers only increment or store into word-sized atomics; all dispatch
//! happens on the loop side. This module owns the base-tick counter; the
//! other two sources live next to their consumers.

use core::sync::atomic::{AtomicU32, Ordering};

/// Base ticks raised by the timer callback and not yet drained by the loop.
/// Counting (rather than a bool flag) keeps derived periods exact even when
/// the loop is held up by the blocking sensor handshake.
static PENDING_TICKS: AtomicU32 = AtomicU32::new(0);

/// Record one base tick. Safe to call from ISR / timer-callback context
/// (lock-free atomic increment).
pub fn isr_base_tick() {
    PENDING_TICKS.fetch_add(1, Ordering::Release);
}

/// Drain all pending base ticks. Called from the main loop (single
/// consumer); returns how many ticks elapsed since the previous drain.
pub fn take_pending_ticks() -> u32 {
    PENDING_TICKS.swap(0, Ordering::AcqRel)
}
