//! ISR-debounced touch input.
//!
//! ## Hardware
//!
//! TTP223 capacitive touch pad, digital output, rising edge on press. The
//! GPIO ISR records the raw edge timestamp into an atomic; the loop-side
//! [`TouchInput::poll`] applies the debounce window and reports at most one
//! accepted press per distinct edge.
//!
//! Edges arriving within [`DEBOUNCE_MS`] of the last *accepted* edge are
//! treated as contact bounce and swallowed.

use core::sync::atomic::{AtomicU32, Ordering};

/// Edges closer than this to the last accepted press are bounce.
const DEBOUNCE_MS: u32 = 50;

/// Raw ISR timestamp (milliseconds since boot, truncated to u32, 0 = none
/// yet). Written by the ISR, read by the main loop.
static TOUCH_ISR_TIMESTAMP: AtomicU32 = AtomicU32::new(0);

/// ISR handler — register this on the touch GPIO rising edge.
/// Safe to call from interrupt context (lock-free atomic store).
pub fn touch_isr_handler(now_ms: u32) {
    TOUCH_ISR_TIMESTAMP.store(now_ms, Ordering::Release);
}

/// Latest raw edge timestamp, for the loop-side poll.
pub fn latest_edge_ms() -> u32 {
    TOUCH_ISR_TIMESTAMP.load(Ordering::Acquire)
}

/// Loop-side debouncer. Feed it the raw edge timestamp once per loop pass;
/// it returns `true` exactly once per accepted press.
pub struct TouchInput {
    /// Most recent raw edge observed (accepted or not).
    last_edge_ms: u32,
    /// Most recent edge that passed the debounce window.
    last_accepted_ms: u32,
}

impl TouchInput {
    pub fn new() -> Self {
        Self {
            last_edge_ms: 0,
            last_accepted_ms: 0,
        }
    }

    /// Classify one raw edge timestamp (0 = no edge recorded yet).
    pub fn poll(&mut self, raw_edge_ms: u32) -> bool {
        if raw_edge_ms == 0 || raw_edge_ms == self.last_edge_ms {
            return false; // nothing new since the last pass
        }
        self.last_edge_ms = raw_edge_ms;

        if self.last_accepted_ms != 0
            && raw_edge_ms.wrapping_sub(self.last_accepted_ms) < DEBOUNCE_MS
        {
            return false; // bounce
        }

        self.last_accepted_ms = raw_edge_ms;
        true
    }
}
