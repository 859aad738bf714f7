//! Carriage-return-terminated line assembly.
//!
//! The byte source (UART receive interrupt on hardware) is the single
//! producer; the control loop is the single consumer. Mutual exclusion is
//! the ready-flag protocol, not a lock:
//!
//! - the producer appends only while `ready` is clear, and publishes a
//!   completed line with a release store;
//! - the consumer observes the line under an acquire load, copies it out,
//!   and clears the flag with a release store, which re-enables the producer.
//!
//! The release/acquire pair is what guarantees the consumer sees a fully
//! written buffer. Exactly one line can be pending at a time; bytes arriving
//! while a line is pending are dropped.

use core::sync::atomic::{AtomicBool, Ordering};

/// Longest accepted line, excluding the carriage return.
pub const LINE_CAPACITY: usize = 63;

/// What the receiver did with one inbound byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RxAction {
    /// Byte accepted — echo it back to the operator.
    Echo(u8),
    /// Carriage return seen — a completed line is now pending.
    LineReady,
    /// Byte discarded (non-printable, overflow, or a line is pending).
    Dropped,
}

/// Fixed-capacity single-line receive buffer.
pub struct LineReceiver {
    buf: [u8; LINE_CAPACITY],
    len: usize,
    ready: AtomicBool,
}

impl LineReceiver {
    pub fn new() -> Self {
        Self {
            buf: [0; LINE_CAPACITY],
            len: 0,
            ready: AtomicBool::new(false),
        }
    }

    /// Producer side: feed one inbound byte.
    ///
    /// Printable ASCII is appended and echoed; `\r` completes the line and
    /// raises the ready flag; everything else — including bytes past
    /// capacity and any byte while a line is pending — is dropped.
    pub fn on_byte(&mut self, byte: u8) -> RxAction {
        if self.ready.load(Ordering::Acquire) {
            return RxAction::Dropped;
        }

        if byte == b'\r' {
            self.ready.store(true, Ordering::Release);
            return RxAction::LineReady;
        }

        if (32..127).contains(&byte) && self.len < LINE_CAPACITY {
            self.buf[self.len] = byte;
            self.len += 1;
            return RxAction::Echo(byte);
        }

        RxAction::Dropped
    }

    /// Consumer side: is a completed line pending?
    pub fn line_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Consumer side: copy out the pending line and clear readiness,
    /// re-enabling the producer. Returns `None` when no line is pending.
    pub fn take_line(&mut self) -> Option<heapless::String<LINE_CAPACITY>> {
        if !self.ready.load(Ordering::Acquire) {
            return None;
        }

        let mut out = heapless::String::new();
        for &b in &self.buf[..self.len] {
            // Accepted bytes are printable ASCII, so this cannot overflow
            // the equally sized output string.
            let _ = out.push(b as char);
        }

        self.len = 0;
        self.ready.store(false, Ordering::Release);
        Some(out)
    }
}
