//! Unified error types for the EnvSentry firmware.
//!
//! A single `Error` enum that every subsystem can convert into, keeping the
//! top-level control loop's error handling uniform. All variants are `Copy`
//! so they can be cheaply threaded through the alert engine and event sink
//! without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The single-wire sensor handshake or frame failed.
    Decode(DecodeError),
    /// An operator line was rejected.
    Command(CommandError),
    /// Peripheral initialisation failed.
    Init(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decode(e) => write!(f, "sensor: {e}"),
            Self::Command(e) => write!(f, "command: {e}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Sensor decode errors
// ---------------------------------------------------------------------------

/// Phase of the single-wire handshake in which a timeout occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolPhase {
    /// The sensor's low-then-high acknowledgement after the request signal.
    Ack,
    /// The low pulse that starts each data bit.
    BitLow,
    /// The high pulse whose length encodes the bit value.
    BitHigh,
}

impl fmt::Display for ProtocolPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ack => write!(f, "ack"),
            Self::BitLow => write!(f, "bit-low"),
            Self::BitHigh => write!(f, "bit-high"),
        }
    }
}

/// Failures of a single sensor read attempt.
///
/// All variants are recovered locally: the previous reading is retained and
/// the next attempt happens on the next sampling tick. The decoder itself
/// never retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// The line did not reach the expected level within the phase budget.
    Timeout(ProtocolPhase),
    /// Byte 4 of the frame does not match the sum of bytes 0–3 mod 256.
    ChecksumMismatch,
    /// The data pin itself could not be read or driven.
    Pin,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout(phase) => write!(f, "timeout waiting for {phase} edge"),
            Self::ChecksumMismatch => write!(f, "frame checksum mismatch"),
            Self::Pin => write!(f, "data pin access failed"),
        }
    }
}

impl From<DecodeError> for Error {
    fn from(e: DecodeError) -> Self {
        Self::Decode(e)
    }
}

// ---------------------------------------------------------------------------
// Operator command errors
// ---------------------------------------------------------------------------

/// Rejections of operator input. Reported through the event sink; the loop
/// continues and no state changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandError {
    /// Line did not match the injected credential.
    CredentialMismatch,
    /// Line is not a recognised command in the monitoring phase.
    UnknownCommand,
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CredentialMismatch => write!(f, "credential mismatch"),
            Self::UnknownCommand => write!(f, "unknown command"),
        }
    }
}

impl From<CommandError> for Error {
    fn from(e: CommandError) -> Self {
        Self::Command(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
