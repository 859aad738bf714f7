//! DHT11 single-wire protocol decoder.
//!
//! The sensor multiplexes request and response over one open-drain data
//! line. The MCU holds the line low to request a conversion, releases it,
//! and the sensor answers with an ack pulse followed by 40 bits whose values
//! are encoded in the *length* of each high pulse:
//!
//! ```text
//!  MCU:   ──┐ 20 ms ┌─30µs─┐
//!           └───────┘      │  (release — sensor drives from here)
//!  DHT:                    └──80µs──┐──80µs──┐ 50µs ┌──26/70µs──┐ ...
//!                            ack lo │ ack hi └──────┘  bit high
//! ```
//!
//! Rather than measuring pulse durations, the decoder waits for each rising
//! edge and samples the line once at a fixed 40 µs offset — past the end of
//! a short (0) pulse, inside a long (1) pulse. All waits are deadline checks
//! against a monotonic microsecond clock, so a wedged line fails fast with a
//! typed timeout instead of hanging the control loop.
//!
//! The handshake deliberately blocks the control task for its full duration
//! (≈25 ms); pending tick/line/touch notifications are drained by the loop
//! right after it returns.
//!
//! The decoder never retries. A failed attempt surfaces as a
//! [`DecodeError`]; the caller keeps the previous reading and tries again on
//! the next sampling tick.

use embedded_hal::digital::{InputPin, OutputPin};

use crate::app::ports::SensorPort;
use crate::error::{DecodeError, ProtocolPhase};

// ── Protocol timing budgets (µs unless noted) ────────────────

/// Request: hold the line low (datasheet minimum 18 ms).
const START_LOW_US: u32 = 20_000;
/// Request: release high before handing the line to the sensor.
const START_RELEASE_US: u32 = 30;
/// Budget for each half of the sensor's ack pulse.
const ACK_TIMEOUT_US: u32 = 80;
/// Budget for the low pulse that starts each bit.
const BIT_LOW_TIMEOUT_US: u32 = 60;
/// Budget for the rising edge of each bit's high pulse.
const BIT_HIGH_TIMEOUT_US: u32 = 70;
/// Fixed sample offset after the rising edge: past a short (≈26 µs) pulse,
/// inside a long (≈70 µs) one.
const BIT_SAMPLE_DELAY_US: u32 = 40;

/// Bytes per response frame: humidity int/frac, temperature int/frac,
/// checksum.
const FRAME_BYTES: usize = 5;

// ── Clock abstraction ────────────────────────────────────────

/// Monotonic microsecond clock with a short busy-wait.
///
/// The decoder's deadlines are expressed against `now_us()`; `delay_us()` is
/// only used for the request signal, the fixed sample offset, and the 1 µs
/// poll cadence.
pub trait MicrosClock {
    /// Microseconds since boot, monotonic.
    fn now_us(&self) -> u64;
    /// Busy-wait for `us` microseconds.
    fn delay_us(&mut self, us: u32);
}

// ── Reading ──────────────────────────────────────────────────

/// Integer reading extracted from one frame. The fractional bytes the
/// sensor family reserves are ignored by this controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawReading {
    /// Relative humidity, % (frame byte 0).
    pub humidity_pct: u8,
    /// Temperature, °C (frame byte 2).
    pub temperature_c: u8,
}

/// Validate a frame's checksum and extract the integer reading.
///
/// Byte 4 must equal the sum of bytes 0–3 modulo 256.
pub fn decode_frame(frame: &[u8; FRAME_BYTES]) -> Result<RawReading, DecodeError> {
    let sum = frame[0]
        .wrapping_add(frame[1])
        .wrapping_add(frame[2])
        .wrapping_add(frame[3]);
    if frame[4] != sum {
        return Err(DecodeError::ChecksumMismatch);
    }
    Ok(RawReading {
        humidity_pct: frame[0],
        temperature_c: frame[2],
    })
}

// ── Decoder ──────────────────────────────────────────────────

/// Driver for a DHT11 wired to a single open-drain pin.
pub struct Dht11<P, C> {
    pin: P,
    clock: C,
}

impl<P, C> Dht11<P, C>
where
    P: InputPin + OutputPin,
    C: MicrosClock,
{
    pub fn new(pin: P, clock: C) -> Self {
        Self { pin, clock }
    }

    /// Run one full request/response handshake and decode the frame.
    pub fn read(&mut self) -> Result<RawReading, DecodeError> {
        self.send_request()?;

        // Ack: the sensor pulls low, then high, before the first bit.
        self.wait_for_level(false, ACK_TIMEOUT_US, ProtocolPhase::Ack)?;
        self.wait_for_level(true, ACK_TIMEOUT_US, ProtocolPhase::Ack)?;

        let mut frame = [0u8; FRAME_BYTES];
        for byte in &mut frame {
            for bit in (0..8).rev() {
                self.wait_for_level(false, BIT_LOW_TIMEOUT_US, ProtocolPhase::BitLow)?;
                self.wait_for_level(true, BIT_HIGH_TIMEOUT_US, ProtocolPhase::BitHigh)?;

                // Single-sample decision at a fixed offset from the rising
                // edge — not a duration measurement.
                self.clock.delay_us(BIT_SAMPLE_DELAY_US);
                if self.pin.is_high().map_err(|_| DecodeError::Pin)? {
                    *byte |= 1 << bit;
                }
            }
        }

        decode_frame(&frame)
    }

    fn send_request(&mut self) -> Result<(), DecodeError> {
        self.pin.set_low().map_err(|_| DecodeError::Pin)?;
        self.clock.delay_us(START_LOW_US);
        self.pin.set_high().map_err(|_| DecodeError::Pin)?;
        self.clock.delay_us(START_RELEASE_US);
        Ok(())
    }

    /// Poll until the line reaches `high`, failing with a phase-tagged
    /// timeout once the deadline passes.
    fn wait_for_level(
        &mut self,
        high: bool,
        budget_us: u32,
        phase: ProtocolPhase,
    ) -> Result<(), DecodeError> {
        let deadline = self.clock.now_us().saturating_add(u64::from(budget_us));
        loop {
            if self.pin.is_high().map_err(|_| DecodeError::Pin)? == high {
                return Ok(());
            }
            if self.clock.now_us() >= deadline {
                return Err(DecodeError::Timeout(phase));
            }
            self.clock.delay_us(1);
        }
    }
}

impl<P, C> SensorPort for Dht11<P, C>
where
    P: InputPin + OutputPin,
    C: MicrosClock,
{
    fn sample(&mut self) -> Result<RawReading, DecodeError> {
        self.read()
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
