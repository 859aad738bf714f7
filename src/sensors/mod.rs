//! Sensor subsystem — the single-wire humidity/temperature decoder.

pub mod dht11;

pub use dht11::{Dht11, MicrosClock, RawReading};
