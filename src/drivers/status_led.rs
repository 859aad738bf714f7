//! Alert indicator LED driver.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the indicator GPIO via hw_init.
//! On host/test: tracks state in-memory only.

use crate::app::ports::IndicatorPort;
use crate::drivers::hw_init;

pub struct AlertLed {
    gpio: i32,
    on: bool,
}

impl AlertLed {
    pub fn new(gpio: i32) -> Self {
        Self { gpio, on: false }
    }

    pub fn is_on(&self) -> bool {
        self.on
    }
}

impl IndicatorPort for AlertLed {
    fn set(&mut self, on: bool) {
        hw_init::gpio_write(self.gpio, on);
        self.on = on;
    }

    fn toggle(&mut self) {
        let next = !self.on;
        self.set(next);
    }
}
