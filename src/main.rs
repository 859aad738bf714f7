//! EnvSentry Firmware — Main Entry Point
//!
//! Cooperative event-driven execution: interrupt sources only raise flags,
//! and a single control loop drains them in fixed order.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                     │
//! │                                                              │
//! │  SerialConsole   MonotonicClock   SocReset   AlertLed        │
//! │  (EventSink+rx)  (MicrosClock)    (ResetPort) (IndicatorPort)│
//! │                                                              │
//! │  ─────────────── Port Trait Boundary ──────────────────      │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────┐      │
//! │  │           MonitorService (pure logic)              │      │
//! │  │  session · alert escalation · tick scheduling      │      │
//! │  └────────────────────────────────────────────────────┘      │
//! │                                                              │
//! │  Dht11 decoder (blocking single-wire handshake)              │
//! └──────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

// ── Module declarations ───────────────────────────────────────
mod adapters;
mod alert;
mod app;
mod config;
mod console;
mod drivers;
mod error;
mod events;
mod pins;
mod scheduler;
mod sensors;

// ── Imports ───────────────────────────────────────────────────
use anyhow::Result;
use log::info;

use esp_idf_svc::hal::delay::FreeRtos;
use esp_idf_svc::hal::gpio::{AnyIOPin, PinDriver};
use esp_idf_svc::hal::peripherals::Peripherals;
use esp_idf_svc::hal::uart::{config::Config as UartConfig, UartDriver};
use esp_idf_svc::hal::units::Hertz;

use adapters::reset::SocReset;
use adapters::serial::SerialConsole;
use adapters::time::MonotonicClock;
use app::service::MonitorService;
use config::MonitorConfig;
use console::line::LineReceiver;
use drivers::status_led::AlertLed;
use drivers::touch::{self, TouchInput};
use sensors::Dht11;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("EnvSentry v{}", env!("CARGO_PKG_VERSION"));

    let peripherals = Peripherals::take()?;

    drivers::hw_init::init_peripherals().map_err(|e| anyhow::anyhow!("hw init: {e}"))?;

    // ── 2. Operator console ───────────────────────────────────
    let uart_cfg = UartConfig::default().baudrate(Hertz(pins::UART_BAUD));
    let uart = UartDriver::new(
        peripherals.uart1,
        peripherals.pins.gpio17,
        peripherals.pins.gpio18,
        Option::<AnyIOPin>::None,
        Option::<AnyIOPin>::None,
        &uart_cfg,
    )?;
    let mut serial = SerialConsole::new(uart);
    let mut rx = LineReceiver::new();

    // ── 3. Sensor, indicator, reset, touch ────────────────────
    let dht_pin = PinDriver::input_output_od(peripherals.pins.gpio4)?;
    let mut dht = Dht11::new(dht_pin, MonotonicClock::new());

    let mut led = AlertLed::new(pins::ALERT_LED_GPIO);
    let mut reset = SocReset;
    let mut touch_input = TouchInput::new();

    // ── 4. Domain service ─────────────────────────────────────
    let config = MonitorConfig::default();
    let base_tick_ms = config.base_tick_interval_ms;
    let mut service = MonitorService::new(config);

    service.start(&mut serial);

    // The sensor needs about two seconds after power-up before its first
    // conversion is trustworthy.
    FreeRtos::delay_ms(2000);

    drivers::hw_timer::start_base_tick(base_tick_ms);

    info!("System ready. Entering control loop.");

    // ── 5. Control loop ───────────────────────────────────────
    //
    // Fixed drain order per iteration: base ticks → completed line →
    // touch edge. Each flag is cleared by its drain before dispatch of the
    // next source. The sensor handshake inside on_base_tick blocks for its
    // full duration; the UART ring buffer and the atomics absorb whatever
    // arrives meanwhile.
    loop {
        let pending = events::take_pending_ticks();
        for _ in 0..pending {
            // On a sustained panic breach this call never returns — the
            // SocReset adapter reboots the chip.
            let _ = service.on_base_tick(&mut dht, &mut led, &mut reset, &mut serial);
        }

        serial.poll(&mut rx);
        if let Some(line) = rx.take_line() {
            service.on_line(&line, &mut serial);
        }

        if touch_input.poll(touch::latest_edge_ms()) {
            service.on_touch(&mut serial);
        }

        // Park until the next interrupt quantum; the FreeRTOS idle task
        // executes WFI while nothing is runnable.
        FreeRtos::delay_ms(5);
    }
}
