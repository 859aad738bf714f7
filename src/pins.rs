//! GPIO / peripheral pin assignments for the EnvSentry board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Sensor
// ---------------------------------------------------------------------------

/// DHT11 single-wire data line (open-drain, external 4.7 kΩ pull-up).
pub const DHT_DATA_GPIO: i32 = 4;

// ---------------------------------------------------------------------------
// Operator inputs
// ---------------------------------------------------------------------------

/// TTP223 capacitive touch pad — digital output, rising edge on press.
pub const TOUCH_GPIO: i32 = 5;

// ---------------------------------------------------------------------------
// Indicators
// ---------------------------------------------------------------------------

/// Alert indicator LED (active HIGH).
pub const ALERT_LED_GPIO: i32 = 6;

// ---------------------------------------------------------------------------
// UART console
// ---------------------------------------------------------------------------

pub const UART_TX_GPIO: i32 = 17;
pub const UART_RX_GPIO: i32 = 18;
/// Operator console baud rate.
pub const UART_BAUD: u32 = 115_200;
