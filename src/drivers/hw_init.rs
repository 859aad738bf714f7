//! One-shot hardware peripheral initialization.
//!
//! Configures GPIO directions and the touch-edge interrupt using raw
//! ESP-IDF sys calls. Called once from `main()` before the event loop
//! starts.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
use crate::pins;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    GpioConfigFailed(i32),
    IsrInstallFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
            Self::IsrInstallFailed(rc) => write!(f, "GPIO ISR service install failed (rc={})", rc),
        }
    }
}

// ── Init entry point ──────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before the event loop; single-threaded.
    unsafe {
        init_alert_led()?;
        init_touch_input()?;
    }
    info!("hw_init: GPIO + touch ISR configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── Alert LED output ──────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_alert_led() -> Result<(), HwInitError> {
    let cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pins::ALERT_LED_GPIO,
        mode: gpio_mode_t_GPIO_MODE_OUTPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    };
    let ret = unsafe { gpio_config(&cfg) };
    if ret != ESP_OK {
        return Err(HwInitError::GpioConfigFailed(ret));
    }
    let ret = unsafe { gpio_set_level(pins::ALERT_LED_GPIO, 0) };
    if ret != ESP_OK {
        return Err(HwInitError::GpioConfigFailed(ret));
    }
    Ok(())
}

/// Drive an output GPIO. No-op on host targets.
#[cfg(target_os = "espidf")]
pub fn gpio_write(gpio: i32, on: bool) {
    // SAFETY: pin configured as output during init; level writes are atomic
    // at the register level.
    unsafe {
        gpio_set_level(gpio, u32::from(on));
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(_gpio: i32, _on: bool) {}

// ── Touch input + edge ISR ────────────────────────────────────

/// Rising-edge ISR for the touch pad: stamp the edge time and return.
/// All debounce and dispatch happens on the loop side.
#[cfg(target_os = "espidf")]
unsafe extern "C" fn touch_gpio_isr(_arg: *mut core::ffi::c_void) {
    // SAFETY: esp_timer_get_time is IRAM-safe; the handler only stores one
    // atomic.
    let now_ms = (unsafe { esp_timer_get_time() } / 1000) as u32;
    // 0 is the "no edge yet" sentinel — avoid it for a boot-instant edge.
    crate::drivers::touch::touch_isr_handler(now_ms.max(1));
}

#[cfg(target_os = "espidf")]
unsafe fn init_touch_input() -> Result<(), HwInitError> {
    let cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pins::TOUCH_GPIO,
        mode: gpio_mode_t_GPIO_MODE_INPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_ENABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_POSEDGE,
    };
    let ret = unsafe { gpio_config(&cfg) };
    if ret != ESP_OK {
        return Err(HwInitError::GpioConfigFailed(ret));
    }

    let ret = unsafe { gpio_install_isr_service(0) };
    if ret != ESP_OK && ret != ESP_ERR_INVALID_STATE {
        return Err(HwInitError::IsrInstallFailed(ret));
    }
    let ret = unsafe {
        gpio_isr_handler_add(
            pins::TOUCH_GPIO,
            Some(touch_gpio_isr),
            core::ptr::null_mut(),
        )
    };
    if ret != ESP_OK {
        return Err(HwInitError::IsrInstallFailed(ret));
    }
    Ok(())
}
