//! Base tick timer using ESP-IDF's esp_timer API.
//!
//! One periodic timer raises the base tick that the scheduler derives the
//! sampling and blink periods from. The callback executes in the ESP timer
//! task context (not ISR), so it can safely bump the pending-tick atomic.
//!
//! On simulation targets the loop drives ticks itself via sleep.

#[cfg(target_os = "espidf")]
use crate::events::isr_base_tick;

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
static mut BASE_TIMER: esp_timer_handle_t = core::ptr::null_mut();

#[cfg(target_os = "espidf")]
unsafe extern "C" fn base_tick_cb(_arg: *mut core::ffi::c_void) {
    isr_base_tick();
}

/// Start the base tick timer at `period_ms`.
#[cfg(target_os = "espidf")]
pub fn start_base_tick(period_ms: u32) {
    // SAFETY: BASE_TIMER is written here once at boot from the single
    // main-task context before any timer callbacks fire. The callback only
    // bumps an atomic, which is ISR-safe.
    unsafe {
        let args = esp_timer_create_args_t {
            callback: Some(base_tick_cb),
            arg: core::ptr::null_mut(),
            dispatch_method: esp_timer_dispatch_t_ESP_TIMER_TASK,
            name: b"base_tick\0".as_ptr() as *const _,
            skip_unhandled_events: false,
        };
        let ret = esp_timer_create(&args, &raw mut BASE_TIMER);
        if ret != ESP_OK {
            log::error!(
                "hw_timer: base tick create failed (rc={}) — continuing without ticks",
                ret
            );
            return;
        }
        let ret = esp_timer_start_periodic(BASE_TIMER, u64::from(period_ms) * 1000);
        if ret != ESP_OK {
            log::error!("hw_timer: base tick start failed (rc={})", ret);
            return;
        }
        info!("hw_timer: base tick @ {} ms", period_ms);
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn start_base_tick(period_ms: u32) {
    let _ = period_ms;
    log::info!("hw_timer(sim): base tick driven by the sleep loop");
}

/// Stop the base tick timer.
#[cfg(target_os = "espidf")]
pub fn stop_base_tick() {
    // SAFETY: BASE_TIMER is a valid handle if start_base_tick() succeeded;
    // null-check prevents touching an uncreated timer.
    unsafe {
        let timer = *(&raw const BASE_TIMER);
        if !timer.is_null() {
            esp_timer_stop(timer);
        }
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn stop_base_tick() {}
