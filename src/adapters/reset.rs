//! SoC reset adapter.
//!
//! The panic escalation path calls this exactly once; on hardware the call
//! does not return and the device re-enters its boot sequence (credential
//! gate included). The host variant only logs, which keeps the simulated
//! loop observable.

use crate::app::ports::ResetPort;

pub struct SocReset;

impl ResetPort for SocReset {
    #[cfg(target_os = "espidf")]
    fn system_reset(&mut self) {
        // SAFETY: esp_restart never returns; all peripherals are reset by
        // the ROM bootloader.
        unsafe { esp_idf_svc::sys::esp_restart() };
    }

    #[cfg(not(target_os = "espidf"))]
    fn system_reset(&mut self) {
        log::error!("reset(sim): unconditional system reset requested");
    }
}
