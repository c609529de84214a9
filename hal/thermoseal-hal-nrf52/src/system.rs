//! System reset via the Cortex-M SCB

use thermoseal_hal::SystemReset;

/// Requests a full system reset through `AIRCR.SYSRESETREQ`
///
/// UICR contents are latched into the peripherals only at reset, so this is
/// what makes a freshly committed word take effect.
#[derive(Debug, Default)]
pub struct CortexReset;

impl CortexReset {
    pub fn new() -> Self {
        Self
    }
}

impl SystemReset for CortexReset {
    fn restart(&mut self) {
        cortex_m::peripheral::SCB::sys_reset()
    }
}
