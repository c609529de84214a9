//! System control abstractions

/// Whole-device restart
///
/// Hardware implementations never return from [`restart`](SystemReset::restart):
/// the execution context is discarded and the device boots from power-on
/// state. Simulated implementations record the request and return, so the
/// code after a restart point must not assume it is unreachable.
pub trait SystemReset {
    /// Restart the device
    fn restart(&mut self);
}

impl<T: SystemReset + ?Sized> SystemReset for &mut T {
    fn restart(&mut self) {
        (**self).restart()
    }
}
