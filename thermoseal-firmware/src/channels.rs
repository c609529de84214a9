//! Inter-task communication
//!
//! The poll loop owns the commit path; the LED task only reacts to what it
//! is told here.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

use thermoseal_core::CommitError;

/// Outcome shown on the status LEDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum LedStatus {
    /// Commit abandoned; the device is still running
    Rejected(CommitError),
}

/// Latest status for the LED task (updated by the poll loop)
pub static LED_STATUS: Signal<CriticalSectionRawMutex, LedStatus> = Signal::new();
