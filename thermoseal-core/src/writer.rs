//! Erase-then-program sequence for the protected configuration region
//!
//! The sequence is fixed:
//!
//! ```text
//! ReadOnly ─enable erase─▶ EraseEnabled ─erase region─▶ (ready)
//!          ─enable write─▶ WriteEnabled ─program word─▶ (ready)
//!          ─restore─────▶ ReadOnly ─verify─▶ done
//! ```
//!
//! Every step waits for the controller to report ready before the next one
//! starts. Waits are bounded by a poll limit; a wait that never resolves
//! fails with [`WriteError::HardwareTimeout`] naming the phase.
//!
//! The erase is destructive to the whole region and there is no undo.

use thermoseal_hal::{NvmController, WriteMode};

use crate::record::PackedWord;

/// Default ready-poll limit per phase
///
/// nRF52 UICR erase takes up to ~170 ms; at 64 MHz a volatile poll loop
/// spins well under this many times in that window.
pub const DEFAULT_READY_POLL_LIMIT: u32 = 8_000_000;

/// Polls granted to the best-effort return to read-only after a failure
const RECOVERY_POLL_LIMIT: u32 = 10_000;

/// Mode the writer last put the controller into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WriterState {
    ReadOnly,
    EraseEnabled,
    WriteEnabled,
}

impl From<WriteMode> for WriterState {
    fn from(mode: WriteMode) -> Self {
        match mode {
            WriteMode::ReadOnly => WriterState::ReadOnly,
            WriteMode::EraseEnabled => WriterState::EraseEnabled,
            WriteMode::WriteEnabled => WriterState::WriteEnabled,
        }
    }
}

/// Step of the sequence being waited on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    EnableErase,
    EraseRegion,
    EnableWrite,
    Program,
    RestoreReadOnly,
}

/// Errors from the erase/program sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WriteError {
    /// Target address is misaligned or outside the controller's region.
    /// Raised before any hardware interaction.
    AddressOutOfRegion(u32),
    /// Controller stayed busy past the poll limit. The region contents are
    /// indeterminate.
    HardwareTimeout { phase: Phase },
    /// Read-back after programming did not match
    VerifyMismatch { expected: u32, found: u32 },
}

/// Drives one controller through the erase/program sequence
pub struct NonVolatileWriter<C> {
    controller: C,
    address: u32,
    poll_limit: u32,
    state: WriterState,
}

impl<C: NvmController> NonVolatileWriter<C> {
    /// Create a writer targeting `address`
    ///
    /// The controller is assumed to be in read-only mode, which is its
    /// reset state.
    pub fn new(controller: C, address: u32) -> Self {
        Self {
            controller,
            address,
            poll_limit: DEFAULT_READY_POLL_LIMIT,
            state: WriterState::ReadOnly,
        }
    }

    /// Override the per-phase ready-poll limit (minimum 1)
    pub fn with_poll_limit(mut self, poll_limit: u32) -> Self {
        self.poll_limit = poll_limit.max(1);
        self
    }

    /// Target address
    pub fn address(&self) -> u32 {
        self.address
    }

    /// Mode the writer last set
    pub fn state(&self) -> WriterState {
        self.state
    }

    /// Access the controller (for inspection)
    pub fn controller(&self) -> &C {
        &self.controller
    }

    /// Release the controller
    pub fn into_inner(self) -> C {
        self.controller
    }

    /// Erase the region and program `word` at the target address
    ///
    /// On success the controller is back in read-only mode and the target
    /// holds exactly `word`. Everything else in the region is erased.
    pub fn commit(&mut self, word: PackedWord) -> Result<(), WriteError> {
        self.check_address()?;

        match self.sequence(word.bits()) {
            Ok(()) => self.verify(word.bits()),
            Err(e) => {
                self.recover();
                Err(e)
            }
        }
    }

    fn check_address(&self) -> Result<(), WriteError> {
        let region = self.controller.region();
        let in_region = region.contains(&self.address)
            && self.address.checked_add(4).is_some_and(|end| end <= region.end);

        if self.address % 4 != 0 || !in_region {
            return Err(WriteError::AddressOutOfRegion(self.address));
        }
        Ok(())
    }

    fn sequence(&mut self, word: u32) -> Result<(), WriteError> {
        self.enter(WriteMode::EraseEnabled, Phase::EnableErase)?;

        self.controller.erase_region();
        self.wait_ready(Phase::EraseRegion)?;

        self.enter(WriteMode::WriteEnabled, Phase::EnableWrite)?;

        self.controller.write_word(self.address, word);
        self.wait_ready(Phase::Program)?;

        self.enter(WriteMode::ReadOnly, Phase::RestoreReadOnly)
    }

    fn enter(&mut self, mode: WriteMode, phase: Phase) -> Result<(), WriteError> {
        self.controller.set_mode(mode);
        self.state = mode.into();
        self.wait_ready(phase)
    }

    /// Spin until ready, at most `poll_limit` polls
    fn wait_ready(&mut self, phase: Phase) -> Result<(), WriteError> {
        if spin_until_ready(&mut self.controller, self.poll_limit) {
            Ok(())
        } else {
            Err(WriteError::HardwareTimeout { phase })
        }
    }

    fn verify(&mut self, expected: u32) -> Result<(), WriteError> {
        let found = self.controller.read_word(self.address);
        if found != expected {
            return Err(WriteError::VerifyMismatch { expected, found });
        }
        Ok(())
    }

    /// Best-effort return to read-only after a failed phase
    ///
    /// Only issued once the controller reports ready again; a controller
    /// that stays busy is left alone.
    fn recover(&mut self) {
        if self.state == WriterState::ReadOnly {
            return;
        }
        if !spin_until_ready(&mut self.controller, RECOVERY_POLL_LIMIT) {
            return;
        }
        self.controller.set_mode(WriteMode::ReadOnly);
        self.state = WriterState::ReadOnly;
        let _ = spin_until_ready(&mut self.controller, RECOVERY_POLL_LIMIT);
    }
}

fn spin_until_ready<C: NvmController>(controller: &mut C, limit: u32) -> bool {
    for _ in 0..limit {
        if controller.is_ready() {
            return true;
        }
        core::hint::spin_loop();
    }
    false
}
