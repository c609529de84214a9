//! Protected non-volatile memory controller abstraction
//!
//! Models a memory controller in the style of the nRF52 NVMC guarding a
//! UICR-like configuration region:
//!
//! - a write-control mode register (read-only / erase-enabled / write-enabled)
//! - a whole-region erase trigger
//! - a ready flag that drops while an operation is in progress
//!
//! The contract implementations expose is deliberately thin. Sequencing,
//! ready-gating and timeouts belong to the caller.

use core::ops::Range;

/// Write-control mode register values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WriteMode {
    /// Reads only; erase and program requests are ignored by hardware
    ReadOnly,
    /// Erase requests are accepted
    EraseEnabled,
    /// Word writes are accepted
    WriteEnabled,
}

/// Memory controller guarding one protected configuration region
///
/// Callers must only change mode or issue an operation while
/// [`is_ready`](NvmController::is_ready) reports true.
pub trait NvmController {
    /// Address range of the protected region
    ///
    /// Every address passed to [`write_word`](NvmController::write_word)
    /// and [`read_word`](NvmController::read_word) must lie inside it.
    fn region(&self) -> Range<u32>;

    /// Write the mode register
    fn set_mode(&mut self, mode: WriteMode);

    /// Start an erase of the entire region
    ///
    /// Requires [`WriteMode::EraseEnabled`]. Every word in the region returns
    /// to the erased value, not just the one about to be written.
    fn erase_region(&mut self);

    /// Store one word at `address`
    ///
    /// Requires [`WriteMode::WriteEnabled`] and a 4-byte aligned address.
    fn write_word(&mut self, address: u32, word: u32);

    /// Read one word at `address`
    fn read_word(&mut self, address: u32) -> u32;

    /// Whether the controller has finished its last operation
    fn is_ready(&mut self) -> bool;
}

impl<T: NvmController + ?Sized> NvmController for &mut T {
    fn region(&self) -> Range<u32> {
        (**self).region()
    }

    fn set_mode(&mut self, mode: WriteMode) {
        (**self).set_mode(mode)
    }

    fn erase_region(&mut self) {
        (**self).erase_region()
    }

    fn write_word(&mut self, address: u32, word: u32) {
        (**self).write_word(address, word)
    }

    fn read_word(&mut self, address: u32) -> u32 {
        (**self).read_word(address)
    }

    fn is_ready(&mut self) -> bool {
        (**self).is_ready()
    }
}

/// Value of an erased word
pub const ERASED_WORD: u32 = 0xFFFF_FFFF;
