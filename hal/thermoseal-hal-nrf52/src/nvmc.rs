//! NVMC driver for the nRF52 UICR
//!
//! Thin register-level implementation of `thermoseal_hal::NvmController`.
//! It does not wait for ready itself; the writer in `thermoseal-core`
//! gates every step and bounds every wait.
//!
//! Erasing the UICR clears every register in it, including `PSELRESET`,
//! `NFCPINS` and `APPROTECT`, not only the customer words.

use core::ops::Range;

use embassy_nrf::pac;
use embassy_nrf::pac::nvmc::vals::Wen;
use embassy_nrf::peripherals::NVMC;
use embassy_nrf::Peri;

use thermoseal_hal::{NvmController, WriteMode};

/// UICR base address
pub const UICR_BASE: u32 = 0x1000_1000;

/// UICR size on nRF52832 (up to and including `NFCPINS`)
pub const UICR_SIZE: u32 = 0x210;

/// Customer registers `CUSTOMER[0..32]`
pub const UICR_CUSTOMER: Range<u32> = 0x1000_1080..0x1000_1100;

/// NVMC over the UICR
///
/// Holding the NVMC peripheral singleton guarantees nothing else in the
/// firmware drives the mode register while the sequence runs.
pub struct Nrf52Nvmc<'d> {
    _nvmc: Peri<'d, NVMC>,
}

impl<'d> Nrf52Nvmc<'d> {
    /// Take ownership of the NVMC
    pub fn new(nvmc: Peri<'d, NVMC>) -> Self {
        Self { _nvmc: nvmc }
    }

    fn regs() -> pac::nvmc::Nvmc {
        pac::NVMC
    }
}

impl<'d> NvmController for Nrf52Nvmc<'d> {
    fn region(&self) -> Range<u32> {
        UICR_BASE..UICR_BASE + UICR_SIZE
    }

    fn set_mode(&mut self, mode: WriteMode) {
        let wen = match mode {
            WriteMode::ReadOnly => Wen::REN,
            WriteMode::EraseEnabled => Wen::EEN,
            WriteMode::WriteEnabled => Wen::WEN,
        };
        Self::regs().config().write(|w| w.set_wen(wen));
    }

    fn erase_region(&mut self) {
        Self::regs().eraseuicr().write(|w| w.set_eraseuicr(true));
    }

    #[allow(unsafe_code)]
    fn write_word(&mut self, address: u32, word: u32) {
        debug_assert!(self.region().contains(&address) && address % 4 == 0);
        // SAFETY: the address is a word-aligned UICR register (checked by the
        // writer before the sequence starts) and the NVMC is in write mode.
        unsafe { core::ptr::write_volatile(address as *mut u32, word) };
    }

    #[allow(unsafe_code)]
    fn read_word(&mut self, address: u32) -> u32 {
        debug_assert!(self.region().contains(&address) && address % 4 == 0);
        // SAFETY: UICR is memory-mapped and always readable.
        unsafe { core::ptr::read_volatile(address as *const u32) }
    }

    fn is_ready(&mut self) -> bool {
        Self::regs().ready().read().ready()
    }
}
