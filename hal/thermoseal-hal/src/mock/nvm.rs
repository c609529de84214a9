//! Mock memory controller
//!
//! Simulates a UICR-like region behind an NVMC-like controller. Supports:
//! - NOR semantics (programming can only clear bits; erase sets all bits)
//! - Mode gating (erase/program requests ignored in the wrong mode)
//! - Configurable busy time per operation
//! - Stalling after a given operation, for timeout testing
//! - Bit faults on program, for verify testing
//! - An operation log, and a count of operations issued while busy

use core::ops::Range;

use heapless::Vec;

use crate::nvm::{NvmController, WriteMode, ERASED_WORD};

/// Base address of the simulated region (nRF52 UICR base)
pub const MOCK_REGION_BASE: u32 = 0x1000_1000;

/// Size of the simulated region in words
pub const MOCK_REGION_WORDS: usize = 256;

/// Maximum operations kept in the log
const LOG_CAPACITY: usize = 64;

/// Operation observed by the mock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NvmOp {
    SetMode(WriteMode),
    EraseRegion,
    WriteWord { address: u32, word: u32 },
    ReadWord { address: u32 },
}

/// Mock memory controller
#[derive(Debug)]
pub struct MockNvmc {
    words: [u32; MOCK_REGION_WORDS],
    mode: WriteMode,
    /// Polls each mutating operation stays busy for
    busy_polls: u32,
    /// Polls left before the current operation completes
    busy_remaining: u32,
    /// Mutating operation index after which the controller never becomes ready
    stall_after: Option<usize>,
    stalled: bool,
    /// Bits cleared on top of every programmed word
    write_fault: u32,
    mutations: usize,
    polls: u32,
    busy_violations: u32,
    log: Vec<NvmOp, LOG_CAPACITY>,
}

impl Default for MockNvmc {
    fn default() -> Self {
        Self::new()
    }
}

impl MockNvmc {
    /// Create a controller over a factory-fresh (erased) region
    pub fn new() -> Self {
        Self {
            words: [ERASED_WORD; MOCK_REGION_WORDS],
            mode: WriteMode::ReadOnly,
            busy_polls: 3,
            busy_remaining: 0,
            stall_after: None,
            stalled: false,
            write_fault: 0,
            mutations: 0,
            polls: 0,
            busy_violations: 0,
            log: Vec::new(),
        }
    }

    /// Set how many polls each operation reports busy for
    pub fn with_busy_polls(mut self, polls: u32) -> Self {
        self.busy_polls = polls;
        self
    }

    /// Never become ready again once the `index`-th (0-based) mutating
    /// operation has been issued
    pub fn stall_after(mut self, index: usize) -> Self {
        self.stall_after = Some(index);
        self
    }

    /// Clear `mask` bits on every programmed word
    pub fn with_write_fault(mut self, mask: u32) -> Self {
        self.write_fault = mask;
        self
    }

    /// Preload a word, bypassing the controller (e.g. bootloader settings
    /// already present in the region)
    pub fn preload(&mut self, address: u32, word: u32) {
        if let Some(index) = self.index_of(address) {
            self.words[index] = word;
        }
    }

    /// Word currently stored at `address`
    pub fn word_at(&self, address: u32) -> u32 {
        self.index_of(address)
            .map(|index| self.words[index])
            .unwrap_or(ERASED_WORD)
    }

    /// Current mode register value
    pub fn mode(&self) -> WriteMode {
        self.mode
    }

    /// Operations issued so far, in order
    pub fn log(&self) -> &[NvmOp] {
        &self.log
    }

    /// Mutating operations only (reads filtered out)
    pub fn mutations(&self) -> impl Iterator<Item = &NvmOp> {
        self.log
            .iter()
            .filter(|op| !matches!(op, NvmOp::ReadWord { .. }))
    }

    /// Number of operations issued while the controller was busy
    pub fn busy_violations(&self) -> u32 {
        self.busy_violations
    }

    /// Total ready polls observed
    pub fn polls(&self) -> u32 {
        self.polls
    }

    /// Whether every word in the region is erased
    pub fn is_blank(&self) -> bool {
        self.words.iter().all(|&w| w == ERASED_WORD)
    }

    fn index_of(&self, address: u32) -> Option<usize> {
        if !self.region().contains(&address) || address % 4 != 0 {
            return None;
        }
        Some(((address - MOCK_REGION_BASE) / 4) as usize)
    }

    fn record(&mut self, op: NvmOp) {
        // Oldest entries win; tests never need more than a few sequences
        let _ = self.log.push(op);
    }

    fn begin_mutation(&mut self, op: NvmOp) {
        if self.busy_remaining > 0 || self.stalled {
            self.busy_violations += 1;
        }
        self.record(op);

        if self.stall_after == Some(self.mutations) {
            self.stalled = true;
        }
        self.mutations += 1;
        self.busy_remaining = self.busy_polls;
    }
}

impl NvmController for MockNvmc {
    fn region(&self) -> Range<u32> {
        MOCK_REGION_BASE..MOCK_REGION_BASE + (MOCK_REGION_WORDS as u32) * 4
    }

    fn set_mode(&mut self, mode: WriteMode) {
        self.begin_mutation(NvmOp::SetMode(mode));
        self.mode = mode;
    }

    fn erase_region(&mut self) {
        self.begin_mutation(NvmOp::EraseRegion);
        if self.mode == WriteMode::EraseEnabled {
            self.words = [ERASED_WORD; MOCK_REGION_WORDS];
        }
    }

    fn write_word(&mut self, address: u32, word: u32) {
        self.begin_mutation(NvmOp::WriteWord { address, word });
        if self.mode != WriteMode::WriteEnabled {
            return;
        }
        if let Some(index) = self.index_of(address) {
            // NOR flash: programming only clears bits
            self.words[index] &= word & !self.write_fault;
        }
    }

    fn read_word(&mut self, address: u32) -> u32 {
        self.record(NvmOp::ReadWord { address });
        self.word_at(address)
    }

    fn is_ready(&mut self) -> bool {
        self.polls = self.polls.saturating_add(1);
        if self.stalled {
            return false;
        }
        if self.busy_remaining > 0 {
            self.busy_remaining -= 1;
            return false;
        }
        true
    }
}
