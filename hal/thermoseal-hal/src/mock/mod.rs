//! Mock hardware for testing
//!
//! In-memory implementations of the HAL traits so the commit sequence can be
//! exercised on the host without a device.
//!
//! Available in test builds and when the `mock` feature is enabled.
//!
//! # Example
//!
//! ```
//! use thermoseal_hal::mock::MockNvmc;
//! use thermoseal_hal::{NvmController, WriteMode};
//!
//! let mut nvmc = MockNvmc::new();
//! nvmc.set_mode(WriteMode::WriteEnabled);
//! while !nvmc.is_ready() {}
//! nvmc.write_word(0x1000_1080, 0x00BB_840A);
//! assert_eq!(nvmc.word_at(0x1000_1080), 0x00BB_840A);
//! ```

mod gpio;
mod nvm;
mod system;

pub use gpio::{MockInputPin, MockOutputPin};
pub use nvm::{MockNvmc, NvmOp, MOCK_REGION_BASE, MOCK_REGION_WORDS};
pub use system::MockReset;
