//! Thermoseal Hardware Abstraction Layer
//!
//! This crate defines the hardware seams the calibration-commit core depends
//! on. Chip-specific HALs implement them; the `mock` feature provides
//! simulated implementations so the core can be tested on the host.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  thermoseal-core / thermoseal-firmware  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  thermoseal-hal (this crate - traits)   │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ thermoseal-   │       │  mock (host   │
//! │   hal-nrf52   │       │    tests)     │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`nvm::NvmController`] - Protected non-volatile memory controller
//! - [`system::SystemReset`] - Whole-device restart

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod nvm;
pub mod system;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export key traits at crate root for convenience
pub use gpio::{InputPin, OutputPin};
pub use nvm::{NvmController, WriteMode};
pub use system::SystemReset;
