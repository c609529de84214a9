//! nRF52-specific HAL for the Thermoseal firmware
//!
//! This crate provides nRF52 implementations of the shared
//! `thermoseal-hal` traits:
//!
//! - NVMC driver over the UICR (implements `thermoseal_hal::NvmController`)
//! - System reset through the Cortex-M SCB (implements `thermoseal_hal::SystemReset`)
//! - Development-kit pin map
//!
//! GPIO goes through `thermoseal_hal::gpio::Digital`, which adapts the
//! `embedded-hal` pins embassy-nrf already provides.

#![no_std]

pub mod nvmc;
pub mod pins;
pub mod system;

// Re-export shared traits from thermoseal-hal for convenience
pub use thermoseal_hal::{NvmController, SystemReset, WriteMode};
