//! Board-agnostic calibration-commit logic for the Thermoseal firmware
//!
//! This crate contains everything that does not depend on a specific chip:
//!
//! - Calibration record and its packed word layout
//! - Erase/program sequence against an abstract memory controller
//! - Commit trigger (button debounce latch)
//! - Commit controller (encode → write → restart)
//! - Configuration types and parser
//! - Status LED bank

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod controller;
pub mod indicator;
pub mod record;
pub mod trigger;
pub mod writer;

pub use controller::{CommitController, CommitError, CommitObserver};
pub use indicator::{rejection_led, LedBank};
pub use record::{decode, encode, CalibrationRecord, Field, FieldOverflow, PackedWord};
pub use trigger::{CommitRequest, CommitTrigger, Latch};
pub use writer::{NonVolatileWriter, Phase, WriteError, WriterState};
