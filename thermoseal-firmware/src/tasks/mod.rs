//! Embassy async tasks
//!
//! The commit itself runs in the main poll loop; tasks here are decoration.

pub mod led;

pub use led::{dk_leds, led_task, Leds};
