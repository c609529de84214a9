//! Mock GPIO pins for testing

use crate::gpio::{InputPin, OutputPin};

/// Mock input pin
///
/// Starts high (released, as with a pull-up) and counts reads.
#[derive(Debug)]
pub struct MockInputPin {
    high: bool,
    reads: u32,
}

impl Default for MockInputPin {
    fn default() -> Self {
        Self::new()
    }
}

impl MockInputPin {
    /// Create a pin reading high
    pub fn new() -> Self {
        Self {
            high: true,
            reads: 0,
        }
    }

    /// Drive the simulated level
    pub fn set_level(&mut self, high: bool) {
        self.high = high;
    }

    /// Number of times the pin has been sampled
    pub fn reads(&self) -> u32 {
        self.reads
    }
}

impl InputPin for MockInputPin {
    fn is_high(&mut self) -> bool {
        self.reads += 1;
        self.high
    }
}

/// Mock output pin
///
/// Tracks the driven level and the number of level changes.
#[derive(Debug, Default)]
pub struct MockOutputPin {
    high: bool,
    edges: u32,
}

impl MockOutputPin {
    /// Create a pin driven low
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the pin is currently driven high
    pub fn is_set_high(&self) -> bool {
        self.high
    }

    /// Number of level changes driven so far
    pub fn edges(&self) -> u32 {
        self.edges
    }

    fn drive(&mut self, high: bool) {
        if self.high != high {
            self.edges += 1;
        }
        self.high = high;
    }
}

impl OutputPin for MockOutputPin {
    fn set_high(&mut self) {
        self.drive(true);
    }

    fn set_low(&mut self) {
        self.drive(false);
    }
}
