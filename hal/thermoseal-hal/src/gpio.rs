//! GPIO pin abstractions
//!
//! Provides traits for digital input and output pins, plus [`Digital`], an
//! adapter that lifts any `embedded-hal` 1.0 pin into these traits.

use embedded_hal::digital;

/// Digital output pin
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }
}

/// Digital input pin
///
/// Reads take `&mut self` to match `embedded-hal` 1.0, where sampling a pin
/// may touch peripheral state.
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&mut self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&mut self) -> bool {
        !self.is_high()
    }
}

/// Adapter from `embedded-hal` 1.0 digital pins
///
/// A failed input read is reported as high. The commit button is active-low
/// with a pull-up, so an unreadable pin looks released and can never
/// authorize a commit. A failed output write is dropped; the output pins in
/// this firmware are cosmetic.
#[derive(Debug)]
pub struct Digital<P>(pub P);

impl<P> Digital<P> {
    /// Wrap an `embedded-hal` pin
    pub const fn new(pin: P) -> Self {
        Self(pin)
    }

    /// Release the wrapped pin
    pub fn into_inner(self) -> P {
        self.0
    }
}

impl<P: digital::InputPin> InputPin for Digital<P> {
    fn is_high(&mut self) -> bool {
        self.0.is_high().unwrap_or(true)
    }
}

impl<P: digital::OutputPin> OutputPin for Digital<P> {
    fn set_high(&mut self) {
        let _ = self.0.set_high();
    }

    fn set_low(&mut self) {
        let _ = self.0.set_low();
    }
}
