//! Status LED bank
//!
//! Decoration only: nothing on the commit path depends on it.

use thermoseal_hal::OutputPin;

use crate::controller::CommitError;
use crate::writer::WriteError;

/// A fixed bank of indicator LEDs sharing one polarity
pub struct LedBank<P, const N: usize> {
    pins: [P; N],
    active_low: bool,
}

impl<P: OutputPin, const N: usize> LedBank<P, N> {
    /// Wrap `pins`, first pin is LED 1
    pub fn new(pins: [P; N], active_low: bool) -> Self {
        Self { pins, active_low }
    }

    /// Switch one LED; out-of-range indices are ignored
    pub fn set(&mut self, index: usize, on: bool) {
        let active_low = self.active_low;
        if let Some(pin) = self.pins.get_mut(index) {
            pin.set_state(on != active_low);
        }
    }

    pub fn set_all(&mut self, on: bool) {
        for index in 0..N {
            self.set(index, on);
        }
    }

    /// Access one pin (for inspection)
    pub fn pin(&self, index: usize) -> Option<&P> {
        self.pins.get(index)
    }
}

/// Index of the LED that reports a rejected commit
///
/// LED 2: calibration value does not fit. LED 3: bad target address, region
/// untouched. LED 4: the sequence failed part way and the region is
/// indeterminate.
pub fn rejection_led(error: &CommitError) -> usize {
    match error {
        CommitError::Encode(_) => 1,
        CommitError::Write(WriteError::AddressOutOfRegion(_)) => 2,
        CommitError::Write(_) => 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Field, FieldOverflow};
    use crate::writer::Phase;
    use thermoseal_hal::mock::MockOutputPin;

    fn bank() -> LedBank<MockOutputPin, 4> {
        let mut bank = LedBank::new(
            [
                MockOutputPin::new(),
                MockOutputPin::new(),
                MockOutputPin::new(),
                MockOutputPin::new(),
            ],
            true,
        );
        bank.set_all(false);
        bank
    }

    fn lit(bank: &LedBank<MockOutputPin, 4>) -> [bool; 4] {
        core::array::from_fn(|i| bank.pin(i).is_some_and(|p| !p.is_set_high()))
    }

    #[test]
    fn test_active_low_drives_low_for_on() {
        let mut bank = bank();
        assert_eq!(lit(&bank), [false; 4]);

        bank.set(0, true);
        assert_eq!(lit(&bank), [true, false, false, false]);
    }

    #[test]
    fn test_set_all() {
        let mut bank = bank();
        bank.set_all(true);
        assert_eq!(lit(&bank), [true; 4]);
        bank.set_all(false);
        assert_eq!(lit(&bank), [false; 4]);
    }

    #[test]
    fn test_out_of_range_ignored() {
        let mut bank = bank();
        bank.set(4, true);
        assert_eq!(lit(&bank), [false; 4]);
    }

    #[test]
    fn test_active_high_bank() {
        let mut bank = LedBank::new([MockOutputPin::new()], false);
        bank.set(0, true);
        assert!(bank.pin(0).is_some_and(|p| p.is_set_high()));
    }

    #[test]
    fn test_rejection_led_by_cause() {
        let overflow = CommitError::Encode(FieldOverflow {
            field: Field::Mode,
            value: 4,
        });
        let address = CommitError::Write(WriteError::AddressOutOfRegion(3));
        let timeout = CommitError::Write(WriteError::HardwareTimeout {
            phase: Phase::EraseRegion,
        });

        assert_eq!(rejection_led(&overflow), 1);
        assert_eq!(rejection_led(&address), 2);
        assert_eq!(rejection_led(&timeout), 3);
    }
}
