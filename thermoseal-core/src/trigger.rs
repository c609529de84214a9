//! Commit trigger
//!
//! Turns a sampled button level into at most one commit request per
//! contiguous pressed interval.
//!
//! There is no time-based filtering. Contact bounce that crosses the
//! released level between two polls re-arms the latch, so a bouncy press
//! sampled at a high poll rate can yield a second request. Poll interval is
//! the only knob against that.

use thermoseal_hal::InputPin;

/// Latch state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Latch {
    /// Waiting for a press
    #[default]
    Armed,
    /// Press seen; waiting for release
    Latched,
}

/// Authorization for one commit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CommitRequest;

impl Latch {
    /// Advance the latch by one sample
    pub fn next(self, pressed: bool) -> (Self, Option<CommitRequest>) {
        match (self, pressed) {
            (Latch::Armed, true) => (Latch::Latched, Some(CommitRequest)),
            (Latch::Latched, true) => (Latch::Latched, None),
            (_, false) => (Latch::Armed, None),
        }
    }
}

/// Debounce latch over one button input
pub struct CommitTrigger<P> {
    pin: P,
    active_low: bool,
    latch: Latch,
}

impl<P: InputPin> CommitTrigger<P> {
    /// Create a trigger for an active-low button (pressed = logic 0)
    pub fn new(pin: P) -> Self {
        Self::with_polarity(pin, true)
    }

    /// Create a trigger with explicit polarity
    pub fn with_polarity(pin: P, active_low: bool) -> Self {
        Self {
            pin,
            active_low,
            latch: Latch::Armed,
        }
    }

    /// Current latch state
    pub fn latch(&self) -> Latch {
        self.latch
    }

    /// Sample the pin once and advance the latch
    pub fn poll(&mut self) -> Option<CommitRequest> {
        let pressed = self.pin.is_low() == self.active_low;
        let (latch, request) = self.latch.next(pressed);
        self.latch = latch;
        request
    }

    /// Access the pin
    pub fn pin_mut(&mut self) -> &mut P {
        &mut self.pin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use thermoseal_hal::mock::MockInputPin;

    #[test]
    fn test_latch_transitions() {
        assert_eq!(Latch::Armed.next(true), (Latch::Latched, Some(CommitRequest)));
        assert_eq!(Latch::Latched.next(true), (Latch::Latched, None));
        assert_eq!(Latch::Latched.next(false), (Latch::Armed, None));
        assert_eq!(Latch::Armed.next(false), (Latch::Armed, None));
    }

    #[test]
    fn test_held_button_fires_once() {
        let mut trigger = CommitTrigger::new(MockInputPin::new());
        trigger.pin_mut().set_level(false);

        let fired = (0..100).filter(|_| trigger.poll().is_some()).count();
        assert_eq!(fired, 1);
        assert_eq!(trigger.latch(), Latch::Latched);
    }

    #[test]
    fn test_release_rearms() {
        let mut trigger = CommitTrigger::new(MockInputPin::new());

        trigger.pin_mut().set_level(false);
        assert!(trigger.poll().is_some());

        trigger.pin_mut().set_level(true);
        assert!(trigger.poll().is_none());
        assert_eq!(trigger.latch(), Latch::Armed);

        trigger.pin_mut().set_level(false);
        assert!(trigger.poll().is_some());
    }

    #[test]
    fn test_released_never_fires() {
        let mut trigger = CommitTrigger::new(MockInputPin::new());
        assert!((0..10).all(|_| trigger.poll().is_none()));
    }

    #[test]
    fn test_active_high_polarity() {
        let mut trigger = CommitTrigger::with_polarity(MockInputPin::new(), false);

        // Pin idles high, which is "pressed" for an active-high button
        assert!(trigger.poll().is_some());

        trigger.pin_mut().set_level(false);
        assert!(trigger.poll().is_none());
        assert_eq!(trigger.latch(), Latch::Armed);
    }
}
