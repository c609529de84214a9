//! nRF52832-DK pin map
//!
//! The development kit wires four buttons and four LEDs to port 0, all
//! active-low. Only button 1 and the LED bank are used here.

use embassy_nrf::gpio::AnyPin;
use embassy_nrf::Peri;

/// Pins taken from the peripherals for the commit firmware
pub struct DkPins {
    /// Commit button
    pub button: Peri<'static, AnyPin>,
    /// Status LEDs, LED 1 first
    pub leds: [Peri<'static, AnyPin>; 4],
}

/// Move the DK button and LED pins out of `embassy_nrf::Peripherals`
///
/// Button 1 is P0.13 (needs the internal pull-up). LEDs 1..4 are
/// P0.17..P0.20.
///
/// Usage:
/// ```ignore
/// let p = embassy_nrf::init(Default::default());
/// let pins = take_dk_pins!(p);
/// ```
#[macro_export]
macro_rules! take_dk_pins {
    ($p:expr) => {
        $crate::pins::DkPins {
            button: $p.P0_13.into(),
            leds: [
                $p.P0_17.into(),
                $p.P0_18.into(),
                $p.P0_19.into(),
                $p.P0_20.into(),
            ],
        }
    };
}
