//! Status LED task
//!
//! Plays the startup greeting, then blinks the LED matching each rejected
//! commit. The DK LEDs are active-low.

use defmt::*;
use embassy_futures::select::select;
use embassy_nrf::gpio::Output;
use embassy_time::{Duration, Timer};

use thermoseal_core::config::GreetingConfig;
use thermoseal_core::{rejection_led, LedBank};
use thermoseal_hal::gpio::Digital;

use crate::channels::{LedStatus, LED_STATUS};

/// How long a rejection stays on the LEDs
const REJECTION_DISPLAY_MS: u64 = 2000;

/// Blink period while a rejection is shown
const REJECTION_BLINK_MS: u64 = 100;

/// The four DK LEDs, LED 1 first
pub type Leds = LedBank<Digital<Output<'static>>, 4>;

/// Build the DK LED bank from its output pins
pub fn dk_leds(pins: [Output<'static>; 4]) -> Leds {
    LedBank::new(pins.map(Digital::new), true)
}

/// Blink all LEDs together
async fn greet(leds: &mut Leds, greeting: &GreetingConfig) {
    let period = Duration::from_millis(greeting.period_ms as u64);
    for _ in 0..greeting.blinks {
        leds.set_all(true);
        Timer::after(period).await;
        leds.set_all(false);
        Timer::after(period).await;
    }
}

/// Status LED task
#[embassy_executor::task]
pub async fn led_task(mut leds: Leds, greeting: GreetingConfig) {
    info!("LED task started");

    leds.set_all(false);
    greet(&mut leds, &greeting).await;

    loop {
        let LedStatus::Rejected(error) = LED_STATUS.wait().await;
        let led = rejection_led(&error);

        let blink = async {
            let mut on = true;
            loop {
                leds.set(led, on);
                on = !on;
                Timer::after_millis(REJECTION_BLINK_MS).await;
            }
        };
        let _ = select(blink, Timer::after_millis(REJECTION_DISPLAY_MS)).await;
        leds.set_all(false);
    }
}
