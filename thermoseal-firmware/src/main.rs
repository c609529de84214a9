//! Thermoseal - UICR Calibration Commit Firmware
//!
//! Main firmware binary for nRF52-based boards. On the first press of
//! button 1 it packs the configured calibration into one 32-bit word, seals
//! it into UICR `CUSTOMER[0]` and restarts so the new value takes effect.
//!
//! Configuration lives in thermoseal.toml and is compiled in.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_nrf::gpio::{Input, Level, Output, OutputDrive, Pull};
use embassy_time::{Duration, Instant, Timer};
use {defmt_rtt as _, panic_probe as _};

use thermoseal_core::config::{parse_config, CommitConfig};
use thermoseal_core::{CommitController, CommitTrigger};
use thermoseal_hal::gpio::Digital;
use thermoseal_hal_nrf52::nvmc::Nrf52Nvmc;
use thermoseal_hal_nrf52::system::CortexReset;
use thermoseal_hal_nrf52::take_dk_pins;

use crate::diagnostics::RttObserver;

mod channels;
mod diagnostics;
mod tasks;

/// Embedded configuration (compiled into firmware)
/// Edit thermoseal.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../thermoseal.toml");

/// Interval between trace-level heartbeats from the poll loop
const HEARTBEAT: Duration = Duration::from_secs(60);

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Thermoseal firmware starting...");

    let p = embassy_nrf::init(Default::default());
    info!("Peripherals initialized");

    let config = load_config();
    log_config(&config);

    let pins = take_dk_pins!(p);
    let button = Input::new(pins.button, Pull::Up);
    let leds = pins
        .leds
        .map(|pin| Output::new(pin, Level::High, OutputDrive::Standard));
    info!("DK button and LEDs configured");

    let mut trigger = CommitTrigger::with_polarity(Digital::new(button), config.trigger.active_low);
    let mut controller =
        CommitController::from_config(Nrf52Nvmc::new(p.NVMC), CortexReset::new(), &config);
    let mut observer = RttObserver;

    spawner
        .spawn(tasks::led_task(tasks::dk_leds(leds), config.greeting))
        .unwrap();

    info!("Waiting for button 1 to commit calibration");

    let poll_interval = Duration::from_millis(config.trigger.poll_interval_ms as u64);
    let mut last_heartbeat = Instant::now();

    loop {
        if let Some(request) = trigger.poll() {
            info!("Button 1 pressed, committing calibration");
            // Only returns on failure; success restarts the device
            if controller.handle(request, &mut observer).is_err() {
                info!("Release and press again to retry");
            }
        }

        if last_heartbeat.elapsed() >= HEARTBEAT {
            trace!("Poll loop heartbeat");
            last_heartbeat = Instant::now();
        }

        Timer::after(poll_interval).await;
    }
}

/// Parse the embedded configuration
///
/// build.rs validates thermoseal.toml, so a failure here means the runtime
/// parser and the build-time check disagree. Fall back to the factory
/// calibration rather than refusing to boot.
fn load_config() -> CommitConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Parsed embedded configuration successfully");
            config
        }
        Err(e) => {
            error!("Failed to parse embedded config: {}", e);
            error!("Using factory calibration");
            CommitConfig::default()
        }
    }
}

fn log_config(config: &CommitConfig) {
    let calibration = &config.calibration;
    info!(
        "Calibration: offset=0x{=u8:02X} mode={=u8} status={=u8} setpoint=0x{=u16:03X}",
        calibration.offset, calibration.mode, calibration.status, calibration.setpoint
    );
    info!("Target: 0x{=u32:08X}", config.region.address);

    match calibration.record() {
        Ok(record) => info!("Packed preview: 0x{=u32:08X}", record.pack().bits()),
        Err(e) => warn!("Calibration does not fit its word: {}", e),
    }
}
