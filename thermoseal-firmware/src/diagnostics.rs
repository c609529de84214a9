//! defmt diagnostics for the commit path

use defmt::*;

use thermoseal_core::{CommitError, CommitObserver, PackedWord};

use crate::channels::{LedStatus, LED_STATUS};

/// Logs each commit step over RTT and forwards rejections to the LEDs
pub struct RttObserver;

impl CommitObserver for RttObserver {
    fn packed(&mut self, word: PackedWord) {
        info!("Packed word: 0x{=u32:08X}", word.bits());
    }

    fn committed(&mut self, word: PackedWord) {
        info!("UICR commit verified (0x{=u32:08X}), restarting", word.bits());
    }

    fn rejected(&mut self, error: CommitError) {
        if error.region_touched() {
            error!("Commit failed after erase: {}", error);
        } else {
            warn!("Commit rejected, UICR untouched: {}", error);
        }
        LED_STATUS.signal(LedStatus::Rejected(error));
    }
}
