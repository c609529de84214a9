//! Commit controller
//!
//! Top-level, one-shot orchestration: build the record, encode it, run the
//! erase/program sequence, restart. A failed commit never restarts the
//! device, leaves the trigger to re-arm on release, and stays available for
//! the next press.

use thermoseal_hal::{InputPin, NvmController, SystemReset};

use crate::config::{CalibrationParams, CommitConfig};
use crate::record::{FieldOverflow, PackedWord};
use crate::trigger::{CommitRequest, CommitTrigger};
use crate::writer::{NonVolatileWriter, WriteError};

/// Errors from one commit attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommitError {
    /// A calibration value exceeds its field width; nothing was written
    Encode(FieldOverflow),
    /// The erase/program sequence failed
    Write(WriteError),
}

impl From<FieldOverflow> for CommitError {
    fn from(e: FieldOverflow) -> Self {
        CommitError::Encode(e)
    }
}

impl From<WriteError> for CommitError {
    fn from(e: WriteError) -> Self {
        CommitError::Write(e)
    }
}

impl CommitError {
    /// Whether the configuration region may have been modified
    pub fn region_touched(&self) -> bool {
        match self {
            CommitError::Encode(_) => false,
            CommitError::Write(WriteError::AddressOutOfRegion(_)) => false,
            CommitError::Write(_) => true,
        }
    }
}

/// Diagnostics seam for the commit path
///
/// All methods default to doing nothing.
pub trait CommitObserver {
    /// The word about to be written
    fn packed(&mut self, _word: PackedWord) {}

    /// The word was written and verified; restart follows immediately
    fn committed(&mut self, _word: PackedWord) {}

    /// The commit was abandoned
    fn rejected(&mut self, _error: CommitError) {}
}

impl CommitObserver for () {}

/// Orchestrates encoder, writer and restart
pub struct CommitController<C, R> {
    writer: NonVolatileWriter<C>,
    reset: R,
    calibration: CalibrationParams,
}

impl<C: NvmController, R: SystemReset> CommitController<C, R> {
    pub fn new(writer: NonVolatileWriter<C>, reset: R, calibration: CalibrationParams) -> Self {
        Self {
            writer,
            reset,
            calibration,
        }
    }

    /// Build a controller from firmware configuration
    pub fn from_config(controller: C, reset: R, config: &CommitConfig) -> Self {
        let writer = NonVolatileWriter::new(controller, config.region.address)
            .with_poll_limit(config.writer.ready_poll_limit);
        Self::new(writer, reset, config.calibration)
    }

    /// Calibration values this controller commits
    pub fn calibration(&self) -> &CalibrationParams {
        &self.calibration
    }

    /// Access the writer (for inspection)
    pub fn writer(&self) -> &NonVolatileWriter<C> {
        &self.writer
    }

    /// Access the reset collaborator (for inspection)
    pub fn reset(&self) -> &R {
        &self.reset
    }

    /// Run one commit
    ///
    /// On success the device restarts; on hardware this call does not
    /// return. On failure nothing restarts and the error is reported to
    /// `observer` as well as returned.
    pub fn handle<O: CommitObserver>(
        &mut self,
        _request: CommitRequest,
        observer: &mut O,
    ) -> Result<PackedWord, CommitError> {
        match self.try_commit(observer) {
            Ok(word) => {
                observer.committed(word);
                self.reset.restart();
                Ok(word)
            }
            Err(e) => {
                observer.rejected(e);
                Err(e)
            }
        }
    }

    /// Poll the trigger once and commit if it fired
    pub fn service<P: InputPin, O: CommitObserver>(
        &mut self,
        trigger: &mut CommitTrigger<P>,
        observer: &mut O,
    ) -> Option<Result<PackedWord, CommitError>> {
        let request = trigger.poll()?;
        Some(self.handle(request, observer))
    }

    fn try_commit<O: CommitObserver>(&mut self, observer: &mut O) -> Result<PackedWord, CommitError> {
        let word = self.calibration.record()?.pack();
        observer.packed(word);
        self.writer.commit(word)?;
        Ok(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Field;
    use crate::writer::Phase;
    use thermoseal_hal::mock::{MockNvmc, MockReset};

    /// Observer that records what it saw
    #[derive(Default)]
    struct Recorder {
        packed: Option<PackedWord>,
        committed: Option<PackedWord>,
        rejected: Option<CommitError>,
    }

    impl CommitObserver for Recorder {
        fn packed(&mut self, word: PackedWord) {
            self.packed = Some(word);
        }

        fn committed(&mut self, word: PackedWord) {
            self.committed = Some(word);
        }

        fn rejected(&mut self, error: CommitError) {
            self.rejected = Some(error);
        }
    }

    fn controller(nvmc: MockNvmc, calibration: CalibrationParams) -> CommitController<MockNvmc, MockReset> {
        let config = CommitConfig {
            calibration,
            region: crate::config::RegionConfig {
                address: thermoseal_hal::mock::MOCK_REGION_BASE + 0x80,
            },
            writer: crate::config::WriterConfig {
                ready_poll_limit: 100,
            },
            ..Default::default()
        };
        CommitController::from_config(nvmc, MockReset::new(), &config)
    }

    #[test]
    fn test_success_restarts_once() {
        let mut ctrl = controller(MockNvmc::new(), CalibrationParams::default());
        let mut recorder = Recorder::default();

        let word = ctrl.handle(CommitRequest, &mut recorder).unwrap();

        assert_eq!(word.bits(), 0x00BB_840A);
        assert_eq!(recorder.packed, Some(word));
        assert_eq!(recorder.committed, Some(word));
        assert_eq!(recorder.rejected, None);
        assert_eq!(ctrl.reset().restarts(), 1);
    }

    #[test]
    fn test_overflow_skips_hardware_and_restart() {
        let params = CalibrationParams {
            setpoint: 0x400,
            ..Default::default()
        };
        let mut ctrl = controller(MockNvmc::new(), params);
        let mut recorder = Recorder::default();

        let err = ctrl.handle(CommitRequest, &mut recorder).unwrap_err();

        assert_eq!(
            err,
            CommitError::Encode(FieldOverflow {
                field: Field::Setpoint,
                value: 0x400
            })
        );
        assert!(!err.region_touched());
        assert_eq!(recorder.packed, None);
        assert_eq!(recorder.rejected, Some(err));
        assert!(ctrl.writer().controller().log().is_empty());
        assert_eq!(ctrl.reset().restarts(), 0);
    }

    #[test]
    fn test_hardware_timeout_does_not_restart() {
        let mut ctrl = controller(MockNvmc::new().stall_after(1), CalibrationParams::default());
        let mut recorder = Recorder::default();

        let err = ctrl.handle(CommitRequest, &mut recorder).unwrap_err();

        assert_eq!(
            err,
            CommitError::Write(WriteError::HardwareTimeout {
                phase: Phase::EraseRegion
            })
        );
        assert!(err.region_touched());
        assert!(recorder.packed.is_some());
        assert_eq!(recorder.committed, None);
        assert_eq!(ctrl.reset().restarts(), 0);
    }

    #[test]
    fn test_unit_observer() {
        let mut ctrl = controller(MockNvmc::new(), CalibrationParams::default());
        assert!(ctrl.handle(CommitRequest, &mut ()).is_ok());
    }
}
