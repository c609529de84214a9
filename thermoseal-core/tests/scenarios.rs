//! End-to-end commit scenarios against simulated hardware
//!
//! Each scenario wires a mock button, a mock memory controller and a mock
//! reset together the way the firmware poll loop does.

use thermoseal_core::config::{parse_config, CommitConfig};
use thermoseal_core::record::Field;
use thermoseal_core::{
    CommitController, CommitError, CommitObserver, CommitTrigger, FieldOverflow, Latch, PackedWord,
    Phase, WriteError,
};
use thermoseal_hal::mock::{MockInputPin, MockNvmc, MockReset, MOCK_REGION_BASE};

const TARGET: u32 = MOCK_REGION_BASE + 0x80;

/// Observer collecting a transcript of diagnostics
#[derive(Default)]
struct Transcript {
    events: Vec<String>,
}

impl CommitObserver for Transcript {
    fn packed(&mut self, word: PackedWord) {
        self.events.push(format!("packed 0x{:08X}", word.bits()));
    }

    fn committed(&mut self, word: PackedWord) {
        self.events.push(format!("committed 0x{:08X}", word.bits()));
    }

    fn rejected(&mut self, error: CommitError) {
        self.events.push(format!("rejected {:?}", error));
    }
}

fn config(toml: &str) -> CommitConfig {
    let mut config = parse_config(toml).unwrap();
    config.region.address = TARGET;
    config
}

fn rig(
    nvmc: MockNvmc,
    config: &CommitConfig,
) -> (
    CommitController<MockNvmc, MockReset>,
    CommitTrigger<MockInputPin>,
) {
    let controller = CommitController::from_config(nvmc, MockReset::new(), config);
    let trigger = CommitTrigger::with_polarity(MockInputPin::new(), config.trigger.active_low);
    (controller, trigger)
}

/// Feed one level per poll cycle, returning how many commits were attempted
fn drive<I>(
    controller: &mut CommitController<MockNvmc, MockReset>,
    trigger: &mut CommitTrigger<MockInputPin>,
    observer: &mut Transcript,
    levels: I,
) -> usize
where
    I: IntoIterator<Item = bool>,
{
    let mut attempts = 0;
    for high in levels {
        trigger.pin_mut().set_level(high);
        if controller.service(trigger, observer).is_some() {
            attempts += 1;
        }
    }
    attempts
}

#[test]
fn reference_calibration_commits_and_restarts() {
    let config = config(
        "[calibration]\noffset = 0x0A\nmode = 0x01\nstatus = 0x00\nsetpoint = 0x2EE\n",
    );
    let (mut controller, mut trigger) = rig(MockNvmc::new(), &config);
    let mut transcript = Transcript::default();

    let attempts = drive(&mut controller, &mut trigger, &mut transcript, [true, false]);

    assert_eq!(attempts, 1);
    assert_eq!(controller.writer().controller().word_at(TARGET), 0x00BB_840A);
    assert_eq!(controller.reset().restarts(), 1);
    assert_eq!(
        transcript.events,
        vec!["packed 0x00BB840A", "committed 0x00BB840A"]
    );
}

#[test]
fn oversized_setpoint_is_rejected_without_touching_hardware() {
    let config = config("[calibration]\nsetpoint = 0x400\n");
    let (mut controller, mut trigger) = rig(MockNvmc::new(), &config);
    let mut transcript = Transcript::default();

    trigger.pin_mut().set_level(false);
    let result = controller.service(&mut trigger, &mut transcript);

    assert_eq!(
        result,
        Some(Err(CommitError::Encode(FieldOverflow {
            field: Field::Setpoint,
            value: 0x400
        })))
    );
    assert!(controller.writer().controller().log().is_empty());
    assert!(controller.writer().controller().is_blank());
    assert_eq!(controller.reset().restarts(), 0);
    assert_eq!(transcript.events.len(), 1);
}

#[test]
fn rejected_commit_retries_on_next_press() {
    let config = config("[calibration]\nmode = 4\n");
    let (mut controller, mut trigger) = rig(MockNvmc::new(), &config);
    let mut transcript = Transcript::default();

    // Holding the button after a rejection does not spin on retries
    let attempts = drive(
        &mut controller,
        &mut trigger,
        &mut transcript,
        [false, false, false],
    );
    assert_eq!(attempts, 1);
    assert_eq!(trigger.latch(), Latch::Latched);

    // Release re-arms, the next press tries again
    let attempts = drive(&mut controller, &mut trigger, &mut transcript, [true, false]);
    assert_eq!(attempts, 1);
    assert_eq!(transcript.events.len(), 2);
    assert_eq!(controller.reset().restarts(), 0);
}

#[test]
fn two_pressed_intervals_give_two_requests() {
    // low, low, low, high, low
    let levels = [false, false, false, true, false];

    // Rejecting config so the controller stays up for the second press
    let config = config("[calibration]\nstatus = 7\n");
    let (mut controller, mut trigger) = rig(MockNvmc::new(), &config);
    let mut transcript = Transcript::default();

    let attempts = drive(&mut controller, &mut trigger, &mut transcript, levels);

    assert_eq!(attempts, 2);
}

#[test]
fn idle_button_never_commits() {
    let config = CommitConfig {
        region: thermoseal_core::config::RegionConfig { address: TARGET },
        ..Default::default()
    };
    let (mut controller, mut trigger) = rig(MockNvmc::new(), &config);
    let mut transcript = Transcript::default();

    let attempts = drive(&mut controller, &mut trigger, &mut transcript, [true; 50]);

    assert_eq!(attempts, 0);
    assert!(controller.writer().controller().log().is_empty());
    assert_eq!(trigger.pin_mut().reads(), 50);
}

#[test]
fn stuck_controller_times_out_without_restart() {
    let config = config("[writer]\nready_poll_limit = 1000\n");
    let (mut controller, mut trigger) = rig(MockNvmc::new().stall_after(3), &config);
    let mut transcript = Transcript::default();

    trigger.pin_mut().set_level(false);
    let result = controller.service(&mut trigger, &mut transcript);

    assert_eq!(
        result,
        Some(Err(CommitError::Write(WriteError::HardwareTimeout {
            phase: Phase::Program
        })))
    );
    assert_eq!(controller.reset().restarts(), 0);
    assert_eq!(transcript.events.len(), 2);
}

#[test]
fn misconfigured_address_is_rejected_before_erase() {
    let mut config = CommitConfig::default();
    config.region.address = TARGET + 1;
    let (mut controller, mut trigger) = rig(MockNvmc::new(), &config);

    trigger.pin_mut().set_level(false);
    let result = controller.service(&mut trigger, &mut ());

    assert_eq!(
        result,
        Some(Err(CommitError::Write(WriteError::AddressOutOfRegion(
            TARGET + 1
        ))))
    );
    assert!(controller.writer().controller().log().is_empty());
}
