//! Shared test doubles: a recording motor bus, a recording delay and a stub
//! kinematics solver.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;

use arm_motion::config::parse_config;
use arm_motion::kinematics::IkCandidates;
use arm_motion::transport::Response;
use arm_motion::{ArmConfig, AxisMove, Direction, Joint6D, Kinematics, MotorTransport, Pose6D};
use embedded_hal::delay::DelayNs;

/// Everything the core asked the bus to do, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Send(Vec<u8>),
    Move(AxisMove),
    Commit,
    ConfigureZeroSearch(u8, Direction),
    SeekZero(u8),
    Expect(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusError;

/// Motor bus that records commands and replays scripted responses.
///
/// Each `poll_response` pops one entry; `None` entries simulate a reply that
/// has not arrived yet.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    pub commands: Vec<Command>,
    pub responses: VecDeque<Option<Vec<u8>>>,
    pub fail_move_on_axis: Option<u8>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply that arrives after `polls` empty polls.
    pub fn reply_after(&mut self, polls: usize, bytes: &[u8]) {
        for _ in 0..polls {
            self.responses.push_back(None);
        }
        self.responses.push_back(Some(bytes.to_vec()));
    }

    pub fn reply(&mut self, bytes: &[u8]) {
        self.reply_after(0, bytes);
    }

    pub fn moves(&self) -> Vec<AxisMove> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                Command::Move(m) => Some(*m),
                _ => None,
            })
            .collect()
    }
}

impl MotorTransport for RecordingTransport {
    type Error = BusError;

    fn send(&mut self, frame: &[u8]) -> Result<(), BusError> {
        self.commands.push(Command::Send(frame.to_vec()));
        Ok(())
    }

    fn move_axis(&mut self, command: &AxisMove) -> Result<(), BusError> {
        if self.fail_move_on_axis == Some(command.axis) {
            return Err(BusError);
        }
        self.commands.push(Command::Move(*command));
        Ok(())
    }

    fn commit(&mut self) -> Result<(), BusError> {
        self.commands.push(Command::Commit);
        Ok(())
    }

    fn configure_zero_search(&mut self, axis: u8, direction: Direction) -> Result<(), BusError> {
        self.commands.push(Command::ConfigureZeroSearch(axis, direction));
        Ok(())
    }

    fn seek_zero(&mut self, axis: u8) -> Result<(), BusError> {
        self.commands.push(Command::SeekZero(axis));
        Ok(())
    }

    fn expect_response(&mut self, len: usize) {
        self.commands.push(Command::Expect(len));
    }

    fn poll_response(&mut self) -> Result<Option<Response>, BusError> {
        match self.responses.pop_front() {
            Some(Some(bytes)) => Ok(Some(Response::from_slice(&bytes).map_err(|_| BusError)?)),
            _ => Ok(None),
        }
    }
}

/// Delay provider that records every requested pause.
#[derive(Debug, Default)]
pub struct RecordingDelay {
    pub pauses_ms: Vec<u32>,
}

impl RecordingDelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_ms(&self) -> u64 {
        self.pauses_ms.iter().map(|&ms| u64::from(ms)).sum()
    }
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, _ns: u32) {}

    fn delay_ms(&mut self, ms: u32) {
        self.pauses_ms.push(ms);
    }
}

/// Kinematics stub: the pose mirrors the joints and IK returns a fixed list.
#[derive(Debug, Default)]
pub struct StubKinematics {
    pub candidates: Vec<Joint6D>,
    pub last_seed: RefCell<Option<Joint6D>>,
}

impl StubKinematics {
    pub fn with_candidates(candidates: &[Joint6D]) -> Self {
        Self {
            candidates: candidates.to_vec(),
            last_seed: RefCell::new(None),
        }
    }
}

impl Kinematics for StubKinematics {
    fn solve_forward(&self, joints: &Joint6D) -> Pose6D {
        Pose6D::new(joints[0], joints[1], joints[2], joints[3], joints[4], joints[5])
    }

    fn solve_inverse(&self, _pose: &Pose6D, seed: &Joint6D) -> IkCandidates {
        *self.last_seed.borrow_mut() = Some(*seed);
        self.candidates.iter().copied().take(8).collect()
    }
}

/// Six unit-reduction axes limited to ±180°, resting at zero.
pub const OPEN_CONFIG: &str = r#"
nominal_speed = 50.0
rest_posture = [0.0, 0.0, 0.0, 0.0, 0.0, 0.0]

[timing]
settle_ms = 50
poll_interval_ms = 50
response_timeout_ms = 200

[[axes]]
name = "J1"
limits = { min_degrees = -180.0, max_degrees = 180.0 }

[[axes]]
name = "J2"
limits = { min_degrees = -180.0, max_degrees = 180.0 }

[[axes]]
name = "J3"
limits = { min_degrees = -180.0, max_degrees = 180.0 }

[[axes]]
name = "J4"
limits = { min_degrees = -180.0, max_degrees = 180.0 }

[[axes]]
name = "J5"
limits = { min_degrees = -180.0, max_degrees = 180.0 }

[[axes]]
name = "J6"
limits = { min_degrees = -180.0, max_degrees = 180.0 }

[postures]
reach = [10.0, 20.0, 30.0, 0.0, 0.0, 0.0]
"#;

pub fn open_config() -> ArmConfig {
    parse_config(OPEN_CONFIG).expect("open config should parse")
}
