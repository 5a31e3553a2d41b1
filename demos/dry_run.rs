//! Dry-run example.
//!
//! Drives the arm through homing, a joint move, a Cartesian move and a
//! readback against a bus that prints every frame instead of sending it.
//!
//! Run with `RUST_LOG=debug` to see the planner's log output.

use std::collections::VecDeque;

use arm_motion::kinematics::IkCandidates;
use arm_motion::transport::Response;
use arm_motion::{
    ArmConfig, ArmSystem, AxisMove, Direction, Joint6D, Kinematics, MotorTransport, MovePlan,
    Pose6D,
};
use tracing_subscriber::EnvFilter;

/// Bus that prints frames and answers position queries with zero.
struct PrintingBus {
    pending: VecDeque<Response>,
}

impl MotorTransport for PrintingBus {
    type Error = core::convert::Infallible;

    fn send(&mut self, frame: &[u8]) -> Result<(), Self::Error> {
        println!("  send   {:02X?}", frame);
        if frame.get(1) == Some(&0x36) {
            let reply = [frame[0], 0x36, 0x00, 0x00, 0x00, 0x00, 0x00, 0x6B];
            self.pending.push_back(Response::from_slice(&reply).unwrap_or_default());
        }
        Ok(())
    }

    fn move_axis(&mut self, m: &AxisMove) -> Result<(), Self::Error> {
        println!(
            "  move   axis {} dir {} speed {:>3} acc {} pulses {:>6} {:?}{}",
            m.axis,
            m.direction.bit(),
            m.speed,
            m.acceleration,
            m.pulses,
            m.mode,
            if m.sync { " (sync)" } else { "" }
        );
        Ok(())
    }

    fn commit(&mut self) -> Result<(), Self::Error> {
        println!("  commit");
        Ok(())
    }

    fn configure_zero_search(&mut self, axis: u8, direction: Direction) -> Result<(), Self::Error> {
        println!("  zero-search axis {} dir {}", axis, direction.bit());
        Ok(())
    }

    fn seek_zero(&mut self, axis: u8) -> Result<(), Self::Error> {
        println!("  seek-zero   axis {}", axis);
        Ok(())
    }

    fn expect_response(&mut self, _len: usize) {
        self.pending.clear();
    }

    fn poll_response(&mut self) -> Result<Option<Response>, Self::Error> {
        Ok(self.pending.pop_front())
    }
}

/// Kinematics placeholder: the pose mirrors the joints.
struct MirrorKinematics;

impl Kinematics for MirrorKinematics {
    fn solve_forward(&self, j: &Joint6D) -> Pose6D {
        Pose6D::new(j[0], j[1], j[2], j[3], j[4], j[5])
    }

    fn solve_inverse(&self, pose: &Pose6D, _seed: &Joint6D) -> IkCandidates {
        let mut candidates = IkCandidates::new();
        let _ = candidates.push(Joint6D::new(pose.x, pose.y, pose.z, pose.a, pose.b, pose.c));
        let _ = candidates.push(Joint6D::new(pose.x, pose.y, pose.z, 180.0, -pose.b, pose.c));
        candidates
    }
}

/// Delay that does not wait.
struct InstantDelay;

impl embedded_hal::delay::DelayNs for InstantDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

fn main() -> Result<(), arm_motion::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Arm Dry Run ===\n");

    let mut arm = ArmSystem::builder()
        .config(ArmConfig::default())
        .transport(PrintingBus {
            pending: VecDeque::new(),
        })
        .kinematics(MirrorKinematics)
        .delay(InstantDelay)
        .build()?;

    println!("Homing:");
    arm.homing()?;

    println!("\nJoint move:");
    let plan = arm.move_j(Joint6D::new(-20.0, -60.0, 150.0, 10.0, -30.0, 0.0))?;
    if let MovePlan::Synchronized(profile) = plan {
        println!(
            "  sync axis {}, T = {:.3}",
            profile.sync_axis + 1,
            profile.duration
        );
    }

    println!("\nOut-of-limit move:");
    match arm.move_j(Joint6D::new(5.0, -60.0, 150.0, 10.0, -30.0, 0.0)) {
        Ok(_) => println!("  unexpectedly accepted"),
        Err(e) => println!("  rejected: {}", e),
    }

    println!("\nCartesian move:");
    arm.move_l(Pose6D::new(-25.0, -50.0, 140.0, 0.0, -20.0, 30.0))?;

    println!("\nReadback:");
    let angle = arm.read_angle(3)?;
    println!("  axis 3 at {:.3} deg", angle.0);

    println!("\nEmergency stop:");
    arm.emergency_stop()?;

    let snapshot = arm.snapshot();
    println!(
        "\nReference {:?}, generation {}",
        snapshot.reference.0, snapshot.generation
    );
    Ok(())
}
