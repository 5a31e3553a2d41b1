//! Arm facade tying planner, transport and timing together.
//!
//! Provides a high-level API over a single motor bus driving all six joints.

use embedded_hal::delay::DelayNs;

use crate::config::units::Degrees;
use crate::config::{validate_config, ArmConfig};
use crate::error::{MotionError, Result};
use crate::kinematics::Kinematics;
use crate::motion::{Joint6D, JointSnapshot, MotionPlanner, MovePlan, Pose6D};
use crate::posture::PostureRegistry;
use crate::transport::MotorTransport;

use super::builder::ArmSystemBuilder;
use super::homing::{self, HomingSequencer};
use super::readback;

/// A six-axis arm on one motor bus.
///
/// `ArmSystem` owns the bus, the delay provider and the planner, and offers:
/// - Joint and Cartesian moves that plan and commit in one call
/// - Moves to named postures
/// - Coarse homing, the axis-6 fine zero and the emergency stop
/// - Calibrated angle readback
///
/// # Example
///
/// ```rust,ignore
/// use arm_motion::{ArmSystem, Joint6D};
///
/// let mut arm = ArmSystem::builder()
///     .config(arm_motion::load_config("arm.toml")?)
///     .transport(bus)
///     .kinematics(solver)
///     .delay(delay)
///     .build()?;
///
/// arm.homing()?;
/// arm.move_j(Joint6D::new(-10.0, -80.0, 170.0, 10.0, -5.0, 0.0))?;
/// arm.move_to_posture("ready")?;
/// ```
pub struct ArmSystem<T, K, D>
where
    T: MotorTransport,
    K: Kinematics,
    D: DelayNs,
{
    transport: T,
    delay: D,
    planner: MotionPlanner<K>,
    config: ArmConfig,
    postures: PostureRegistry,
    homing: HomingSequencer,
}

impl<T, K, D> ArmSystem<T, K, D>
where
    T: MotorTransport,
    K: Kinematics,
    D: DelayNs,
{
    /// Start building an arm system.
    pub fn builder() -> ArmSystemBuilder<T, K, D> {
        ArmSystemBuilder::new()
    }

    /// Create an arm system from a configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation.
    pub fn new(config: ArmConfig, transport: T, kinematics: K, delay: D) -> Result<Self> {
        validate_config(&config)?;

        let planner = MotionPlanner::new(&config, kinematics);
        let postures = PostureRegistry::from_config(&config);
        let homing = HomingSequencer::new(config.timing.settle_ms);
        Ok(Self {
            transport,
            delay,
            planner,
            config,
            postures,
            homing,
        })
    }

    /// Get the configuration.
    pub fn config(&self) -> &ArmConfig {
        &self.config
    }

    /// Get the planner.
    pub fn planner(&self) -> &MotionPlanner<K> {
        &self.planner
    }

    /// Get the planner mutably, for planning without committing.
    pub fn planner_mut(&mut self) -> &mut MotionPlanner<K> {
        &mut self.planner
    }

    /// Get the named posture registry.
    pub fn postures(&self) -> &PostureRegistry {
        &self.postures
    }

    /// Get the named posture registry mutably.
    pub fn postures_mut(&mut self) -> &mut PostureRegistry {
        &mut self.postures
    }

    /// Get the transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Get the transport mutably.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Release the transport and delay provider.
    pub fn release(self) -> (T, D) {
        (self.transport, self.delay)
    }

    /// Snapshot of the joint state.
    pub fn snapshot(&self) -> JointSnapshot {
        self.planner.snapshot()
    }

    /// Pose of the accepted target.
    pub fn current_pose(&self) -> &Pose6D {
        self.planner.current_pose()
    }

    /// Move to a joint target.
    ///
    /// Nothing is sent when the target is rejected or already reached.
    pub fn move_j(&mut self, target: Joint6D) -> Result<MovePlan> {
        let plan = self.planner.move_j(target)?;
        if plan.needs_commit() {
            self.commit()?;
        }
        Ok(plan)
    }

    /// Move to a Cartesian pose through the closest valid IK solution.
    pub fn move_l(&mut self, pose: Pose6D) -> Result<MovePlan> {
        let plan = self.planner.move_l(pose)?;
        if plan.needs_commit() {
            self.commit()?;
        }
        Ok(plan)
    }

    /// Move to a named posture.
    pub fn move_to_posture(&mut self, name: &str) -> Result<MovePlan> {
        let target = *self.postures.get_or_error(name)?;
        info!("moving to posture {}", name);
        self.move_j(target)
    }

    /// Send the planner's accepted target to the drivers.
    pub fn commit(&mut self) -> Result<()> {
        self.planner.commit(&mut self.transport, &mut self.delay)
    }

    /// Run the coarse homing pass and reset the reference to the rest posture.
    pub fn homing(&mut self) -> Result<()> {
        self.homing
            .run(&mut self.transport, &mut self.delay, &mut self.planner)
    }

    /// Fine zero for axis 6. Returns the correction in pulses.
    pub fn arm6_homing(&mut self) -> Result<u32> {
        homing::arm6_homing(&mut self.transport, &mut self.delay, &self.config.timing)
    }

    /// Stop every axis immediately.
    pub fn emergency_stop(&mut self) -> Result<()> {
        homing::emergency_stop(&mut self.transport)
    }

    /// Mark the current physical position of `axis` as its zero.
    pub fn mark_zero(&mut self, axis: u8) -> Result<()> {
        homing::mark_zero(&mut self.transport, axis)
    }

    /// Read the calibrated angle of one axis (1-based).
    pub fn read_angle(&mut self, axis: u8) -> Result<Degrees> {
        let target = self
            .planner
            .axis_mut(axis)
            .ok_or(MotionError::UnknownAxis(axis))?;
        readback::read_angle(
            &mut self.transport,
            &mut self.delay,
            &self.config.timing,
            &self.config.readback,
            target,
        )
    }

    /// Read all six axes in order.
    pub fn read_all_angles(&mut self) -> Result<[Degrees; 6]> {
        let mut angles = [Degrees::default(); 6];
        for (i, angle) in angles.iter_mut().enumerate() {
            *angle = self.read_angle(i as u8 + 1)?;
        }
        Ok(angles)
    }
}
