//! Joint and Cartesian move planning.
//!
//! The planner owns the arm's reference state. `current` is the accepted
//! target; `last` is what the drivers were last told. `last` changes in
//! exactly two places: [`MotionPlanner::commit`] and
//! [`MotionPlanner::reset_reference`].

use embedded_hal::delay::DelayNs;

use crate::config::units::Degrees;
use crate::config::{check_joints, AngleLimits, ArmConfig, Pulses};
use crate::error::{HardwareError, MotionError, Result};
use crate::kinematics::Kinematics;
use crate::motor::Axis;
use crate::transport::MotorTransport;

use super::joint::{Joint6D, Pose6D};
use super::profile::SyncProfile;

/// Outcome of an accepted move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MovePlan {
    /// Target equals the reference; nothing to command.
    AlreadyThere,
    /// Speeds set so every axis finishes together.
    Synchronized(SyncProfile),
}

impl MovePlan {
    /// True when the move needs a commit.
    pub fn needs_commit(&self) -> bool {
        matches!(self, MovePlan::Synchronized(_))
    }
}

/// Polled view of the planner's joint state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointSnapshot {
    /// Accepted target.
    pub commanded: Joint6D,
    /// Joint angles last sent to the drivers.
    pub reference: Joint6D,
    /// Forward-kinematics pose of `commanded`.
    pub pose: Pose6D,
    /// Bumped after every commit and every homing reset.
    pub generation: u32,
}

/// Validates targets, picks IK solutions and drives synchronized moves.
pub struct MotionPlanner<K: Kinematics> {
    kinematics: K,
    axes: [Axis; 6],
    nominal_speed: f64,
    settle_ms: u32,
    rest_posture: Joint6D,
    current: Joint6D,
    last: Joint6D,
    pose: Pose6D,
    generation: u32,
}

impl<K: Kinematics> MotionPlanner<K> {
    /// Create a planner at the configured rest posture.
    pub fn new(config: &ArmConfig, kinematics: K) -> Self {
        let axes = core::array::from_fn(|i| Axis::new(i as u8 + 1, config.axes[i].clone()));
        let rest = config.rest_posture;
        let pose = kinematics.solve_forward(&rest);
        Self {
            kinematics,
            axes,
            nominal_speed: config.nominal_speed,
            settle_ms: config.timing.settle_ms,
            rest_posture: rest,
            current: rest,
            last: rest,
            pose,
            generation: 0,
        }
    }

    /// Accepted target joints.
    #[inline]
    pub fn current(&self) -> &Joint6D {
        &self.current
    }

    /// Joints last committed to the drivers.
    #[inline]
    pub fn reference(&self) -> &Joint6D {
        &self.last
    }

    /// Pose of the accepted target.
    #[inline]
    pub fn current_pose(&self) -> &Pose6D {
        &self.pose
    }

    /// Posture assumed after homing.
    #[inline]
    pub fn rest_posture(&self) -> &Joint6D {
        &self.rest_posture
    }

    /// Speed given to the axis with the largest displacement.
    #[inline]
    pub fn nominal_speed(&self) -> f64 {
        self.nominal_speed
    }

    /// All six axes.
    #[inline]
    pub fn axes(&self) -> &[Axis; 6] {
        &self.axes
    }

    /// Axis by 1-based number.
    pub fn axis(&self, number: u8) -> Option<&Axis> {
        usize::from(number).checked_sub(1).and_then(|i| self.axes.get(i))
    }

    /// Mutable axis by 1-based number.
    pub fn axis_mut(&mut self, number: u8) -> Option<&mut Axis> {
        usize::from(number)
            .checked_sub(1)
            .and_then(move |i| self.axes.get_mut(i))
    }

    /// The kinematics solver.
    #[inline]
    pub fn kinematics(&self) -> &K {
        &self.kinematics
    }

    /// Commit/reset counter.
    #[inline]
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Snapshot of the joint state.
    pub fn snapshot(&self) -> JointSnapshot {
        JointSnapshot {
            commanded: self.current,
            reference: self.last,
            pose: self.pose,
            generation: self.generation,
        }
    }

    /// Check every axis of `target` against its limits.
    ///
    /// All six axes are checked and every violation is reported.
    pub fn validate_joints(&self, target: &Joint6D) -> Result<()> {
        let violations = check_joints(self.limits(), target);
        if violations.is_empty() {
            return Ok(());
        }

        for v in violations.iter() {
            let limits = &self.axes[usize::from(v.axis) - 1].config().limits;
            warn!(
                "axis {} limited to [{}, {}], commanded {}",
                v.axis,
                limits.min.0,
                limits.max.0,
                v.value.0
            );
        }
        Err(MotionError::LimitViolation(violations).into())
    }

    /// Accept a joint-space target and compute synchronized speeds.
    ///
    /// Nothing is sent to the drivers; call [`commit`](Self::commit) to move.
    /// A rejected target leaves every piece of planner state untouched.
    pub fn move_j(&mut self, target: Joint6D) -> Result<MovePlan> {
        let pose = self.kinematics.solve_forward(&target);
        debug!(
            "move_j pose x={} y={} z={} a={} b={} c={}",
            pose.x, pose.y, pose.z, pose.a, pose.b, pose.c
        );

        self.validate_joints(&target)?;

        let delta = target - self.last;
        let reductions = self.reductions();
        let Some(profile) = SyncProfile::compute(&delta, &reductions, self.nominal_speed) else {
            debug!("move_j target matches reference, nothing to do");
            self.current = target;
            self.pose = pose;
            return Ok(MovePlan::AlreadyThere);
        };

        for (axis, &speed) in self.axes.iter_mut().zip(profile.speeds.iter()) {
            axis.set_speed(speed);
        }
        debug!(
            "move_j sync axis {} T={} speeds [{}, {}, {}, {}, {}, {}]",
            profile.sync_axis + 1,
            profile.duration,
            profile.speeds[0],
            profile.speeds[1],
            profile.speeds[2],
            profile.speeds[3],
            profile.speeds[4],
            profile.speeds[5]
        );

        self.current = target;
        self.pose = pose;
        Ok(MovePlan::Synchronized(profile))
    }

    /// Accept a Cartesian target.
    ///
    /// Asks the solver for candidates seeded with the reference joints, drops
    /// those outside the limits and moves to the one whose largest joint
    /// displacement from the current target is smallest.
    pub fn move_l(&mut self, pose: Pose6D) -> Result<MovePlan> {
        let candidates = self.kinematics.solve_inverse(&pose, &self.last);
        let chosen = select_closest(&self.current, candidates.iter().copied(), |c| {
            check_joints(self.limits(), c).is_empty()
        });

        match chosen {
            Some(index) => {
                debug!("move_l chose IK candidate {} of {}", index, candidates.len());
                self.move_j(candidates[index])
            }
            None => {
                warn!("move_l: none of {} IK candidates within limits", candidates.len());
                Err(MotionError::UnreachablePose {
                    candidates: candidates.len() as u8,
                }
                .into())
            }
        }
    }

    /// Signed pulses the next commit would send to each axis.
    pub fn pulse_plan(&self) -> [Pulses; 6] {
        core::array::from_fn(|i| {
            self.axes[i].pulses_for(Degrees(self.current[i] - self.last[i]))
        })
    }

    /// Send the accepted target to the drivers and start the move.
    ///
    /// Issues one relative move per axis, pausing `settle_ms` after each, then
    /// the start latch. The reference is updated only once everything has been
    /// sent. A transport failure part way through leaves the drivers partially
    /// commanded and the reference unchanged.
    pub fn commit<T, D>(&mut self, transport: &mut T, delay: &mut D) -> Result<()>
    where
        T: MotorTransport,
        D: DelayNs,
    {
        let pulses = self.pulse_plan();
        for (axis, &p) in self.axes.iter().zip(pulses.iter()) {
            let command = axis.move_command(p);
            trace!(
                "axis {} dir {} speed {} acc {} pulses {}",
                command.axis,
                command.direction.bit(),
                command.speed,
                command.acceleration,
                command.pulses
            );
            transport
                .move_axis(&command)
                .map_err(|_| HardwareError::Transport { axis: command.axis })?;
            delay.delay_ms(self.settle_ms);
        }

        transport
            .commit()
            .map_err(|_| HardwareError::Transport { axis: 0 })?;

        self.last = self.current;
        self.generation = self.generation.wrapping_add(1);
        info!("motion committed, generation {}", self.generation);
        Ok(())
    }

    /// Forget the reference and assume the rest posture.
    ///
    /// Called after homing; the accepted target is reset too so a stray commit
    /// does not replay the pre-homing move.
    pub fn reset_reference(&mut self) {
        self.last = self.rest_posture;
        self.current = self.rest_posture;
        self.pose = self.kinematics.solve_forward(&self.rest_posture);
        for axis in self.axes.iter_mut() {
            axis.set_speed(0.0);
        }
        self.generation = self.generation.wrapping_add(1);
        info!("reference reset to rest posture, generation {}", self.generation);
    }

    fn reductions(&self) -> [f64; 6] {
        core::array::from_fn(|i| self.axes[i].reduction())
    }

    fn limits(&self) -> impl Iterator<Item = &AngleLimits> {
        self.axes.iter().map(|a| &a.config().limits)
    }
}

/// Index of the valid candidate closest to `from`.
///
/// Distance is the largest absolute joint displacement. Ties keep the first
/// candidate; `None` when no candidate passes `is_valid`.
pub fn select_closest<I, F>(from: &Joint6D, candidates: I, is_valid: F) -> Option<usize>
where
    I: IntoIterator<Item = Joint6D>,
    F: Fn(&Joint6D) -> bool,
{
    let mut best: Option<(usize, f64)> = None;
    for (i, candidate) in candidates.into_iter().enumerate() {
        if !is_valid(&candidate) {
            continue;
        }
        let (_, distance) = (candidate - *from).abs_max();
        match best {
            Some((_, d)) if distance.0 >= d => {}
            _ => best = Some((i, distance.0)),
        }
    }
    best.map(|(i, _)| i)
}
