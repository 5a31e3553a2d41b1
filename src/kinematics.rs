//! Kinematics solver interface.
//!
//! The numerical forward/inverse solver lives outside this crate; the planner
//! only consumes it through [`Kinematics`].

use crate::motion::{Joint6D, Pose6D};

/// Maximum number of inverse-kinematics solutions for a 6-DOF arm.
pub const MAX_IK_SOLUTIONS: usize = 8;

/// Joint configurations reaching one pose, in solver order.
pub type IkCandidates = heapless::Vec<Joint6D, MAX_IK_SOLUTIONS>;

/// Forward and inverse kinematics for the arm.
///
/// Implementations must be pure: the same input always yields the same output.
pub trait Kinematics {
    /// End-effector pose for a joint configuration.
    fn solve_forward(&self, joints: &Joint6D) -> Pose6D;

    /// Up to eight joint configurations reaching `pose`.
    ///
    /// `seed` is the current joint belief and may be used to resolve
    /// wrist-flip ambiguities. Candidates are not checked against limits.
    fn solve_inverse(&self, pose: &Pose6D, seed: &Joint6D) -> IkCandidates;
}

impl<K: Kinematics + ?Sized> Kinematics for &K {
    fn solve_forward(&self, joints: &Joint6D) -> Pose6D {
        (**self).solve_forward(joints)
    }

    fn solve_inverse(&self, pose: &Pose6D, seed: &Joint6D) -> IkCandidates {
        (**self).solve_inverse(pose, seed)
    }
}
