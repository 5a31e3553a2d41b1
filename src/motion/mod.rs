//! Joint-space motion: targets, speed synchronization and move planning.

mod joint;
mod planner;
mod profile;

pub use joint::{Joint6D, Pose6D};
pub use planner::{select_closest, JointSnapshot, MotionPlanner, MovePlan};
pub use profile::{wire_speed, Direction, SyncProfile, DEG_TO_PULSE, PULSES_PER_REVOLUTION};
