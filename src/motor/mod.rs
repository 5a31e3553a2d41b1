//! Motor module for arm-motion.
//!
//! Per-axis runtime state, homing, readback and the [`ArmSystem`] facade.

mod axis;
mod builder;
pub mod homing;
mod readback;
mod system;

pub use axis::Axis;
pub use builder::ArmSystemBuilder;
pub use homing::{HomingSequencer, HomingStep, HOMING_ORDER};
pub use readback::read_angle;
pub use system::ArmSystem;
