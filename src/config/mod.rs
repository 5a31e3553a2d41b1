//! Configuration module for arm-motion.
//!
//! Provides types for loading and validating per-axis calibration, timing and
//! named postures from TOML files (with `std` feature) or pre-built data.

mod arm;
mod axis;
mod limits;
pub mod units;
#[cfg(feature = "std")]
mod loader;
mod validation;

pub use arm::{ArmConfig, ByteRadix, ReadbackConfig, TimingConfig, MAX_POSTURES};
pub use axis::AxisConfig;
pub use limits::{AngleLimits, Bound, LimitViolation, LimitViolations};
pub use validation::{check_joints, validate_config};

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{Degrees, Pulses};
