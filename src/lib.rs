//! # arm-motion
//!
//! Motion core for a six-axis serial-bus robot arm with embedded-hal 1.0 timing.
//!
//! ## Features
//!
//! - **Limit-checked moves**: Every joint target is validated against per-axis limits before any command is sent
//! - **Synchronized joints**: Per-axis speeds are scaled so all six joints finish together
//! - **Cartesian moves**: Picks the closest in-limit inverse-kinematics solution
//! - **Homing**: Fixed coarse pass over axes 5, 4, 3, 1, 2 plus an encoder-based fine zero for axis 6
//! - **Bounded readback**: Position queries poll with a timeout through the injected `DelayNs`
//! - **no_std compatible**: Core library works without standard library
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use arm_motion::{ArmSystem, Joint6D, Pose6D};
//!
//! let config = arm_motion::load_config("arm.toml")?;
//!
//! let mut arm = ArmSystem::builder()
//!     .config(config)
//!     .transport(bus)
//!     .kinematics(solver)
//!     .delay(delay)
//!     .build()?;
//!
//! arm.homing()?;
//! arm.move_j(Joint6D::new(-20.0, -60.0, 150.0, 10.0, -30.0, 0.0))?;
//! arm.move_l(Pose6D::new(250.0, 0.0, 180.0, 180.0, 0.0, 0.0))?;
//!
//! let snapshot = arm.snapshot();
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O and TOML parsing
//! - `tracing` (default): Logs through `tracing`
//! - `alloc`: Enables heap allocation for no_std with allocator
//! - `defmt`: Logs through `defmt` on embedded targets (exclusive with `tracing`)

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

#[cfg(feature = "alloc")]
extern crate alloc;

// Must come first so the logging macros are visible to every module.
mod fmt;

// Core modules
pub mod config;
pub mod error;
pub mod kinematics;
pub mod motion;
pub mod motor;
pub mod posture;
pub mod transport;

// Re-exports for ergonomic API
pub use config::{validate_config, ArmConfig, AxisConfig, AngleLimits, LimitViolation};
pub use error::{Error, Result};
pub use kinematics::{IkCandidates, Kinematics};
pub use motion::{Direction, Joint6D, JointSnapshot, MotionPlanner, MovePlan, Pose6D, SyncProfile};
pub use motor::{ArmSystem, ArmSystemBuilder, Axis, HomingSequencer};
pub use posture::PostureRegistry;
pub use transport::{AxisMove, MotorTransport, MoveMode};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};

// Unit types
pub use config::units::{Degrees, Pulses};
