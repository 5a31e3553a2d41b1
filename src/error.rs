//! Error types for arm-motion.
//!
//! Provides unified error handling across configuration, motion planning and hardware exchanges.

use core::fmt;

use crate::config::{LimitViolation, LimitViolations};

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all arm-motion operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Move rejected before any command was issued
    Motion(MotionError),
    /// Exchange with the motor drivers failed
    Hardware(HardwareError),
    /// Named posture lookup error
    Posture(PostureError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Reduction ratio must be > 0
    InvalidReduction {
        /// Axis number, 1-based
        axis: u8,
        /// Configured value
        value: f64,
    },
    /// Limits must satisfy min < max
    InvalidLimits {
        /// Axis number, 1-based
        axis: u8,
        /// Minimum limit value
        min: f64,
        /// Maximum limit value
        max: f64,
    },
    /// Nominal speed must be > 0
    InvalidNominalSpeed(f64),
    /// Poll interval must be > 0
    InvalidPollInterval,
    /// The homing rest posture violates a limit
    RestPostureOutOfLimits(LimitViolation),
    /// A named posture violates a limit
    PostureOutOfLimits {
        /// Posture name
        name: heapless::String<32>,
        /// First violation found
        violation: LimitViolation,
    },
    /// A required builder component was not supplied
    MissingComponent(&'static str),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Motion validation errors. None of these issue hardware commands.
#[derive(Debug, Clone, PartialEq)]
pub enum MotionError {
    /// One or more axes outside their limits; every violation is listed
    LimitViolation(LimitViolations),
    /// No inverse-kinematics candidate satisfies the limits
    UnreachablePose {
        /// Number of candidates the solver returned
        candidates: u8,
    },
    /// Axis number outside 1..=6
    UnknownAxis(u8),
}

/// Motor bus errors.
#[derive(Debug, Clone, PartialEq)]
pub enum HardwareError {
    /// The transport reported a failure
    Transport {
        /// Addressed axis (0 for broadcast frames)
        axis: u8,
    },
    /// No response arrived within the configured timeout
    Timeout {
        /// Queried axis
        axis: u8,
        /// Time spent polling
        waited_ms: u32,
    },
    /// Response did not have the expected length
    ProtocolDecode {
        /// Queried axis
        axis: u8,
        /// Expected frame length
        expected: usize,
        /// Received frame length
        received: usize,
    },
}

/// Named posture errors.
#[derive(Debug, Clone, PartialEq)]
pub enum PostureError {
    /// No posture with that name
    NotFound(heapless::String<32>),
    /// Registry is at capacity
    RegistryFull,
    /// Name longer than 32 chars
    InvalidName,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Motion(e) => write!(f, "Motion error: {}", e),
            Error::Hardware(e) => write!(f, "Hardware error: {}", e),
            Error::Posture(e) => write!(f, "Posture error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::InvalidReduction { axis, value } => {
                write!(f, "Invalid reduction {} on axis {}. Must be > 0", value, axis)
            }
            ConfigError::InvalidLimits { axis, min, max } => {
                write!(f, "Invalid limits on axis {}: min ({}) must be < max ({})", axis, min, max)
            }
            ConfigError::InvalidNominalSpeed(v) => write!(f, "Invalid nominal speed: {}. Must be > 0", v),
            ConfigError::InvalidPollInterval => write!(f, "Poll interval must be > 0"),
            ConfigError::RestPostureOutOfLimits(v) => write!(f, "Rest posture out of limits: {}", v),
            ConfigError::PostureOutOfLimits { name, violation } => {
                write!(f, "Posture '{}' out of limits: {}", name, violation)
            }
            ConfigError::MissingComponent(what) => write!(f, "{} is required", what),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for MotionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotionError::LimitViolation(violations) => {
                write!(f, "Limit violation")?;
                for (i, v) in violations.iter().enumerate() {
                    let sep = if i == 0 { ": " } else { "; " };
                    write!(f, "{}{}", sep, v)?;
                }
                Ok(())
            }
            MotionError::UnreachablePose { candidates } => {
                write!(f, "Unreachable pose: none of {} IK candidates within limits", candidates)
            }
            MotionError::UnknownAxis(axis) => write!(f, "Unknown axis {}. Must be 1..=6", axis),
        }
    }
}

impl fmt::Display for HardwareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HardwareError::Transport { axis } => write!(f, "Transport failure addressing axis {}", axis),
            HardwareError::Timeout { axis, waited_ms } => {
                write!(f, "No response from axis {} after {} ms", axis, waited_ms)
            }
            HardwareError::ProtocolDecode { axis, expected, received } => {
                write!(f, "Axis {} replied with {} bytes, expected {}", axis, received, expected)
            }
        }
    }
}

impl fmt::Display for PostureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostureError::NotFound(name) => write!(f, "Posture '{}' not found", name),
            PostureError::RegistryFull => write!(f, "Posture registry full (max {})", crate::config::MAX_POSTURES),
            PostureError::InvalidName => write!(f, "Posture name too long (max 32 chars)"),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<MotionError> for Error {
    fn from(e: MotionError) -> Self {
        Error::Motion(e)
    }
}

impl From<HardwareError> for Error {
    fn from(e: HardwareError) -> Self {
        Error::Hardware(e)
    }
}

impl From<PostureError> for Error {
    fn from(e: PostureError) -> Self {
        Error::Posture(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for MotionError {}

#[cfg(feature = "std")]
impl std::error::Error for HardwareError {}

#[cfg(feature = "std")]
impl std::error::Error for PostureError {}
