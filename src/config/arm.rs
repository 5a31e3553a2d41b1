//! Arm configuration - root configuration structure.

use heapless::{FnvIndexMap, String};
use serde::Deserialize;

use super::axis::AxisConfig;
use super::limits::AngleLimits;
use super::units::Degrees;
use crate::motion::Joint6D;

/// Maximum number of named postures.
pub const MAX_POSTURES: usize = 16;

/// Root configuration structure from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct ArmConfig {
    /// The six joints, axis 1 first.
    #[serde(default = "default_axes")]
    pub axes: [AxisConfig; 6],

    /// Driver speed given to the axis with the largest displacement.
    #[serde(default = "default_nominal_speed")]
    pub nominal_speed: f64,

    /// Joint posture assumed after the coarse homing pass.
    #[serde(default = "default_rest_posture")]
    pub rest_posture: Joint6D,

    /// Settling and polling intervals.
    #[serde(default)]
    pub timing: TimingConfig,

    /// Position readback decoding.
    #[serde(default)]
    pub readback: ReadbackConfig,

    /// Named joint postures.
    #[serde(default)]
    pub postures: FnvIndexMap<String<32>, Joint6D, MAX_POSTURES>,
}

/// Blind delays and response polling, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Pause after each command so the driver can process it.
    pub settle_ms: u32,
    /// Interval between checks of the response buffer.
    pub poll_interval_ms: u32,
    /// Give up on a response after this long.
    pub response_timeout_ms: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            settle_ms: 50,
            poll_interval_ms: 50,
            response_timeout_ms: 2000,
        }
    }
}

/// How the four position bytes of a readback frame are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ByteRadix {
    /// Weights 255³, 255², 255, 1. Matches the existing calibration.
    #[default]
    Legacy255,
    /// Big-endian weights 256³, 256², 256, 1.
    Radix256,
}

impl ByteRadix {
    /// Multiplier between successive bytes.
    pub const fn base(self) -> u64 {
        match self {
            ByteRadix::Legacy255 => 255,
            ByteRadix::Radix256 => 256,
        }
    }
}

/// Readback decoding options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReadbackConfig {
    /// Byte combination for the pulse magnitude.
    pub byte_radix: ByteRadix,
    /// Negate the magnitude when the sign byte is non-zero.
    pub apply_sign: bool,
}

impl Default for ReadbackConfig {
    fn default() -> Self {
        Self {
            byte_radix: ByteRadix::Legacy255,
            apply_sign: true,
        }
    }
}

fn default_axes() -> [AxisConfig; 6] {
    [
        AxisConfig::new("J1", AngleLimits::new(-90.1, 0.1)),
        AxisConfig::new("J2", AngleLimits::new(-90.1, 90.1))
            .inverted()
            .with_offset(Degrees(-90.0)),
        AxisConfig::new("J3", AngleLimits::new(-0.1, 180.1)).with_offset(Degrees(180.0)),
        AxisConfig::new("J4", AngleLimits::new(-0.1, 180.1)).inverted(),
        AxisConfig::new("J5", AngleLimits::new(-90.1, 0.1)),
        AxisConfig::new("J6", AngleLimits::new(-180.1, 180.1)),
    ]
}

fn default_nominal_speed() -> f64 {
    50.0
}

fn default_rest_posture() -> Joint6D {
    Joint6D::new(0.0, -90.0, 180.0, 0.0, 0.0, 0.0)
}

impl Default for ArmConfig {
    fn default() -> Self {
        Self {
            axes: default_axes(),
            nominal_speed: default_nominal_speed(),
            rest_posture: default_rest_posture(),
            timing: TimingConfig::default(),
            readback: ReadbackConfig::default(),
            postures: FnvIndexMap::new(),
        }
    }
}

impl ArmConfig {
    /// Get an axis by 1-based number.
    pub fn axis(&self, axis: u8) -> Option<&AxisConfig> {
        usize::from(axis)
            .checked_sub(1)
            .and_then(|i| self.axes.get(i))
    }

    /// Get a named posture.
    pub fn posture(&self, name: &str) -> Option<&Joint6D> {
        self.postures
            .iter()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, v)| v)
    }

    /// List all posture names.
    pub fn posture_names(&self) -> impl Iterator<Item = &str> {
        self.postures.keys().map(|s| s.as_str())
    }
}
