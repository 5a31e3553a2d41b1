//! Per-axis configuration from TOML.

use heapless::String;
use serde::Deserialize;

use super::limits::AngleLimits;
use super::units::Degrees;
use crate::motion::Direction;

/// Static configuration of one arm joint.
#[derive(Debug, Clone, Deserialize)]
pub struct AxisConfig {
    /// Human-readable name (max 32 chars).
    #[serde(default)]
    pub name: String<32>,

    /// Hard travel limits in joint degrees.
    pub limits: AngleLimits,

    /// Gearbox multiplier from joint degrees to motor degrees.
    #[serde(default = "default_reduction")]
    pub reduction: f64,

    /// Invert the driver direction bit (false sends 0 for positive moves).
    #[serde(default)]
    pub invert_direction: bool,

    /// Mechanical zero offset added to readback angles.
    #[serde(default, rename = "offset_degrees")]
    pub offset: Degrees,

    /// Driver acceleration setting sent with every move (0 = no ramp).
    #[serde(default)]
    pub acceleration: u8,
}

fn default_reduction() -> f64 {
    1.0
}

impl AxisConfig {
    /// Create an axis with the given limits and defaults elsewhere.
    pub fn new(name: &str, limits: AngleLimits) -> Self {
        Self {
            name: String::try_from(name).unwrap_or_default(),
            limits,
            reduction: default_reduction(),
            invert_direction: false,
            offset: Degrees::default(),
            acceleration: 0,
        }
    }

    /// Set direction inversion.
    pub fn inverted(mut self) -> Self {
        self.invert_direction = true;
        self
    }

    /// Set the mechanical zero offset.
    pub fn with_offset(mut self, offset: Degrees) -> Self {
        self.offset = offset;
        self
    }

    /// Set the gearbox reduction.
    pub fn with_reduction(mut self, reduction: f64) -> Self {
        self.reduction = reduction;
        self
    }

    /// Driver direction for a positive joint move.
    pub fn base_direction(&self) -> Direction {
        if self.invert_direction {
            Direction::CounterClockwise
        } else {
            Direction::Clockwise
        }
    }

    /// Driver direction for a displacement of the given sign.
    ///
    /// Negative displacements flip the configured direction.
    pub fn direction_for(&self, negative: bool) -> Direction {
        let base = self.base_direction();
        if negative {
            base.reversed()
        } else {
            base
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_resolution() {
        let axis = AxisConfig::new("J2", AngleLimits::new(-90.1, 90.1));
        assert_eq!(axis.direction_for(false), Direction::Clockwise);
        assert_eq!(axis.direction_for(true), Direction::CounterClockwise);

        let axis = axis.inverted();
        assert_eq!(axis.direction_for(false), Direction::CounterClockwise);
        assert_eq!(axis.direction_for(true), Direction::Clockwise);
    }

    #[test]
    fn test_builder_defaults() {
        let axis = AxisConfig::new("J3", AngleLimits::new(-0.1, 180.1))
            .with_offset(Degrees(180.0))
            .with_reduction(30.0);

        assert_eq!(axis.name.as_str(), "J3");
        assert_eq!(axis.offset, Degrees(180.0));
        assert!((axis.reduction - 30.0).abs() < f64::EPSILON);
        assert_eq!(axis.acceleration, 0);
    }
}
