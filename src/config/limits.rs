//! Joint travel limits.

use core::fmt;

use serde::Deserialize;

use super::units::Degrees;

/// Hard travel bounds for one joint, in joint degrees.
///
/// Both bounds are inclusive. A commanded angle strictly outside them rejects the whole move.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct AngleLimits {
    /// Minimum allowed angle in degrees.
    #[serde(rename = "min_degrees")]
    pub min: Degrees,

    /// Maximum allowed angle in degrees.
    #[serde(rename = "max_degrees")]
    pub max: Degrees,
}

impl AngleLimits {
    /// Create new limits.
    pub const fn new(min: f64, max: f64) -> Self {
        Self {
            min: Degrees(min),
            max: Degrees(max),
        }
    }

    /// Check if limits are valid (min < max).
    pub fn is_valid(&self) -> bool {
        self.min.0 < self.max.0
    }

    /// Check if an angle is within limits.
    pub fn contains(&self, angle: Degrees) -> bool {
        angle.0 >= self.min.0 && angle.0 <= self.max.0
    }

    /// Check an angle for `axis` (1-based), returning the violated bound if any.
    ///
    /// NaN is never within limits and is reported against the minimum.
    pub fn check(&self, axis: u8, angle: Degrees) -> Option<LimitViolation> {
        if angle.0 > self.max.0 {
            Some(LimitViolation {
                axis,
                bound: Bound::Max,
                limit: self.max,
                value: angle,
            })
        } else if self.contains(angle) {
            None
        } else {
            Some(LimitViolation {
                axis,
                bound: Bound::Min,
                limit: self.min,
                value: angle,
            })
        }
    }
}

/// Which side of the range was crossed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Bound {
    /// Below the minimum.
    Min,
    /// Above the maximum.
    Max,
}

/// One axis outside its configured range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LimitViolation {
    /// Axis number, 1-based.
    pub axis: u8,
    /// Violated side.
    pub bound: Bound,
    /// The bound that was crossed.
    pub limit: Degrees,
    /// Offending commanded angle.
    pub value: Degrees,
}

impl fmt::Display for LimitViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = match self.bound {
            Bound::Min => "below minimum",
            Bound::Max => "above maximum",
        };
        write!(
            f,
            "axis {} at {}° is {} {}°",
            self.axis, self.value.0, side, self.limit.0
        )
    }
}

/// Every violation found in one validation pass (at most one per axis).
pub type LimitViolations = heapless::Vec<LimitViolation, 6>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limits_contains_inclusive() {
        let limits = AngleLimits::new(-90.1, 0.1);

        assert!(limits.contains(Degrees(0.0)));
        assert!(limits.contains(Degrees(0.1)));
        assert!(limits.contains(Degrees(-90.1)));
        assert!(!limits.contains(Degrees(0.2)));
        assert!(!limits.contains(Degrees(-91.0)));
        assert!(!limits.contains(Degrees(f64::NAN)));
    }

    #[test]
    fn test_check_reports_bound() {
        let limits = AngleLimits::new(-90.1, 0.1);

        let v = limits.check(1, Degrees(5.0)).unwrap();
        assert_eq!(v.axis, 1);
        assert_eq!(v.bound, Bound::Max);
        assert_eq!(v.limit, Degrees(0.1));
        assert_eq!(v.value, Degrees(5.0));

        let v = limits.check(1, Degrees(-100.0)).unwrap();
        assert_eq!(v.bound, Bound::Min);
        assert_eq!(v.limit, Degrees(-90.1));

        assert!(limits.check(1, Degrees(-45.0)).is_none());
    }

    #[test]
    fn test_invalid_limits() {
        assert!(!AngleLimits::new(10.0, -10.0).is_valid());
        assert!(!AngleLimits::new(0.0, 0.0).is_valid());
        assert!(AngleLimits::new(-0.1, 180.1).is_valid());
    }
}
