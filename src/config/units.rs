//! Unit types for physical quantities.
//!
//! Joint angles are kept in degrees as `f64` so pulse conversion matches the
//! driver calibration bit for bit. Motor positions are signed pulse counts.

use core::ops::{Add, Neg, Sub};

use serde::Deserialize;

/// Angular position in degrees.
///
/// Used for configuration and user-facing API. Converted to [`Pulses`] at commit time.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[serde(transparent)]
pub struct Degrees(pub f64);

impl Degrees {
    /// Create a new Degrees value.
    #[inline]
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Absolute value.
    #[inline]
    pub fn abs(self) -> Self {
        Self(libm::fabs(self.0))
    }

    /// Convert to radians.
    #[inline]
    pub fn to_radians(self) -> f64 {
        self.0.to_radians()
    }

    /// Create from radians.
    #[inline]
    pub fn from_radians(radians: f64) -> Self {
        Self(radians.to_degrees())
    }
}

impl Add for Degrees {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Degrees {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Neg for Degrees {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

/// Motor displacement in driver pulses.
///
/// Signed: the sign selects the rotation direction relative to the axis' configured one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Pulses(pub i64);

impl Pulses {
    /// Create a new Pulses value.
    #[inline]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> i64 {
        self.0
    }

    /// Magnitude as sent on the wire, saturated to `u32`.
    #[inline]
    pub fn magnitude(self) -> u32 {
        u32::try_from(self.0.unsigned_abs()).unwrap_or(u32::MAX)
    }

    /// True for a negative displacement.
    #[inline]
    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Convert a joint-angle delta to pulses, truncating toward zero.
    ///
    /// `pulses_per_degree` is the motor-side resolution and `reduction` the
    /// gearbox multiplier from joint degrees to motor degrees.
    #[inline]
    pub fn from_degrees(delta: Degrees, pulses_per_degree: f64, reduction: f64) -> Self {
        // `as` truncates toward zero and saturates on overflow.
        Self((delta.0 * pulses_per_degree * reduction) as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEG_TO_PULSE: f64 = 8.888888889;

    #[test]
    fn test_degrees_conversion() {
        let d = Degrees::new(180.0);
        assert!((d.to_radians() - core::f64::consts::PI).abs() < 1e-12);
        assert!((Degrees::from_radians(core::f64::consts::PI).value() - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_pulses_truncate_toward_zero() {
        // 10° * 8.888888889 = 88.88888889
        assert_eq!(Pulses::from_degrees(Degrees(10.0), DEG_TO_PULSE, 1.0), Pulses(88));
        assert_eq!(Pulses::from_degrees(Degrees(-10.0), DEG_TO_PULSE, 1.0), Pulses(-88));
    }

    #[test]
    fn test_pulses_with_reduction() {
        // 90° * 8.888888889 * 50 = 40000.0000005
        assert_eq!(Pulses::from_degrees(Degrees(90.0), DEG_TO_PULSE, 50.0), Pulses(40000));
    }

    #[test]
    fn test_pulse_magnitude() {
        assert_eq!(Pulses(-1234).magnitude(), 1234);
        assert!(Pulses(-1).is_negative());
        assert_eq!(Pulses(i64::MIN).magnitude(), u32::MAX);
    }
}
