//! Joint-space and Cartesian targets.

use core::ops::{Index, Sub};

use serde::Deserialize;

use crate::config::units::Degrees;

/// Six joint angles in degrees; index 0 is axis 1.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(transparent)]
pub struct Joint6D(pub [f64; 6]);

impl Joint6D {
    /// All joints at zero.
    pub const ZERO: Self = Self([0.0; 6]);

    /// Create from six angles, axis 1 first.
    #[inline]
    pub const fn new(j1: f64, j2: f64, j3: f64, j4: f64, j5: f64, j6: f64) -> Self {
        Self([j1, j2, j3, j4, j5, j6])
    }

    /// Angle of the joint at `index` (0-based).
    #[inline]
    pub fn get(&self, index: usize) -> Degrees {
        Degrees(self.0[index])
    }

    /// Iterate over the six angles.
    pub fn iter(&self) -> impl Iterator<Item = Degrees> + '_ {
        self.0.iter().map(|&a| Degrees(a))
    }

    /// Largest absolute angle and the index holding it.
    ///
    /// Ties resolve to the lowest index.
    pub fn abs_max(&self) -> (usize, Degrees) {
        let mut index = 0;
        let mut max = libm::fabs(self.0[0]);
        for (i, &a) in self.0.iter().enumerate().skip(1) {
            let abs = libm::fabs(a);
            if abs > max {
                max = abs;
                index = i;
            }
        }
        (index, Degrees(max))
    }
}

impl Sub for Joint6D {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        let mut out = [0.0; 6];
        for (o, (a, b)) in out.iter_mut().zip(self.0.iter().zip(rhs.0.iter())) {
            *o = a - b;
        }
        Self(out)
    }
}

impl Index<usize> for Joint6D {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl From<[f64; 6]> for Joint6D {
    fn from(angles: [f64; 6]) -> Self {
        Self(angles)
    }
}

/// End-effector pose: position plus orientation angles.
///
/// The orientation convention is whatever the kinematics solver uses.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pose6D {
    /// X position.
    pub x: f64,
    /// Y position.
    pub y: f64,
    /// Z position.
    pub z: f64,
    /// First orientation angle.
    pub a: f64,
    /// Second orientation angle.
    pub b: f64,
    /// Third orientation angle.
    pub c: f64,
}

impl Pose6D {
    /// Create a pose.
    pub const fn new(x: f64, y: f64, z: f64, a: f64, b: f64, c: f64) -> Self {
        Self { x, y, z, a, b, c }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abs_max_first_occurrence_wins() {
        let j = Joint6D::new(1.0, -5.0, 5.0, 0.0, -5.0, 2.0);
        let (index, max) = j.abs_max();
        assert_eq!(index, 1);
        assert_eq!(max, Degrees(5.0));
    }

    #[test]
    fn test_abs_max_all_zero() {
        assert_eq!(Joint6D::ZERO.abs_max(), (0, Degrees(0.0)));
    }

    #[test]
    fn test_sub() {
        let a = Joint6D::new(10.0, 0.0, 90.0, 0.0, 0.0, -30.0);
        let b = Joint6D::new(0.0, 0.0, 100.0, 0.0, 0.0, 30.0);
        assert_eq!(a - b, Joint6D::new(10.0, 0.0, -10.0, 0.0, 0.0, -60.0));
    }
}
