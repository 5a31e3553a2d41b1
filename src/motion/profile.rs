//! Multi-axis speed synchronization.
//!
//! Timing uses a linear time-to-pulse approximation: acceleration and
//! deceleration ramps are ignored, so every axis is assumed to cruise for the
//! whole move.

use super::joint::Joint6D;

/// Driver pulses per joint degree at the motor shaft (3200 pulses per 360°).
///
/// Kept as the literal the drivers were calibrated against, not `3200.0 / 360.0`.
pub const DEG_TO_PULSE: f64 = 8.888888889;

/// Driver pulses per motor revolution.
pub const PULSES_PER_REVOLUTION: u32 = 3200;

/// Direction bit sent to a motor driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Direction bit 0.
    Clockwise,
    /// Direction bit 1.
    CounterClockwise,
}

impl Direction {
    /// Wire encoding.
    #[inline]
    pub const fn bit(self) -> u8 {
        match self {
            Direction::Clockwise => 0,
            Direction::CounterClockwise => 1,
        }
    }

    /// Decode a wire bit; any non-zero value is counter-clockwise.
    #[inline]
    pub const fn from_bit(bit: u8) -> Self {
        if bit == 0 {
            Direction::Clockwise
        } else {
            Direction::CounterClockwise
        }
    }

    /// The opposite direction.
    #[inline]
    pub const fn reversed(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }
}

/// Per-axis speeds that make all six joints finish together.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SyncProfile {
    /// Index (0-based) of the axis with the largest displacement.
    pub sync_axis: usize,

    /// Synchronization time `T`, in driver time units.
    pub duration: f64,

    /// Speed for each axis, in driver speed units.
    pub speeds: [f64; 6],
}

impl SyncProfile {
    /// Compute speeds for a joint displacement.
    ///
    /// The axis with the largest absolute displacement (lowest index on ties)
    /// runs at `nominal_speed`; every other axis is slowed proportionally.
    /// Returns `None` when every displacement is zero.
    pub fn compute(delta: &Joint6D, reductions: &[f64; 6], nominal_speed: f64) -> Option<Self> {
        let (sync_axis, max) = delta.abs_max();
        if max.0 == 0.0 {
            return None;
        }

        let duration = max.0 * reductions[sync_axis] / nominal_speed;

        let mut speeds = [0.0; 6];
        for (i, speed) in speeds.iter_mut().enumerate() {
            *speed = libm::fabs(delta[i] * reductions[i] / duration);
        }

        Some(Self {
            sync_axis,
            duration,
            speeds,
        })
    }

    /// Time each axis needs at its computed speed.
    ///
    /// Axes that do not move report zero.
    pub fn axis_time(&self, delta: &Joint6D, reductions: &[f64; 6], index: usize) -> f64 {
        if self.speeds[index] == 0.0 {
            0.0
        } else {
            libm::fabs(delta[index] * reductions[index]) / self.speeds[index]
        }
    }
}

/// Speed as sent to a driver: rounded to nearest and saturated to `u16`.
#[inline]
pub fn wire_speed(speed: f64) -> u16 {
    // `as` saturates and maps NaN to 0.
    libm::round(speed) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_bits() {
        assert_eq!(Direction::Clockwise.bit(), 0);
        assert_eq!(Direction::CounterClockwise.bit(), 1);
        assert_eq!(Direction::from_bit(1), Direction::CounterClockwise);
        assert_eq!(Direction::Clockwise.reversed(), Direction::CounterClockwise);
    }

    #[test]
    fn test_single_axis_move() {
        let delta = Joint6D::new(10.0, 0.0, 0.0, 0.0, 0.0, 0.0);
        let profile = SyncProfile::compute(&delta, &[1.0; 6], 50.0).unwrap();

        assert_eq!(profile.sync_axis, 0);
        assert!((profile.duration - 0.2).abs() < 1e-12);
        assert!((profile.speeds[0] - 50.0).abs() < 1e-9);
        assert!(profile.speeds[1..].iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_speeds_scale_with_displacement() {
        let delta = Joint6D::new(10.0, -5.0, 2.5, 0.0, 0.0, 0.0);
        let profile = SyncProfile::compute(&delta, &[1.0; 6], 50.0).unwrap();

        assert!((profile.speeds[1] - 25.0).abs() < 1e-9);
        assert!((profile.speeds[2] - 12.5).abs() < 1e-9);
    }

    #[test]
    fn test_reduction_of_sync_axis_sets_duration() {
        let delta = Joint6D::new(0.0, 0.0, 30.0, 0.0, 0.0, 10.0);
        let reductions = [1.0, 1.0, 4.0, 1.0, 1.0, 2.0];
        let profile = SyncProfile::compute(&delta, &reductions, 60.0).unwrap();

        // T = 30 * 4 / 60 = 2
        assert!((profile.duration - 2.0).abs() < 1e-12);
        // |10 * 2 / 2| = 10
        assert!((profile.speeds[5] - 10.0).abs() < 1e-9);
        assert!((profile.axis_time(&delta, &reductions, 5) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_delta_has_no_profile() {
        assert!(SyncProfile::compute(&Joint6D::ZERO, &[1.0; 6], 50.0).is_none());
    }

    #[test]
    fn test_wire_speed_rounds() {
        assert_eq!(wire_speed(49.999999999), 50);
        assert_eq!(wire_speed(12.4), 12);
        assert_eq!(wire_speed(1.0e9), u16::MAX);
    }
}
