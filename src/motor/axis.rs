//! Runtime state of one arm axis.

use crate::config::units::{Degrees, Pulses};
use crate::config::AxisConfig;
use crate::motion::{wire_speed, Direction, DEG_TO_PULSE};
use crate::transport::{AxisMove, MoveMode};

/// One joint: static configuration plus the values that change per move.
#[derive(Debug, Clone)]
pub struct Axis {
    /// Driver address, 1..=6.
    number: u8,
    /// Static configuration.
    config: AxisConfig,
    /// Speed computed by the last accepted move.
    speed: f64,
    /// Acceleration sent with moves.
    acceleration: u8,
    /// Last decoded readback angle, if any.
    current_angle: Option<Degrees>,
}

impl Axis {
    /// Create an axis at rest.
    pub fn new(number: u8, config: AxisConfig) -> Self {
        let acceleration = config.acceleration;
        Self {
            number,
            config,
            speed: 0.0,
            acceleration,
            current_angle: None,
        }
    }

    /// Driver address.
    #[inline]
    pub fn number(&self) -> u8 {
        self.number
    }

    /// Static configuration.
    #[inline]
    pub fn config(&self) -> &AxisConfig {
        &self.config
    }

    /// Gearbox reduction.
    #[inline]
    pub fn reduction(&self) -> f64 {
        self.config.reduction
    }

    /// Speed from the last accepted move, in driver units.
    #[inline]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Acceleration sent with moves.
    #[inline]
    pub fn acceleration(&self) -> u8 {
        self.acceleration
    }

    /// Last readback angle. Informational; never fed back into planning.
    #[inline]
    pub fn current_angle(&self) -> Option<Degrees> {
        self.current_angle
    }

    pub(crate) fn set_speed(&mut self, speed: f64) {
        self.speed = speed;
    }

    /// Override the acceleration sent with subsequent moves.
    pub fn set_acceleration(&mut self, acceleration: u8) {
        self.acceleration = acceleration;
    }

    pub(crate) fn set_current_angle(&mut self, angle: Degrees) {
        self.current_angle = Some(angle);
    }

    /// Pulses for a joint displacement, truncated toward zero.
    #[inline]
    pub fn pulses_for(&self, delta: Degrees) -> Pulses {
        Pulses::from_degrees(delta, DEG_TO_PULSE, self.config.reduction)
    }

    /// Calibrated joint angle for a raw motor angle.
    #[inline]
    pub fn calibrated(&self, raw: Degrees) -> Degrees {
        Degrees(raw.0 / self.config.reduction) + self.config.offset
    }

    /// Synchronized relative move for a signed pulse count.
    pub fn move_command(&self, pulses: Pulses) -> AxisMove {
        let direction: Direction = self.config.direction_for(pulses.is_negative());
        AxisMove {
            axis: self.number,
            direction,
            speed: wire_speed(self.speed),
            acceleration: self.acceleration,
            pulses: pulses.magnitude(),
            mode: MoveMode::Relative,
            sync: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AngleLimits;

    fn make_axis(reduction: f64) -> Axis {
        let config = AxisConfig::new("J1", AngleLimits::new(-90.0, 90.0)).with_reduction(reduction);
        Axis::new(1, config)
    }

    #[test]
    fn test_pulses_for_delta() {
        let axis = make_axis(1.0);
        // 45° * 8.888888889 = 400.000000005
        assert_eq!(axis.pulses_for(Degrees(45.0)), Pulses(400));
        assert_eq!(axis.pulses_for(Degrees(-45.0)), Pulses(-400));
    }

    #[test]
    fn test_move_command_flips_direction_for_negative() {
        let mut axis = make_axis(2.0);
        axis.set_speed(24.6);

        let cmd = axis.move_command(Pulses(-800));
        assert_eq!(cmd.axis, 1);
        assert_eq!(cmd.direction, Direction::CounterClockwise);
        assert_eq!(cmd.pulses, 800);
        assert_eq!(cmd.speed, 25);
        assert_eq!(cmd.mode, MoveMode::Relative);
        assert!(cmd.sync);

        let cmd = axis.move_command(Pulses(800));
        assert_eq!(cmd.direction, Direction::Clockwise);
    }

    #[test]
    fn test_calibrated_angle() {
        let config = AxisConfig::new("J2", AngleLimits::new(-90.0, 90.0))
            .with_reduction(2.0)
            .with_offset(Degrees(-90.0));
        let axis = Axis::new(2, config);

        assert_eq!(axis.calibrated(Degrees(100.0)), Degrees(-40.0));
    }
}
