//! Configuration validation.

use crate::error::{ConfigError, Error, Result};
use crate::motion::Joint6D;

use super::limits::{AngleLimits, LimitViolations};
use super::{ArmConfig, AxisConfig};

/// Validate an arm configuration.
///
/// Checks:
/// - Reductions are positive
/// - Limits are valid (min < max)
/// - Nominal speed and poll interval are positive
/// - Rest posture and named postures lie within every axis' limits
pub fn validate_config(config: &ArmConfig) -> Result<()> {
    for (i, axis) in config.axes.iter().enumerate() {
        validate_axis(i as u8 + 1, axis)?;
    }

    if config.nominal_speed.is_nan() || config.nominal_speed <= 0.0 {
        return Err(Error::Config(ConfigError::InvalidNominalSpeed(
            config.nominal_speed,
        )));
    }

    if config.timing.poll_interval_ms == 0 {
        return Err(Error::Config(ConfigError::InvalidPollInterval));
    }

    if let Some(violation) = check_joints(axis_limits(config), &config.rest_posture).first() {
        return Err(Error::Config(ConfigError::RestPostureOutOfLimits(*violation)));
    }

    for (name, posture) in config.postures.iter() {
        if let Some(violation) = check_joints(axis_limits(config), posture).first() {
            return Err(Error::Config(ConfigError::PostureOutOfLimits {
                name: name.clone(),
                violation: *violation,
            }));
        }
    }

    Ok(())
}

fn axis_limits(config: &ArmConfig) -> impl Iterator<Item = &AngleLimits> {
    config.axes.iter().map(|a| &a.limits)
}

fn validate_axis(axis: u8, config: &AxisConfig) -> Result<()> {
    if config.reduction.is_nan() || config.reduction <= 0.0 {
        return Err(Error::Config(ConfigError::InvalidReduction {
            axis,
            value: config.reduction,
        }));
    }

    if !config.limits.is_valid() {
        return Err(Error::Config(ConfigError::InvalidLimits {
            axis,
            min: config.limits.min.0,
            max: config.limits.max.0,
        }));
    }

    Ok(())
}

/// Check all six joint angles against their axis limits.
///
/// Every axis is checked; the result lists each violation in axis order and is
/// empty when the posture is reachable.
pub fn check_joints<'a, I>(limits: I, joints: &Joint6D) -> LimitViolations
where
    I: IntoIterator<Item = &'a AngleLimits>,
{
    let mut violations = LimitViolations::new();
    for (i, (limits, angle)) in limits.into_iter().zip(joints.iter()).enumerate() {
        if let Some(v) = limits.check(i as u8 + 1, angle) {
            // Capacity equals the axis count.
            let _ = violations.push(v);
        }
    }
    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::units::Degrees;
    use crate::config::Bound;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&ArmConfig::default()).is_ok());
    }

    #[test]
    fn test_invalid_reduction() {
        let mut config = ArmConfig::default();
        config.axes[2].reduction = -1.0;

        assert!(matches!(
            validate_config(&config),
            Err(Error::Config(ConfigError::InvalidReduction { axis: 3, .. }))
        ));
    }

    #[test]
    fn test_rest_posture_out_of_limits() {
        let mut config = ArmConfig::default();
        config.rest_posture = Joint6D::new(10.0, -90.0, 180.0, 0.0, 0.0, 0.0);

        match validate_config(&config) {
            Err(Error::Config(ConfigError::RestPostureOutOfLimits(v))) => {
                assert_eq!(v.axis, 1);
                assert_eq!(v.bound, Bound::Max);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_check_joints_reports_every_axis() {
        let config = ArmConfig::default();
        let joints = Joint6D::new(5.0, 0.0, -10.0, 0.0, 20.0, 0.0);

        let violations = check_joints(axis_limits(&config), &joints);
        let axes: heapless::Vec<u8, 6> = violations.iter().map(|v| v.axis).collect();
        assert_eq!(axes.as_slice(), &[1, 3, 5]);
        assert_eq!(violations[0].limit, Degrees(0.1));
        assert_eq!(violations[0].value, Degrees(5.0));
    }
}
