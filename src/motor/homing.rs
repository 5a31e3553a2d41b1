//! Homing, zero marking and emergency stop.
//!
//! The coarse pass is a fixed schedule of timed steps. Every pause goes through
//! the injected [`DelayNs`], so tests observe the exact sequence without
//! waiting on real time.

use embedded_hal::delay::DelayNs;
use heapless::Vec;

use crate::config::TimingConfig;
use crate::error::{HardwareError, Result};
use crate::kinematics::Kinematics;
use crate::motion::{Direction, MotionPlanner, PULSES_PER_REVOLUTION};
use crate::transport::frame::{self, ENCODER_RESPONSE_LEN, ENCODER_SCALE, EMERGENCY_STOP};
use crate::transport::{request, AxisMove, MotorTransport, MoveMode};

/// Axis visit order and zero-search direction for the coarse pass.
///
/// Axis 6 is left to [`arm6_homing`].
pub const HOMING_ORDER: [(u8, Direction); 5] = [
    (5, Direction::CounterClockwise),
    (4, Direction::Clockwise),
    (3, Direction::CounterClockwise),
    (1, Direction::CounterClockwise),
    (2, Direction::Clockwise),
];

/// Steps in one coarse homing run.
pub const HOMING_STEPS: usize = HOMING_ORDER.len() * 4 + 1;

/// Axis corrected by the fine single-revolution pass.
pub const ARM6_AXIS: u8 = 6;

/// Encoder reading of axis 6 at its mechanical zero.
pub const ARM6_ZERO_REFERENCE: u16 = 54580;

/// Driver speed for the axis-6 correction move.
pub const ARM6_SPEED: u16 = 10;

/// One entry of the homing schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HomingStep {
    /// Set the direction the driver searches in.
    ConfigureZeroSearch {
        /// Axis number, 1-based
        axis: u8,
        /// Search direction
        direction: Direction,
    },
    /// Drive the axis to its zero switch.
    SeekZero {
        /// Axis number, 1-based
        axis: u8,
    },
    /// Blind pause for the driver.
    Settle {
        /// Pause length in milliseconds
        ms: u32,
    },
    /// Reset the planner reference to the rest posture.
    ResetReference,
}

/// Runs the coarse homing pass over axes 5, 4, 3, 1, 2.
#[derive(Debug, Clone, Copy)]
pub struct HomingSequencer {
    settle_ms: u32,
}

impl HomingSequencer {
    /// Create a sequencer pausing `settle_ms` after every driver command.
    pub const fn new(settle_ms: u32) -> Self {
        Self { settle_ms }
    }

    /// The full step schedule in execution order.
    pub fn schedule(&self) -> Vec<HomingStep, HOMING_STEPS> {
        let mut steps = Vec::new();
        for &(axis, direction) in HOMING_ORDER.iter() {
            // Capacity is sized for the fixed order.
            let _ = steps.push(HomingStep::ConfigureZeroSearch { axis, direction });
            let _ = steps.push(HomingStep::Settle { ms: self.settle_ms });
            let _ = steps.push(HomingStep::SeekZero { axis });
            let _ = steps.push(HomingStep::Settle { ms: self.settle_ms });
        }
        let _ = steps.push(HomingStep::ResetReference);
        steps
    }

    /// Execute the schedule.
    ///
    /// A transport failure aborts the run before the reference is reset.
    pub fn run<T, D, K>(
        &self,
        transport: &mut T,
        delay: &mut D,
        planner: &mut MotionPlanner<K>,
    ) -> Result<()>
    where
        T: MotorTransport,
        D: DelayNs,
        K: Kinematics,
    {
        info!("homing started");
        for step in self.schedule() {
            match step {
                HomingStep::ConfigureZeroSearch { axis, direction } => {
                    info!("homing axis {} search direction {}", axis, direction.bit());
                    transport
                        .configure_zero_search(axis, direction)
                        .map_err(|_| HardwareError::Transport { axis })?;
                }
                HomingStep::SeekZero { axis } => {
                    info!("homing axis {} seek zero", axis);
                    transport
                        .seek_zero(axis)
                        .map_err(|_| HardwareError::Transport { axis })?;
                }
                HomingStep::Settle { ms } => delay.delay_ms(ms),
                HomingStep::ResetReference => planner.reset_reference(),
            }
        }
        info!("homing finished");
        Ok(())
    }
}

/// Pulses needed to bring axis 6 back to its encoder zero.
pub fn arm6_correction(encoder: u16) -> u32 {
    let distance = libm::fabs(f64::from(ARM6_ZERO_REFERENCE) - f64::from(encoder));
    (distance / ENCODER_SCALE * f64::from(PULSES_PER_REVOLUTION)) as u32
}

/// Fine single-revolution zero for axis 6.
///
/// Reads the encoder, drives the axis back to the zero reference and marks the
/// result as the new zero. Returns the correction in pulses.
pub fn arm6_homing<T, D>(transport: &mut T, delay: &mut D, timing: &TimingConfig) -> Result<u32>
where
    T: MotorTransport,
    D: DelayNs,
{
    let reply = request(
        transport,
        delay,
        timing,
        ARM6_AXIS,
        &frame::encoder_read(ARM6_AXIS),
        ENCODER_RESPONSE_LEN,
    )?;
    let reply: [u8; ENCODER_RESPONSE_LEN] =
        reply
            .as_slice()
            .try_into()
            .map_err(|_| HardwareError::ProtocolDecode {
                axis: ARM6_AXIS,
                expected: ENCODER_RESPONSE_LEN,
                received: reply.len(),
            })?;

    let encoder = frame::decode_encoder(&reply);
    let pulses = arm6_correction(encoder);
    info!("arm6 encoder {} correction {} pulses", encoder, pulses);

    let command = AxisMove {
        axis: ARM6_AXIS,
        direction: Direction::Clockwise,
        speed: ARM6_SPEED,
        acceleration: 0,
        pulses,
        mode: MoveMode::Relative,
        sync: false,
    };
    transport
        .move_axis(&command)
        .map_err(|_| HardwareError::Transport { axis: ARM6_AXIS })?;
    delay.delay_ms(timing.settle_ms);

    mark_zero(transport, ARM6_AXIS)?;
    Ok(pulses)
}

/// Mark the current physical position of `axis` as its zero.
pub fn mark_zero<T: MotorTransport>(transport: &mut T, axis: u8) -> Result<()> {
    info!("axis {} marked zero", axis);
    transport
        .send(&frame::mark_zero(axis))
        .map_err(|_| HardwareError::Transport { axis })?;
    Ok(())
}

/// Broadcast the stop frame. Nothing is awaited.
pub fn emergency_stop<T: MotorTransport>(transport: &mut T) -> Result<()> {
    warn!("emergency stop");
    transport
        .send(&EMERGENCY_STOP)
        .map_err(|_| HardwareError::Transport {
            axis: frame::BROADCAST_ADDRESS,
        })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_order() {
        let steps = HomingSequencer::new(50).schedule();
        assert_eq!(steps.len(), HOMING_STEPS);

        let seek: Vec<u8, 5> = steps
            .iter()
            .filter_map(|s| match s {
                HomingStep::SeekZero { axis } => Some(*axis),
                _ => None,
            })
            .collect();
        assert_eq!(seek.as_slice(), &[5, 4, 3, 1, 2]);
        assert_eq!(steps.last(), Some(&HomingStep::ResetReference));
    }

    #[test]
    fn test_schedule_settles_after_each_command() {
        let steps = HomingSequencer::new(30).schedule();
        assert_eq!(
            &steps[..4],
            &[
                HomingStep::ConfigureZeroSearch {
                    axis: 5,
                    direction: Direction::CounterClockwise
                },
                HomingStep::Settle { ms: 30 },
                HomingStep::SeekZero { axis: 5 },
                HomingStep::Settle { ms: 30 },
            ]
        );
    }

    #[test]
    fn test_arm6_correction() {
        assert_eq!(arm6_correction(ARM6_ZERO_REFERENCE), 0);
        // |54580 - 21812| = 32768, half a revolution
        assert_eq!(arm6_correction(21812), 1600);
        // Symmetric around the reference
        assert_eq!(arm6_correction(54580 + 2048), 100);
        assert_eq!(arm6_correction(54580 - 2048), 100);
    }
}
