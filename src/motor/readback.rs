//! Calibrated joint angle readback.

use embedded_hal::delay::DelayNs;

use crate::config::units::Degrees;
use crate::config::{ReadbackConfig, TimingConfig};
use crate::error::{HardwareError, Result};
use crate::transport::frame::{self, ENCODER_SCALE, POSITION_RESPONSE_LEN};
use crate::transport::{request, MotorTransport};

use super::Axis;

/// Query the position of `axis` and convert it to a calibrated joint angle.
///
/// The result is stored on the axis as its current angle. It is informational
/// and never changes the planner's reference.
pub fn read_angle<T, D>(
    transport: &mut T,
    delay: &mut D,
    timing: &TimingConfig,
    readback: &ReadbackConfig,
    axis: &mut Axis,
) -> Result<Degrees>
where
    T: MotorTransport,
    D: DelayNs,
{
    let number = axis.number();
    let reply = request(
        transport,
        delay,
        timing,
        number,
        &frame::position_query(number),
        POSITION_RESPONSE_LEN,
    )?;
    let reply: [u8; POSITION_RESPONSE_LEN] =
        reply
            .as_slice()
            .try_into()
            .map_err(|_| HardwareError::ProtocolDecode {
                axis: number,
                expected: POSITION_RESPONSE_LEN,
                received: reply.len(),
            })?;

    let position = frame::decode_position(&reply, readback);
    let raw = Degrees(position as f64 / ENCODER_SCALE);
    let angle = axis.calibrated(raw);
    axis.set_current_angle(angle);

    debug!("axis {} position {} angle {}", number, position, angle.0);
    Ok(angle)
}
