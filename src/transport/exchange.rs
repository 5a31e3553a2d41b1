//! Blocking request/response exchange with a bounded wait.

use embedded_hal::delay::DelayNs;

use crate::config::TimingConfig;
use crate::error::{HardwareError, Result};

use super::{MotorTransport, Response};

/// Send `frame` to `axis` and poll until a reply of `expected` bytes arrives.
///
/// The buffer is checked before every sleep, so a reply that is already
/// waiting costs no delay. Polling stops once `response_timeout_ms` has been
/// spent sleeping.
pub(crate) fn request<T, D>(
    transport: &mut T,
    delay: &mut D,
    timing: &TimingConfig,
    axis: u8,
    frame: &[u8],
    expected: usize,
) -> Result<Response>
where
    T: MotorTransport,
    D: DelayNs,
{
    transport.expect_response(expected);
    transport
        .send(frame)
        .map_err(|_| HardwareError::Transport { axis })?;

    let interval_ms = timing.poll_interval_ms.max(1);
    let mut waited_ms: u32 = 0;
    loop {
        let polled = transport
            .poll_response()
            .map_err(|_| HardwareError::Transport { axis })?;

        if let Some(reply) = polled {
            if reply.len() != expected {
                error!(
                    "axis {} replied with {} bytes, expected {}",
                    axis,
                    reply.len(),
                    expected
                );
                return Err(HardwareError::ProtocolDecode {
                    axis,
                    expected,
                    received: reply.len(),
                }
                .into());
            }
            return Ok(reply);
        }

        if waited_ms >= timing.response_timeout_ms {
            error!("axis {} did not answer within {} ms", axis, waited_ms);
            return Err(HardwareError::Timeout { axis, waited_ms }.into());
        }

        delay.delay_ms(interval_ms);
        waited_ms = waited_ms.saturating_add(interval_ms);
    }
}
