//! Motor bus interface.
//!
//! The serial driver protocol lives outside this crate. The core issues axis
//! moves, the synchronous start latch, zero-search commands and a handful of
//! fixed frames through [`MotorTransport`], one exchange at a time.

mod exchange;
pub mod frame;

pub(crate) use exchange::request;

use crate::motion::Direction;

/// Largest response frame the core ever expects.
pub const MAX_RESPONSE_LEN: usize = 16;

/// Bytes received for one request.
pub type Response = heapless::Vec<u8, MAX_RESPONSE_LEN>;

/// How the pulse count of an [`AxisMove`] is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MoveMode {
    /// Pulses relative to the current position.
    Relative,
    /// Pulses from the driver's zero.
    Absolute,
}

/// One position-mode command for a single driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisMove {
    /// Driver address, 1..=6.
    pub axis: u8,
    /// Rotation direction.
    pub direction: Direction,
    /// Driver speed setting.
    pub speed: u16,
    /// Driver acceleration setting.
    pub acceleration: u8,
    /// Pulse count (magnitude).
    pub pulses: u32,
    /// Relative or absolute positioning.
    pub mode: MoveMode,
    /// Hold the move until the next [`MotorTransport::commit`].
    pub sync: bool,
}

/// Access to the shared motor bus.
///
/// The bus is a single channel: at most one request/response exchange is
/// outstanding at a time and the caller never interleaves them.
pub trait MotorTransport {
    /// Transport-specific error.
    type Error: core::fmt::Debug;

    /// Send a raw frame without waiting for anything.
    fn send(&mut self, frame: &[u8]) -> Result<(), Self::Error>;

    /// Queue a position move on one driver.
    fn move_axis(&mut self, command: &AxisMove) -> Result<(), Self::Error>;

    /// Start all synchronized moves together.
    fn commit(&mut self) -> Result<(), Self::Error>;

    /// Set the direction a driver searches in when seeking its zero.
    fn configure_zero_search(&mut self, axis: u8, direction: Direction) -> Result<(), Self::Error>;

    /// Drive one axis to its zero reference.
    fn seek_zero(&mut self, axis: u8) -> Result<(), Self::Error>;

    /// Clear the inbound buffer and wait for a frame of `len` bytes.
    fn expect_response(&mut self, len: usize);

    /// The received frame, or `None` while nothing has arrived yet.
    fn poll_response(&mut self) -> Result<Option<Response>, Self::Error>;
}

impl<T: MotorTransport + ?Sized> MotorTransport for &mut T {
    type Error = T::Error;

    fn send(&mut self, frame: &[u8]) -> Result<(), Self::Error> {
        (**self).send(frame)
    }

    fn move_axis(&mut self, command: &AxisMove) -> Result<(), Self::Error> {
        (**self).move_axis(command)
    }

    fn commit(&mut self) -> Result<(), Self::Error> {
        (**self).commit()
    }

    fn configure_zero_search(&mut self, axis: u8, direction: Direction) -> Result<(), Self::Error> {
        (**self).configure_zero_search(axis, direction)
    }

    fn seek_zero(&mut self, axis: u8) -> Result<(), Self::Error> {
        (**self).seek_zero(axis)
    }

    fn expect_response(&mut self, len: usize) {
        (**self).expect_response(len)
    }

    fn poll_response(&mut self) -> Result<Option<Response>, Self::Error> {
        (**self).poll_response()
    }
}
