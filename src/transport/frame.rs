//! Fixed driver frames.
//!
//! Every frame starts with the driver address and ends with `0x6B`.

use crate::config::ReadbackConfig;

/// Trailing byte of every frame.
pub const FRAME_END: u8 = 0x6B;

/// Address every driver listens to.
pub const BROADCAST_ADDRESS: u8 = 0x00;

/// Stop every axis immediately.
pub const EMERGENCY_STOP: [u8; 5] = [BROADCAST_ADDRESS, 0xFE, 0x98, 0x00, FRAME_END];

/// Length of an encoder-read reply.
pub const ENCODER_RESPONSE_LEN: usize = 5;

/// Length of a position-query reply.
pub const POSITION_RESPONSE_LEN: usize = 8;

/// Encoder counts per revolution (16-bit linear encoder).
pub const ENCODER_SCALE: f64 = 65536.0;

/// Request the raw encoder value of `axis`.
pub const fn encoder_read(axis: u8) -> [u8; 3] {
    [axis, 0x31, FRAME_END]
}

/// Mark the current position of `axis` as its zero.
pub const fn mark_zero(axis: u8) -> [u8; 4] {
    [axis, 0x0A, 0x6D, FRAME_END]
}

/// Request the accumulated position of `axis`.
pub const fn position_query(axis: u8) -> [u8; 3] {
    [axis, 0x36, FRAME_END]
}

/// Encoder value from an encoder-read reply `[addr, 0x31, hi, lo, 0x6B]`.
pub fn decode_encoder(reply: &[u8; ENCODER_RESPONSE_LEN]) -> u16 {
    u16::from_be_bytes([reply[2], reply[3]])
}

/// Signed position from a position-query reply `[addr, 0x36, sign, b3, b2, b1, b0, 0x6B]`.
///
/// The four position bytes are combined with the configured radix.
pub fn decode_position(reply: &[u8; POSITION_RESPONSE_LEN], config: &ReadbackConfig) -> i64 {
    let base = config.byte_radix.base();
    let magnitude = reply[3..7]
        .iter()
        .fold(0u64, |acc, &b| acc * base + u64::from(b));

    // At most 256^4 - 1, always fits.
    let magnitude = magnitude as i64;
    if config.apply_sign && reply[2] != 0 {
        -magnitude
    } else {
        magnitude
    }
}
