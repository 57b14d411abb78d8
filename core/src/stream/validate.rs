//! stream/validate.rs
//!
//! The only places `BufferUnderrun` and `ValueOutOfRange` are produced.
//!
//! Notes:
//! - Checks run unconditionally in every build profile; input may be hostile.
//! - Functions are pure. Logging and counters live in `Stream::fail`.

use crate::types::{IntKind, Result, StreamError};

/// Ensure `needed` bytes are available after `offset`.
#[inline]
pub fn do_read_assertions(offset: usize, needed: usize, available: usize) -> Result<()> {
    if needed > available {
        return Err(StreamError::BufferUnderrun { offset, needed, available });
    }
    Ok(())
}

/// Ensure `value` fits the width and signedness of `kind`.
#[inline]
pub fn do_write_assertions(kind: IntKind, value: i128) -> Result<()> {
    if value < kind.min() || value > kind.max() {
        return Err(StreamError::out_of_range(kind, value));
    }
    Ok(())
}

/// Ensure a float is finite. `kind` names the wire format ("f32"/"f64").
#[inline]
pub fn do_float_assertions(kind: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(StreamError::out_of_range(kind, value));
    }
    Ok(())
}

/// Ensure a length prefix stays within `max`; returns it narrowed to `u32`.
#[inline]
pub fn do_length_assertions(kind: &'static str, len: usize, max: u32) -> Result<u32> {
    if len > max as usize {
        return Err(StreamError::out_of_range(kind, len));
    }
    Ok(len as u32)
}
