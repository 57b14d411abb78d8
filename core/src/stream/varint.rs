//! stream/varint.rs
//! Base-128 varints and zigzag signed varints (protocol-buffer layout).
//!
//! Wire format:
//! - 7 payload bits per byte, low group first.
//! - MSB set → another byte follows.
//! - 32-bit values end within 5 bytes, 64-bit values within 10.
//!
//! Payload bits past the target width in the last permitted byte are dropped,
//! matching protobuf decoders.

use crate::constants::{
    MAX_VARINT32_LEN, MAX_VARINT64_LEN, VARINT_CONTINUATION, VARINT_PAYLOAD_BITS,
    VARINT_PAYLOAD_MASK,
};
use crate::stream::buffer::Stream;
use crate::stream::validate::do_read_assertions;
use crate::types::{Result, StreamError};

/// Map a signed value onto an unsigned one so small magnitudes stay short.
#[inline]
pub const fn zigzag_encode_32(v: i32) -> u32 {
    ((v << 1) ^ (v >> 31)) as u32
}

#[inline]
pub const fn zigzag_decode_32(v: u32) -> i32 {
    ((v >> 1) as i32) ^ -((v & 1) as i32)
}

#[inline]
pub const fn zigzag_encode_64(v: i64) -> u64 {
    ((v << 1) ^ (v >> 63)) as u64
}

#[inline]
pub const fn zigzag_decode_64(v: u64) -> i64 {
    ((v >> 1) as i64) ^ -((v & 1) as i64)
}

/// Encoded size of `v` as a varint.
#[inline]
pub const fn var_u64_len(v: u64) -> usize {
    let bits = 64 - (v | 1).leading_zeros() as usize;
    bits.div_ceil(VARINT_PAYLOAD_BITS as usize)
}

#[inline]
pub const fn var_u32_len(v: u32) -> usize {
    var_u64_len(v as u64)
}

/// Encode `v` into `out`, returning the number of bytes used.
#[inline]
pub(crate) fn encode_varint(mut v: u64, out: &mut [u8; MAX_VARINT64_LEN]) -> usize {
    let mut i = 0;
    loop {
        let byte = (v as u8) & VARINT_PAYLOAD_MASK;
        v >>= VARINT_PAYLOAD_BITS;
        if v == 0 {
            out[i] = byte;
            return i + 1;
        }
        out[i] = byte | VARINT_CONTINUATION;
        i += 1;
    }
}

impl Stream {
    #[inline]
    pub fn write_var_u32(&mut self, value: u32) -> Result<()> {
        self.put_varint(value as u64)
    }

    #[inline]
    pub fn write_var_u64(&mut self, value: u64) -> Result<()> {
        self.put_varint(value)
    }

    #[inline]
    pub fn write_var_i32(&mut self, value: i32) -> Result<()> {
        self.put_varint(zigzag_encode_32(value) as u64)
    }

    #[inline]
    pub fn write_var_i64(&mut self, value: i64) -> Result<()> {
        self.put_varint(zigzag_encode_64(value))
    }

    #[inline]
    pub fn read_var_u32(&mut self) -> Result<u32> {
        Ok(self.get_varint(MAX_VARINT32_LEN)? as u32)
    }

    #[inline]
    pub fn read_var_u64(&mut self) -> Result<u64> {
        self.get_varint(MAX_VARINT64_LEN)
    }

    #[inline]
    pub fn read_var_i32(&mut self) -> Result<i32> {
        Ok(zigzag_decode_32(self.read_var_u32()?))
    }

    #[inline]
    pub fn read_var_i64(&mut self) -> Result<i64> {
        Ok(zigzag_decode_64(self.read_var_u64()?))
    }

    fn put_varint(&mut self, value: u64) -> Result<()> {
        let mut buf = [0u8; MAX_VARINT64_LEN];
        let n = encode_varint(value, &mut buf);
        self.write(&buf[..n])
    }

    /// Decode up to `max_bytes` groups.
    ///
    /// - Buffer ends first → `BufferUnderrun`, nothing consumed.
    /// - No terminator within `max_bytes` → `MalformedVarint`, `max_bytes` consumed.
    fn get_varint(&mut self, max_bytes: usize) -> Result<u64> {
        let start = self.read_offset();

        // Copy the candidate window so the cursor can move freely afterwards.
        let mut window = [0u8; MAX_VARINT64_LEN];
        let available = {
            let unread = self.unread();
            let n = unread.len().min(max_bytes);
            window[..n].copy_from_slice(&unread[..n]);
            unread.len()
        };

        let mut value = 0u64;
        for (i, &byte) in window.iter().enumerate().take(max_bytes) {
            if let Err(e) = do_read_assertions(start, i + 1, available) {
                return self.fail(e);
            }

            let shift = i as u32 * VARINT_PAYLOAD_BITS;
            value |= ((byte & VARINT_PAYLOAD_MASK) as u64).wrapping_shl(shift);

            if byte & VARINT_CONTINUATION == 0 {
                self.read(i + 1)?;
                return Ok(value);
            }
        }

        self.read(max_bytes)?;
        self.fail(StreamError::MalformedVarint { offset: start, max_bytes })
    }
}
