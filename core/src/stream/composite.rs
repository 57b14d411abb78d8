//! stream/composite.rs
//! Length-prefixed strings and byte arrays, 2D/3D vectors, and UUIDs.
//!
//! Layouts:
//!
//! ```text
//! string      [ len: var_u32 ][ utf-8 bytes ]
//! ascii       [ len: u32 LE  ][ ascii bytes ]
//! byte array  [ len: var_u32 ][ bytes ]
//! vec2/vec3   [ x ][ y ]([ z ])  as f32 BE, f32 LE, or zigzag var_i32
//! uuid        16 bytes: canonical halves swapped, then fully reversed
//! ```
//!
//! Reads are atomic with respect to `BufferUnderrun`: a short buffer leaves
//! the cursor where the composite read started. Encoding errors are raised
//! after the payload was consumed.

use bytes::Bytes;
use glam::{Vec2, Vec3};
use uuid::Uuid;

use crate::constants::{MAX_VARINT64_LEN, UUID_HALF_LEN, UUID_LEN};
use crate::stream::buffer::Stream;
use crate::stream::validate::{do_float_assertions, do_length_assertions, do_write_assertions};
use crate::stream::varint::{encode_varint, var_u32_len, zigzag_encode_32};
use crate::types::{IntKind, Result, StreamError};

/// Canonical UUID bytes → wire order.
#[inline]
pub fn uuid_to_wire(canonical: &[u8; UUID_LEN]) -> [u8; UUID_LEN] {
    let mut wire = [0u8; UUID_LEN];
    wire[..UUID_HALF_LEN].copy_from_slice(&canonical[UUID_HALF_LEN..]);
    wire[UUID_HALF_LEN..].copy_from_slice(&canonical[..UUID_HALF_LEN]);
    wire.reverse();
    wire
}

/// Wire order → canonical UUID bytes. Exact inverse of `uuid_to_wire`.
#[inline]
pub fn uuid_from_wire(wire: &[u8; UUID_LEN]) -> [u8; UUID_LEN] {
    let mut reversed = *wire;
    reversed.reverse();
    let mut canonical = [0u8; UUID_LEN];
    canonical[..UUID_HALF_LEN].copy_from_slice(&reversed[UUID_HALF_LEN..]);
    canonical[UUID_HALF_LEN..].copy_from_slice(&reversed[..UUID_HALF_LEN]);
    canonical
}

fn ascii_error(bytes: &[u8]) -> StreamError {
    let detail = match bytes.iter().position(|b| !b.is_ascii()) {
        Some(i) => format!("byte 0x{:02x} at index {}", bytes[i], i),
        None => "unknown".to_string(),
    };
    StreamError::InvalidEncoding { kind: "ascii", detail }
}

impl Stream {
    // -------------------------------------------------------------------------
    // Length prefixes
    // -------------------------------------------------------------------------

    /// Validate a payload length for writing, prefix included in the capacity check.
    fn check_prefixed(&mut self, kind: &'static str, len: usize, var_prefix: bool) -> Result<u32> {
        let len32 = match do_length_assertions(kind, len, self.config().max_prefixed_len) {
            Ok(v) => v,
            Err(e) => return self.fail(e),
        };
        let prefix_len = if var_prefix { var_u32_len(len32) } else { 4 };
        self.check_capacity(prefix_len.saturating_add(len))?;
        Ok(len32)
    }

    /// Read a `var_u32` length followed by that many bytes.
    fn read_var_prefixed(&mut self, kind: &'static str) -> Result<&[u8]> {
        let start = self.read_offset();
        let len = self.read_var_u32()?;
        if let Err(e) = do_length_assertions(kind, len as usize, self.config().max_prefixed_len) {
            self.rewind_to(start);
            return self.fail(e);
        }
        self.read(len as usize)
    }

    // -------------------------------------------------------------------------
    // UTF-8 string
    // -------------------------------------------------------------------------

    pub fn write_string(&mut self, value: &str) -> Result<()> {
        let bytes = value.as_bytes();
        let len = self.check_prefixed("string length", bytes.len(), true)?;
        self.write_var_u32(len)?;
        self.write(bytes)
    }

    pub fn read_string(&mut self) -> Result<String> {
        self.atomic(|s| {
            let bytes = s.read_var_prefixed("string length")?.to_vec();
            match String::from_utf8(bytes) {
                Ok(text) => Ok(text),
                Err(e) => s.fail(StreamError::InvalidEncoding {
                    kind: "utf-8",
                    detail: e.utf8_error().to_string(),
                }),
            }
        })
    }

    // -------------------------------------------------------------------------
    // ASCII string
    // -------------------------------------------------------------------------

    /// Non-ASCII input is rejected before anything is written.
    pub fn write_ascii(&mut self, value: &str) -> Result<()> {
        let bytes = value.as_bytes();
        if !bytes.is_ascii() {
            return self.fail(ascii_error(bytes));
        }
        let len = self.check_prefixed("ascii length", bytes.len(), false)?;
        self.write_u32_le(len)?;
        self.write(bytes)
    }

    pub fn read_ascii(&mut self) -> Result<String> {
        self.atomic(|s| {
            let start = s.read_offset();
            let len = s.read_u32_le()?;
            if let Err(e) = do_length_assertions("ascii length", len as usize, s.config().max_prefixed_len) {
                s.rewind_to(start);
                return s.fail(e);
            }
            let bytes = s.read(len as usize)?.to_vec();
            if !bytes.is_ascii() {
                return s.fail(ascii_error(&bytes));
            }
            // ASCII is a subset of UTF-8.
            String::from_utf8(bytes).map_err(|e| StreamError::InvalidEncoding {
                kind: "ascii",
                detail: e.to_string(),
            })
        })
    }

    // -------------------------------------------------------------------------
    // Byte array
    // -------------------------------------------------------------------------

    pub fn write_byte_array(&mut self, value: &[u8]) -> Result<()> {
        let len = self.check_prefixed("byte array length", value.len(), true)?;
        self.write_var_u32(len)?;
        self.write(value)
    }

    pub fn read_byte_array(&mut self) -> Result<Bytes> {
        self.atomic(|s| Ok(Bytes::copy_from_slice(s.read_var_prefixed("byte array length")?)))
    }

    // -------------------------------------------------------------------------
    // Vectors
    // -------------------------------------------------------------------------

    fn put_float_components(&mut self, components: &[f32], little: bool) -> Result<()> {
        for &c in components {
            if let Err(e) = do_float_assertions("f32", c as f64) {
                return self.fail(e);
            }
        }
        let mut buf = [0u8; 12];
        for (chunk, &c) in buf.chunks_exact_mut(4).zip(components) {
            let bytes = if little { c.to_le_bytes() } else { c.to_be_bytes() };
            chunk.copy_from_slice(&bytes);
        }
        self.write(&buf[..components.len() * 4])
    }

    /// Round each component and zigzag-varint encode it as an i32.
    /// Every component is validated before any byte is written.
    fn put_var_components(&mut self, components: &[f32]) -> Result<()> {
        let mut wire = [0u8; 3 * MAX_VARINT64_LEN];
        let mut used = 0;
        for &c in components {
            let rounded = c.round();
            let checked = do_float_assertions("f32", rounded as f64)
                .and_then(|_| do_write_assertions(IntKind::I32, rounded as i128));
            if let Err(e) = checked {
                return self.fail(e);
            }

            let mut group = [0u8; MAX_VARINT64_LEN];
            let n = encode_varint(zigzag_encode_32(rounded as i32) as u64, &mut group);
            wire[used..used + n].copy_from_slice(&group[..n]);
            used += n;
        }
        self.write(&wire[..used])
    }

    pub fn write_vec2(&mut self, v: Vec2) -> Result<()> {
        self.put_float_components(&v.to_array(), false)
    }

    pub fn write_vec2_le(&mut self, v: Vec2) -> Result<()> {
        self.put_float_components(&v.to_array(), true)
    }

    /// Lossy: components are rounded to the nearest integer.
    pub fn write_vec2_var(&mut self, v: Vec2) -> Result<()> {
        self.put_var_components(&v.to_array())
    }

    pub fn write_vec3(&mut self, v: Vec3) -> Result<()> {
        self.put_float_components(&v.to_array(), false)
    }

    pub fn write_vec3_le(&mut self, v: Vec3) -> Result<()> {
        self.put_float_components(&v.to_array(), true)
    }

    /// Lossy: components are rounded to the nearest integer.
    pub fn write_vec3_var(&mut self, v: Vec3) -> Result<()> {
        self.put_var_components(&v.to_array())
    }

    pub fn read_vec2(&mut self) -> Result<Vec2> {
        self.atomic(|s| Ok(Vec2::new(s.read_f32()?, s.read_f32()?)))
    }

    pub fn read_vec2_le(&mut self) -> Result<Vec2> {
        self.atomic(|s| Ok(Vec2::new(s.read_f32_le()?, s.read_f32_le()?)))
    }

    pub fn read_vec2_var(&mut self) -> Result<Vec2> {
        self.atomic(|s| Ok(Vec2::new(s.read_var_i32()? as f32, s.read_var_i32()? as f32)))
    }

    pub fn read_vec3(&mut self) -> Result<Vec3> {
        self.atomic(|s| Ok(Vec3::new(s.read_f32()?, s.read_f32()?, s.read_f32()?)))
    }

    pub fn read_vec3_le(&mut self) -> Result<Vec3> {
        self.atomic(|s| Ok(Vec3::new(s.read_f32_le()?, s.read_f32_le()?, s.read_f32_le()?)))
    }

    pub fn read_vec3_var(&mut self) -> Result<Vec3> {
        self.atomic(|s| {
            Ok(Vec3::new(
                s.read_var_i32()? as f32,
                s.read_var_i32()? as f32,
                s.read_var_i32()? as f32,
            ))
        })
    }

    // -------------------------------------------------------------------------
    // UUID
    // -------------------------------------------------------------------------

    pub fn write_uuid(&mut self, id: &Uuid) -> Result<()> {
        self.write(&uuid_to_wire(id.as_bytes()))
    }

    /// Parse a UUID string (dashed or simple form) and write it.
    pub fn write_uuid_str(&mut self, value: &str) -> Result<()> {
        match Uuid::parse_str(value) {
            Ok(id) => self.write_uuid(&id),
            Err(e) => self.fail(StreamError::InvalidEncoding {
                kind: "uuid",
                detail: e.to_string(),
            }),
        }
    }

    pub fn read_uuid(&mut self) -> Result<Uuid> {
        let wire = self.read_array::<UUID_LEN>()?;
        Ok(Uuid::from_bytes(uuid_from_wire(&wire)))
    }

    /// Lowercase dashed form, e.g. `123e4567-e89b-12d3-a456-426614174000`.
    pub fn read_uuid_string(&mut self) -> Result<String> {
        Ok(self.read_uuid()?.hyphenated().to_string())
    }
}
