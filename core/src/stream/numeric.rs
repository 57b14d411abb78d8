//! stream/numeric.rs
//! Fixed-width integer and IEEE-754 codec.
//!
//! Naming: `read_<ty>` / `write_<ty>` are big-endian, `_le` variants are
//! little-endian. 8-bit values have no byte order.
//!
//! Every integer write goes through `put_int`, which runs the range check
//! before a single byte is appended. Negative values are masked to their
//! two's-complement pattern at the target width.

use byteorder::{BigEndian, ByteOrder, LittleEndian};

use crate::stream::buffer::Stream;
use crate::stream::validate::{do_float_assertions, do_write_assertions};
use crate::types::{Endian, IntKind, Result};

macro_rules! unsigned_codec {
    ($ty:ty, $kind:expr, $read:ident, $read_le:ident, $write:ident, $write_le:ident) => {
        #[inline]
        pub fn $read(&mut self) -> Result<$ty> {
            Ok(self.read_uint($kind, Endian::Big)? as $ty)
        }

        #[inline]
        pub fn $read_le(&mut self) -> Result<$ty> {
            Ok(self.read_uint($kind, Endian::Little)? as $ty)
        }

        #[inline]
        pub fn $write(&mut self, value: $ty) -> Result<()> {
            self.put_int($kind, Endian::Big, value as i128)
        }

        #[inline]
        pub fn $write_le(&mut self, value: $ty) -> Result<()> {
            self.put_int($kind, Endian::Little, value as i128)
        }
    };
}

macro_rules! signed_codec {
    ($ty:ty, $kind:expr, $read:ident, $read_le:ident, $write:ident, $write_le:ident) => {
        #[inline]
        pub fn $read(&mut self) -> Result<$ty> {
            Ok(self.read_int($kind, Endian::Big)? as $ty)
        }

        #[inline]
        pub fn $read_le(&mut self) -> Result<$ty> {
            Ok(self.read_int($kind, Endian::Little)? as $ty)
        }

        #[inline]
        pub fn $write(&mut self, value: $ty) -> Result<()> {
            self.put_int($kind, Endian::Big, value as i128)
        }

        #[inline]
        pub fn $write_le(&mut self, value: $ty) -> Result<()> {
            self.put_int($kind, Endian::Little, value as i128)
        }
    };
}

macro_rules! float_codec {
    ($ty:ty, $name:literal, $read:ident, $read_le:ident, $write:ident, $write_le:ident, $get:ident, $put:ident) => {
        #[inline]
        pub fn $read(&mut self) -> Result<$ty> {
            let bytes = self.read_array::<{ std::mem::size_of::<$ty>() }>()?;
            Ok(BigEndian::$get(&bytes))
        }

        #[inline]
        pub fn $read_le(&mut self) -> Result<$ty> {
            let bytes = self.read_array::<{ std::mem::size_of::<$ty>() }>()?;
            Ok(LittleEndian::$get(&bytes))
        }

        /// Non-finite values are rejected with `ValueOutOfRange`.
        #[inline]
        pub fn $write(&mut self, value: $ty) -> Result<()> {
            if let Err(e) = do_float_assertions($name, value as f64) {
                return self.fail(e);
            }
            let mut bytes = [0u8; std::mem::size_of::<$ty>()];
            BigEndian::$put(&mut bytes, value);
            self.write(&bytes)
        }

        /// Non-finite values are rejected with `ValueOutOfRange`.
        #[inline]
        pub fn $write_le(&mut self, value: $ty) -> Result<()> {
            if let Err(e) = do_float_assertions($name, value as f64) {
                return self.fail(e);
            }
            let mut bytes = [0u8; std::mem::size_of::<$ty>()];
            LittleEndian::$put(&mut bytes, value);
            self.write(&bytes)
        }
    };
}

impl Stream {
    // -------------------------------------------------------------------------
    // Runtime-width integers
    // -------------------------------------------------------------------------

    /// Write `value` as an unsigned integer of `kind.bytes()` bytes.
    /// A signed `kind` narrows the legal range to its positive half.
    pub fn write_uint(&mut self, kind: IntKind, order: Endian, value: u64) -> Result<()> {
        self.put_int(kind, order, value as i128)
    }

    /// Write `value` as a two's-complement integer of `kind.bytes()` bytes.
    /// An unsigned `kind` rejects negative values.
    pub fn write_int(&mut self, kind: IntKind, order: Endian, value: i64) -> Result<()> {
        self.put_int(kind, order, value as i128)
    }

    /// Read `kind.bytes()` bytes, zero-extended.
    pub fn read_uint(&mut self, kind: IntKind, order: Endian) -> Result<u64> {
        let n = kind.bytes();
        let bytes = self.read(n)?;
        Ok(match order {
            Endian::Big => BigEndian::read_uint(bytes, n),
            Endian::Little => LittleEndian::read_uint(bytes, n),
        })
    }

    /// Read `kind.bytes()` bytes, sign-extended from the top bit.
    pub fn read_int(&mut self, kind: IntKind, order: Endian) -> Result<i64> {
        let n = kind.bytes();
        let bytes = self.read(n)?;
        Ok(match order {
            Endian::Big => BigEndian::read_int(bytes, n),
            Endian::Little => LittleEndian::read_int(bytes, n),
        })
    }

    fn put_int(&mut self, kind: IntKind, order: Endian, value: i128) -> Result<()> {
        if let Err(e) = do_write_assertions(kind, value) {
            return self.fail(e);
        }

        // Low bits of the i128 are the two's-complement pattern at any width.
        let raw = (value as u64) & kind.mask();
        let n = kind.bytes();
        let mut buf = [0u8; 8];
        match order {
            Endian::Big => BigEndian::write_uint(&mut buf[..n], raw, n),
            Endian::Little => LittleEndian::write_uint(&mut buf[..n], raw, n),
        }
        self.write(&buf[..n])
    }

    // -------------------------------------------------------------------------
    // 8-bit
    // -------------------------------------------------------------------------

    #[inline]
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    #[inline]
    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        self.put_int(IntKind::U8, Endian::Big, value as i128)
    }

    #[inline]
    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_u8()? as i8)
    }

    #[inline]
    pub fn write_i8(&mut self, value: i8) -> Result<()> {
        self.put_int(IntKind::I8, Endian::Big, value as i128)
    }

    /// Any non-zero byte reads as `true`.
    #[inline]
    pub fn read_bool(&mut self) -> Result<bool> {
        Ok(self.read_u8()? != 0)
    }

    #[inline]
    pub fn write_bool(&mut self, value: bool) -> Result<()> {
        self.write_u8(value as u8)
    }

    // -------------------------------------------------------------------------
    // 16 / 24 / 32 / 64-bit
    // -------------------------------------------------------------------------

    unsigned_codec!(u16, IntKind::U16, read_u16, read_u16_le, write_u16, write_u16_le);
    signed_codec!(i16, IntKind::I16, read_i16, read_i16_le, write_i16, write_i16_le);

    // 24-bit values travel in 32-bit host types; writes reject anything that
    // does not fit in three bytes.
    unsigned_codec!(u32, IntKind::U24, read_u24, read_u24_le, write_u24, write_u24_le);
    signed_codec!(i32, IntKind::I24, read_i24, read_i24_le, write_i24, write_i24_le);

    unsigned_codec!(u32, IntKind::U32, read_u32, read_u32_le, write_u32, write_u32_le);
    signed_codec!(i32, IntKind::I32, read_i32, read_i32_le, write_i32, write_i32_le);

    unsigned_codec!(u64, IntKind::U64, read_u64, read_u64_le, write_u64, write_u64_le);
    signed_codec!(i64, IntKind::I64, read_i64, read_i64_le, write_i64, write_i64_le);

    // -------------------------------------------------------------------------
    // IEEE-754
    // -------------------------------------------------------------------------

    float_codec!(f32, "f32", read_f32, read_f32_le, write_f32, write_f32_le, read_f32, write_f32);
    float_codec!(f64, "f64", read_f64, read_f64_le, write_f64, write_f64_le, read_f64, write_f64);
}
