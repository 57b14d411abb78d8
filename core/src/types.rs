//! types.rs
//! Shared codec types: the unified error, byte order, and integer kinds.

use std::fmt;

/// Unified codec error.
/// - Every variant is raised synchronously at the failing call.
/// - Messages carry offsets so a faulty record can be located in a dump.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StreamError {
    /// A read asked for more bytes than remain after the cursor.
    #[error("buffer underrun at offset {offset}: need {needed} bytes, {available} available")]
    BufferUnderrun { offset: usize, needed: usize, available: usize },

    /// A varint kept its continuation bit set past the width's byte limit.
    #[error("malformed varint at offset {offset}: no terminator within {max_bytes} bytes")]
    MalformedVarint { offset: usize, max_bytes: usize },

    /// A write value does not fit the target width, sign, or format.
    #[error("value out of range for {kind}: {value}")]
    ValueOutOfRange { kind: String, value: String },

    /// Decoded (or supplied) text is not valid for the declared encoding.
    #[error("invalid {kind} encoding: {detail}")]
    InvalidEncoding { kind: &'static str, detail: String },

    /// A write would grow the sequence past the configured maximum.
    #[error("capacity exceeded: {requested} bytes requested, limit {limit}")]
    CapacityExceeded { requested: usize, limit: usize },
}

/// Fieldless mirror of `StreamError` for cheap matching and counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    BufferUnderrun,
    MalformedVarint,
    ValueOutOfRange,
    InvalidEncoding,
    CapacityExceeded,
}

impl StreamError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StreamError::BufferUnderrun { .. } => ErrorKind::BufferUnderrun,
            StreamError::MalformedVarint { .. } => ErrorKind::MalformedVarint,
            StreamError::ValueOutOfRange { .. } => ErrorKind::ValueOutOfRange,
            StreamError::InvalidEncoding { .. } => ErrorKind::InvalidEncoding,
            StreamError::CapacityExceeded { .. } => ErrorKind::CapacityExceeded,
        }
    }

    pub(crate) fn out_of_range(kind: impl fmt::Display, value: impl fmt::Display) -> Self {
        StreamError::ValueOutOfRange {
            kind: kind.to_string(),
            value: value.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, StreamError>;

/// Byte order of a multi-byte value on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Endian {
    /// Most-significant byte first. The default for unsuffixed operations.
    #[default]
    Big,
    /// Least-significant byte first. Used by the `_le` operations.
    Little,
}

/// Width and signedness of a fixed-width integer (1..=8 bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntKind {
    bytes: u8,
    signed: bool,
}

impl IntKind {
    pub const U8: IntKind = IntKind { bytes: 1, signed: false };
    pub const I8: IntKind = IntKind { bytes: 1, signed: true };
    pub const U16: IntKind = IntKind { bytes: 2, signed: false };
    pub const I16: IntKind = IntKind { bytes: 2, signed: true };
    pub const U24: IntKind = IntKind { bytes: 3, signed: false };
    pub const I24: IntKind = IntKind { bytes: 3, signed: true };
    pub const U32: IntKind = IntKind { bytes: 4, signed: false };
    pub const I32: IntKind = IntKind { bytes: 4, signed: true };
    pub const U64: IntKind = IntKind { bytes: 8, signed: false };
    pub const I64: IntKind = IntKind { bytes: 8, signed: true };

    /// Build a kind for a runtime-chosen width.
    /// Widths outside 1..=8 bytes are rejected.
    pub fn new(bytes: usize, signed: bool) -> Result<Self> {
        if !(1..=8).contains(&bytes) {
            return Err(StreamError::out_of_range("integer width (bytes)", bytes));
        }
        Ok(Self { bytes: bytes as u8, signed })
    }

    #[inline]
    pub const fn bytes(self) -> usize {
        self.bytes as usize
    }

    #[inline]
    pub const fn bits(self) -> u32 {
        self.bytes as u32 * 8
    }

    #[inline]
    pub const fn is_signed(self) -> bool {
        self.signed
    }

    /// Smallest legal value.
    pub const fn min(self) -> i128 {
        if self.signed {
            -(1i128 << (self.bits() - 1))
        } else {
            0
        }
    }

    /// Largest legal value.
    pub const fn max(self) -> i128 {
        if self.signed {
            (1i128 << (self.bits() - 1)) - 1
        } else {
            (1i128 << self.bits()) - 1
        }
    }

    /// Mask selecting the low `bits()` of a u64.
    #[inline]
    pub const fn mask(self) -> u64 {
        if self.bytes >= 8 {
            u64::MAX
        } else {
            (1u64 << self.bits()) - 1
        }
    }
}

impl fmt::Display for IntKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = if self.signed { 'i' } else { 'u' };
        write!(f, "{}{}", prefix, self.bits())
    }
}
