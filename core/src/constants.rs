//! constants.rs
//! Width limits and defaults shared by every codec layer.

/// Maximum encoded length of a 32-bit varint (5 × 7 bits ≥ 32).
pub const MAX_VARINT32_LEN: usize = 5;
/// Maximum encoded length of a 64-bit varint (10 × 7 bits ≥ 64).
pub const MAX_VARINT64_LEN: usize = 10;

/// Payload bits carried by one varint byte.
pub const VARINT_PAYLOAD_BITS: u32 = 7;
/// Low seven bits of a varint byte.
pub const VARINT_PAYLOAD_MASK: u8 = 0x7F;
/// Continuation flag of a varint byte.
pub const VARINT_CONTINUATION: u8 = 0x80;

/// Encoded UUID length in bytes.
pub const UUID_LEN: usize = 16;
/// Half of an encoded UUID; the wire transform swaps these.
pub const UUID_HALF_LEN: usize = UUID_LEN / 2;

/// Defaults when `StreamConfig` fields are `None`.
pub const DEFAULT_INITIAL_CAPACITY: usize = 256;
pub const DEFAULT_MAX_PREFIXED_LEN: u32 = u32::MAX;

/// Bytes shown by `Stream::summary` around the read cursor.
pub const SUMMARY_PREVIEW_LEN: usize = 16;
