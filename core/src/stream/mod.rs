//! stream — the binary cursor codec.
//!
//! Layering:
//! - `buffer`    owns the bytes and the read cursor; `read` / `write` primitives
//! - `validate`  range and bounds checks shared by every layer
//! - `numeric`   fixed-width integers and floats
//! - `varint`    base-128 and zigzag varints
//! - `composite` strings, byte arrays, vectors, UUIDs
//!
//! Non-responsibilities:
//! - IO
//! - Framing or message schemas
//! - Thread safety (all mutation takes `&mut self`)

pub mod buffer;
pub mod validate;
pub mod numeric;
pub mod varint;
pub mod composite;

pub use buffer::{Backing, Stream};
pub use composite::{uuid_from_wire, uuid_to_wire};
pub use varint::{
    var_u32_len, var_u64_len, zigzag_decode_32, zigzag_decode_64, zigzag_encode_32,
    zigzag_encode_64,
};
