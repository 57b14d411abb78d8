//! bincursor-core
//!
//! Position-tracked binary encoding and decoding over a growable byte buffer.
//! No IO, no framing, no FFI.

#![forbid(unsafe_code)]

// Shared and top level
pub mod config;
pub mod constants;
pub mod types;
pub mod utils;

pub mod telemetry;

// Codec
pub mod stream;

pub use config::StreamConfig;
pub use stream::Stream;
pub use types::{Endian, ErrorKind, IntKind, Result, StreamError};

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::config::StreamConfig;
    pub use crate::stream::Stream;
    pub use crate::types::{Endian, IntKind, StreamError};
    pub use glam::{Vec2, Vec3};
    pub use uuid::Uuid;
}
