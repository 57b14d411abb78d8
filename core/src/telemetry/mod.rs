//! telemetry/mod.rs
//! Per-stream codec counters and immutable snapshots.
//!
//! Notes:
//! - Counters are plain integers owned by the stream; no atomics, no locks.
//! - Snapshots are serializable so callers can ship them to their own sinks.

pub mod counters;
pub mod snapshot;

pub use counters::*;
pub use snapshot::*;
