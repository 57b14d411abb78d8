//! config.rs
//! Per-stream configuration.

use crate::constants::{DEFAULT_INITIAL_CAPACITY, DEFAULT_MAX_PREFIXED_LEN};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamConfig {
    /// Bytes reserved when an empty stream takes its first write.
    pub initial_capacity: usize,

    /// Largest length prefix accepted by string and byte-array reads/writes.
    pub max_prefixed_len: u32,

    /// Hard cap on the total sequence length.
    /// - `None` → grow until allocation fails (default).
    pub max_len: Option<usize>,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            max_prefixed_len: DEFAULT_MAX_PREFIXED_LEN,
            max_len: None,
        }
    }
}

impl StreamConfig {
    pub fn new(
        initial_capacity: Option<usize>,
        max_prefixed_len: Option<u32>,
        max_len: Option<usize>,
    ) -> Self {
        Self {
            initial_capacity: initial_capacity.unwrap_or(DEFAULT_INITIAL_CAPACITY),
            max_prefixed_len: max_prefixed_len.unwrap_or(DEFAULT_MAX_PREFIXED_LEN),
            max_len,
        }
    }

    /// Config for parsing untrusted input: bounded prefixes and total size.
    pub fn bounded(max_prefixed_len: u32, max_len: usize) -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY.min(max_len),
            max_prefixed_len,
            max_len: Some(max_len),
        }
    }
}
