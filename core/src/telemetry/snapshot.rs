//! telemetry/snapshot.rs
//!
//! Immutable view of a stream's counters plus derived ratios.

use serde::{Deserialize, Serialize};

use crate::telemetry::counters::CodecCounters;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodecSnapshot {
    pub counters: CodecCounters,
    /// Length of the byte sequence when the snapshot was taken.
    pub buffer_len: u64,
    /// Read cursor when the snapshot was taken.
    pub read_offset: u64,
    /// `bytes_read / bytes_written`; 0.0 when nothing was written.
    pub read_ratio: f64,
    pub total_errors: u64,
}

impl CodecSnapshot {
    pub fn from(counters: &CodecCounters, buffer_len: usize, read_offset: usize) -> Self {
        let read_ratio = if counters.bytes_written > 0 {
            counters.bytes_read as f64 / counters.bytes_written as f64
        } else {
            0.0
        };

        Self {
            counters: counters.clone(),
            buffer_len: buffer_len as u64,
            read_offset: read_offset as u64,
            read_ratio,
            total_errors: counters.total_errors(),
        }
    }

    /// Bytes between the read cursor and the end at snapshot time.
    pub fn unread(&self) -> u64 {
        self.buffer_len.saturating_sub(self.read_offset)
    }
}
