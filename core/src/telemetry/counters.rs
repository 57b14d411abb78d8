//! telemetry/counters.rs
//! Mutable counters updated by every stream operation.
//!
//! Summary: Collects byte and call counts plus failures by kind.
//! Converted into an immutable `CodecSnapshot` on demand.
use serde::{Deserialize, Serialize};
use std::ops::AddAssign;

use crate::types::{ErrorKind, StreamError};

#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecCounters {
    pub reads: u64,
    pub writes: u64,
    pub bytes_read: u64,
    pub bytes_written: u64,
    pub bytes_skipped: u64,
    pub underruns: u64,
    pub malformed_varints: u64,
    pub range_errors: u64,
    pub encoding_errors: u64,
    pub capacity_errors: u64,
}

impl CodecCounters {
    /// Record one successful primitive read of `len` bytes.
    #[inline]
    pub fn add_read(&mut self, len: usize) {
        self.reads += 1;
        self.bytes_read += len as u64;
    }

    /// Record one successful append of `len` bytes.
    #[inline]
    pub fn add_write(&mut self, len: usize) {
        self.writes += 1;
        self.bytes_written += len as u64;
    }

    #[inline]
    pub fn add_skip(&mut self, len: usize) {
        self.bytes_skipped = self.bytes_skipped.saturating_add(len as u64);
    }

    /// Record a failure by kind.
    pub fn add_error(&mut self, err: &StreamError) {
        match err.kind() {
            ErrorKind::BufferUnderrun => self.underruns += 1,
            ErrorKind::MalformedVarint => self.malformed_varints += 1,
            ErrorKind::ValueOutOfRange => self.range_errors += 1,
            ErrorKind::InvalidEncoding => self.encoding_errors += 1,
            ErrorKind::CapacityExceeded => self.capacity_errors += 1,
        }
    }

    pub fn total_errors(&self) -> u64 {
        self.underruns
            + self.malformed_varints
            + self.range_errors
            + self.encoding_errors
            + self.capacity_errors
    }

    /// Fold `other` into `self`. Totals saturate; `skip` may record `usize::MAX`.
    pub fn merge(&mut self, other: &CodecCounters) {
        self.reads = self.reads.saturating_add(other.reads);
        self.writes = self.writes.saturating_add(other.writes);
        self.bytes_read = self.bytes_read.saturating_add(other.bytes_read);
        self.bytes_written = self.bytes_written.saturating_add(other.bytes_written);
        self.bytes_skipped = self.bytes_skipped.saturating_add(other.bytes_skipped);
        self.underruns = self.underruns.saturating_add(other.underruns);
        self.malformed_varints = self.malformed_varints.saturating_add(other.malformed_varints);
        self.range_errors = self.range_errors.saturating_add(other.range_errors);
        self.encoding_errors = self.encoding_errors.saturating_add(other.encoding_errors);
        self.capacity_errors = self.capacity_errors.saturating_add(other.capacity_errors);
    }
}

impl AddAssign for CodecCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.merge(&rhs);
    }
}
