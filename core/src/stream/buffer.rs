//! stream/buffer.rs
//! Byte sequence ownership and the cursor primitives every codec builds on.
//!
//! Design notes:
//! - Writes always append; the write cursor is the sequence length.
//! - Reads slice the live buffer on each call. Nothing derived from the bytes
//!   is cached, so a write can never leave a stale view behind.
//! - A failed read leaves the read cursor where it was.

use bytes::{Bytes, BytesMut};
use log::{debug, trace};

use crate::config::StreamConfig;
use crate::constants::SUMMARY_PREVIEW_LEN;
use crate::stream::validate::do_read_assertions;
use crate::telemetry::{CodecCounters, CodecSnapshot};
use crate::types::{Result, StreamError};
use crate::utils::{fmt_bytes, hex_preview};

/// Storage state of a stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backing {
    /// Write-only growth mode: nothing allocated, every read underruns.
    Empty,
    /// Owned bytes, either seeded by the caller or grown by writes.
    Seeded(BytesMut),
}

/// Sequential binary codec over an owned, growable byte sequence.
#[derive(Debug)]
pub struct Stream {
    backing: Backing,
    read_offset: usize,
    config: StreamConfig,
    counters: CodecCounters,
}

impl Default for Stream {
    fn default() -> Self {
        Self::new()
    }
}

impl Stream {
    /// Empty, write-capable stream. Reads fail until something is written.
    pub fn new() -> Self {
        Self::with_config(StreamConfig::default())
    }

    pub fn with_config(config: StreamConfig) -> Self {
        Self {
            backing: Backing::Empty,
            read_offset: 0,
            config,
            counters: CodecCounters::default(),
        }
    }

    /// Stream seeded with a copy of `bytes`, read cursor at 0.
    pub fn from_bytes(bytes: impl AsRef<[u8]>) -> Self {
        let mut stream = Self::new();
        stream.seed(bytes.as_ref());
        stream
    }

    /// Stream seeded with a copy of `bytes`, read cursor at `offset`.
    /// An offset past the end is rejected as `BufferUnderrun`.
    pub fn with_offset(bytes: impl AsRef<[u8]>, offset: usize) -> Result<Self> {
        Self::from_bytes_with_config(bytes, offset, StreamConfig::default())
    }

    pub fn from_bytes_with_config(
        bytes: impl AsRef<[u8]>,
        offset: usize,
        config: StreamConfig,
    ) -> Result<Self> {
        let bytes = bytes.as_ref();
        do_read_assertions(0, offset, bytes.len())?;

        let mut stream = Self::with_config(config);
        stream.check_capacity(bytes.len())?;
        stream.seed(bytes);
        stream.read_offset = offset;
        Ok(stream)
    }

    fn seed(&mut self, bytes: &[u8]) {
        if bytes.is_empty() {
            return;
        }
        debug!("stream seeded with {} bytes", bytes.len());
        self.backing = Backing::Seeded(BytesMut::from(bytes));
    }

    // -------------------------------------------------------------------------
    // Introspection
    // -------------------------------------------------------------------------

    /// The full current byte sequence.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        match &self.backing {
            Backing::Empty => &[],
            Backing::Seeded(buf) => &buf[..],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn backing(&self) -> &Backing {
        &self.backing
    }

    #[inline]
    pub fn read_offset(&self) -> usize {
        self.read_offset
    }

    /// Bytes appended so far. Always equal to `len()`.
    #[inline]
    pub fn write_offset(&self) -> usize {
        self.len()
    }

    /// Bytes left between the read cursor and the end (0 once skipped past it).
    #[inline]
    pub fn remaining(&self) -> usize {
        self.len().saturating_sub(self.read_offset)
    }

    /// True when the read cursor is at or beyond the end.
    #[inline]
    pub fn at_end(&self) -> bool {
        self.read_offset >= self.len()
    }

    #[inline]
    pub fn config(&self) -> &StreamConfig {
        &self.config
    }

    #[inline]
    pub fn counters(&self) -> &CodecCounters {
        &self.counters
    }

    pub fn telemetry(&self) -> CodecSnapshot {
        CodecSnapshot::from(&self.counters, self.len(), self.read_offset)
    }

    /// Produce a concise debug summary of the stream state.
    pub fn summary(&self) -> String {
        let rest = self.unread();
        let next = if rest.len() <= SUMMARY_PREVIEW_LEN {
            fmt_bytes(rest)
        } else {
            hex_preview(rest, SUMMARY_PREVIEW_LEN)
        };
        format!(
            "Stream {{ len: {}, read_offset: {}, at_end: {}, next: {} }}",
            self.len(),
            self.read_offset,
            self.at_end(),
            next,
        )
    }

    /// Unread bytes, without moving the cursor.
    #[inline]
    pub(crate) fn unread(&self) -> &[u8] {
        let buf = self.as_slice();
        &buf[self.read_offset.min(buf.len())..]
    }

    // -------------------------------------------------------------------------
    // Primitives
    // -------------------------------------------------------------------------

    /// Return the next `len` bytes and advance the read cursor past them.
    pub fn read(&mut self, len: usize) -> Result<&[u8]> {
        if let Err(e) = do_read_assertions(self.read_offset, len, self.remaining()) {
            return self.fail(e);
        }
        // Clamped: `skip` may leave the cursor past the end.
        let start = self.read_offset.min(self.len());
        self.read_offset = self.read_offset.saturating_add(len);
        self.counters.add_read(len);
        Ok(&self.as_slice()[start..start + len])
    }

    /// Fixed-size variant of `read`.
    #[inline]
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read(N)?);
        Ok(out)
    }

    /// Return the next `len` bytes without moving the read cursor.
    pub fn peek(&self, len: usize) -> Result<&[u8]> {
        do_read_assertions(self.read_offset, len, self.remaining())?;
        Ok(&self.unread()[..len])
    }

    /// Append `bytes`. Fails only when `StreamConfig::max_len` would be exceeded.
    pub fn write(&mut self, bytes: &[u8]) -> Result<()> {
        if bytes.is_empty() {
            return Ok(());
        }
        self.check_capacity(bytes.len())?;

        if matches!(self.backing, Backing::Empty) {
            let cap = self.config.initial_capacity.max(bytes.len());
            self.backing = Backing::Seeded(BytesMut::with_capacity(cap));
        }
        if let Backing::Seeded(buf) = &mut self.backing {
            buf.extend_from_slice(bytes);
        }
        self.counters.add_write(bytes.len());
        Ok(())
    }

    /// Advance the read cursor without bounds checking.
    /// Skipping past the end is allowed; later reads then underrun.
    pub fn skip(&mut self, len: usize) {
        self.read_offset = self.read_offset.saturating_add(len);
        self.counters.add_skip(len);
    }

    /// Everything from the read cursor to the end; the cursor moves to the end.
    pub fn read_remaining(&mut self) -> Bytes {
        let out = Bytes::copy_from_slice(self.unread());
        self.read_offset = self.read_offset.max(self.len());
        if !out.is_empty() {
            self.counters.add_read(out.len());
        }
        out
    }

    /// Rewind the read cursor to 0. Contents are unchanged.
    pub fn reset(&mut self) {
        self.read_offset = 0;
    }

    /// Drop all contents and counters; the stream returns to write-only mode.
    pub fn clear(&mut self) {
        debug!("stream cleared ({} bytes dropped)", self.len());
        self.backing = Backing::Empty;
        self.read_offset = 0;
        self.counters = CodecCounters::default();
    }

    /// Independent copy of the current bytes with cursors at 0.
    pub fn snapshot(&self) -> Stream {
        debug!("stream snapshot of {} bytes", self.len());
        let backing = match &self.backing {
            Backing::Empty => Backing::Empty,
            Backing::Seeded(buf) => Backing::Seeded(BytesMut::from(&buf[..])),
        };
        Stream {
            backing,
            read_offset: 0,
            config: self.config.clone(),
            counters: CodecCounters::default(),
        }
    }

    /// Copy of the full byte sequence as an exportable buffer.
    pub fn to_bytes(&self) -> Bytes {
        Bytes::copy_from_slice(self.as_slice())
    }

    /// Consume the stream and hand its bytes over without copying.
    pub fn into_bytes(self) -> Bytes {
        match self.backing {
            Backing::Empty => Bytes::new(),
            Backing::Seeded(buf) => buf.freeze(),
        }
    }

    // -------------------------------------------------------------------------
    // Crate-internal helpers
    // -------------------------------------------------------------------------

    /// Reject a write of `additional` bytes that would pass `max_len`.
    pub(crate) fn check_capacity(&mut self, additional: usize) -> Result<()> {
        let Some(limit) = self.config.max_len else {
            return Ok(());
        };
        let requested = self.len().saturating_add(additional);
        if requested > limit {
            return self.fail(StreamError::CapacityExceeded { requested, limit });
        }
        Ok(())
    }

    /// Record and log a failure, then return it.
    pub(crate) fn fail<T>(&mut self, err: StreamError) -> Result<T> {
        trace!("stream error at read_offset {}: {}", self.read_offset, err);
        self.counters.add_error(&err);
        Err(err)
    }

    /// Run a multi-step read; on `BufferUnderrun` the cursor is restored.
    pub(crate) fn atomic<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let start = self.read_offset;
        let result = f(self);
        if let Err(StreamError::BufferUnderrun { .. }) = &result {
            self.read_offset = start;
        }
        result
    }

    /// Move the read cursor to an earlier, already validated position.
    #[inline]
    pub(crate) fn rewind_to(&mut self, offset: usize) {
        self.read_offset = offset;
    }
}

impl From<Vec<u8>> for Stream {
    fn from(bytes: Vec<u8>) -> Self {
        Stream::from_bytes(bytes)
    }
}

impl From<&[u8]> for Stream {
    fn from(bytes: &[u8]) -> Self {
        Stream::from_bytes(bytes)
    }
}

impl From<Bytes> for Stream {
    fn from(bytes: Bytes) -> Self {
        Stream::from_bytes(bytes)
    }
}
