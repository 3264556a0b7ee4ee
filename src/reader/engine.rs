//! Core reading engine - LineReader with per-descriptor state.
//!
//! [`LineReader`] owns one buffer per descriptor it has seen. Every call
//! scans the buffered bytes for the delimiter and only reads from the
//! source when no complete record is buffered yet:
//!
//! - `read_record()` - Next record for any single-byte delimiter
//! - `read_line()` - Same, with the configured delimiter (`\n` by default)
//! - `release()` / `release_all()` - Drop buffered state explicitly
//!
//! # Example
//!
//! ```
//! use std::io::Cursor;
//! use fdlines::{LineReader, ReadOutcome, SourceTable};
//!
//! let mut table = SourceTable::new();
//! table.insert(0, Cursor::new(b"ab\ncd\nef".to_vec()));
//! let mut reader = LineReader::new(table);
//!
//! let mut lines = Vec::new();
//! while let ReadOutcome::Record(line) = reader.read_line(0)? {
//!     lines.push(line.into_data());
//! }
//! assert_eq!(lines, [&b"ab\n"[..], b"cd\n", b"ef"]);
//! # Ok::<(), fdlines::ReadError>(())
//! ```

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use tracing::{debug, trace, warn};

use super::Records;
use crate::buffer::DescriptorBuffer;
use crate::config::ReaderConfig;
use crate::error::ReadError;
use crate::record::{ReadOutcome, Record};
use crate::source::{Descriptor, RawRead};

/// A reader that yields delimiter-bounded records from many descriptors.
///
/// State is created lazily on the first read of a descriptor and kept
/// until [`release`](LineReader::release) or
/// [`release_all`](LineReader::release_all); there is no implicit eviction.
/// Reads on different descriptors can be interleaved freely.
///
/// # Buffering
///
/// - Each raw read requests `chunk_size` bytes and may return fewer
/// - Storage doubles when less than one chunk of spare room is left
/// - Extracted records are copied out and the remainder is compacted to the
///   front in place, so steady-state reading does not reallocate
///
/// # Failure handling
///
/// A failed raw read releases the descriptor's state before the error is
/// returned; the next call starts from a fresh buffer. Reads are never
/// retried.
///
/// # Threading
///
/// All mutating operations take `&mut self`. Sharing one reader across
/// threads needs external synchronization.
#[derive(Debug)]
pub struct LineReader<S> {
    source: S,
    config: ReaderConfig,
    buffers: HashMap<Descriptor, DescriptorBuffer>,
}

/// Snapshot of one descriptor's buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferStats {
    /// Bytes read but not yet returned as records.
    pub buffered: usize,
    /// Allocated storage.
    pub capacity: usize,
    /// How many times storage has been grown.
    pub growths: u32,
    /// Bytes already returned as records.
    pub consumed: u64,
    /// Whether the source has reported end-of-stream.
    pub eof: bool,
}

impl<S: RawRead> LineReader<S> {
    /// Creates a reader with the default configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use std::io::Cursor;
    /// use fdlines::{LineReader, SourceTable};
    ///
    /// let reader = LineReader::new(SourceTable::<Cursor<Vec<u8>>>::new());
    /// assert_eq!(reader.tracked_count(), 0);
    /// ```
    pub fn new(source: S) -> Self {
        Self {
            source,
            config: ReaderConfig::default(),
            buffers: HashMap::new(),
        }
    }

    /// Creates a reader with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError::InvalidConfig`] if the configuration is invalid.
    pub fn with_config(source: S, config: ReaderConfig) -> Result<Self, ReadError> {
        config.validate()?;
        Ok(Self {
            source,
            config,
            buffers: HashMap::new(),
        })
    }

    /// Reads the next record from `descriptor` using the configured delimiter.
    pub fn read_line(&mut self, descriptor: Descriptor) -> Result<ReadOutcome, ReadError> {
        self.read_record(descriptor, self.config.delimiter())
    }

    /// Reads the next record from `descriptor`.
    ///
    /// Returns every byte up to and including the first `delimiter` not yet
    /// returned. If the stream ends first, the remaining bytes are returned
    /// without a delimiter, and subsequent calls return
    /// [`ReadOutcome::EndOfStream`].
    ///
    /// Any byte is a valid delimiter, including `0`.
    ///
    /// # Errors
    ///
    /// - [`ReadError::InvalidArgument`] - negative or out-of-bound descriptor
    /// - [`ReadError::AllocationFailure`] - the buffer could not grow
    /// - [`ReadError::ReadFailure`] - the raw read failed; state is released
    ///
    /// # Example
    ///
    /// ```
    /// use std::io::Cursor;
    /// use fdlines::{LineReader, ReadOutcome, SourceTable};
    ///
    /// let mut table = SourceTable::new();
    /// table.insert(4, Cursor::new(b"a,b".to_vec()));
    /// let mut reader = LineReader::new(table);
    ///
    /// let first = reader.read_record(4, b',')?.into_record().unwrap();
    /// assert_eq!(first.data().as_ref(), b"a,");
    /// let last = reader.read_record(4, b',')?.into_record().unwrap();
    /// assert!(!last.is_delimited());
    /// assert!(reader.read_record(4, b',')?.is_end_of_stream());
    /// # Ok::<(), fdlines::ReadError>(())
    /// ```
    pub fn read_record(
        &mut self,
        descriptor: Descriptor,
        delimiter: u8,
    ) -> Result<ReadOutcome, ReadError> {
        self.check_descriptor(descriptor)?;

        let chunk = self.config.chunk_size();
        let buffer = match self.buffers.entry(descriptor) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                entry.insert(DescriptorBuffer::with_capacity(descriptor, chunk)?)
            }
        };

        // Bytes before `scanned` are known to hold no delimiter for this call.
        let mut scanned = 0;
        loop {
            if let Some(pos) = buffer.find(delimiter, scanned) {
                let offset = buffer.consumed();
                let data = buffer.take(pos + 1);
                trace!(descriptor, len = data.len(), offset, "extracted record");
                return Ok(ReadOutcome::Record(Record::new(data, offset, true)));
            }
            scanned = buffer.len();

            if buffer.is_eof() {
                if buffer.len() == 0 {
                    return Ok(ReadOutcome::EndOfStream);
                }
                let offset = buffer.consumed();
                let data = buffer.take_all();
                trace!(descriptor, len = data.len(), offset, "extracted final record");
                return Ok(ReadOutcome::Record(Record::new(data, offset, false)));
            }

            if let Err(err) = buffer.fill(&mut self.source, descriptor, chunk) {
                if matches!(err, ReadError::ReadFailure { .. }) {
                    warn!(descriptor, error = %err, "raw read failed, releasing descriptor state");
                    self.buffers.remove(&descriptor);
                }
                return Err(err);
            }
        }
    }

    /// Returns an iterator over the records of `descriptor`.
    ///
    /// The iterator ends after end-of-stream, and after yielding an error.
    pub fn records(&mut self, descriptor: Descriptor, delimiter: u8) -> Records<'_, S> {
        Records::new(self, descriptor, delimiter)
    }

    /// Returns an iterator over the records of `descriptor` using the
    /// configured delimiter.
    pub fn lines(&mut self, descriptor: Descriptor) -> Records<'_, S> {
        let delimiter = self.config.delimiter();
        Records::new(self, descriptor, delimiter)
    }

    fn check_descriptor(&self, descriptor: Descriptor) -> Result<(), ReadError> {
        if descriptor < 0 {
            return Err(ReadError::InvalidArgument {
                descriptor,
                reason: "descriptor must be non-negative",
            });
        }

        if let Some(max) = self.config.max_descriptors() {
            if descriptor as usize >= max {
                return Err(ReadError::InvalidArgument {
                    descriptor,
                    reason: "descriptor exceeds the tracked maximum",
                });
            }
        }

        Ok(())
    }
}

impl<S> LineReader<S> {
    /// Drops the buffered state of `descriptor`.
    ///
    /// A no-op for descriptors that are not tracked. The descriptor itself
    /// is not closed and its read position is not rewound.
    pub fn release(&mut self, descriptor: Descriptor) {
        if let Some(buffer) = self.buffers.remove(&descriptor) {
            debug!(
                descriptor,
                discarded = buffer.len(),
                "released descriptor buffer"
            );
        }
    }

    /// Drops the buffered state of every descriptor.
    pub fn release_all(&mut self) {
        let released = std::mem::take(&mut self.buffers);
        if !released.is_empty() {
            debug!(count = released.len(), "released all descriptor buffers");
        }
    }

    /// Returns true if `descriptor` has buffered state.
    pub fn is_tracked(&self, descriptor: Descriptor) -> bool {
        self.buffers.contains_key(&descriptor)
    }

    /// Returns the number of descriptors with buffered state.
    pub fn tracked_count(&self) -> usize {
        self.buffers.len()
    }

    /// Returns the number of bytes buffered for `descriptor` but not yet
    /// returned as records.
    pub fn buffered_len(&self, descriptor: Descriptor) -> usize {
        self.buffers.get(&descriptor).map_or(0, |b| b.len())
    }

    /// Returns a snapshot of `descriptor`'s buffer, if tracked.
    pub fn stats(&self, descriptor: Descriptor) -> Option<BufferStats> {
        self.buffers.get(&descriptor).map(|b| BufferStats {
            buffered: b.len(),
            capacity: b.capacity(),
            growths: b.growths(),
            consumed: b.consumed(),
            eof: b.is_eof(),
        })
    }

    /// Returns the configuration used by this reader.
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Returns a reference to the raw read source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Returns a mutable reference to the raw read source.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Consumes the reader, discarding all buffered state, and returns the source.
    pub fn into_source(self) -> S {
        self.source
    }
}

impl<S: RawRead + Default> Default for LineReader<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::source::SourceTable;

    fn reader(streams: &[(Descriptor, &[u8])]) -> CursorReader {
        let table = streams
            .iter()
            .map(|(fd, data)| (*fd, Cursor::new(data.to_vec())))
            .collect();
        LineReader::new(table)
    }

    type CursorReader = LineReader<SourceTable<Cursor<Vec<u8>>>>;

    fn next(reader: &mut CursorReader, fd: Descriptor) -> Option<Vec<u8>> {
        reader
            .read_line(fd)
            .unwrap()
            .into_record()
            .map(|r| r.data.to_vec())
    }

    #[test]
    fn test_negative_descriptor() {
        let mut reader = reader(&[]);
        let err = reader.read_line(-1).unwrap_err();
        assert!(matches!(err, ReadError::InvalidArgument { descriptor: -1, .. }));
        assert_eq!(reader.tracked_count(), 0);
    }

    #[test]
    fn test_bounded_registry() {
        let config = ReaderConfig::default().with_max_descriptors(Some(4));
        let table: SourceTable<Cursor<Vec<u8>>> = SourceTable::new();
        let mut reader = LineReader::with_config(table, config).unwrap();

        let err = reader.read_line(4).unwrap_err();
        assert!(matches!(err, ReadError::InvalidArgument { descriptor: 4, .. }));
        assert!(!reader.is_tracked(4));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ReaderConfig::default().with_chunk_size(0);
        let result = LineReader::with_config(SourceTable::<Cursor<Vec<u8>>>::new(), config);
        assert!(matches!(result, Err(ReadError::InvalidConfig { .. })));
    }

    #[test]
    fn test_lazy_creation() {
        let mut reader = reader(&[(0, b"x\n")]);
        assert!(!reader.is_tracked(0));
        next(&mut reader, 0);
        assert!(reader.is_tracked(0));
    }

    #[test]
    fn test_remainder_is_kept() {
        let mut reader = reader(&[(0, b"ab\ncd\nef")]);
        assert_eq!(next(&mut reader, 0).unwrap(), b"ab\n");
        assert_eq!(reader.buffered_len(0), 5);
        assert_eq!(next(&mut reader, 0).unwrap(), b"cd\n");
        assert_eq!(next(&mut reader, 0).unwrap(), b"ef");
        assert_eq!(next(&mut reader, 0), None);
    }

    #[test]
    fn test_release_is_idempotent() {
        let mut reader = reader(&[(0, b"a\nb\n")]);
        next(&mut reader, 0);
        reader.release(0);
        reader.release(0);
        reader.release(-3);
        assert!(!reader.is_tracked(0));
    }

    #[test]
    fn test_release_all() {
        let mut reader = reader(&[(0, b"a\n"), (1, b"b\n")]);
        next(&mut reader, 0);
        next(&mut reader, 1);
        assert_eq!(reader.tracked_count(), 2);

        reader.release_all();
        assert_eq!(reader.tracked_count(), 0);
        assert!(reader.stats(1).is_none());
    }

    #[test]
    fn test_offsets_are_contiguous() {
        let mut reader = reader(&[(0, b"one\ntwo\nthree")]);
        let records: Vec<_> = reader.lines(0).collect::<Result<_, _>>().unwrap();

        let mut expected = 0;
        for record in &records {
            assert_eq!(record.offset(), expected);
            expected = record.end();
        }
        assert_eq!(expected, 13);
    }

    #[test]
    fn test_stats() {
        let mut reader = reader(&[(0, b"a\nb")]);
        next(&mut reader, 0);
        let stats = reader.stats(0).unwrap();
        assert_eq!(stats.buffered, 1);
        assert_eq!(stats.consumed, 2);
        assert_eq!(stats.capacity, 4096);
        assert!(!stats.eof);
    }
}
