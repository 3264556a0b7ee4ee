//! Growable, compacting byte buffer for one descriptor.

use bytes::Bytes;
use tracing::debug;

use crate::error::ReadError;
use crate::source::{Descriptor, RawRead};

/// Buffered-but-unconsumed bytes of one descriptor.
///
/// `capacity` bytes are reserved up front, but `data` is only initialized
/// as far as reads have needed it; only `data[..len]` holds stream bytes. Records are
/// extracted from the front and the remainder is shifted down in place, so
/// a long-lived buffer reallocates only when a record outgrows it.
#[derive(Debug)]
pub(crate) struct DescriptorBuffer {
    data: Vec<u8>,
    capacity: usize,
    len: usize,
    eof: bool,
    consumed: u64,
    growths: u32,
}

impl DescriptorBuffer {
    /// Allocates an empty buffer with `capacity` bytes of storage.
    pub(crate) fn with_capacity(
        descriptor: Descriptor,
        capacity: usize,
    ) -> Result<Self, ReadError> {
        let mut data = Vec::new();
        data.try_reserve_exact(capacity)
            .map_err(|_| ReadError::AllocationFailure {
                descriptor,
                requested: capacity,
            })?;

        debug!(descriptor, capacity, "created descriptor buffer");

        Ok(Self {
            data,
            capacity,
            len: 0,
            eof: false,
            consumed: 0,
            growths: 0,
        })
    }

    /// Returns the number of valid buffered bytes.
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Returns the allocated storage size.
    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns true once the source has reported exhaustion.
    pub(crate) fn is_eof(&self) -> bool {
        self.eof
    }

    /// Returns the stream offset of the next byte to be extracted.
    pub(crate) fn consumed(&self) -> u64 {
        self.consumed
    }

    /// Returns how many times the storage has been grown.
    pub(crate) fn growths(&self) -> u32 {
        self.growths
    }

    /// Finds `delimiter` in the valid region, starting at `from`.
    pub(crate) fn find(&self, delimiter: u8, from: usize) -> Option<usize> {
        if from >= self.len {
            return None;
        }
        memchr::memchr(delimiter, &self.data[from..self.len]).map(|pos| from + pos)
    }

    /// Makes sure at least `needed` bytes are free after the valid region.
    ///
    /// Capacity doubles until the request fits. On failure the buffered
    /// bytes are left untouched.
    pub(crate) fn ensure_spare(
        &mut self,
        descriptor: Descriptor,
        needed: usize,
    ) -> Result<(), ReadError> {
        if self.capacity() - self.len >= needed {
            return Ok(());
        }

        let mut new_capacity = self.capacity().max(1);
        while new_capacity - self.len < needed {
            new_capacity = new_capacity
                .checked_mul(2)
                .ok_or(ReadError::AllocationFailure {
                    descriptor,
                    requested: usize::MAX,
                })?;
        }

        self.data
            .try_reserve_exact(new_capacity - self.data.len())
            .map_err(|_| ReadError::AllocationFailure {
                descriptor,
                requested: new_capacity,
            })?;
        self.capacity = new_capacity;
        self.growths += 1;

        debug!(
            descriptor,
            capacity = new_capacity,
            buffered = self.len,
            "grew descriptor buffer"
        );
        Ok(())
    }

    /// Issues one raw read of up to `chunk` bytes after the valid region.
    ///
    /// Returns the number of bytes read; zero marks end-of-stream. Must not
    /// be called once end-of-stream is set.
    pub(crate) fn fill<S: RawRead + ?Sized>(
        &mut self,
        source: &mut S,
        descriptor: Descriptor,
        chunk: usize,
    ) -> Result<usize, ReadError> {
        debug_assert!(!self.eof, "fill after end-of-stream");

        self.ensure_spare(descriptor, chunk)?;

        // Initialize only the slice handed to the source; stays within the reservation.
        let end = self.len + chunk;
        if self.data.len() < end {
            self.data.resize(end, 0);
        }

        let spare = &mut self.data[self.len..end];
        let n = source
            .raw_read(descriptor, spare)
            .map_err(|err| ReadError::ReadFailure {
                descriptor,
                source: err,
            })?;

        // A misbehaving source must not push `len` past the slice it was given.
        let n = n.min(chunk);
        if n == 0 {
            self.eof = true;
            debug!(descriptor, buffered = self.len, "end of stream");
        }
        self.len += n;
        Ok(n)
    }

    /// Removes the first `n` valid bytes and returns them.
    ///
    /// The remainder is moved to the front of the storage in place.
    pub(crate) fn take(&mut self, n: usize) -> Bytes {
        debug_assert!(n <= self.len);

        let out = Bytes::copy_from_slice(&self.data[..n]);
        if n < self.len {
            self.data.copy_within(n..self.len, 0);
        }
        self.len -= n;
        self.consumed += n as u64;
        out
    }

    /// Removes and returns every valid byte.
    pub(crate) fn take_all(&mut self) -> Bytes {
        self.take(self.len)
    }
}
