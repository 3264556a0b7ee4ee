//! Descriptor numbers mapped to in-process readers.

use std::collections::HashMap;
use std::io::{self, Read};

use super::{Descriptor, RawRead, retry_interrupted};

/// A table of [`Read`] implementors addressed by descriptor number.
///
/// Useful when the byte streams are Rust values (files, cursors, pipes,
/// sockets) rather than raw OS descriptors, and on platforms without them.
/// Reading an unregistered descriptor fails with [`io::ErrorKind::NotFound`].
/// Reads that report [`io::ErrorKind::Interrupted`] are reissued.
///
/// # Example
///
/// ```
/// use std::io::Cursor;
/// use fdlines::{LineReader, SourceTable};
///
/// let mut table = SourceTable::new();
/// table.insert(3, Cursor::new(b"ab\ncd".to_vec()));
///
/// let mut reader = LineReader::new(table);
/// let line = reader.read_line(3)?.into_record().unwrap();
/// assert_eq!(line.data().as_ref(), b"ab\n");
/// # Ok::<(), fdlines::ReadError>(())
/// ```
#[derive(Debug)]
pub struct SourceTable<R> {
    readers: HashMap<Descriptor, R>,
}

impl<R> SourceTable<R> {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self {
            readers: HashMap::new(),
        }
    }

    /// Registers `reader` under `descriptor`, returning any reader it replaces.
    pub fn insert(&mut self, descriptor: Descriptor, reader: R) -> Option<R> {
        self.readers.insert(descriptor, reader)
    }

    /// Unregisters and returns the reader for `descriptor`.
    pub fn remove(&mut self, descriptor: Descriptor) -> Option<R> {
        self.readers.remove(&descriptor)
    }

    /// Returns the reader registered under `descriptor`.
    pub fn get(&self, descriptor: Descriptor) -> Option<&R> {
        self.readers.get(&descriptor)
    }

    /// Returns the number of registered readers.
    pub fn len(&self) -> usize {
        self.readers.len()
    }

    /// Returns true if no readers are registered.
    pub fn is_empty(&self) -> bool {
        self.readers.is_empty()
    }
}

impl<R> Default for SourceTable<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> FromIterator<(Descriptor, R)> for SourceTable<R> {
    fn from_iter<I: IntoIterator<Item = (Descriptor, R)>>(iter: I) -> Self {
        Self {
            readers: iter.into_iter().collect(),
        }
    }
}

impl<R: Read> RawRead for SourceTable<R> {
    fn raw_read(&mut self, descriptor: Descriptor, buf: &mut [u8]) -> io::Result<usize> {
        match self.readers.get_mut(&descriptor) {
            Some(reader) => retry_interrupted(|| reader.read(buf)),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no reader registered for descriptor {descriptor}"),
            )),
        }
    }
}
