//! Iterator adapter over one descriptor's records.

use std::iter::FusedIterator;

use super::LineReader;
use crate::error::ReadError;
use crate::record::{ReadOutcome, Record};
use crate::source::{Descriptor, RawRead};

/// An iterator that yields the records of one descriptor.
///
/// Created by [`LineReader::records`] and [`LineReader::lines`]. It ends
/// at end-of-stream; after yielding an error it yields `None`.
///
/// # Example
///
/// ```
/// use std::io::Cursor;
/// use fdlines::{LineReader, SourceTable};
///
/// let mut table = SourceTable::new();
/// table.insert(0, Cursor::new(b"k=v\0x=y\0".to_vec()));
/// let mut reader = LineReader::new(table);
///
/// let pairs: Vec<_> = reader
///     .records(0, b'\0')
///     .map(|r| r.map(|rec| rec.content().to_vec()))
///     .collect::<Result<_, _>>()?;
/// assert_eq!(pairs, [b"k=v".to_vec(), b"x=y".to_vec()]);
/// # Ok::<(), fdlines::ReadError>(())
/// ```
#[derive(Debug)]
pub struct Records<'a, S> {
    reader: &'a mut LineReader<S>,
    descriptor: Descriptor,
    delimiter: u8,
    finished: bool,
}

impl<'a, S: RawRead> Records<'a, S> {
    pub(super) fn new(
        reader: &'a mut LineReader<S>,
        descriptor: Descriptor,
        delimiter: u8,
    ) -> Self {
        Self {
            reader,
            descriptor,
            delimiter,
            finished: false,
        }
    }
}

impl<S: RawRead> Iterator for Records<'_, S> {
    type Item = Result<Record, ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.reader.read_record(self.descriptor, self.delimiter) {
            Ok(ReadOutcome::Record(record)) => Some(Ok(record)),
            Ok(ReadOutcome::EndOfStream) => {
                self.finished = true;
                None
            }
            Err(err) => {
                self.finished = true;
                Some(Err(err))
            }
        }
    }
}

impl<S: RawRead> FusedIterator for Records<'_, S> {}
