//! The Record type - one delimiter-bounded segment of a stream.

use bytes::Bytes;
use std::fmt;

/// A record extracted from a descriptor's stream.
///
/// `data` holds every byte up to and including the delimiter. The final
/// record of a stream that does not end with the delimiter carries no
/// delimiter and reports `is_delimited() == false`.
///
/// # Example
///
/// ```
/// use fdlines::Record;
/// use bytes::Bytes;
///
/// let record = Record::new(Bytes::from_static(b"hello\n"), 0, true);
///
/// assert_eq!(record.len(), 6);
/// assert_eq!(record.content(), b"hello");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Record {
    /// The record bytes, delimiter included when present.
    pub data: Bytes,

    /// Stream offset of the first byte, counted from when the descriptor
    /// buffer was created.
    pub offset: u64,

    delimited: bool,
}

impl Record {
    /// Creates a record.
    pub fn new(data: impl Into<Bytes>, offset: u64, delimited: bool) -> Self {
        Self {
            data: data.into(),
            offset,
            delimited,
        }
    }

    /// Returns the length of the record, delimiter included.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the record has no bytes.
    ///
    /// The engine never produces empty records; a lone delimiter is one byte.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns a reference to the record bytes.
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Returns the stream offset of the first byte.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Returns true if the record ends with the delimiter.
    pub fn is_delimited(&self) -> bool {
        self.delimited
    }

    /// Returns the record bytes without the trailing delimiter.
    pub fn content(&self) -> &[u8] {
        if self.delimited && !self.data.is_empty() {
            &self.data[..self.data.len() - 1]
        } else {
            &self.data
        }
    }

    /// Returns the end offset (exclusive).
    pub fn end(&self) -> u64 {
        self.offset + self.data.len() as u64
    }

    /// Returns the stream range covered by the record.
    pub fn range(&self) -> std::ops::Range<u64> {
        self.offset..self.end()
    }

    /// Consumes the record and returns the underlying bytes.
    pub fn into_data(self) -> Bytes {
        self.data
    }
}

impl AsRef<[u8]> for Record {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl From<Record> for Bytes {
    fn from(record: Record) -> Self {
        record.data
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Record({} bytes @ {}", self.len(), self.offset)?;
        if !self.delimited {
            write!(f, ", unterminated")?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_strips_delimiter() {
        let record = Record::new(&b"ab\n"[..], 0, true);
        assert_eq!(record.content(), b"ab");
        assert_eq!(record.len(), 3);
    }

    #[test]
    fn test_content_unterminated() {
        let record = Record::new(&b"ef"[..], 6, false);
        assert_eq!(record.content(), b"ef");
        assert!(!record.is_delimited());
    }

    #[test]
    fn test_lone_delimiter() {
        let record = Record::new(&b"\0"[..], 0, true);
        assert!(record.content().is_empty());
        assert!(!record.is_empty());
    }

    #[test]
    fn test_range() {
        let record = Record::new(&b"hello"[..], 100, false);
        assert_eq!(record.end(), 105);
        assert_eq!(record.range(), 100..105);
    }

    #[test]
    fn test_display() {
        let s = Record::new(&b"hi"[..], 7, false).to_string();
        assert!(s.contains("2 bytes"));
        assert!(s.contains("@ 7"));
        assert!(s.contains("unterminated"));
    }

    #[test]
    fn test_into_bytes() {
        let bytes: Bytes = Record::new(&b"x\n"[..], 0, true).into();
        assert_eq!(bytes.as_ref(), b"x\n");
    }
}
