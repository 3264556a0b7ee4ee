//! Result of a single record read.

use super::Record;

/// What a successful read produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// The next record of the stream.
    Record(Record),

    /// Nothing is buffered and the source is exhausted.
    ///
    /// Repeats on every further read until the descriptor is released.
    EndOfStream,
}

impl ReadOutcome {
    /// Returns true for [`ReadOutcome::EndOfStream`].
    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, ReadOutcome::EndOfStream)
    }

    /// Returns the record, if any.
    pub fn record(&self) -> Option<&Record> {
        match self {
            ReadOutcome::Record(record) => Some(record),
            ReadOutcome::EndOfStream => None,
        }
    }

    /// Consumes the outcome and returns the record, if any.
    pub fn into_record(self) -> Option<Record> {
        match self {
            ReadOutcome::Record(record) => Some(record),
            ReadOutcome::EndOfStream => None,
        }
    }
}

impl From<ReadOutcome> for Option<Record> {
    fn from(outcome: ReadOutcome) -> Self {
        outcome.into_record()
    }
}
