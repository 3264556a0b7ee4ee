#![no_main]

use std::io::{self, Cursor, Read};

use fdlines::{LineReader, ReadOutcome, ReaderConfig, SourceTable};
use libfuzzer_sys::fuzz_target;

/// Returns at most `step` bytes per read, to mimic short reads.
struct Short<R> {
    inner: R,
    step: usize,
}

impl<R: Read> Read for Short<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = buf.len().min(self.step);
        self.inner.read(&mut buf[..n])
    }
}

fuzz_target!(|input: (u8, u8, u8, Vec<u8>)| {
    let (delimiter, chunk, step, data) = input;
    let chunk = usize::from(chunk).max(1);
    let step = usize::from(step).max(1);

    let mut table = SourceTable::new();
    table.insert(
        0,
        Short {
            inner: Cursor::new(data.clone()),
            step,
        },
    );
    let mut reader = LineReader::with_config(table, ReaderConfig::new(chunk).unwrap()).unwrap();

    let mut rebuilt = Vec::with_capacity(data.len());
    let mut expected_offset = 0u64;
    while let ReadOutcome::Record(record) = reader.read_record(0, delimiter).unwrap() {
        // Verify: no empty records, offsets are contiguous
        assert!(!record.is_empty());
        assert_eq!(record.offset(), expected_offset);
        expected_offset = record.end();

        // Verify: delimiter only ever appears as the last byte
        let body = &record.data[..record.len() - 1];
        assert!(!body.contains(&delimiter));
        assert_eq!(record.is_delimited(), record.data.last() == Some(&delimiter));

        rebuilt.extend_from_slice(&record.data);
    }

    // Verify: records reconstruct the stream exactly
    assert_eq!(rebuilt, data);

    // Verify: end-of-stream is sticky
    assert!(reader.read_record(0, delimiter).unwrap().is_end_of_stream());
});
