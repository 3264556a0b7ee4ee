//! fdlines
//!
//! Stateful, delimiter-based record reading over descriptors.
//!
//! `fdlines` reads raw bytes from descriptors incrementally and hands them
//! out one record at a time: by default newline-terminated lines, or
//! segments ending in any other single byte. Each descriptor keeps its own
//! buffer of read-but-unconsumed bytes, so reads can be interleaved across
//! descriptors without losing anything.
//!
//! The crate intentionally:
//! - does NOT open or close descriptors
//! - does NOT decode text (records are raw bytes, binary safe)
//! - does NOT synchronize across threads
//! - does NOT evict state on its own (release it explicitly)
//!
//! It only does one thing: **raw reads → records**
//!
//! # OS descriptors (unix, feature = "os-fd")
//!
//! ```no_run
//! use std::fs::File;
//! use std::os::fd::AsRawFd;
//! use fdlines::{LineReader, OsDescriptors};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let access = File::open("access.log")?;
//!     let errors = File::open("error.log")?;
//!     let mut reader = LineReader::new(OsDescriptors);
//!
//!     // Interleave two descriptors; each keeps its own position.
//!     let a = reader.read_line(access.as_raw_fd())?;
//!     let e = reader.read_line(errors.as_raw_fd())?;
//!     println!("{:?} / {:?}", a.record(), e.record());
//!
//!     reader.release_all();
//!     Ok(())
//! }
//! ```
//!
//! # Any `Read`
//!
//! ```
//! use std::io::Cursor;
//! use fdlines::{LineReader, SourceTable};
//!
//! let mut table = SourceTable::new();
//! table.insert(0, Cursor::new(b"a,b,c".to_vec()));
//! let mut reader = LineReader::new(table);
//!
//! for record in reader.records(0, b',') {
//!     println!("{}", record?);
//! }
//! # Ok::<(), fdlines::ReadError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod reader;
mod record;
mod source;

mod buffer; // internal per-descriptor storage

//
// Public surface (intentionally tiny)
//

pub use config::{DEFAULT_CHUNK_SIZE, DEFAULT_DELIMITER, ReaderConfig};
pub use error::ReadError;
pub use reader::{BufferStats, LineReader, Records};
pub use record::{ReadOutcome, Record};
pub use source::{Descriptor, RawRead, SourceTable};

#[cfg(all(unix, feature = "os-fd"))]
pub use source::OsDescriptors;
