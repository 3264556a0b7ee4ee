//! Raw read sources.
//!
//! The engine consumes exactly one primitive: a single best-effort read from
//! a descriptor into a caller-supplied buffer. [`RawRead`] is that seam.
//!
//! - [`OsDescriptors`] - `read(2)` on OS file descriptors (feature `os-fd`, unix)
//! - [`SourceTable`] - descriptor numbers mapped to any [`std::io::Read`]

#[cfg(all(unix, feature = "os-fd"))]
mod os;
mod table;

use std::io;

#[cfg(all(unix, feature = "os-fd"))]
pub use os::OsDescriptors;
pub use table::SourceTable;

/// Identifier of an open byte-stream source, shaped like a POSIX `RawFd`.
///
/// Negative values are never valid.
pub type Descriptor = i32;

/// A source of raw bytes addressed by descriptor.
///
/// `raw_read` performs one read of at most `buf.len()` bytes and returns as
/// soon as any bytes are available. It is never assumed to fill `buf`.
/// `Ok(0)` means the stream for `descriptor` is exhausted.
///
/// Implementations should not surface [`io::ErrorKind::Interrupted`]: the
/// engine treats every error as fatal for the descriptor and drops its
/// buffered bytes.
pub trait RawRead {
    /// Reads up to `buf.len()` bytes from `descriptor` into `buf`.
    fn raw_read(&mut self, descriptor: Descriptor, buf: &mut [u8]) -> io::Result<usize>;
}

impl<T: RawRead + ?Sized> RawRead for &mut T {
    fn raw_read(&mut self, descriptor: Descriptor, buf: &mut [u8]) -> io::Result<usize> {
        (**self).raw_read(descriptor, buf)
    }
}

impl<T: RawRead + ?Sized> RawRead for Box<T> {
    fn raw_read(&mut self, descriptor: Descriptor, buf: &mut [u8]) -> io::Result<usize> {
        (**self).raw_read(descriptor, buf)
    }
}

/// Runs `read` until it returns something other than `Interrupted`.
///
/// A signal landing during a blocking read is not a stream failure.
pub(crate) fn retry_interrupted<F>(mut read: F) -> io::Result<usize>
where
    F: FnMut() -> io::Result<usize>,
{
    loop {
        match read() {
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            result => return result,
        }
    }
}
