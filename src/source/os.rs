//! `read(2)` on OS file descriptors.

use std::io;

use super::{Descriptor, RawRead, retry_interrupted};

/// Reads straight from OS file descriptors.
///
/// The descriptors are owned by the caller: `OsDescriptors` never opens or
/// closes anything, and the read position belongs to the descriptor itself.
/// A descriptor that is not open surfaces as an `EBADF` read error.
///
/// A read interrupted by a signal (`EINTR`) is reissued here rather than
/// reported, so a stray signal does not discard the descriptor's buffered
/// bytes. Every other error is returned as-is.
///
/// # Example
///
/// ```no_run
/// use std::fs::File;
/// use std::os::fd::AsRawFd;
/// use fdlines::{LineReader, OsDescriptors, ReadOutcome};
///
/// let file = File::open("notes.txt")?;
/// let mut reader = LineReader::new(OsDescriptors);
///
/// while let ReadOutcome::Record(line) = reader.read_line(file.as_raw_fd())? {
///     print!("{}", String::from_utf8_lossy(line.data()));
/// }
/// reader.release(file.as_raw_fd());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OsDescriptors;

impl RawRead for OsDescriptors {
    #[allow(unsafe_code)]
    fn raw_read(&mut self, descriptor: Descriptor, buf: &mut [u8]) -> io::Result<usize> {
        retry_interrupted(|| {
            // SAFETY: `buf` is a live, exclusively borrowed region of exactly
            // `buf.len()` writable bytes. The kernel validates the descriptor.
            let result = unsafe { libc::read(descriptor, buf.as_mut_ptr().cast(), buf.len()) };

            if result < 0 {
                Err(io::Error::last_os_error())
            } else {
                Ok(result as usize)
            }
        })
    }
}
