//! Configuration for record reading.
//!
//! - [`ReaderConfig`] - Read chunk size, default delimiter, descriptor bound
//!
//! # Example
//!
//! ```
//! use fdlines::ReaderConfig;
//!
//! // Larger reads, NUL-separated records
//! let config = ReaderConfig::new(64 * 1024)?.with_delimiter(b'\0');
//!
//! // Reject descriptors >= 1024, like a fixed descriptor table would
//! let config = ReaderConfig::default().with_max_descriptors(Some(1024));
//! # Ok::<(), fdlines::ReadError>(())
//! ```

use crate::error::ReadError;

/// Default number of bytes requested per raw read (4 KiB).
pub const DEFAULT_CHUNK_SIZE: usize = 4 * 1024;

/// Default record delimiter.
pub const DEFAULT_DELIMITER: u8 = b'\n';

/// Configuration for a [`LineReader`](crate::LineReader).
///
/// The configuration is fixed once a reader is constructed.
///
/// - `chunk_size` - bytes requested per raw read, also the initial
///   capacity of every descriptor buffer
/// - `delimiter` - the byte used by [`LineReader::read_line`](crate::LineReader::read_line)
/// - `max_descriptors` - if set, descriptors `>= max` are rejected
///
/// # Example
///
/// ```
/// use fdlines::ReaderConfig;
///
/// let config = ReaderConfig::default()
///     .with_chunk_size(8192)
///     .with_delimiter(b';');
///
/// assert_eq!(config.chunk_size(), 8192);
/// assert_eq!(config.delimiter(), b';');
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReaderConfig {
    /// Bytes requested per raw read.
    chunk_size: usize,

    /// Delimiter used by `read_line`.
    delimiter: u8,

    /// Exclusive upper bound on descriptor numbers, if any.
    max_descriptors: Option<usize>,
}

impl ReaderConfig {
    /// Creates a new configuration with the given read chunk size.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError::InvalidConfig`] if `chunk_size` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use fdlines::ReaderConfig;
    ///
    /// let config = ReaderConfig::new(16)?;
    /// assert_eq!(config.chunk_size(), 16);
    /// assert!(ReaderConfig::new(0).is_err());
    /// # Ok::<(), fdlines::ReadError>(())
    /// ```
    pub fn new(chunk_size: usize) -> Result<Self, ReadError> {
        let config = Self {
            chunk_size,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Sets the read chunk size.
    ///
    /// Every new descriptor reserves one chunk of storage, and the first read
    /// zero-initializes a full chunk before handing it to the source. Very
    /// large values therefore cost memory and a memset per descriptor even
    /// for short streams.
    ///
    /// Note: This does not validate the configuration. Use
    /// [`ReaderConfig::validate`] to check it.
    pub fn with_chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size;
        self
    }

    /// Sets the delimiter used by `read_line`.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Bounds the descriptor numbers the reader will track.
    ///
    /// `None` removes the bound. Descriptors `>= max` are rejected with
    /// [`ReadError::InvalidArgument`].
    pub fn with_max_descriptors(mut self, max: Option<usize>) -> Self {
        self.max_descriptors = max;
        self
    }

    /// Returns the read chunk size.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Returns the delimiter used by `read_line`.
    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    /// Returns the descriptor bound, if any.
    pub fn max_descriptors(&self) -> Option<usize> {
        self.max_descriptors
    }

    /// Validates the current configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use fdlines::ReaderConfig;
    ///
    /// let config = ReaderConfig::default().with_chunk_size(0);
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), ReadError> {
        if self.chunk_size == 0 {
            return Err(ReadError::InvalidConfig {
                message: "chunk size must be non-zero",
            });
        }

        if self.max_descriptors == Some(0) {
            return Err(ReadError::InvalidConfig {
                message: "descriptor bound must be non-zero",
            });
        }

        Ok(())
    }
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            delimiter: DEFAULT_DELIMITER,
            max_descriptors: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ReaderConfig::default();
        assert_eq!(config.chunk_size(), DEFAULT_CHUNK_SIZE);
        assert_eq!(config.delimiter(), b'\n');
        assert_eq!(config.max_descriptors(), None);
    }

    #[test]
    fn test_builder_pattern() {
        let config = ReaderConfig::default()
            .with_chunk_size(1)
            .with_delimiter(0)
            .with_max_descriptors(Some(8));

        assert_eq!(config.chunk_size(), 1);
        assert_eq!(config.delimiter(), 0);
        assert_eq!(config.max_descriptors(), Some(8));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_config_zero_chunk() {
        let result = ReaderConfig::new(0);
        assert!(matches!(result, Err(ReadError::InvalidConfig { .. })));
    }

    #[test]
    fn test_invalid_config_zero_bound() {
        let config = ReaderConfig::default().with_max_descriptors(Some(0));
        assert!(config.validate().is_err());
    }
}
