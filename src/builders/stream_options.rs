//! src/builders/stream_options.rs
//! Configuration shared by `EncryptingReader` and `DecryptingReader`

use crate::consts::{BLOCK_SIZE, DEFAULT_CHUNK_SIZE};
use crate::error::MediaCryptoError;

/// Stream decorator options.
///
/// Defaults: 64 KiB chunk size, unknown source length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamOptions {
    chunk_size: usize,
    source_len: Option<u64>,
}

impl StreamOptions {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            source_len: None,
        }
    }

    /// Maximum number of bytes pulled from the source per read.
    ///
    /// Must be at least one AES block; checked when a reader is built.
    #[must_use]
    pub const fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Total length of the source, when known up front.
    ///
    /// Lets `contents()` handle sources no larger than one chunk in a single pass.
    #[must_use]
    pub const fn with_source_len(mut self, len: u64) -> Self {
        self.source_len = Some(len);
        self
    }

    #[must_use]
    pub const fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    #[must_use]
    pub const fn source_len(&self) -> Option<u64> {
        self.source_len
    }

    /// Fits the whole source in one chunk?
    #[must_use]
    pub fn is_single_chunk(&self) -> bool {
        self.source_len
            .is_some_and(|len| len <= self.chunk_size as u64)
    }

    pub fn validate(&self) -> Result<(), MediaCryptoError> {
        if self.chunk_size < BLOCK_SIZE {
            return Err(MediaCryptoError::InvalidChunkSize {
                minimum: BLOCK_SIZE,
                actual: self.chunk_size,
            });
        }
        Ok(())
    }

    /// Bytes to request from the source when the caller asked for `requested`.
    #[inline]
    pub(crate) fn read_size(&self, requested: usize) -> usize {
        requested.max(BLOCK_SIZE).min(self.chunk_size)
    }
}

impl Default for StreamOptions {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = StreamOptions::default();
        assert_eq!(options.chunk_size(), 65536);
        assert_eq!(options.source_len(), None);
        assert!(!options.is_single_chunk());
        assert!(options.validate().is_ok());
    }

    #[test]
    fn chunk_size_below_block_is_rejected() {
        let err = StreamOptions::new().with_chunk_size(15).validate().unwrap_err();
        assert!(matches!(
            err,
            MediaCryptoError::InvalidChunkSize { minimum: 16, actual: 15 }
        ));
        assert!(StreamOptions::new().with_chunk_size(16).validate().is_ok());
    }

    #[test]
    fn read_size_is_clamped() {
        let options = StreamOptions::new().with_chunk_size(1024);
        assert_eq!(options.read_size(1), 16);
        assert_eq!(options.read_size(100), 100);
        assert_eq!(options.read_size(1 << 20), 1024);
    }

    #[test]
    fn single_chunk_detection() {
        let options = StreamOptions::new().with_chunk_size(1024);
        assert!(options.with_source_len(1024).is_single_chunk());
        assert!(!options.with_source_len(1025).is_single_chunk());
    }
}
