//! # Error Types
//!
//! This module defines the error type used throughout the library.
//! All operations return [`Result<T, MediaCryptoError>`](MediaCryptoError).

use std::io;
use thiserror::Error;

/// The error type for all media encryption operations.
///
/// Every variant is fatal for the session that produced it: nothing is retried
/// internally, and a session whose `finish` failed stays finalized.
#[derive(Error, Debug)]
pub enum MediaCryptoError {
    /// Media key is not exactly 32 bytes.
    #[error("media key must be {expected} bytes long, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    /// IV handed to the sidecar generator is not exactly 16 bytes.
    #[error("IV must be {expected} bytes long, got {actual}")]
    InvalidIvLength { expected: usize, actual: usize },

    /// MAC key handed to the sidecar generator is not exactly 32 bytes.
    #[error("MAC key must be {expected} bytes long, got {actual}")]
    InvalidMacKeyLength { expected: usize, actual: usize },

    /// `update` was called on an encryptor after `finish`.
    #[error("encryption already finalized")]
    EncryptionAlreadyFinalized,

    /// `update` was called on a decryptor after `finish`.
    #[error("decryption already finalized")]
    DecryptionAlreadyFinalized,

    /// `update` was called on a sidecar generator after `finish`.
    #[error("sidecar generator already finalized")]
    GeneratorAlreadyFinalized,

    /// More than `limit` bytes were carried over between `update` calls.
    #[error("buffer size exceeded maximum limit of {limit} bytes")]
    BufferOverflow { limit: usize },

    /// Failure reported by the underlying cipher, hash or KDF primitive.
    #[error("crypto backend error: {0}")]
    CryptoBackend(String),

    /// Authentication failure: the trailing MAC is missing, the ciphertext is
    /// malformed, or the tag does not match.
    ///
    /// No plaintext of the failing tail is ever released.
    #[error("invalid MAC: {0}")]
    InvalidMac(&'static str),

    /// PKCS#7 padding is malformed even though the MAC verified.
    #[error("invalid PKCS#7 padding")]
    InvalidPadding,

    /// Write, seek or rewind on a one-pass stream decorator.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(&'static str),

    /// Stream decorator configured with a chunk size below one block.
    #[error("chunk size must be at least {minimum} bytes, got {actual}")]
    InvalidChunkSize { minimum: usize, actual: usize },

    /// Sidecar requested from a decorator that was built without a generator.
    #[error("sidecar generation was not enabled")]
    SidecarNotEnabled,

    /// Unrecognised media type name.
    #[error("unknown media type: {0}")]
    UnknownMediaType(String),

    /// I/O error from the wrapped byte source or sink.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl From<MediaCryptoError> for io::Error {
    fn from(err: MediaCryptoError) -> Self {
        match err {
            MediaCryptoError::Io(inner) => inner,
            MediaCryptoError::UnsupportedOperation(_) => {
                io::Error::new(io::ErrorKind::Unsupported, err)
            }
            MediaCryptoError::InvalidMac(_) | MediaCryptoError::InvalidPadding => {
                io::Error::new(io::ErrorKind::InvalidData, err)
            }
            other => io::Error::new(io::ErrorKind::Other, other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_conversion_keeps_kind_and_source() {
        let err: io::Error = MediaCryptoError::InvalidMac("MAC verification failed").into();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        let inner = err
            .get_ref()
            .and_then(|e| e.downcast_ref::<MediaCryptoError>())
            .unwrap();
        assert!(matches!(inner, MediaCryptoError::InvalidMac(_)));

        let err: io::Error = MediaCryptoError::UnsupportedOperation("seek").into();
        assert_eq!(err.kind(), io::ErrorKind::Unsupported);
    }

    #[test]
    fn io_variant_unwraps() {
        let original = io::Error::new(io::ErrorKind::UnexpectedEof, "short read");
        let err: io::Error = MediaCryptoError::from(original).into();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
