//! # Constants
//!
//! Sizes and limits of the WhatsApp media encryption format.

/// AES block size in bytes. Also the size of the IV and of the sidecar window overlap.
pub const BLOCK_SIZE: usize = 16;

/// Length of the truncated HMAC-SHA256 tag appended to the ciphertext.
///
/// The same truncation is used for every sidecar signature.
pub const MAC_SIZE: usize = 10;

/// Required length of a media key.
pub const MEDIA_KEY_LENGTH: usize = 32;

/// Length of the HKDF-SHA256 expansion of a media key.
///
/// Layout: `IV (16) || CipherKey (32) || MacKey (32) || unused (32)`.
pub const KEY_EXPANSION_LENGTH: usize = 112;

/// AES-256 key length.
pub const CIPHER_KEY_LENGTH: usize = 32;

/// HMAC key length.
pub const MAC_KEY_LENGTH: usize = 32;

/// Size of one sidecar window of ciphertext (64 KiB).
pub const SIDECAR_CHUNK_SIZE: usize = 64 * 1024;

/// Default number of bytes a stream decorator pulls from its source at a time.
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Upper bound on bytes a cipher session carries over between `update` calls.
pub const MAX_BUFFERED_BYTES: usize = 64 * 1024;

/// Bytes the decryptor always holds back until `finish`: the last
/// (padding) block plus the trailing MAC.
pub const DECRYPT_LOOKAHEAD: usize = BLOCK_SIZE + MAC_SIZE;
