// src/lib.rs

//! Encryption, decryption and sidecar generation for WhatsApp-style media blobs.
//!
//! A 32-byte media key is expanded with HKDF-SHA256 into an IV, an AES-256
//! key and an HMAC-SHA256 key. Plaintext is encrypted with AES-256-CBC and
//! PKCS#7 padding, and the blob is `ciphertext || mac`, where `mac` is the
//! first 10 bytes of `HMAC(mac_key, iv || ciphertext)`.
//!
//! ```
//! use wamedia_rs::{decrypt_bytes, encrypt_bytes, MediaType};
//!
//! # fn main() -> Result<(), wamedia_rs::MediaCryptoError> {
//! let media_key = [0x11u8; 32];
//! let blob = encrypt_bytes(b"holiday.jpg", &media_key, MediaType::Image)?;
//! assert_eq!(blob.len(), 16 + 10);
//! assert_eq!(decrypt_bytes(&blob, &media_key, MediaType::Image)?, b"holiday.jpg");
//! # Ok(())
//! # }
//! ```

pub mod aliases;
#[cfg(feature = "batch-ops")]
pub mod batch_ops;
pub mod builders;
pub mod consts;
pub mod crypto;
pub mod decryptor;
pub mod encryptor;
pub mod error;
pub mod media_type;
pub mod sidecar;
pub mod stream;
pub mod utils;

// High-level API
pub use decryptor::{decrypt, decrypt_bytes};
pub use encryptor::{encrypt, encrypt_bytes, encrypt_with_sidecar};
pub use error::MediaCryptoError;
pub use media_type::MediaType;

// Push-style sessions and decorators
pub use builders::StreamOptions;
pub use decryptor::MediaDecryptor;
pub use encryptor::MediaEncryptor;
pub use sidecar::{generate_sidecar, SidecarGenerator};
pub use stream::{DecryptingReader, EncryptingReader};

// Key schedule, for callers that cache derived keys
pub use crypto::kdf::{derive_media_keys, expand_media_key, MediaKeys};

#[cfg(feature = "batch-ops")]
pub use batch_ops::{decrypt_batch, encrypt_batch};
