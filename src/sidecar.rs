//! # Sidecar generation
//!
//! A sidecar lets a client authenticate 64 KiB windows of a download before the
//! trailing MAC has arrived. Window `n` signs
//! `(iv || blob)[n * 64K .. (n + 1) * 64K + 16]`, i.e. the window itself
//! prefixed with the 16 bytes that precede it (the IV for the first window).
//! Each signature is `HMAC-SHA256(mac_key, prefix || window)[..10]`, and the
//! sidecar is the plain concatenation of signatures.

use crate::aliases::{Iv16, MacKey32};
use crate::consts::{BLOCK_SIZE, MAC_KEY_LENGTH, MAC_SIZE, SIDECAR_CHUNK_SIZE};
use crate::crypto::hmac::sign_truncated;
use crate::crypto::kdf::MediaKeys;
use crate::error::MediaCryptoError;
use crate::media_type::MediaType;
use tracing::{debug, trace};
use zeroize::Zeroizing;

/// Incremental sidecar generator.
///
/// Fed with the same bytes the encryptor emits, in order; how they are
/// chunked does not affect the result.
pub struct SidecarGenerator {
    mac_key: MacKey32,
    /// 16 bytes preceding the next window: the IV, then the tail of the previous window.
    prefix: Iv16,
    buffer: Vec<u8>,
    sidecar: Vec<u8>,
    finalized: bool,
}

impl SidecarGenerator {
    /// New generator from raw key material.
    pub fn new(mac_key: &[u8], iv: &[u8]) -> Result<Self, MediaCryptoError> {
        if mac_key.len() != MAC_KEY_LENGTH {
            return Err(MediaCryptoError::InvalidMacKeyLength {
                expected: MAC_KEY_LENGTH,
                actual: mac_key.len(),
            });
        }
        if iv.len() != BLOCK_SIZE {
            return Err(MediaCryptoError::InvalidIvLength {
                expected: BLOCK_SIZE,
                actual: iv.len(),
            });
        }

        let mut key = Zeroizing::new([0u8; MAC_KEY_LENGTH]);
        key.copy_from_slice(mac_key);
        let mut prefix = [0u8; BLOCK_SIZE];
        prefix.copy_from_slice(iv);

        Ok(Self {
            mac_key: key,
            prefix,
            buffer: Vec::with_capacity(SIDECAR_CHUNK_SIZE),
            sidecar: Vec::new(),
            finalized: false,
        })
    }

    /// New generator keyed with the MAC key and IV of `keys`.
    #[must_use]
    pub fn from_keys(keys: &MediaKeys) -> Self {
        Self {
            mac_key: Zeroizing::new(*keys.mac_key()),
            prefix: *keys.iv(),
            buffer: Vec::with_capacity(SIDECAR_CHUNK_SIZE),
            sidecar: Vec::new(),
            finalized: false,
        }
    }

    /// Accumulate encrypted bytes, signing every complete 64 KiB window.
    pub fn update(&mut self, chunk: &[u8]) -> Result<(), MediaCryptoError> {
        if self.finalized {
            return Err(MediaCryptoError::GeneratorAlreadyFinalized);
        }

        let mut rest = chunk;
        while !rest.is_empty() {
            let take = (SIDECAR_CHUNK_SIZE - self.buffer.len()).min(rest.len());
            self.buffer.extend_from_slice(&rest[..take]);
            rest = &rest[take..];

            if self.buffer.len() == SIDECAR_CHUNK_SIZE {
                self.sign_buffered_window()?;
            }
        }
        Ok(())
    }

    /// Sign the remaining (short) window, if any, and return the sidecar.
    ///
    /// Repeated calls return the same sidecar without reprocessing.
    pub fn finish(&mut self, tail: &[u8]) -> Result<Vec<u8>, MediaCryptoError> {
        if self.finalized {
            return Ok(self.sidecar.clone());
        }

        self.update(tail)?;
        if !self.buffer.is_empty() {
            self.sign_buffered_window()?;
        }
        self.finalized = true;

        debug!(
            windows = self.sidecar.len() / MAC_SIZE,
            "sidecar finalized"
        );
        Ok(self.sidecar.clone())
    }

    /// Signatures produced so far.
    #[must_use]
    pub fn sidecar(&self) -> &[u8] {
        &self.sidecar
    }

    #[must_use]
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    fn sign_buffered_window(&mut self) -> Result<(), MediaCryptoError> {
        let signature = sign_truncated(
            self.mac_key.as_slice(),
            &[self.prefix.as_slice(), self.buffer.as_slice()],
        )?;
        self.sidecar.extend_from_slice(&signature);

        // A short window is always the last one; its prefix is never used again.
        if self.buffer.len() >= BLOCK_SIZE {
            self.prefix
                .copy_from_slice(&self.buffer[self.buffer.len() - BLOCK_SIZE..]);
        }
        trace!(window_bytes = self.buffer.len(), "sidecar window signed");
        self.buffer.clear();
        Ok(())
    }
}

/// Sidecar of a complete encrypted blob (`ciphertext || mac`).
pub fn generate_sidecar(
    encrypted: &[u8],
    media_key: &[u8],
    media_type: MediaType,
) -> Result<Vec<u8>, MediaCryptoError> {
    let keys = MediaKeys::derive(media_key, media_type)?;
    let mut generator = SidecarGenerator::from_keys(&keys);
    generator.finish(encrypted)
}
