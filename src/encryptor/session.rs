//! src/encryptor/session.rs
//! Incremental media encryptor: chained AES-256-CBC + truncated HMAC-SHA256
//!
//! This module is the mirror of `decryptor/session.rs`. Output of one session is
//! `ciphertext || mac`, where the ciphertext is PKCS#7 padded and the MAC is the
//! first 10 bytes of `HMAC-SHA256(mac_key, iv || ciphertext)`.

use crate::aliases::Iv16;
use crate::consts::{BLOCK_SIZE, MAC_SIZE};
use crate::crypto::cbc::{cbc_encrypt_in_place, CipherState};
use crate::crypto::kdf::MediaKeys;
use crate::error::MediaCryptoError;
use crate::media_type::MediaType;
use crate::utils::pkcs7_pad;
use aes::cipher::KeyInit;
use aes::Aes256Enc;
use tracing::{debug, trace};

/// Streaming encryptor for one media object.
///
/// Feed plaintext through [`update`](Self::update) in chunks of any size, then
/// call [`finish`](Self::finish) once. The concatenation of every returned
/// chunk is the encrypted blob; it does not depend on how the input was split.
///
/// ```
/// use wamedia_rs::{MediaEncryptor, MediaType};
///
/// let mut enc = MediaEncryptor::new(&[0u8; 32], MediaType::Image)?;
/// let mut blob = enc.update(b"A")?;
/// blob.extend(enc.finish(b"")?);
/// assert_eq!(blob.len(), 16 + 10);
/// # Ok::<(), wamedia_rs::MediaCryptoError>(())
/// ```
pub struct MediaEncryptor {
    cipher: Aes256Enc,
    state: CipherState,
}

impl MediaEncryptor {
    /// Derive keys from `media_key` and start a session.
    pub fn new(media_key: &[u8], media_type: MediaType) -> Result<Self, MediaCryptoError> {
        debug!(%media_type, "starting media encryption session");
        Self::from_keys(MediaKeys::derive(media_key, media_type)?)
    }

    /// Start a session from already derived key material.
    pub fn from_keys(keys: MediaKeys) -> Result<Self, MediaCryptoError> {
        let cipher = Aes256Enc::new(keys.cipher_key().into());
        Ok(Self {
            cipher,
            state: CipherState::new(keys)?,
        })
    }

    /// The initial IV, for transports that send it ahead of the ciphertext.
    #[must_use]
    pub fn start(&self) -> Iv16 {
        *self.state.keys.iv()
    }

    /// Key material of this session.
    #[must_use]
    pub fn keys(&self) -> &MediaKeys {
        &self.state.keys
    }

    /// HMAC key, needed to seed a sidecar generator.
    #[must_use]
    pub fn mac_key(&self) -> &[u8; 32] {
        self.state.keys.mac_key()
    }

    #[must_use]
    pub const fn block_size(&self) -> usize {
        BLOCK_SIZE
    }

    #[must_use]
    pub const fn mac_size(&self) -> usize {
        MAC_SIZE
    }

    #[must_use]
    pub fn is_finalized(&self) -> bool {
        self.state.is_finalized()
    }

    /// Encrypts every whole block available so far.
    ///
    /// Bytes short of a block stay buffered for the next call.
    pub fn update(&mut self, chunk: &[u8]) -> Result<Vec<u8>, MediaCryptoError> {
        if self.state.is_finalized() {
            return Err(MediaCryptoError::EncryptionAlreadyFinalized);
        }

        self.state.buffer_input(chunk)?;
        let mut blocks = self.state.take_aligned(0);
        trace!(
            input = chunk.len(),
            processed = blocks.len(),
            buffered = self.state.buffer.len(),
            "encrypt update"
        );

        if !blocks.is_empty() {
            self.encrypt_blocks(&mut blocks);
        }
        Ok(blocks)
    }

    /// Pads and encrypts the remaining bytes (plus `trailing`) and appends the MAC.
    ///
    /// Calling `finish` again returns an empty vector.
    pub fn finish(&mut self, trailing: &[u8]) -> Result<Vec<u8>, MediaCryptoError> {
        if self.state.is_finalized() {
            return Ok(Vec::new());
        }

        let mut data = std::mem::take(&mut self.state.buffer);
        data.extend_from_slice(trailing);
        pkcs7_pad(&mut data);

        self.encrypt_blocks(&mut data);

        let tag = self
            .state
            .finalize_tag()
            .ok_or(MediaCryptoError::EncryptionAlreadyFinalized)?;
        data.extend_from_slice(&tag);

        debug!(final_bytes = data.len(), "media encryption finalized");
        Ok(data)
    }

    fn encrypt_blocks(&mut self, data: &mut [u8]) {
        self.state.current_iv = cbc_encrypt_in_place(&self.cipher, &self.state.current_iv, data);
        self.state.fold_mac(data);
    }
}
