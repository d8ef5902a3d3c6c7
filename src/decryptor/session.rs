//! src/decryptor/session.rs
//! Incremental media decryptor with MAC-tail lookahead
//!
//! Where the ciphertext ends and the 10-byte MAC begins is only known at end of
//! stream, so `update` always holds back the last `BLOCK_SIZE + MAC_SIZE` bytes.
//! `finish` verifies the MAC over everything before releasing the final block.

use crate::aliases::Iv16;
use crate::consts::{BLOCK_SIZE, DECRYPT_LOOKAHEAD, MAC_SIZE};
use crate::crypto::cbc::{cbc_decrypt_in_place, CipherState};
use crate::crypto::kdf::MediaKeys;
use crate::decryptor::trailer::{split_trailer, strip_final_padding};
use crate::error::MediaCryptoError;
use crate::media_type::MediaType;
use aes::cipher::KeyInit;
use aes::Aes256Dec;
use hmac::Mac;
use tracing::{debug, trace, warn};

/// Streaming decryptor for one media object.
///
/// [`update`](Self::update) releases plaintext for every block that is known not
/// to be the final one; [`finish`](Self::finish) authenticates the stream and
/// returns the unpadded remainder.
pub struct MediaDecryptor {
    cipher: Aes256Dec,
    state: CipherState,
}

impl MediaDecryptor {
    /// Derive keys from `media_key` and start a session.
    pub fn new(media_key: &[u8], media_type: MediaType) -> Result<Self, MediaCryptoError> {
        debug!(%media_type, "starting media decryption session");
        Self::from_keys(MediaKeys::derive(media_key, media_type)?)
    }

    /// Start a session from already derived key material.
    pub fn from_keys(keys: MediaKeys) -> Result<Self, MediaCryptoError> {
        let cipher = Aes256Dec::new(keys.cipher_key().into());
        Ok(Self {
            cipher,
            state: CipherState::new(keys)?,
        })
    }

    /// The initial IV. Optional: construction already set up the chaining state.
    #[must_use]
    pub fn start(&self) -> Iv16 {
        *self.state.keys.iv()
    }

    /// Key material of this session.
    #[must_use]
    pub fn keys(&self) -> &MediaKeys {
        &self.state.keys
    }

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

    /// Decrypts every whole block that cannot be part of the final block or MAC.
    pub fn update(&mut self, chunk: &[u8]) -> Result<Vec<u8>, MediaCryptoError> {
        if self.state.is_finalized() {
            return Err(MediaCryptoError::DecryptionAlreadyFinalized);
        }

        self.state.buffer_input(chunk)?;
        let mut blocks = self.state.take_aligned(DECRYPT_LOOKAHEAD);
        trace!(
            input = chunk.len(),
            processed = blocks.len(),
            buffered = self.state.buffer.len(),
            "decrypt update"
        );

        if !blocks.is_empty() {
            self.decrypt_blocks(&mut blocks);
        }
        Ok(blocks)
    }

    /// Verifies the trailing MAC and returns the remaining unpadded plaintext.
    ///
    /// On MAC mismatch nothing from the tail is returned and the session is
    /// finalized. Calling `finish` again returns an empty vector.
    pub fn finish(&mut self, tail: &[u8]) -> Result<Vec<u8>, MediaCryptoError> {
        let Some(mut hmac) = self.state.take_mac() else {
            return Ok(Vec::new());
        };

        let mut data = std::mem::take(&mut self.state.buffer);
        data.extend_from_slice(tail);

        let (ciphertext, received_mac) = split_trailer(&data)?;

        hmac.update(ciphertext);
        if hmac.verify_truncated_left(&received_mac).is_err() {
            warn!(ciphertext_bytes = ciphertext.len(), "media MAC verification failed");
            return Err(MediaCryptoError::InvalidMac("MAC verification failed"));
        }

        let mut plaintext = ciphertext.to_vec();
        if !plaintext.is_empty() {
            self.state.current_iv =
                cbc_decrypt_in_place(&self.cipher, &self.state.current_iv, &mut plaintext);
        }
        strip_final_padding(&mut plaintext)?;

        debug!(final_bytes = plaintext.len(), "media decryption finalized");
        Ok(plaintext)
    }

    fn decrypt_blocks(&mut self, data: &mut [u8]) {
        self.state.fold_mac(data);
        self.state.current_iv = cbc_decrypt_in_place(&self.cipher, &self.state.current_iv, data);
    }
}
