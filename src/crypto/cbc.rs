//! src/crypto/cbc.rs
//! Chained AES-256-CBC state shared by the encryptor and the decryptor
//!
//! CBC is driven block by block with an explicit chaining IV, so a session can
//! be fed arbitrarily sized chunks: after every slice, `current_iv` is the last
//! ciphertext block seen. Every ciphertext byte is folded into the running
//! HMAC exactly once, after the initial IV, so chunking never changes the tag.

use crate::aliases::{Block16, HmacSha256, Iv16};
use crate::consts::{BLOCK_SIZE, MAC_SIZE, MAX_BUFFERED_BYTES};
use crate::crypto::hmac::{new_hmac, truncated_tag};
use crate::crypto::kdf::MediaKeys;
use crate::error::MediaCryptoError;
use crate::utils::xor_blocks;
use aes::cipher::{BlockDecrypt, BlockEncrypt};
use aes::{Aes256Dec, Aes256Enc, Block as AesBlock};
use hmac::Mac;

/// Mutable session state common to both directions.
///
/// `hmac` doubles as the finalized flag: it is taken by the first `finish`
/// and never restored.
pub(crate) struct CipherState {
    pub(crate) keys: MediaKeys,
    pub(crate) current_iv: Iv16,
    pub(crate) hmac: Option<HmacSha256>,
    pub(crate) buffer: Vec<u8>,
}

impl CipherState {
    /// Fresh session: chaining IV = derived IV, HMAC primed with that IV.
    pub(crate) fn new(keys: MediaKeys) -> Result<Self, MediaCryptoError> {
        let mut hmac = new_hmac(keys.mac_key())?;
        hmac.update(keys.iv());

        Ok(Self {
            current_iv: *keys.iv(),
            keys,
            hmac: Some(hmac),
            buffer: Vec::new(),
        })
    }

    #[inline]
    pub(crate) fn is_finalized(&self) -> bool {
        self.hmac.is_none()
    }

    /// Appends `chunk` to the carry-over buffer, refusing once the carried
    /// residue already exceeds [`MAX_BUFFERED_BYTES`].
    pub(crate) fn buffer_input(&mut self, chunk: &[u8]) -> Result<(), MediaCryptoError> {
        if self.buffer.len() > MAX_BUFFERED_BYTES {
            return Err(MediaCryptoError::BufferOverflow {
                limit: MAX_BUFFERED_BYTES,
            });
        }
        self.buffer.extend_from_slice(chunk);
        Ok(())
    }

    /// Removes and returns the longest block-aligned prefix of the buffer
    /// that still leaves at least `withhold` bytes behind.
    pub(crate) fn take_aligned(&mut self, withhold: usize) -> Vec<u8> {
        let available = self.buffer.len().saturating_sub(withhold);
        let aligned = available - available % BLOCK_SIZE;
        if aligned == 0 {
            return Vec::new();
        }
        let rest = self.buffer.split_off(aligned);
        std::mem::replace(&mut self.buffer, rest)
    }

    /// Folds ciphertext into the running MAC.
    #[inline]
    pub(crate) fn fold_mac(&mut self, ciphertext: &[u8]) {
        if let Some(hmac) = self.hmac.as_mut() {
            hmac.update(ciphertext);
        }
    }

    /// Takes the running MAC out of the session, finalizing it.
    ///
    /// Returns `None` if the session was already finalized.
    #[inline]
    pub(crate) fn take_mac(&mut self) -> Option<HmacSha256> {
        self.hmac.take()
    }

    /// Finalizes the session and returns the truncated tag.
    #[inline]
    pub(crate) fn finalize_tag(&mut self) -> Option<[u8; MAC_SIZE]> {
        self.take_mac().map(truncated_tag)
    }
}

/// CBC-encrypts block-aligned `data` in place starting from `iv`.
///
/// Returns the last ciphertext block (the next chaining IV).
pub(crate) fn cbc_encrypt_in_place(cipher: &Aes256Enc, iv: &Iv16, data: &mut [u8]) -> Iv16 {
    debug_assert_eq!(data.len() % BLOCK_SIZE, 0);

    let mut prev = *iv;
    for chunk in data.chunks_exact_mut(BLOCK_SIZE) {
        let mut xored: Block16 = [0u8; BLOCK_SIZE];
        xor_blocks(chunk, &prev, &mut xored);

        let mut aes_block = AesBlock::from(xored);
        cipher.encrypt_block(&mut aes_block);

        chunk.copy_from_slice(aes_block.as_slice());
        prev.copy_from_slice(chunk);
    }
    prev
}

/// CBC-decrypts block-aligned `data` in place starting from `iv`, without
/// touching padding.
///
/// Returns the last ciphertext block consumed (the next chaining IV).
pub(crate) fn cbc_decrypt_in_place(cipher: &Aes256Dec, iv: &Iv16, data: &mut [u8]) -> Iv16 {
    debug_assert_eq!(data.len() % BLOCK_SIZE, 0);

    let mut prev = *iv;
    for chunk in data.chunks_exact_mut(BLOCK_SIZE) {
        let mut ciphertext: Block16 = [0u8; BLOCK_SIZE];
        ciphertext.copy_from_slice(chunk);

        let mut aes_block = AesBlock::from(ciphertext);
        cipher.decrypt_block(&mut aes_block);

        xor_blocks(aes_block.as_slice(), &prev, chunk);
        prev = ciphertext;
    }
    prev
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media_type::MediaType;
    use aes::cipher::KeyInit;

    fn state() -> CipherState {
        let keys = MediaKeys::derive(&[3u8; 32], MediaType::Video).unwrap();
        CipherState::new(keys).unwrap()
    }

    #[test]
    fn take_aligned_respects_withhold() {
        let mut s = state();
        s.buffer_input(&[0u8; 50]).unwrap();
        assert_eq!(s.take_aligned(0).len(), 48);
        assert_eq!(s.buffer.len(), 2);

        let mut s = state();
        s.buffer_input(&[0u8; 50]).unwrap();
        assert_eq!(s.take_aligned(26).len(), 16);
        assert_eq!(s.buffer.len(), 34);

        let mut s = state();
        s.buffer_input(&[0u8; 25]).unwrap();
        assert!(s.take_aligned(26).is_empty());
        assert_eq!(s.buffer.len(), 25);
    }

    #[test]
    fn split_cbc_matches_single_pass() {
        let key = [0x11u8; 32];
        let iv = [0x22u8; 16];
        let enc = Aes256Enc::new(&key.into());
        let dec = Aes256Dec::new(&key.into());

        let plain: Vec<u8> = (0..96u8).collect();

        let mut whole = plain.clone();
        let last = cbc_encrypt_in_place(&enc, &iv, &mut whole);
        assert_eq!(last, whole[80..96]);

        let mut first = plain[..32].to_vec();
        let mut second = plain[32..].to_vec();
        let next = cbc_encrypt_in_place(&enc, &iv, &mut first);
        cbc_encrypt_in_place(&enc, &next, &mut second);
        assert_eq!([first, second].concat(), whole);

        let mut back = whole.clone();
        let chained = cbc_decrypt_in_place(&dec, &iv, &mut back);
        assert_eq!(back, plain);
        assert_eq!(chained, whole[80..96]);
    }

    #[test]
    fn finalize_is_once() {
        let mut s = state();
        assert!(!s.is_finalized());
        assert!(s.finalize_tag().is_some());
        assert!(s.is_finalized());
        assert!(s.finalize_tag().is_none());
    }
}
