//! src/crypto/kdf/hkdf.rs
//! Media key expansion with HKDF-SHA256, empty salt, media-type `info`

use crate::aliases::{Aes256Key32, ExpandedKey112, Iv16, MacKey32};
use crate::consts::{
    BLOCK_SIZE, CIPHER_KEY_LENGTH, KEY_EXPANSION_LENGTH, MAC_KEY_LENGTH, MEDIA_KEY_LENGTH,
};
use crate::error::MediaCryptoError;
use crate::media_type::MediaType;
use hkdf::Hkdf;
use sha2::Sha256;
use std::fmt;
use zeroize::Zeroizing;

/// Expand a 32-byte media key into the raw 112-byte HKDF output.
///
/// Pure function: identical inputs always give identical output.
#[inline]
pub fn expand_media_key(
    media_key: &[u8],
    media_type: MediaType,
) -> Result<ExpandedKey112, MediaCryptoError> {
    if media_key.len() != MEDIA_KEY_LENGTH {
        return Err(MediaCryptoError::InvalidKeyLength {
            expected: MEDIA_KEY_LENGTH,
            actual: media_key.len(),
        });
    }

    let mut okm = Zeroizing::new([0u8; KEY_EXPANSION_LENGTH]);
    Hkdf::<Sha256>::new(None, media_key)
        .expand(media_type.hkdf_info(), &mut okm[..])
        .map_err(|e| MediaCryptoError::CryptoBackend(format!("HKDF expand failed: {e}")))?;

    Ok(okm)
}

/// Derive the per-media key material (IV, cipher key, MAC key).
#[inline]
pub fn derive_media_keys(
    media_key: &[u8],
    media_type: MediaType,
) -> Result<MediaKeys, MediaCryptoError> {
    let expanded = expand_media_key(media_key, media_type)?;
    Ok(MediaKeys::split(&expanded))
}

/// Key material derived from one media key.
///
/// Split of the 112-byte expansion: `[0, 16)` IV, `[16, 48)` cipher key,
/// `[48, 80)` MAC key. The last 32 bytes are unused.
#[derive(Clone)]
pub struct MediaKeys {
    iv: Iv16,
    cipher_key: Aes256Key32,
    mac_key: MacKey32,
}

impl MediaKeys {
    /// Same as [`derive_media_keys`].
    #[inline]
    pub fn derive(media_key: &[u8], media_type: MediaType) -> Result<Self, MediaCryptoError> {
        derive_media_keys(media_key, media_type)
    }

    fn split(expanded: &[u8; KEY_EXPANSION_LENGTH]) -> Self {
        let mut iv = [0u8; BLOCK_SIZE];
        let mut cipher_key = Zeroizing::new([0u8; CIPHER_KEY_LENGTH]);
        let mut mac_key = Zeroizing::new([0u8; MAC_KEY_LENGTH]);

        iv.copy_from_slice(&expanded[0..16]);
        cipher_key.copy_from_slice(&expanded[16..48]);
        mac_key.copy_from_slice(&expanded[48..80]);

        Self {
            iv,
            cipher_key,
            mac_key,
        }
    }

    /// Initial CBC IV. Also the first sidecar window prefix.
    #[must_use]
    pub fn iv(&self) -> &Iv16 {
        &self.iv
    }

    /// AES-256 key.
    #[must_use]
    pub fn cipher_key(&self) -> &[u8; 32] {
        &self.cipher_key
    }

    /// HMAC-SHA256 key.
    #[must_use]
    pub fn mac_key(&self) -> &[u8; 32] {
        &self.mac_key
    }
}

impl fmt::Debug for MediaKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaKeys")
            .field("iv", &"[REDACTED]")
            .field("cipher_key", &"[REDACTED]")
            .field("mac_key", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_wrong_key_length() {
        for len in [0usize, 16, 31, 33, 64] {
            let key = vec![0u8; len];
            let err = derive_media_keys(&key, MediaType::Image).unwrap_err();
            assert!(matches!(
                err,
                MediaCryptoError::InvalidKeyLength { expected: 32, actual } if actual == len
            ));
        }
    }

    #[test]
    fn split_matches_expansion() {
        let key = [0x42u8; 32];
        let expanded = expand_media_key(&key, MediaType::Audio).unwrap();
        let keys = derive_media_keys(&key, MediaType::Audio).unwrap();
        assert_eq!(keys.iv(), &expanded[0..16]);
        assert_eq!(keys.cipher_key(), &expanded[16..48]);
        assert_eq!(keys.mac_key(), &expanded[48..80]);
    }

    #[test]
    fn media_types_are_domain_separated() {
        let key = [9u8; 32];
        let image = derive_media_keys(&key, MediaType::Image).unwrap();
        let video = derive_media_keys(&key, MediaType::Video).unwrap();
        assert_ne!(image.iv(), video.iv());
        assert_ne!(image.cipher_key(), video.cipher_key());
        assert_ne!(image.mac_key(), video.mac_key());
    }

    #[test]
    fn debug_is_redacted() {
        let keys = derive_media_keys(&[0u8; 32], MediaType::Image).unwrap();
        let rendered = format!("{keys:?}");
        assert!(rendered.contains("REDACTED"));
    }
}
