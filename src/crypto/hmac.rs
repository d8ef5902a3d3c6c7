//! HMAC-SHA256 helpers (on top of `hmac` + `sha2`).
//!
//! WhatsApp truncates every HMAC-SHA256 output to its first [`MAC_SIZE`] bytes,
//! for the trailing stream MAC and for each sidecar signature alike.

use crate::aliases::{HmacSha256, MacTag10};
use crate::consts::MAC_SIZE;
use crate::error::MediaCryptoError;
use hmac::Mac;

/// Keyed HMAC-SHA256 instance.
#[inline]
pub fn new_hmac(mac_key: &[u8]) -> Result<HmacSha256, MediaCryptoError> {
    <HmacSha256 as Mac>::new_from_slice(mac_key)
        .map_err(|e| MediaCryptoError::CryptoBackend(format!("HMAC init failed: {e}")))
}

/// Finalizes `hmac` and keeps the leading [`MAC_SIZE`] bytes.
#[inline]
pub fn truncated_tag(hmac: HmacSha256) -> MacTag10 {
    let full = hmac.finalize().into_bytes();
    let mut tag = [0u8; MAC_SIZE];
    tag.copy_from_slice(&full[..MAC_SIZE]);
    tag
}

/// One-shot truncated HMAC over the concatenation of `parts`.
#[inline]
pub fn sign_truncated(mac_key: &[u8], parts: &[&[u8]]) -> Result<MacTag10, MediaCryptoError> {
    let mut hmac = new_hmac(mac_key)?;
    for part in parts {
        hmac.update(part);
    }
    Ok(truncated_tag(hmac))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_input_matches_single_input() {
        let key = [7u8; 32];
        let joined = sign_truncated(&key, &[&b"hello world"[..]]).unwrap();
        let split = sign_truncated(&key, &[&b"hello"[..], &b" "[..], &b"world"[..]]).unwrap();
        assert_eq!(joined, split);
    }

    #[test]
    fn tag_is_prefix_of_full_mac() {
        let key = [1u8; 32];
        let mut full = new_hmac(&key).unwrap();
        full.update(b"data");
        let bytes = full.finalize().into_bytes();
        assert_eq!(sign_truncated(&key, &[&b"data"[..]]).unwrap(), bytes[..MAC_SIZE]);
    }
}
