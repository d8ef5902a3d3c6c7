//! src/decryptor/trailer.rs
//! Trailer processing: MAC extraction and final block unpadding

use crate::aliases::MacTag10;
use crate::consts::{BLOCK_SIZE, MAC_SIZE};
use crate::error::MediaCryptoError;
use crate::utils::pkcs7_unpad;

/// Split the tail of an encrypted stream into `(ciphertext, received_mac)`.
///
/// Fails with [`MediaCryptoError::InvalidMac`] when fewer than [`MAC_SIZE`]
/// bytes are present or the ciphertext part is not block aligned.
#[inline]
pub fn split_trailer(tail: &[u8]) -> Result<(&[u8], MacTag10), MediaCryptoError> {
    if tail.len() < MAC_SIZE {
        return Err(MediaCryptoError::InvalidMac(
            "final chunk is too small to contain the MAC",
        ));
    }

    let (ciphertext, mac) = tail.split_at(tail.len() - MAC_SIZE);
    if ciphertext.len() % BLOCK_SIZE != 0 {
        return Err(MediaCryptoError::InvalidMac(
            "ciphertext length is not a multiple of the block size",
        ));
    }

    let mut received = [0u8; MAC_SIZE];
    received.copy_from_slice(mac);
    Ok((ciphertext, received))
}

/// Strip PKCS#7 padding from the decrypted final blocks in place.
#[inline]
pub fn strip_final_padding(plaintext: &mut Vec<u8>) -> Result<(), MediaCryptoError> {
    let len = pkcs7_unpad(plaintext)?;
    plaintext.truncate(len);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_exact_mac_only() {
        let (ct, mac) = split_trailer(&[9u8; 10]).unwrap();
        assert!(ct.is_empty());
        assert_eq!(mac, [9u8; 10]);
    }

    #[test]
    fn split_block_plus_mac() {
        let mut tail = vec![1u8; 16];
        tail.extend_from_slice(&[2u8; 10]);
        let (ct, mac) = split_trailer(&tail).unwrap();
        assert_eq!(ct, &[1u8; 16][..]);
        assert_eq!(mac, [2u8; 10]);
    }

    #[test]
    fn split_rejects_short_and_misaligned() {
        assert!(matches!(split_trailer(&[0u8; 9]), Err(MediaCryptoError::InvalidMac(_))));
        assert!(matches!(split_trailer(&[0u8; 27]), Err(MediaCryptoError::InvalidMac(_))));
    }

    #[test]
    fn strip_all_padding_block() {
        let mut block = vec![0x10u8; 16];
        strip_final_padding(&mut block).unwrap();
        assert!(block.is_empty());
    }
}
