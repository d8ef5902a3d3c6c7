//! Utility functions used across the library.

use crate::consts::BLOCK_SIZE;
use crate::error::MediaCryptoError;

/// XORs two 16-byte blocks and writes the result to `output`.
///
/// Used by both CBC directions: plaintext ⊕ chaining IV before encryption,
/// decrypted block ⊕ previous ciphertext after decryption.
///
/// # Panics (by contract)
///
/// Panics if any of the three slices is shorter than 16 bytes. All callers
/// pass whole AES blocks.
#[inline(always)]
pub const fn xor_blocks(block_a: &[u8], block_b: &[u8], output: &mut [u8]) {
    let mut i = 0;
    while i < BLOCK_SIZE {
        output[i] = block_a[i] ^ block_b[i];
        i += 1;
    }
}

/// Appends PKCS#7 padding to `data`.
///
/// Always pads: input that is already block-aligned gains a full block of `0x10`.
#[inline]
pub fn pkcs7_pad(data: &mut Vec<u8>) {
    let pad = BLOCK_SIZE - data.len() % BLOCK_SIZE;
    data.resize(data.len() + pad, pad as u8);
}

/// Strips PKCS#7 padding from block-aligned plaintext, returning the unpadded length.
///
/// Empty input has nothing to strip and yields `0`.
#[inline]
pub fn pkcs7_unpad(data: &[u8]) -> Result<usize, MediaCryptoError> {
    let Some(&last) = data.last() else {
        return Ok(0);
    };

    let pad = last as usize;
    if pad == 0 || pad > BLOCK_SIZE || pad > data.len() {
        return Err(MediaCryptoError::InvalidPadding);
    }

    // MAC already verified, so a plain comparison leaks nothing an attacker controls
    if data[data.len() - pad..].iter().any(|&b| b != last) {
        return Err(MediaCryptoError::InvalidPadding);
    }

    Ok(data.len() - pad)
}
