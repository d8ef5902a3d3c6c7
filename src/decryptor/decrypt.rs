//! src/decryptor/decrypt.rs
//! High-level media decryption over `Read` / `Write` and byte slices

use crate::consts::{DEFAULT_CHUNK_SIZE, MAC_SIZE};
use crate::decryptor::session::MediaDecryptor;
use crate::error::MediaCryptoError;
use crate::media_type::MediaType;
use std::io::{ErrorKind, Read, Write};

/// Decrypt a `ciphertext || mac` stream from `input` into `output`.
///
/// Plaintext of all but the final block is written as it is decrypted; the
/// final block is written only after the MAC verified. On error, discard
/// whatever reached `output`.
#[inline]
pub fn decrypt<R: Read, W: Write>(
    mut input: R,
    mut output: W,
    media_key: &[u8],
    media_type: MediaType,
) -> Result<(), MediaCryptoError> {
    let mut decryptor = MediaDecryptor::new(media_key, media_type)?;
    let mut chunk = vec![0u8; DEFAULT_CHUNK_SIZE];

    loop {
        let n = match input.read(&mut chunk) {
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };

        if n == 0 {
            output.write_all(&decryptor.finish(&[])?)?;
            break;
        }
        output.write_all(&decryptor.update(&chunk[..n])?)?;
    }

    output.flush()?;
    Ok(())
}

/// Decrypt a whole `ciphertext || mac` blob. Nothing is returned unless the MAC verifies.
#[inline]
pub fn decrypt_bytes(
    encrypted: &[u8],
    media_key: &[u8],
    media_type: MediaType,
) -> Result<Vec<u8>, MediaCryptoError> {
    if encrypted.len() < MAC_SIZE {
        return Err(MediaCryptoError::InvalidMac(
            "data is too short to contain the MAC",
        ));
    }

    let mut decryptor = MediaDecryptor::new(media_key, media_type)?;
    let mut plaintext = decryptor.update(encrypted)?;
    plaintext.extend(decryptor.finish(&[])?);
    Ok(plaintext)
}
