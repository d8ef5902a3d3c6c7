//! src/encryptor/encrypt.rs
//! High-level media encryption over `Read` / `Write` and byte slices

use crate::consts::DEFAULT_CHUNK_SIZE;
use crate::encryptor::session::MediaEncryptor;
use crate::error::MediaCryptoError;
use crate::media_type::MediaType;
use crate::sidecar::SidecarGenerator;
use std::io::{ErrorKind, Read, Write};

/// Encrypt `input` into `output` as `ciphertext || mac`.
///
/// Reads at most 64 KiB at a time; memory use does not grow with input size.
#[inline]
pub fn encrypt<R, W>(
    input: R,
    output: W,
    media_key: &[u8],
    media_type: MediaType,
) -> Result<(), MediaCryptoError>
where
    R: Read,
    W: Write,
{
    let mut encryptor = MediaEncryptor::new(media_key, media_type)?;
    encrypt_stream(input, output, &mut encryptor, None)
}

/// Encrypt `input` into `output` and return the sidecar of the written blob.
#[inline]
pub fn encrypt_with_sidecar<R, W>(
    input: R,
    output: W,
    media_key: &[u8],
    media_type: MediaType,
) -> Result<Vec<u8>, MediaCryptoError>
where
    R: Read,
    W: Write,
{
    let mut encryptor = MediaEncryptor::new(media_key, media_type)?;
    let mut sidecar = SidecarGenerator::from_keys(encryptor.keys());
    encrypt_stream(input, output, &mut encryptor, Some(&mut sidecar))?;
    sidecar.finish(&[])
}

/// Encrypt a whole buffer in one call.
#[inline]
pub fn encrypt_bytes(
    plaintext: &[u8],
    media_key: &[u8],
    media_type: MediaType,
) -> Result<Vec<u8>, MediaCryptoError> {
    let mut encryptor = MediaEncryptor::new(media_key, media_type)?;
    let mut out = encryptor.update(plaintext)?;
    out.extend(encryptor.finish(&[])?);
    Ok(out)
}

fn encrypt_stream<R, W>(
    mut source: R,
    mut destination: W,
    encryptor: &mut MediaEncryptor,
    mut sidecar: Option<&mut SidecarGenerator>,
) -> Result<(), MediaCryptoError>
where
    R: Read,
    W: Write,
{
    let mut chunk = vec![0u8; DEFAULT_CHUNK_SIZE];

    loop {
        let n = match source.read(&mut chunk) {
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };

        let encrypted = if n == 0 {
            encryptor.finish(&[])?
        } else {
            encryptor.update(&chunk[..n])?
        };

        if let Some(generator) = sidecar.as_deref_mut() {
            generator.update(&encrypted)?;
        }
        destination.write_all(&encrypted)?;

        if n == 0 {
            break;
        }
    }

    destination.flush()?;
    Ok(())
}
