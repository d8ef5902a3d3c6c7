//! src/stream/encrypting.rs
//! Read-side encrypting decorator

use super::{read_some, unsupported, OutputBuffer};
use crate::builders::StreamOptions;
use crate::encryptor::MediaEncryptor;
use crate::error::MediaCryptoError;
use crate::sidecar::SidecarGenerator;
use std::io::{self, Read, Seek, SeekFrom, Write};
use tracing::{trace, warn};

/// Wraps a plaintext source and yields `ciphertext || mac`.
///
/// ```
/// use std::io::Read;
/// use wamedia_rs::{decrypt_bytes, EncryptingReader, MediaEncryptor, MediaType};
///
/// # fn main() -> Result<(), wamedia_rs::MediaCryptoError> {
/// let key = [7u8; 32];
/// let encryptor = MediaEncryptor::new(&key, MediaType::Audio)?;
/// let mut reader = EncryptingReader::new(&b"voice note"[..], encryptor);
///
/// let mut blob = Vec::new();
/// reader.read_to_end(&mut blob)?;
/// assert_eq!(decrypt_bytes(&blob, &key, MediaType::Audio)?, b"voice note");
/// # Ok(())
/// # }
/// ```
pub struct EncryptingReader<R: Read> {
    source: R,
    encryptor: MediaEncryptor,
    sidecar: Option<SidecarGenerator>,
    output: OutputBuffer,
    options: StreamOptions,
    source_eof: bool,
}

impl<R: Read> EncryptingReader<R> {
    /// Reader with default options (64 KiB chunks, unknown source length).
    pub fn new(source: R, encryptor: MediaEncryptor) -> Self {
        Self {
            source,
            encryptor,
            sidecar: None,
            output: OutputBuffer::default(),
            options: StreamOptions::default(),
            source_eof: false,
        }
    }

    pub fn with_options(
        source: R,
        encryptor: MediaEncryptor,
        options: StreamOptions,
    ) -> Result<Self, MediaCryptoError> {
        options.validate()?;
        let mut reader = Self::new(source, encryptor);
        reader.options = options;
        Ok(reader)
    }

    /// Feed every emitted byte, MAC included, to `generator`.
    #[must_use]
    pub fn with_sidecar(mut self, generator: SidecarGenerator) -> Self {
        self.sidecar = Some(generator);
        self
    }

    /// Up to `length` encrypted bytes; fewer only at end of stream.
    pub fn read_bytes(&mut self, length: usize) -> Result<Vec<u8>, MediaCryptoError> {
        if self.eof() {
            return Ok(Vec::new());
        }
        self.fill(length)?;
        Ok(self.output.take(length))
    }

    /// Everything left in the stream.
    pub fn contents(&mut self) -> Result<Vec<u8>, MediaCryptoError> {
        if self.eof() {
            return Ok(Vec::new());
        }

        let mut result = self.output.take_all();
        if !self.source_eof && self.options.is_single_chunk() {
            let mut data = Vec::new();
            self.source.read_to_end(&mut data)?;
            self.source_eof = true;
            self.process(&data)?;
            self.finalize()?;
            result.extend(self.output.take_all());
            return Ok(result);
        }

        let chunk_size = self.options.chunk_size();
        while !self.eof() {
            result.extend(self.read_bytes(chunk_size)?);
        }
        Ok(result)
    }

    /// Sidecar signatures produced so far; complete once the stream reached its end.
    pub fn sidecar(&self) -> Result<&[u8], MediaCryptoError> {
        self.sidecar
            .as_ref()
            .map(SidecarGenerator::sidecar)
            .ok_or(MediaCryptoError::SidecarNotEnabled)
    }

    /// Encrypted bytes handed out so far.
    #[must_use]
    pub fn tell(&self) -> u64 {
        self.output.position()
    }

    #[must_use]
    pub fn eof(&self) -> bool {
        self.source_eof && self.output.is_empty()
    }

    /// Output length is not known ahead of time.
    #[must_use]
    pub const fn size(&self) -> Option<u64> {
        None
    }

    #[must_use]
    pub const fn is_readable(&self) -> bool {
        true
    }

    #[must_use]
    pub const fn is_seekable(&self) -> bool {
        false
    }

    #[must_use]
    pub const fn is_writable(&self) -> bool {
        false
    }

    /// Finalize the session and discard unread output.
    pub fn close(&mut self) -> Result<(), MediaCryptoError> {
        self.source_eof = true;
        self.output.clear();
        self.finalize()?;
        self.output.clear();
        Ok(())
    }

    #[must_use]
    pub fn get_ref(&self) -> &R {
        &self.source
    }

    #[must_use]
    pub fn is_finalized(&self) -> bool {
        self.encryptor.is_finalized()
    }

    fn fill(&mut self, length: usize) -> Result<(), MediaCryptoError> {
        let mut chunk = vec![0u8; self.options.read_size(length)];
        while self.output.len() < length && !self.source_eof {
            let n = read_some(&mut self.source, &mut chunk)?;
            if n == 0 {
                self.source_eof = true;
                self.finalize()?;
                break;
            }
            self.process(&chunk[..n])?;
        }
        Ok(())
    }

    fn process(&mut self, plaintext: &[u8]) -> Result<(), MediaCryptoError> {
        let encrypted = self.encryptor.update(plaintext)?;
        if let Some(generator) = self.sidecar.as_mut() {
            generator.update(&encrypted)?;
        }
        self.output.push(&encrypted);
        trace!(
            plaintext = plaintext.len(),
            encrypted = encrypted.len(),
            "encrypting stream chunk"
        );
        Ok(())
    }

    fn finalize(&mut self) -> Result<(), MediaCryptoError> {
        if self.encryptor.is_finalized() {
            return Ok(());
        }
        let tail = self.encryptor.finish(&[])?;
        if let Some(generator) = self.sidecar.as_mut() {
            generator.finish(&tail)?;
        }
        self.output.push(&tail);
        Ok(())
    }
}

impl<R: Read> Read for EncryptingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() || self.eof() {
            return Ok(0);
        }
        self.fill(buf.len())?;
        Ok(self.output.copy_into(buf))
    }
}

impl<R: Read> Seek for EncryptingReader<R> {
    fn seek(&mut self, _pos: SeekFrom) -> io::Result<u64> {
        Err(unsupported("cannot seek an encrypting stream"))
    }
}

impl<R: Read> Write for EncryptingReader<R> {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(unsupported("cannot write to an encrypting stream"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(unsupported("cannot write to an encrypting stream"))
    }
}

impl<R: Read> Drop for EncryptingReader<R> {
    fn drop(&mut self) {
        if let Err(e) = self.finalize() {
            warn!(error = %e, "failed to finalize encrypting stream on drop");
        }
    }
}
