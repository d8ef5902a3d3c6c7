//! src/stream/decrypting.rs
//! Read-side decrypting decorator

use super::{read_some, unsupported, OutputBuffer};
use crate::builders::StreamOptions;
use crate::decryptor::MediaDecryptor;
use crate::error::MediaCryptoError;
use std::io::{self, Read, Seek, SeekFrom, Write};
use tracing::{debug, trace};

/// Wraps a `ciphertext || mac` source and yields plaintext.
///
/// Plaintext is released block by block as it is decrypted. The last block is
/// only released after the MAC verified, so a consumer must still treat the
/// output as untrusted until the stream reports EOF without error.
pub struct DecryptingReader<R: Read> {
    source: R,
    decryptor: MediaDecryptor,
    output: OutputBuffer,
    options: StreamOptions,
    source_eof: bool,
    failed: bool,
}

impl<R: Read> DecryptingReader<R> {
    pub fn new(source: R, decryptor: MediaDecryptor) -> Self {
        Self {
            source,
            decryptor,
            output: OutputBuffer::default(),
            options: StreamOptions::default(),
            source_eof: false,
            failed: false,
        }
    }

    pub fn with_options(
        source: R,
        decryptor: MediaDecryptor,
        options: StreamOptions,
    ) -> Result<Self, MediaCryptoError> {
        options.validate()?;
        let mut reader = Self::new(source, decryptor);
        reader.options = options;
        Ok(reader)
    }

    /// Up to `length` plaintext bytes; fewer only at end of stream.
    pub fn read_bytes(&mut self, length: usize) -> Result<Vec<u8>, MediaCryptoError> {
        self.check_failed()?;
        if self.eof() {
            return Ok(Vec::new());
        }
        self.fill(length)?;
        Ok(self.output.take(length))
    }

    /// Everything left in the stream.
    pub fn contents(&mut self) -> Result<Vec<u8>, MediaCryptoError> {
        self.check_failed()?;
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

    /// Plaintext bytes handed out so far.
    #[must_use]
    pub fn tell(&self) -> u64 {
        self.output.position()
    }

    #[must_use]
    pub fn eof(&self) -> bool {
        self.source_eof && self.output.is_empty()
    }

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

    /// Stop reading and discard unread plaintext.
    ///
    /// The withheld tail is checked if it is complete; an early close fails
    /// authentication and reports it.
    pub fn close(&mut self) -> Result<(), MediaCryptoError> {
        self.source_eof = true;
        self.output.clear();
        let result = self.finalize();
        self.output.clear();
        result
    }

    #[must_use]
    pub fn get_ref(&self) -> &R {
        &self.source
    }

    #[must_use]
    pub fn is_finalized(&self) -> bool {
        self.decryptor.is_finalized()
    }

    fn check_failed(&self) -> Result<(), MediaCryptoError> {
        if self.failed {
            return Err(MediaCryptoError::InvalidMac(
                "stream already failed authentication",
            ));
        }
        Ok(())
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

    fn process(&mut self, encrypted: &[u8]) -> Result<(), MediaCryptoError> {
        let plaintext = self.decryptor.update(encrypted)?;
        self.output.push(&plaintext);
        trace!(
            encrypted = encrypted.len(),
            plaintext = plaintext.len(),
            "decrypting stream chunk"
        );
        Ok(())
    }

    fn finalize(&mut self) -> Result<(), MediaCryptoError> {
        if self.decryptor.is_finalized() {
            return Ok(());
        }
        match self.decryptor.finish(&[]) {
            Ok(tail) => {
                self.output.push(&tail);
                Ok(())
            }
            Err(e) => {
                self.failed = true;
                self.source_eof = true;
                self.output.clear();
                Err(e)
            }
        }
    }
}

impl<R: Read> Read for DecryptingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.check_failed()?;
        if buf.is_empty() || self.eof() {
            return Ok(0);
        }
        self.fill(buf.len())?;
        Ok(self.output.copy_into(buf))
    }
}

impl<R: Read> Seek for DecryptingReader<R> {
    fn seek(&mut self, _pos: SeekFrom) -> io::Result<u64> {
        Err(unsupported("cannot seek a decrypting stream"))
    }
}

impl<R: Read> Write for DecryptingReader<R> {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(unsupported("cannot write to a decrypting stream"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(unsupported("cannot write to a decrypting stream"))
    }
}

impl<R: Read> Drop for DecryptingReader<R> {
    fn drop(&mut self) {
        if let Err(e) = self.finalize() {
            debug!(error = %e, "decrypting stream dropped before a verified end");
        }
    }
}
