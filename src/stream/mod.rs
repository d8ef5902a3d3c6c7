//! # Stream decorators
//!
//! Pull-style wrappers over a byte source: [`EncryptingReader`] turns plaintext
//! into `ciphertext || mac` (optionally collecting a sidecar), and
//! [`DecryptingReader`] turns `ciphertext || mac` back into plaintext.
//!
//! Both are one-pass and read-only. They implement [`std::io::Read`]; seeking
//! and writing fail with [`MediaCryptoError::UnsupportedOperation`].
//! Dropping a reader before the source is exhausted still finalizes its session.

pub(crate) mod decrypting;
pub(crate) mod encrypting;

pub use decrypting::DecryptingReader;
pub use encrypting::EncryptingReader;

use crate::error::MediaCryptoError;
use std::io::{self, ErrorKind, Read};

/// Processed bytes waiting to be handed to the caller, plus the count already handed out.
#[derive(Default)]
pub(crate) struct OutputBuffer {
    pending: Vec<u8>,
    position: u64,
}

impl OutputBuffer {
    pub(crate) fn len(&self) -> usize {
        self.pending.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub(crate) fn position(&self) -> u64 {
        self.position
    }

    pub(crate) fn push(&mut self, bytes: &[u8]) {
        self.pending.extend_from_slice(bytes);
    }

    pub(crate) fn clear(&mut self) {
        self.pending.clear();
    }

    /// Remove and return up to `length` bytes from the front.
    pub(crate) fn take(&mut self, length: usize) -> Vec<u8> {
        let n = length.min(self.pending.len());
        let rest = self.pending.split_off(n);
        let out = std::mem::replace(&mut self.pending, rest);
        self.position += out.len() as u64;
        out
    }

    pub(crate) fn take_all(&mut self) -> Vec<u8> {
        let out = std::mem::take(&mut self.pending);
        self.position += out.len() as u64;
        out
    }

    /// Copy as much as fits into `buf` and drop it from the front.
    pub(crate) fn copy_into(&mut self, buf: &mut [u8]) -> usize {
        let n = buf.len().min(self.pending.len());
        buf[..n].copy_from_slice(&self.pending[..n]);
        self.pending.drain(..n);
        self.position += n as u64;
        n
    }
}

/// One `read` from `source`, retrying on `Interrupted`.
pub(crate) fn read_some<R: Read>(source: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    loop {
        match source.read(buf) {
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            other => return other,
        }
    }
}

pub(crate) fn unsupported(operation: &'static str) -> io::Error {
    MediaCryptoError::UnsupportedOperation(operation).into()
}
