// src/encryptor/mod.rs

//! High-level encryption facade.
//!
//! Core API: `encrypt(input, output, &media_key, media_type)?` for streams,
//! `encrypt_bytes` for buffers, [`MediaEncryptor`] for push-style `update`/`finish`.

pub(crate) mod encrypt;
pub(crate) mod session;

pub use encrypt::{encrypt, encrypt_bytes, encrypt_with_sidecar};
pub use session::MediaEncryptor;
