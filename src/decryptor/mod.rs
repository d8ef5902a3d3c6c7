// src/decryptor/mod.rs

//! High-level decryption facade.
//!
//! Core API: `decrypt(input, output, &media_key, media_type)?` for streams,
//! `decrypt_bytes` for buffers, [`MediaDecryptor`] for push-style `update`/`finish`.
//! Helpers: [`split_trailer`], [`strip_final_padding`] for custom flows.

pub(crate) mod decrypt;
pub(crate) mod session;
pub(crate) mod trailer;

pub use decrypt::{decrypt, decrypt_bytes};
pub use session::MediaDecryptor;
pub use trailer::{split_trailer, strip_final_padding};
