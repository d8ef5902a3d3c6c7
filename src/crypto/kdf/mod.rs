//! Key derivation for media keys.

pub mod hkdf;

pub use hkdf::{derive_media_keys, expand_media_key, MediaKeys};
