//! Low-level crypto primitives.
//!
//! - [`kdf`]: HKDF expansion of a media key into IV / cipher key / MAC key
//! - [`hmac`]: keyed HMAC-SHA256 construction and tag truncation
//! - [`cbc`]: chained AES-256-CBC state shared by both cipher directions

pub mod cbc;
pub mod hmac;
pub mod kdf;
