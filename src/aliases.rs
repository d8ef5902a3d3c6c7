//! # Type Aliases
//!
//! Fixed-size byte types used across the media cipher.
//!
//! ## Type Categories
//!
//! ### HMAC Primitives
//! - [`HmacSha256`] - HMAC-SHA256 for the running stream MAC and sidecar windows
//!
//! ### Public Values
//! - [`Block16`] - one AES block
//! - [`Iv16`] - 16-byte initialization / chaining vector
//! - [`MacTag10`] - truncated HMAC-SHA256 tag (stream MAC and sidecar signatures)
//!
//! ### Secrets
//! - [`Aes256Key32`] - 32-byte AES-256 cipher key
//! - [`MacKey32`] - 32-byte HMAC key
//! - [`ExpandedKey112`] - raw 112-byte HKDF expansion of a media key
//!
//! Secret aliases are [`Zeroizing`] buffers: they are wiped when dropped.

use crate::consts::{BLOCK_SIZE, CIPHER_KEY_LENGTH, KEY_EXPANSION_LENGTH, MAC_KEY_LENGTH, MAC_SIZE};
use hmac::Hmac;
use sha2::Sha256;
use zeroize::Zeroizing;

// ─────────────────────────────────────────────────────────────────────────────
// HMAC primitives
// ─────────────────────────────────────────────────────────────────────────────
pub type HmacSha256 = Hmac<Sha256>;

// ─────────────────────────────────────────────────────────────────────────────
// Public fixed-size values
// ─────────────────────────────────────────────────────────────────────────────
pub type Block16 = [u8; BLOCK_SIZE]; // one AES block
pub type Iv16 = [u8; BLOCK_SIZE]; // initial IV, chaining IV
pub type MacTag10 = [u8; MAC_SIZE]; // trailing MAC, sidecar signature

// ─────────────────────────────────────────────────────────────────────────────
// Secrets (zeroized on drop)
// ─────────────────────────────────────────────────────────────────────────────
pub type Aes256Key32 = Zeroizing<[u8; CIPHER_KEY_LENGTH]>;
pub type MacKey32 = Zeroizing<[u8; MAC_KEY_LENGTH]>;
pub type ExpandedKey112 = Zeroizing<[u8; KEY_EXPANSION_LENGTH]>;
