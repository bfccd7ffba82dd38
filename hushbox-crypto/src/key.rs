//! Password-based key derivation.
//!
//! PBKDF2-HMAC-SHA256 turns a password and salt into a 256-bit key.
//! Derivation is deterministic: the same (password, salt, iterations)
//! always yields the same key, which later decryption depends on. The
//! iteration count travels inside every envelope, so the default below can
//! be raised without orphaning previously encrypted data.

use crate::error::CryptoResult;
use crate::random;
use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Derived key length in bytes (AES-256).
pub const KEY_SIZE: usize = 32;

/// KDF salt length in bytes.
pub const SALT_SIZE: usize = 16;

/// Default PBKDF2 iteration count.
pub const PBKDF2_ITERATIONS: u32 = 600_000;

/// A 16-byte KDF salt. Generated fresh for every encryption operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Salt([u8; SALT_SIZE]);

impl Salt {
    /// Draws a fresh random salt from the OS RNG.
    pub fn random() -> CryptoResult<Self> {
        Ok(Self(random::generate_salt()?))
    }

    pub fn from_bytes(bytes: [u8; SALT_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; SALT_SIZE] {
        &self.0
    }
}

/// Work-factor parameters for key derivation.
///
/// Stored per envelope rather than assumed globally, so envelopes written
/// under an older iteration count stay decryptable after the default moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KdfParams {
    pub iterations: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            iterations: PBKDF2_ITERATIONS,
        }
    }
}

/// A 256-bit symmetric key. Lives for the duration of one encrypt/decrypt
/// call and is wiped from memory on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey([u8; KEY_SIZE]);

impl DerivedKey {
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DerivedKey([redacted])")
    }
}

/// Derives a 256-bit key from a password and salt.
pub fn derive_key(password: &str, salt: &Salt, params: &KdfParams) -> DerivedKey {
    let mut key = DerivedKey([0u8; KEY_SIZE]);
    pbkdf2_hmac::<Sha256>(
        password.as_bytes(),
        salt.as_bytes(),
        params.iterations,
        &mut key.0,
    );
    key
}
