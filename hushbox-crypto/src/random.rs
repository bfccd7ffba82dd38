//! Secure random material for salts and IVs.
//!
//! Everything here comes from the operating system RNG. There is no
//! fallback generator: if the OS source is unavailable the call fails with
//! [`CryptoError::Environment`] rather than degrading silently.

use crate::cipher::IV_SIZE;
use crate::error::{CryptoError, CryptoResult};
use crate::key::SALT_SIZE;
use rand::rngs::OsRng;
use rand::TryRngCore;

/// Generates a fresh 16-byte KDF salt.
pub fn generate_salt() -> CryptoResult<[u8; SALT_SIZE]> {
    let mut salt = [0u8; SALT_SIZE];
    fill(&mut salt)?;
    Ok(salt)
}

/// Generates a fresh 12-byte AES-GCM IV.
pub fn generate_iv() -> CryptoResult<[u8; IV_SIZE]> {
    let mut iv = [0u8; IV_SIZE];
    fill(&mut iv)?;
    Ok(iv)
}

pub(crate) fn fill(buf: &mut [u8]) -> CryptoResult<()> {
    OsRng
        .try_fill_bytes(buf)
        .map_err(|e| CryptoError::Environment(format!("secure random source unavailable: {e}")))
}
