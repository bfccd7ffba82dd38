//! Recovery keys: the escape hatch for a lost password.
//!
//! A recovery key is a 256-bit random secret, shown to the user once in
//! base64 and never stored by us. [`wrap_master_key`] seals the
//! password-derived master key under the recovery key, so the user can
//! later recover the master key, and with it their data, armed only with
//! the recovery key, no knowledge of the original password required.

use crate::envelope::Envelope;
use crate::error::{CryptoError, CryptoResult};
use crate::key::{derive_key, DerivedKey, KdfParams, Salt, KEY_SIZE};
use crate::random;
use crate::text;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tokio::task;
use tracing::debug;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Recovery key length in bytes.
pub const RECOVERY_KEY_SIZE: usize = 32;

/// A high-entropy secondary secret, used in place of a password when the
/// real one is lost. Wiped from memory on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct RecoveryKey([u8; RECOVERY_KEY_SIZE]);

impl RecoveryKey {
    /// Generates a fresh random recovery key.
    pub fn generate() -> CryptoResult<Self> {
        let mut bytes = [0u8; RECOVERY_KEY_SIZE];
        random::fill(&mut bytes)?;
        Ok(Self(bytes))
    }

    /// The canonical base64 form, for one-time display to the user. This
    /// same form acts as the "password" when sealing and opening wrapped
    /// keys.
    pub fn to_base64(&self) -> Zeroizing<String> {
        Zeroizing::new(STANDARD.encode(self.0))
    }

    /// Re-imports a recovery key the user stored.
    pub fn from_base64(encoded: &str) -> CryptoResult<Self> {
        let bytes = Zeroizing::new(STANDARD.decode(encoded.trim()).map_err(|e| {
            CryptoError::Encoding(format!("recovery key: invalid base64: {e}"))
        })?);
        if bytes.len() != RECOVERY_KEY_SIZE {
            return Err(CryptoError::Encoding(format!(
                "recovery key: expected {RECOVERY_KEY_SIZE} bytes, got {}",
                bytes.len()
            )));
        }
        let mut key = [0u8; RECOVERY_KEY_SIZE];
        key.copy_from_slice(&bytes);
        Ok(Self(key))
    }
}

impl std::fmt::Debug for RecoveryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("RecoveryKey([redacted])")
    }
}

/// A master key sealed under a recovery key, plus the salt that ties the
/// master key back to the user's password.
#[derive(Clone, Debug)]
pub struct WrappedMasterKey {
    /// Salt the master key was derived under. Collaborators re-derive the
    /// master key from (password, master_salt) for normal unlocks.
    pub master_salt: Salt,
    /// Envelope holding the raw master key bytes, sealed under the
    /// recovery key.
    pub sealed_key: Envelope,
    /// Unix timestamp of when this wrap was created.
    pub created_at: i64,
}

/// Derives a master key from `password` with a fresh salt and seals its
/// raw bytes under the recovery key.
pub async fn wrap_master_key(
    password: &str,
    recovery_key: &RecoveryKey,
) -> CryptoResult<WrappedMasterKey> {
    let master_salt = Salt::random()?;
    let kdf = KdfParams::default();
    debug!("wrapping master key under recovery key");

    let password = Zeroizing::new(password.to_owned());
    let task_salt = master_salt.clone();
    let master = task::spawn_blocking(move || derive_key(&password, &task_salt, &kdf))
        .await
        .map_err(|_| CryptoError::worker_lost())?;

    let sealed_key = text::seal_bytes(master.as_bytes().to_vec(), recovery_key.to_base64()).await?;

    Ok(WrappedMasterKey {
        master_salt,
        sealed_key,
        created_at: chrono::Utc::now().timestamp(),
    })
}

/// Recovers the master key using only the recovery key.
pub async fn unwrap_master_key(
    wrapped: &WrappedMasterKey,
    recovery_key: &RecoveryKey,
) -> CryptoResult<DerivedKey> {
    let bytes = Zeroizing::new(text::open_bytes(&wrapped.sealed_key, recovery_key.to_base64()).await?);
    if bytes.len() != KEY_SIZE {
        return Err(CryptoError::Encoding(format!(
            "recovered key: expected {KEY_SIZE} bytes, got {}",
            bytes.len()
        )));
    }

    let mut key = [0u8; KEY_SIZE];
    key.copy_from_slice(&bytes);
    Ok(DerivedKey::from_bytes(key))
}

/// Re-wraps after a password change: verifies the recovery key still opens
/// the old wrap, then seals the new password's master key under the same
/// recovery key. The user's stored recovery key stays valid; `created_at`
/// is preserved.
pub async fn rewrap_master_key(
    wrapped: &WrappedMasterKey,
    recovery_key: &RecoveryKey,
    new_password: &str,
) -> CryptoResult<WrappedMasterKey> {
    let _ = unwrap_master_key(wrapped, recovery_key).await?;

    let mut rewrapped = wrap_master_key(new_password, recovery_key).await?;
    rewrapped.created_at = wrapped.created_at;
    Ok(rewrapped)
}
