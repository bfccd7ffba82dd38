//! Text encryption service.
//!
//! Also home to the crate-internal password-sealing pipeline
//! ([`seal_bytes`] / [`open_bytes`]): fresh salt and IV, derive, cipher,
//! envelope. The file and recovery services run their payloads through the
//! same pipeline, so every sealed payload is just another envelope.
//!
//! The KDF and cipher are CPU-bound, so both run under `spawn_blocking`;
//! concurrent calls never stall the async executor. Nothing is cached
//! between calls; each one derives its own key and discards it.

use crate::cipher;
use crate::envelope::Envelope;
use crate::error::{CryptoError, CryptoResult};
use crate::key::{derive_key, KdfParams, Salt};
use crate::random;
use tokio::task;
use tracing::debug;
use zeroize::Zeroizing;

/// Encrypts a UTF-8 string under a password.
pub async fn encrypt_text(text: &str, password: &str) -> CryptoResult<Envelope> {
    seal_bytes(text.as_bytes().to_vec(), Zeroizing::new(password.to_owned())).await
}

/// Decrypts a text envelope back to the original string.
///
/// Fails with [`CryptoError::Authentication`] on a wrong password or any
/// tampering; the two are indistinguishable.
pub async fn decrypt_text(envelope: &Envelope, password: &str) -> CryptoResult<String> {
    let plaintext = open_bytes(envelope, Zeroizing::new(password.to_owned())).await?;
    String::from_utf8(plaintext)
        .map_err(|_| CryptoError::Encoding("payload is not valid UTF-8 text".into()))
}

/// Seals a byte payload under a password: fresh salt + IV, derive, encrypt.
pub(crate) async fn seal_bytes(
    plaintext: Vec<u8>,
    password: Zeroizing<String>,
) -> CryptoResult<Envelope> {
    let salt = Salt::random()?;
    let iv = random::generate_iv()?;
    let kdf = KdfParams::default();
    debug!(bytes = plaintext.len(), "sealing payload");

    let task_salt = salt.clone();
    let (ciphertext, tag) = task::spawn_blocking(move || {
        let key = derive_key(&password, &task_salt, &kdf);
        cipher::encrypt(&key, &iv, &plaintext)
    })
    .await
    .map_err(|_| CryptoError::worker_lost())??;

    Ok(Envelope {
        salt,
        iv,
        ciphertext,
        tag,
        kdf,
        original_filename: None,
        original_size: None,
        mime_type: None,
    })
}

/// Opens a sealed payload: derive under the envelope's own salt and
/// iteration count, then decrypt.
pub(crate) async fn open_bytes(
    envelope: &Envelope,
    password: Zeroizing<String>,
) -> CryptoResult<Vec<u8>> {
    let salt = envelope.salt.clone();
    let iv = envelope.iv;
    let tag = envelope.tag;
    let kdf = envelope.kdf;
    let ciphertext = envelope.ciphertext.clone();
    debug!(bytes = ciphertext.len(), "opening payload");

    task::spawn_blocking(move || {
        let key = derive_key(&password, &salt, &kdf);
        cipher::decrypt(&key, &iv, &ciphertext, &tag)
    })
    .await
    .map_err(|_| CryptoError::worker_lost())?
}
