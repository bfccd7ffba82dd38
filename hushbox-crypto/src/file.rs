//! File encryption service.
//!
//! Files are encrypted as a single in-memory buffer (no streaming cipher),
//! which bounds the practical payload size to what the client is willing to
//! hold in memory. The envelope carries the original filename, size, and
//! MIME type as plaintext-visible metadata so the download pipeline can
//! restore the file without decrypting it first.

use crate::cipher;
use crate::envelope::Envelope;
use crate::error::{CryptoError, CryptoResult};
use crate::key::{derive_key, KdfParams, Salt};
use crate::random;
use tokio::task;
use tracing::{debug, warn};
use zeroize::Zeroizing;

/// A decrypted file: its metadata plus raw contents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilePayload {
    pub filename: String,
    pub mime_type: String,
    pub contents: Vec<u8>,
}

/// Coarse progress checkpoints for file operations.
///
/// Advisory UI feedback only: the sequence is linear and fires exactly once
/// per call: key derivation, the bulk cipher pass, completion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Progress {
    KeyDerived,
    PayloadProcessed,
    Complete,
}

impl Progress {
    /// Approximate completion percentage for progress bars.
    pub fn percent(self) -> u8 {
        match self {
            Progress::KeyDerived => 30,
            Progress::PayloadProcessed => 80,
            Progress::Complete => 100,
        }
    }
}

/// Optional progress observer for file operations.
pub type ProgressFn<'a> = &'a (dyn Fn(Progress) + Send + Sync);

fn notify(on_progress: Option<ProgressFn<'_>>, checkpoint: Progress) {
    if let Some(callback) = on_progress {
        callback(checkpoint);
    }
}

/// Encrypts a file under a password.
///
/// The returned envelope carries the original filename, size, and MIME
/// type alongside the ciphertext.
pub async fn encrypt_file(
    payload: FilePayload,
    password: &str,
    on_progress: Option<ProgressFn<'_>>,
) -> CryptoResult<Envelope> {
    let FilePayload {
        filename,
        mime_type,
        contents,
    } = payload;
    let size = contents.len() as u64;
    debug!(bytes = size, "encrypting file payload");

    let salt = Salt::random()?;
    let iv = random::generate_iv()?;
    let kdf = KdfParams::default();

    let password = Zeroizing::new(password.to_owned());
    let task_salt = salt.clone();
    let key = task::spawn_blocking(move || derive_key(&password, &task_salt, &kdf))
        .await
        .map_err(|_| CryptoError::worker_lost())?;
    notify(on_progress, Progress::KeyDerived);

    let (ciphertext, tag) = task::spawn_blocking(move || cipher::encrypt(&key, &iv, &contents))
        .await
        .map_err(|_| CryptoError::worker_lost())??;
    notify(on_progress, Progress::PayloadProcessed);

    let envelope = Envelope {
        salt,
        iv,
        ciphertext,
        tag,
        kdf,
        original_filename: Some(filename),
        original_size: Some(size),
        mime_type: Some(mime_type),
    };
    notify(on_progress, Progress::Complete);
    Ok(envelope)
}

/// Decrypts a file envelope, restoring the original filename and MIME type
/// from its metadata.
pub async fn decrypt_file(
    envelope: &Envelope,
    password: &str,
    on_progress: Option<ProgressFn<'_>>,
) -> CryptoResult<FilePayload> {
    let filename = envelope
        .original_filename
        .clone()
        .ok_or_else(|| CryptoError::Encoding("original_filename: missing field".into()))?;
    let mime_type = envelope
        .mime_type
        .clone()
        .ok_or_else(|| CryptoError::Encoding("mime_type: missing field".into()))?;
    debug!(bytes = envelope.ciphertext.len(), "decrypting file payload");

    let password = Zeroizing::new(password.to_owned());
    let salt = envelope.salt.clone();
    let kdf = envelope.kdf;
    let key = task::spawn_blocking(move || derive_key(&password, &salt, &kdf))
        .await
        .map_err(|_| CryptoError::worker_lost())?;
    notify(on_progress, Progress::KeyDerived);

    let iv = envelope.iv;
    let tag = envelope.tag;
    let ciphertext = envelope.ciphertext.clone();
    let contents = task::spawn_blocking(move || cipher::decrypt(&key, &iv, &ciphertext, &tag))
        .await
        .map_err(|_| CryptoError::worker_lost())??;
    notify(on_progress, Progress::PayloadProcessed);

    // Metadata is plaintext-visible and not covered by the tag; a size
    // mismatch means the header was edited, not the payload.
    if envelope.original_size.is_some_and(|s| s != contents.len() as u64) {
        warn!("stored original_size does not match decrypted payload length");
    }

    let payload = FilePayload {
        filename,
        mime_type,
        contents,
    };
    notify(on_progress, Progress::Complete);
    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn sample() -> FilePayload {
        FilePayload {
            filename: "notes.txt".into(),
            mime_type: "text/plain".into(),
            contents: b"file contents, such as they are".to_vec(),
        }
    }

    #[tokio::test]
    async fn checkpoints_fire_in_order() {
        let seen = Mutex::new(Vec::new());
        let record = |p: Progress| seen.lock().unwrap().push(p.percent());

        let envelope = encrypt_file(sample(), "pw", Some(&record)).await.unwrap();
        assert_eq!(*seen.lock().unwrap(), vec![30, 80, 100]);

        seen.lock().unwrap().clear();
        decrypt_file(&envelope, "pw", Some(&record)).await.unwrap();
        assert_eq!(*seen.lock().unwrap(), vec![30, 80, 100]);
    }

    #[tokio::test]
    async fn progress_is_optional() {
        let envelope = encrypt_file(sample(), "pw", None).await.unwrap();
        let payload = decrypt_file(&envelope, "pw", None).await.unwrap();
        assert_eq!(payload, sample());
    }

    #[tokio::test]
    async fn envelope_without_file_metadata_rejected() {
        let envelope = crate::text::encrypt_text("not a file", "pw").await.unwrap();
        let err = decrypt_file(&envelope, "pw", None).await.unwrap_err();
        assert!(matches!(err, CryptoError::Encoding(_)));
    }
}
