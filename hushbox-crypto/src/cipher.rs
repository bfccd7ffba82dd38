//! Authenticated encryption with AES-256-GCM.
//!
//! The tag is kept detached from the ciphertext because the envelope
//! format stores them as separate fields. AAD is empty: everything the
//! envelope carries besides the ciphertext is either random (salt, IV) or
//! advisory metadata.

use crate::error::{CryptoError, CryptoResult};
use crate::key::DerivedKey;
use aes_gcm::{AeadInPlace, Aes256Gcm, Key, KeyInit, Nonce, Tag};

/// AES-GCM IV length in bytes (96 bits).
pub const IV_SIZE: usize = 12;

/// GCM authentication tag length in bytes (128 bits).
pub const TAG_SIZE: usize = 16;

/// Encrypts `plaintext`, returning the ciphertext and detached tag.
pub fn encrypt(
    key: &DerivedKey,
    iv: &[u8; IV_SIZE],
    plaintext: &[u8],
) -> CryptoResult<(Vec<u8>, [u8; TAG_SIZE])> {
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_bytes()));
    let mut buffer = plaintext.to_vec();
    let tag = cipher
        .encrypt_in_place_detached(Nonce::from_slice(iv), b"", &mut buffer)
        .map_err(|_| CryptoError::Environment("aes-256-gcm encryption failed".into()))?;

    let mut tag_bytes = [0u8; TAG_SIZE];
    tag_bytes.copy_from_slice(&tag);
    Ok((buffer, tag_bytes))
}

/// Decrypts `ciphertext`, verifying the detached tag.
///
/// A failed tag check returns [`CryptoError::Authentication`] and nothing
/// else: no partial plaintext, and no hint whether the key was wrong or the
/// data was tampered with.
pub fn decrypt(
    key: &DerivedKey,
    iv: &[u8; IV_SIZE],
    ciphertext: &[u8],
    tag: &[u8; TAG_SIZE],
) -> CryptoResult<Vec<u8>> {
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_bytes()));
    let mut buffer = ciphertext.to_vec();
    cipher
        .decrypt_in_place_detached(Nonce::from_slice(iv), b"", &mut buffer, Tag::from_slice(tag))
        .map_err(|_| CryptoError::Authentication)?;
    Ok(buffer)
}
