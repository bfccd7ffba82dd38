//! Zero-knowledge encryption engine for Hushbox.
//!
//! Encrypts text and files on the client, before anything leaves the
//! device, using:
//! - PBKDF2-HMAC-SHA256 (600,000 iterations) for key derivation from passwords
//! - AES-256-GCM for authenticated encryption
//! - Secure key management with zeroization
//!
//! # Architecture
//!
//! Every payload becomes a self-describing [`Envelope`]: salt, IV,
//! ciphertext, and authentication tag, plus optional file metadata. The
//! envelope and the password are the only inputs decryption needs; no
//! key, password, or plaintext is ever visible to the storage layer.
//!
//! Two credentials can open a user's data:
//!
//! 1. **Password**: derived into a key per call. Never stored, never
//!    cached. Each operation derives and discards its own key.
//!
//! 2. **Recovery key**: a random 256-bit secret generated at setup. The
//!    password-derived master key is sealed under it, so a forgotten
//!    password does not mean lost data.
//!
//! All service operations are `async` and self-contained: each allocates
//! its own salt, IV, and key, so independent calls can be pipelined freely
//! with no shared state and no locking.

mod cipher;
mod error;
pub mod envelope;
pub mod file;
mod key;
mod random;
pub mod recovery;
pub mod text;
pub mod validation;

pub use cipher::{decrypt, encrypt, IV_SIZE, TAG_SIZE};
pub use envelope::{Envelope, WireEnvelope, ENVELOPE_VERSION};
pub use error::{CryptoError, CryptoResult};
pub use file::{decrypt_file, encrypt_file, FilePayload, Progress, ProgressFn};
pub use key::{
    derive_key, DerivedKey, KdfParams, Salt, KEY_SIZE, PBKDF2_ITERATIONS, SALT_SIZE,
};
pub use random::{generate_iv, generate_salt};
pub use recovery::{
    rewrap_master_key, unwrap_master_key, wrap_master_key, RecoveryKey, WrappedMasterKey,
    RECOVERY_KEY_SIZE,
};
pub use text::{decrypt_text, encrypt_text};
pub use validation::{validate_password, Strength, StrengthReport, MIN_PASSWORD_LENGTH};
