//! Error types for the encryption engine.

use thiserror::Error;

/// All errors the encryption engine can surface.
///
/// `Authentication` deliberately carries no detail: a failed tag check means
/// either a wrong password or tampered/corrupted data, and the two causes
/// must stay indistinguishable to the caller.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// A required platform capability (secure RNG, worker threads) is
    /// missing at runtime. Fatal to the call, not retryable.
    #[error("crypto environment unavailable: {0}")]
    Environment(String),

    /// The password failed the strength policy. Advisory: only produced
    /// when a caller explicitly asks to enforce the policy.
    #[error("password too weak: {0}")]
    Validation(String),

    /// Authentication tag verification failed on decrypt.
    #[error("wrong password or corrupted data")]
    Authentication,

    /// Malformed or incomplete envelope: missing field, wrong length,
    /// invalid base64, unsupported version.
    #[error("malformed envelope: {0}")]
    Encoding(String),
}

pub type CryptoResult<T> = Result<T, CryptoError>;

impl CryptoError {
    /// The blocking crypto task never completed: the runtime is shutting
    /// down and the capability to run crypto work is gone.
    pub(crate) fn worker_lost() -> Self {
        Self::Environment("crypto worker task failed to complete".into())
    }
}
