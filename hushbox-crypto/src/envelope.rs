//! Self-describing encrypted envelopes and their wire codec.
//!
//! [`Envelope`] is the in-memory form: raw bytes, produced and consumed by
//! the encryption services. [`WireEnvelope`] is the transportable form:
//! every binary field base64-encoded, serialized with serde. Text payloads
//! carry their ciphertext inline; file payloads can keep the ciphertext as
//! a raw buffer for direct binary upload, with only the header travelling
//! as JSON.
//!
//! Decoding validates everything it touches (field lengths, base64,
//! version, iteration count) and fails with [`CryptoError::Encoding`]
//! before any key derivation happens.

use crate::cipher::{IV_SIZE, TAG_SIZE};
use crate::error::{CryptoError, CryptoResult};
use crate::key::{KdfParams, Salt, SALT_SIZE};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

/// Current envelope format version.
pub const ENVELOPE_VERSION: u8 = 1;

/// Everything needed to decrypt one payload, given the password.
///
/// Immutable once created: any field mutation makes tag verification fail.
#[derive(Clone, Debug, PartialEq)]
pub struct Envelope {
    pub salt: Salt,
    pub iv: [u8; IV_SIZE],
    pub ciphertext: Vec<u8>,
    pub tag: [u8; TAG_SIZE],
    /// Work-factor the key was derived under. Decrypt honors this value,
    /// not the global default.
    pub kdf: KdfParams,
    pub original_filename: Option<String>,
    pub original_size: Option<u64>,
    pub mime_type: Option<String>,
}

/// Transportable envelope: base64 fields, serde-serializable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WireEnvelope {
    pub version: u8,
    pub kdf_iterations: u32,
    pub salt: String,
    pub iv: String,
    pub tag: String,
    /// Inline base64 ciphertext. Absent for detached (file) payloads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ciphertext: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

impl Envelope {
    /// Encodes for transport with the ciphertext inline (text payloads).
    pub fn to_wire(&self) -> WireEnvelope {
        let mut wire = self.header();
        wire.ciphertext = Some(STANDARD.encode(&self.ciphertext));
        wire
    }

    /// Encodes for transport with the ciphertext detached (file payloads).
    ///
    /// Returns the header plus the raw ciphertext buffer, which the upload
    /// pipeline ships as a binary body instead of inflating it by a third
    /// with base64.
    pub fn to_wire_detached(&self) -> (WireEnvelope, &[u8]) {
        (self.header(), &self.ciphertext)
    }

    /// Decodes an inline-ciphertext wire envelope.
    pub fn from_wire(wire: &WireEnvelope) -> CryptoResult<Self> {
        let encoded = wire
            .ciphertext
            .as_deref()
            .ok_or_else(|| CryptoError::Encoding("ciphertext: missing field".into()))?;
        let ciphertext = STANDARD
            .decode(encoded)
            .map_err(|e| CryptoError::Encoding(format!("ciphertext: invalid base64: {e}")))?;
        Self::from_parts(wire, ciphertext)
    }

    /// Decodes a detached wire envelope, reuniting header and ciphertext.
    pub fn from_wire_detached(wire: &WireEnvelope, ciphertext: Vec<u8>) -> CryptoResult<Self> {
        if wire.ciphertext.is_some() {
            return Err(CryptoError::Encoding(
                "ciphertext: inline field present on a detached envelope".into(),
            ));
        }
        Self::from_parts(wire, ciphertext)
    }

    fn header(&self) -> WireEnvelope {
        WireEnvelope {
            version: ENVELOPE_VERSION,
            kdf_iterations: self.kdf.iterations,
            salt: STANDARD.encode(self.salt.as_bytes()),
            iv: STANDARD.encode(self.iv),
            tag: STANDARD.encode(self.tag),
            ciphertext: None,
            original_filename: self.original_filename.clone(),
            original_size: self.original_size,
            mime_type: self.mime_type.clone(),
        }
    }

    fn from_parts(wire: &WireEnvelope, ciphertext: Vec<u8>) -> CryptoResult<Self> {
        if wire.version != ENVELOPE_VERSION {
            return Err(CryptoError::Encoding(format!(
                "unsupported envelope version {}",
                wire.version
            )));
        }
        if wire.kdf_iterations == 0 {
            return Err(CryptoError::Encoding("kdf_iterations: must be nonzero".into()));
        }

        Ok(Self {
            salt: Salt::from_bytes(decode_fixed::<SALT_SIZE>("salt", &wire.salt)?),
            iv: decode_fixed::<IV_SIZE>("iv", &wire.iv)?,
            ciphertext,
            tag: decode_fixed::<TAG_SIZE>("tag", &wire.tag)?,
            kdf: KdfParams {
                iterations: wire.kdf_iterations,
            },
            original_filename: wire.original_filename.clone(),
            original_size: wire.original_size,
            mime_type: wire.mime_type.clone(),
        })
    }
}

impl WireEnvelope {
    pub fn to_json(&self) -> CryptoResult<String> {
        serde_json::to_string(self)
            .map_err(|e| CryptoError::Encoding(format!("json serialization failed: {e}")))
    }

    pub fn from_json(json: &str) -> CryptoResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| CryptoError::Encoding(format!("json deserialization failed: {e}")))
    }
}

fn decode_fixed<const N: usize>(field: &'static str, value: &str) -> CryptoResult<[u8; N]> {
    let bytes = STANDARD
        .decode(value)
        .map_err(|e| CryptoError::Encoding(format!("{field}: invalid base64: {e}")))?;
    let len = bytes.len();
    bytes
        .try_into()
        .map_err(|_| CryptoError::Encoding(format!("{field}: expected {N} bytes, got {len}")))
}
