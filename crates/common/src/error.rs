//! Common error types shared across crates.

use thiserror::Error;

/// Classified failure of a single decryption request.
///
/// Variants map to HTTP status codes returned to callers:
/// - [`DecryptError::MissingInput`] / [`DecryptError::MalformedCiphertext`] → 400
/// - everything else → 500
///
/// Every failure is terminal for its request. Nothing here is retried or
/// escalated to a process-level fault.
#[derive(Debug, Error)]
pub enum DecryptError {
    /// The `ciphertext`/`text` query parameter was absent or empty.
    #[error("Missing ciphertext parameter")]
    MissingInput,

    /// The decoded parameter is too short, has a non-hex IV, a non-base64
    /// payload, or a payload that is not a whole number of cipher blocks.
    #[error("Invalid ciphertext format")]
    MalformedCiphertext,

    /// The runtime key file does not exist yet. Expected while the external
    /// provisioning process has not run.
    #[error("Symmetric key not available")]
    KeyUnavailable,

    /// The runtime key file exists but does not hold usable key material.
    #[error("Symmetric key corrupted: {0}")]
    KeyCorrupted(String),

    /// PKCS#7 padding validation failed after block decryption: a wrong
    /// key, wrong IV, or tampered ciphertext.
    #[error("Decryption failed: invalid padding")]
    PaddingInvalid,

    /// The decryption call exceeded its configured time bound.
    #[error("Decryption timed out")]
    DecryptionTimeout,

    /// The decryption primitive itself failed, with its diagnostic text.
    #[error("Decryption failed: {0}")]
    PrimitiveFailure(String),

    /// Catch-all for failures outside the taxonomy above.
    #[error("Processing error: {0}")]
    Unexpected(String),
}

impl DecryptError {
    /// Returns the HTTP status code that should be sent for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            DecryptError::MissingInput | DecryptError::MalformedCiphertext => 400,
            DecryptError::KeyUnavailable
            | DecryptError::KeyCorrupted(_)
            | DecryptError::PaddingInvalid
            | DecryptError::DecryptionTimeout
            | DecryptError::PrimitiveFailure(_)
            | DecryptError::Unexpected(_) => 500,
        }
    }
}
