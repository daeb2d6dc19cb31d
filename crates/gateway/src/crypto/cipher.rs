//! AES-256-CBC decryption of request payloads.
//!
//! **Algorithm choice:** AES-256-CBC with PKCS#7 padding matches the wire
//! format produced by the encrypting peers (`openssl enc -aes-256-cbc`
//! compatible ciphertext).
//!
//! CBC carries no authentication tag. A wrong key, wrong IV, or tampered
//! final block surfaces as [`CipherError::InvalidPadding`], never as a
//! silently-wrong plaintext reported as success.

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, KeyIvInit};
use thiserror::Error;

/// Byte length of an AES-256 key (32 bytes = 256 bits).
pub const KEY_LEN: usize = 32;

/// Byte length of a CBC initialization vector (one AES block).
pub const IV_LEN: usize = 16;

/// Byte length of an AES block.
pub const BLOCK_LEN: usize = 16;

type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// Errors produced by the cipher layer.
#[derive(Debug, Error)]
pub enum CipherError {
    /// The key is the wrong length (must be [`KEY_LEN`] bytes).
    #[error("invalid key length: expected {KEY_LEN} bytes")]
    InvalidKeyLength,

    /// The ciphertext is empty or not a whole number of AES blocks.
    #[error("ciphertext length must be a non-zero multiple of {BLOCK_LEN} bytes")]
    NotBlockAligned,

    /// PKCS#7 padding validation failed after block decryption.
    #[error("padding validation failed")]
    InvalidPadding,
}

/// Decrypt a CBC ciphertext under `key`/`iv` and strip its PKCS#7 padding.
///
/// # Errors
///
/// Returns [`CipherError::NotBlockAligned`] if `ciphertext` is empty or not
/// a multiple of [`BLOCK_LEN`] bytes, [`CipherError::InvalidKeyLength`] if
/// `key` is not [`KEY_LEN`] bytes, and [`CipherError::InvalidPadding`] if
/// the final block does not end in valid PKCS#7 padding (the last byte `N`
/// must be in `1..=16` and the last `N` bytes must all equal `N`).
pub fn decrypt(key: &[u8], iv: &[u8; IV_LEN], ciphertext: &[u8]) -> Result<Vec<u8>, CipherError> {
    if ciphertext.is_empty() || ciphertext.len() % BLOCK_LEN != 0 {
        return Err(CipherError::NotBlockAligned);
    }

    let cipher =
        Aes256CbcDec::new_from_slices(key, iv).map_err(|_| CipherError::InvalidKeyLength)?;

    cipher
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| CipherError::InvalidPadding)
}

/// Encrypt helper for the test harness, built on the same primitive.
#[cfg(test)]
pub(crate) fn encrypt(key: &[u8], iv: &[u8; IV_LEN], plaintext: &[u8]) -> Vec<u8> {
    use aes::cipher::BlockEncryptMut;

    cbc::Encryptor::<aes::Aes256>::new_from_slices(key, iv)
        .expect("test key must be KEY_LEN bytes")
        .encrypt_padded_vec_mut::<Pkcs7>(plaintext)
}
