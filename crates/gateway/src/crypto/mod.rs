//! AES-256-CBC decryption primitives.
//!
//! This module is intentionally free of HTTP and filesystem dependencies.
//! It provides the low-level block-cipher operations driven by the request
//! handlers.
//!
//! # Ciphertext format
//!
//! ```text
//! <hex(16-byte IV)><base64(PKCS#7-padded CBC ciphertext)>
//! ```
//!
//! The IV travels as the first 32 hex characters of the request parameter;
//! the remainder is the base64-encoded ciphertext.

pub mod cipher;

pub use cipher::{IV_LEN, KEY_LEN};
