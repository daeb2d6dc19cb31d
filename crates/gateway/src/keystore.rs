//! [`KeyStore`]: fresh-per-request access to the runtime symmetric key file.
//!
//! The key file is written by an external secret-delivery process and may
//! appear or disappear at any point in the gateway's lifetime. Every call
//! re-reads and re-decodes it from scratch; nothing is cached, so a key
//! that materialises after startup is picked up by the very next request.
//!
//! # Security invariants
//!
//! - Key bytes are **never** written back to disk, logged, or included in traces.
//! - [`KeyMaterial`] zeroes its buffer on drop and redacts `Debug` output.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;

use crate::crypto::KEY_LEN;

/// Errors produced by the key store.
///
/// Absence of the key file is *not* an error: [`KeyStore::fetch_key`]
/// returns `Ok(None)` for that expected, recoverable state.
#[derive(Debug, Error)]
pub enum KeyStoreError {
    /// The file exists but its content is not usable key material.
    #[error("{0}")]
    Corrupted(String),

    /// The file could not be read for a reason other than absence.
    #[error("key file read failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Fixed-size key buffer holding exactly [`KEY_LEN`] bytes.
///
/// When this type is dropped, the memory is overwritten with zeroes to
/// minimise the window during which key material lives in RAM.
pub struct KeyMaterial(Box<[u8; KEY_LEN]>);

impl KeyMaterial {
    /// Borrow the raw key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0[..]
    }
}

impl Drop for KeyMaterial {
    fn drop(&mut self) {
        // Zero the key material on drop.
        self.0.iter_mut().for_each(|b| *b = 0);
    }
}

impl std::fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material — not even in debug builds.
        f.write_str("KeyMaterial([REDACTED])")
    }
}

/// Accessor for the runtime symmetric key file.
///
/// Holds only the configured path; every [`fetch_key`](Self::fetch_key) call
/// performs a fresh filesystem read. Concurrent readers need no coordination
/// since the file is read-only from the gateway's side.
#[derive(Debug, Clone)]
pub struct KeyStore {
    path: PathBuf,
}

impl KeyStore {
    /// Create a [`KeyStore`] for the key file at `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Read and decode the current key material.
    ///
    /// Returns `Ok(None)` when the key file does not exist, an expected
    /// state while the external provisioning process has not yet run.
    ///
    /// # Errors
    ///
    /// Returns [`KeyStoreError::Corrupted`] if the trimmed file content is
    /// not valid base64 or does not decode to exactly [`KEY_LEN`] bytes, and
    /// [`KeyStoreError::Io`] for any other read failure. Neither is retried
    /// here; the next request starts over from scratch.
    pub async fn fetch_key(&self) -> Result<Option<KeyMaterial>, KeyStoreError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(KeyStoreError::Io(e)),
        };

        let decoded = STANDARD
            .decode(content.trim())
            .map_err(|e| KeyStoreError::Corrupted(format!("key file is not valid base64: {e}")))?;

        if decoded.len() != KEY_LEN {
            return Err(KeyStoreError::Corrupted(format!(
                "expected {KEY_LEN} key bytes, got {}",
                decoded.len()
            )));
        }

        let mut buf = Box::new([0u8; KEY_LEN]);
        buf.copy_from_slice(&decoded);
        Ok(Some(KeyMaterial(buf)))
    }

    /// Report whether the key file currently exists, without reading it.
    pub async fn is_available(&self) -> bool {
        tokio::fs::try_exists(&self.path).await.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> KeyStore {
        KeyStore::new(dir.path().join("symmetric_key"))
    }

    #[tokio::test]
    async fn absent_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(store.fetch_key().await.unwrap().is_none());
        assert!(!store.is_available().await);
    }

    #[tokio::test]
    async fn reads_and_decodes_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let raw = [0x42u8; KEY_LEN];
        std::fs::write(
            dir.path().join("symmetric_key"),
            STANDARD.encode(raw),
        )
        .unwrap();

        let key = store.fetch_key().await.unwrap().unwrap();
        assert_eq!(key.as_bytes(), &raw[..]);
        assert!(store.is_available().await);
    }

    #[tokio::test]
    async fn trailing_whitespace_is_trimmed() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let encoded = format!("{}\n", STANDARD.encode([0u8; KEY_LEN]));
        std::fs::write(dir.path().join("symmetric_key"), encoded).unwrap();

        assert!(store.fetch_key().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn malformed_base64_is_corruption() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(dir.path().join("symmetric_key"), "!!not base64!!").unwrap();

        let err = store.fetch_key().await.unwrap_err();
        assert!(matches!(err, KeyStoreError::Corrupted(_)));
    }

    #[tokio::test]
    async fn wrong_length_is_corruption() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(
            dir.path().join("symmetric_key"),
            STANDARD.encode([0u8; 16]),
        )
        .unwrap();

        let err = store.fetch_key().await.unwrap_err();
        assert!(matches!(err, KeyStoreError::Corrupted(_)));
    }

    #[tokio::test]
    async fn key_appearing_later_is_picked_up() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(store.fetch_key().await.unwrap().is_none());

        std::fs::write(
            dir.path().join("symmetric_key"),
            STANDARD.encode([7u8; KEY_LEN]),
        )
        .unwrap();
        assert!(store.fetch_key().await.unwrap().is_some());
    }

    #[test]
    fn key_material_redacted_in_debug() {
        let mut buf = Box::new([0u8; KEY_LEN]);
        buf[0] = 0xFF;
        let key = KeyMaterial(buf);
        assert!(format!("{key:?}").contains("REDACTED"));
    }
}
