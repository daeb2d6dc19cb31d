//! Shared application state injected into every Axum handler.

use std::sync::Arc;
use std::time::Duration;

use crate::keystore::KeyStore;

/// Application state shared across all request handlers.
///
/// Cheaply cloneable so Axum can clone it per request. There is no mutable
/// state here: every request reads the key file through the same
/// [`KeyStore`], and requests share nothing else.
#[derive(Clone)]
pub struct AppState {
    /// Accessor for the runtime symmetric key file.
    pub key_store: Arc<KeyStore>,
    /// Upper bound on a single decryption call.
    pub decrypt_timeout: Duration,
}

impl AppState {
    /// Create a new [`AppState`].
    pub fn new(key_store: KeyStore, decrypt_timeout: Duration) -> Self {
        Self {
            key_store: Arc::new(key_store),
            decrypt_timeout,
        }
    }
}
