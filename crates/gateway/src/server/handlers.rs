//! Axum request handlers for all service endpoints.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use common::protocol::{DecryptQuery, ErrorResponse, HealthResponse};
use common::DecryptError;
use percent_encoding::percent_decode_str;
use tracing::warn;

use super::state::AppState;
use crate::crypto::cipher::{self, CipherError, IV_LEN};
use crate::keystore::KeyStoreError;

/// Hex-encoded IV length in characters (16 bytes → 32 hex characters).
const IV_HEX_LEN: usize = 2 * IV_LEN;

/// `GET /` — decrypt the `ciphertext` (alias `text`) query parameter.
///
/// The parameter carries `hex(IV)` in its first 32 characters and the
/// base64-encoded CBC ciphertext in the remainder. On success the response
/// body is the recovered plaintext; failures map to 400 (caller-side) or
/// 500 (server-side) with an `{"error": ...}` JSON body.
pub async fn decrypt(
    State(state): State<AppState>,
    Query(query): Query<DecryptQuery>,
) -> Response {
    match process(&state, query.param()).await {
        Ok(plaintext) => (StatusCode::OK, plaintext).into_response(),
        Err(e) => error_response(e),
    }
}

/// `GET /health` — report liveness of the key-provisioning dependency.
///
/// Always `200 OK`; `key_available` reflects whether the key file currently
/// exists. The file content is never read or decoded here.
pub async fn health(State(state): State<AppState>) -> Response {
    let body = HealthResponse {
        status: "healthy".into(),
        key_available: state.key_store.is_available().await,
    };
    (StatusCode::OK, Json(body)).into_response()
}

/// Catch-all 404 handler.
pub async fn not_found() -> impl IntoResponse {
    let err = ErrorResponse::new("the requested resource does not exist");
    (StatusCode::NOT_FOUND, Json(err))
}

// ---------------------------------------------------------------------------
// Decryption pipeline
// ---------------------------------------------------------------------------

/// Run the full decryption pipeline for one request.
///
/// Parsing runs before any key lookup: a malformed request is rejected
/// without touching the filesystem.
async fn process(state: &AppState, raw: Option<&str>) -> Result<String, DecryptError> {
    let raw = raw.ok_or(DecryptError::MissingInput)?;

    let (iv, payload) = parse_ciphertext(raw)?;

    let key = match state.key_store.fetch_key().await {
        Ok(Some(key)) => key,
        Ok(None) => return Err(DecryptError::KeyUnavailable),
        Err(KeyStoreError::Corrupted(detail)) => return Err(DecryptError::KeyCorrupted(detail)),
        Err(KeyStoreError::Io(e)) => return Err(DecryptError::Unexpected(e.to_string())),
    };

    // CPU-bound work goes to the blocking pool, bounded by the configured
    // timeout so a pathological payload cannot pin a request forever.
    let outcome = tokio::time::timeout(
        state.decrypt_timeout,
        tokio::task::spawn_blocking(move || cipher::decrypt(key.as_bytes(), &iv, &payload)),
    )
    .await
    .map_err(|_| DecryptError::DecryptionTimeout)?
    .map_err(|e| DecryptError::Unexpected(format!("decryption task failed: {e}")))?;

    let plaintext = outcome.map_err(|e| match e {
        CipherError::NotBlockAligned => DecryptError::MalformedCiphertext,
        CipherError::InvalidPadding => DecryptError::PaddingInvalid,
        CipherError::InvalidKeyLength => DecryptError::PrimitiveFailure(e.to_string()),
    })?;

    String::from_utf8(plaintext)
        .map_err(|e| DecryptError::Unexpected(format!("plaintext is not valid UTF-8: {e}")))
}

/// Split the request parameter into its IV and ciphertext halves.
///
/// Percent-escapes are decoded first (clients historically send the value
/// double-encoded); malformed escapes pass through as literal characters.
/// The first [`IV_HEX_LEN`] characters hex-encode the 16-byte IV; the rest
/// is the base64-encoded ciphertext.
fn parse_ciphertext(raw: &str) -> Result<([u8; IV_LEN], Vec<u8>), DecryptError> {
    let text = percent_decode_str(raw).decode_utf8_lossy();

    if text.len() < IV_HEX_LEN || !text.is_char_boundary(IV_HEX_LEN) {
        return Err(DecryptError::MalformedCiphertext);
    }
    let (iv_hex, payload_b64) = text.split_at(IV_HEX_LEN);

    let mut iv = [0u8; IV_LEN];
    hex::decode_to_slice(iv_hex, &mut iv).map_err(|_| DecryptError::MalformedCiphertext)?;

    let payload = STANDARD
        .decode(payload_b64)
        .map_err(|_| DecryptError::MalformedCiphertext)?;

    Ok((iv, payload))
}

/// Render a pipeline failure as its JSON error body and status code.
fn error_response(err: DecryptError) -> Response {
    let status =
        StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_server_error() {
        warn!(error = %err, "decrypt request failed");
    }
    (status, Json(ErrorResponse::new(err.to_string()))).into_response()
}
