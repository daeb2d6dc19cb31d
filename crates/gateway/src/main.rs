//! `decrypt-gateway` — service binary entry point.
//!
//! Startup sequence:
//! 1. Load and validate [`Config`] from environment variables.
//! 2. Initialise structured JSON logging.
//! 3. Build the [`KeyStore`] and shared application state.
//! 4. Build the Axum router and start the HTTP server.
//!
//! The symmetric key file is provisioned by an external secret-delivery
//! process before decryption traffic arrives; the gateway never writes it
//! and tolerates its absence at any point.

mod config;
mod crypto;
mod keystore;
mod server;
mod telemetry;

use anyhow::Result;
use tracing::info;

use config::Config;
use keystore::KeyStore;
use server::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = Config::from_env().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: configuration invalid: {e}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init(&cfg.log_level)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        http_port = cfg.http_port,
        key_path = %cfg.key_path,
        "decrypt-gateway starting"
    );

    // -----------------------------------------------------------------------
    // 3. Key store + shared state
    // -----------------------------------------------------------------------
    let key_store = KeyStore::new(&cfg.key_path);
    if !key_store.is_available().await {
        info!(
            key_path = %cfg.key_path,
            "symmetric key not yet provisioned; decrypt requests will fail until it appears"
        );
    }
    let state = AppState::new(key_store, cfg.decrypt_timeout());

    // -----------------------------------------------------------------------
    // 4. HTTP server
    // -----------------------------------------------------------------------
    let router = server::router::build(state);

    let addr: std::net::SocketAddr = ([0, 0, 0, 0], cfg.http_port).into();
    info!(addr = %addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
