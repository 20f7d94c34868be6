//! HTTP service for the prompt editor: a small JSON document API plus the
//! embedded browser client that edits through it.

pub mod assets;
pub mod routes;
pub mod state;
pub mod store;

use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast::Receiver;
use tracing::{debug, info};

use crate::state::AppState;
use crate::store::PromptStore;

pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:3000";
pub const DEFAULT_PROMPTS_FILE: &str = "prompts.json";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_address: String,
    pub prompts_file: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            prompts_file: PathBuf::from(DEFAULT_PROMPTS_FILE),
        }
    }
}

/// Create graceful shutdown handler
async fn create_shutdown_handler(shutdown_rx: Option<Receiver<()>>) {
    if let Some(mut shutdown_rx) = shutdown_rx {
        let _ = shutdown_rx.recv().await;
    } else {
        // Handle both SIGINT (Ctrl+C) and SIGTERM
        #[cfg(unix)]
        {
            use tokio::signal::unix::{SignalKind, signal};

            let mut sigint = match signal(SignalKind::interrupt()) {
                Ok(signal) => signal,
                Err(_) => {
                    // Fall back to basic ctrl_c handler
                    match tokio::signal::ctrl_c().await {
                        Ok(()) => {
                            return;
                        }
                        Err(_) => {
                            tokio::time::sleep(tokio::time::Duration::from_secs(u64::MAX)).await;
                            return;
                        }
                    }
                }
            };

            let mut sigterm = match signal(SignalKind::terminate()) {
                Ok(signal) => signal,
                Err(_) => {
                    // Continue with just SIGINT
                    let _ = sigint.recv().await;
                    return;
                }
            };

            tokio::select! {
                _ = sigint.recv() => {
                }
                _ = sigterm.recv() => {
                }
            }
        }

        #[cfg(not(unix))]
        {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {}
                Err(e) => {
                    tracing::error!("Failed to listen for Ctrl+C signal: {}", e);
                    // Fall back to waiting indefinitely if signal handling fails
                    tokio::time::sleep(tokio::time::Duration::from_secs(u64::MAX)).await;
                    return;
                }
            }
        }
    }

    info!("Shutting down prompt editor");
}

/// Serve the editor until a termination signal arrives or `shutdown_rx`
/// fires. A pre-bound listener takes precedence over the configured bind
/// address, which lets tests run on an ephemeral port.
pub async fn start_server(
    config: ServerConfig,
    tcp_listener: Option<TcpListener>,
    shutdown_rx: Option<Receiver<()>>,
) -> Result<()> {
    let tcp_listener = if let Some(tcp_listener) = tcp_listener {
        tcp_listener
    } else {
        TcpListener::bind(config.bind_address.clone()).await?
    };
    let local_addr = tcp_listener.local_addr()?;

    let store = Arc::new(PromptStore::new(config.prompts_file));
    debug!("Editing prompts file {:?}", store.path());
    let router = routes::router(AppState::new(store));

    info!("Prompt editor running at http://{}", local_addr);

    axum::serve(tcp_listener, router)
        .with_graceful_shutdown(create_shutdown_handler(shutdown_rx))
        .await?;

    Ok(())
}
