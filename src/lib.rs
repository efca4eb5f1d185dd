#![forbid(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::todo)]
#![warn(clippy::panic)]
#![warn(clippy::dbg_macro)]
#![warn(clippy::print_stdout)]
#![warn(clippy::print_stderr)]
#![warn(clippy::clone_on_ref_ptr)]
#![warn(unreachable_pub)]
#![warn(missing_debug_implementations)]
#![warn(unused_qualifications)]
#![deny(unused_must_use)]

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod services;
pub mod storage;
pub mod telemetry;

use crate::api::{AppState, MgmtState};
use crate::config::{Config, StorageBackend};
use crate::services::health_service::HealthService;
use crate::services::message_service::MessageService;
use crate::storage::{InMemoryMessageStore, MessageStore, ValkeyMessageStore};
use std::sync::Arc;
use tokio::sync::watch;

/// Wired application state for both routers.
#[derive(Debug, Clone)]
pub struct App {
    pub state: AppState,
    pub mgmt_state: MgmtState,
}

impl App {
    /// Wires the services over an already constructed store.
    #[must_use]
    pub fn with_store(config: &Config, store: Arc<dyn MessageStore>) -> Self {
        let message_service = MessageService::new(Arc::clone(&store), config.messaging.clone());
        let health_service = HealthService::new(store);
        Self { state: AppState { message_service }, mgmt_state: MgmtState { health_service } }
    }
}

/// Builds the message store selected by the configuration.
///
/// # Errors
/// Returns an error if the Valkey backend cannot be reached.
pub async fn build_store(config: &Config) -> anyhow::Result<Arc<dyn MessageStore>> {
    match config.storage.backend {
        StorageBackend::Valkey => Ok(Arc::new(ValkeyMessageStore::connect(&config.valkey).await?)),
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; messages will be lost on restart");
            Ok(Arc::new(InMemoryMessageStore::new()))
        }
    }
}

/// Routes panics through tracing so they reach structured logs.
pub fn setup_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let location = info.location().map(ToString::to_string).unwrap_or_default();
        let payload = info
            .payload()
            .downcast_ref::<&str>()
            .map(ToString::to_string)
            .or_else(|| info.payload().downcast_ref::<String>().cloned())
            .unwrap_or_default();
        tracing::error!(%location, %payload, "panic");
    }));
}

/// Flips the shutdown channel on SIGINT or SIGTERM.
pub fn spawn_signal_handler(shutdown_tx: watch::Sender<bool>) {
    tokio::spawn(async move {
        let ctrl_c = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
            }
        };

        #[cfg(unix)]
        let terminate = async {
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(mut signal) => {
                    signal.recv().await;
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to install SIGTERM handler");
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            () = ctrl_c => {},
            () = terminate => {},
        }

        tracing::info!("Shutdown signal received");
        let _ = shutdown_tx.send(true);
    });
}
