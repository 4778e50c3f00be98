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

pub mod adapters;
pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod services;
pub mod telemetry;

use crate::adapters::{MemoryUserStore, PgUserStore, UserStore, database};
use crate::config::{Config, StoreKind};
use anyhow::Context;
use std::sync::Arc;
use tokio::sync::watch;

/// Opens the configured user store. For Postgres this connects the pool and applies migrations.
///
/// # Errors
/// Returns an error if the database URL is missing, the connection fails, or a migration fails.
pub async fn init_store(config: &Config) -> anyhow::Result<Arc<dyn UserStore>> {
    match config.store {
        StoreKind::Postgres => {
            let url = config
                .database_url
                .as_deref()
                .context("--database-url (EXERCISE_DATABASE_URL) is required for the postgres store")?;
            let pool = database::init_pool(url, &config.database).await.context("connecting to database")?;
            database::run_migrations(&pool).await.context("running migrations")?;
            tracing::info!("Connected to Postgres user store");
            Ok(Arc::new(PgUserStore::new(pool)))
        }
        StoreKind::Memory => {
            tracing::warn!("Using in-memory user store; data will not survive a restart");
            Ok(Arc::new(MemoryUserStore::new()))
        }
    }
}

/// Routes panics through `tracing` so they reach the configured log sink.
pub fn setup_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let location = info.location().map(ToString::to_string).unwrap_or_default();
        let payload = info
            .payload()
            .downcast_ref::<&str>()
            .map(ToString::to_string)
            .or_else(|| info.payload().downcast_ref::<String>().cloned())
            .unwrap_or_default();
        tracing::error!(panic.location = %location, panic.payload = %payload, "Panic occurred");
    }));
}

/// Flips `shutdown_tx` to `true` on ctrl-c or SIGTERM.
pub fn spawn_signal_handler(shutdown_tx: watch::Sender<bool>) {
    tokio::spawn(async move {
        let ctrl_c = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
                std::future::pending::<()>().await;
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
            () = ctrl_c => tracing::info!("Received ctrl-c, shutting down"),
            () = terminate => tracing::info!("Received SIGTERM, shutting down"),
        }

        let _ = shutdown_tx.send(true);
    });
}
