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

use exercise_tracker::api::MgmtState;
use exercise_tracker::config::Config;
use exercise_tracker::services::exercise_service::ExerciseService;
use exercise_tracker::services::health_service::HealthService;
use exercise_tracker::telemetry;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::Instrument;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load();
    let telemetry_guard = telemetry::init_telemetry(&config.telemetry)?;

    exercise_tracker::setup_panic_hook();

    let boot_span = tracing::info_span!("boot_server");
    let (store, api_listener, mgmt_listener, app_router, mgmt_app) = async {
        let store = exercise_tracker::init_store(&config).await?;

        let exercise_service = ExerciseService::new(Arc::clone(&store));
        let health_service = HealthService::new(Arc::clone(&store), config.health.clone());

        let app_router = exercise_tracker::api::app_router(&config, exercise_service);
        let mgmt_app = exercise_tracker::api::mgmt_router(MgmtState { health_service });

        let api_addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
        let mgmt_addr: SocketAddr = format!("{}:{}", config.server.host, config.server.mgmt_port).parse()?;

        let api_listener = tokio::net::TcpListener::bind(api_addr).await?;
        let mgmt_listener = tokio::net::TcpListener::bind(mgmt_addr).await?;

        tracing::info!(address = %api_listener.local_addr()?, "listening");
        tracing::info!(address = %mgmt_listener.local_addr()?, "management server listening");

        Ok::<_, anyhow::Error>((store, api_listener, mgmt_listener, app_router, mgmt_app))
    }
    .instrument(boot_span)
    .await?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    exercise_tracker::spawn_signal_handler(shutdown_tx.clone());

    let mut api_rx = shutdown_rx.clone();
    let api_server = axum::serve(api_listener, app_router).with_graceful_shutdown(async move {
        let _ = api_rx.wait_for(|&s| s).await;
    });

    let mut mgmt_rx = shutdown_rx.clone();
    let mgmt_server = axum::serve(mgmt_listener, mgmt_app).with_graceful_shutdown(async move {
        let _ = mgmt_rx.wait_for(|&s| s).await;
    });

    if let Err(e) = tokio::try_join!(api_server, mgmt_server) {
        tracing::error!(error = %e, "Server error");
    }

    // Covers the case where one server failed and the other is still draining.
    let _ = shutdown_tx.send(true);

    if tokio::time::timeout(Duration::from_secs(config.server.shutdown_timeout_secs), store.close()).await.is_err() {
        tracing::warn!("Timeout waiting for the user store to close.");
    }

    telemetry_guard.shutdown();
    Ok(())
}
