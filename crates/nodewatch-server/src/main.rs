//! Main entry point for Nodewatch.
//!
//! Connects to the local mesh participant, starts the health endpoint and runs
//! the monitor loop until Ctrl+C or SIGTERM.

use std::sync::Arc;

use anyhow::Context;
use nodewatch_client::{HttpParticipant, RegistryClient};
use nodewatch_monitor::{Monitor, ShutdownSignal, shutdown_on_signal};
use nodewatch_server::{
    api::health::{BuildInfo, HealthState},
    model::config::Configuration,
    startup,
};
use tracing::{error, info, warn};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let configuration = Configuration::new()?;
    let _logging_guard = startup::init_logging(&configuration.logging_config())?;

    let monitor_config = configuration.monitor_config()?;
    let registry = RegistryClient::new(configuration.registry_client_config()?)
        .context("Failed to build registry client")?;
    info!(
        registry = %registry.base_url(),
        service_type = %registry.service_type(),
        public_key = %monitor_config.identity.public_key,
        "Nodewatch starting"
    );

    // Without the participant nothing can be probed
    let participant =
        match HttpParticipant::connect(configuration.participant_client_config()).await {
            Ok(participant) => Arc::new(participant),
            Err(e) => {
                error!(error = %e, "Failed to connect to mesh participant");
                return Err(e.into());
            }
        };

    let shutdown = ShutdownSignal::new();
    shutdown_on_signal(shutdown.clone());

    let address = configuration.bind_address();
    let server = startup::health_server(HealthState::new(BuildInfo::current()), &address)
        .with_context(|| format!("Failed to bind health server on {}", address))?;
    let server_handle = server.handle();
    info!("Health endpoint listening on {}", address);
    let server_task = actix_web::rt::spawn(server);

    let monitor = Monitor::new(monitor_config, registry, participant);
    let monitor_shutdown = shutdown.clone();
    let monitor_task = actix_web::rt::spawn(async move { monitor.run(monitor_shutdown).await });

    shutdown.wait().await;

    info!("Stopping health server...");
    server_handle.stop(true).await;
    match server_task.await {
        Ok(Err(e)) => warn!("Health server error: {}", e),
        Err(e) => warn!("Health server task failed: {}", e),
        Ok(Ok(())) => {}
    }

    info!("Waiting for the monitor to reach the end of its cycle...");
    if let Err(e) = monitor_task.await {
        error!("Monitor task failed: {}", e);
    }

    info!("Nodewatch shutdown complete");
    Ok(())
}
