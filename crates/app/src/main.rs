//! Cafeteria Simulation - Main Entry Point
//! Five customers, one barista, one FIFO order channel

mod logging;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use cafeteria_core::application::{shutdown_channel, Simulation, SimulationConfig};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize logging (stderr)
    logging::init_logging()?;
    info!(
        core = cafeteria_core::VERSION,
        "Cafeteria simulation v{} starting...",
        VERSION
    );

    // 2. Build the simulation (fixed parameters, no external configuration)
    let simulation = Simulation::with_defaults(SimulationConfig::default())
        .context("Simulation setup failed")?;
    let config = simulation.config();
    info!(
        customers = config.customers,
        preparation_ms = config.preparation_time.as_millis() as u64,
        timeout_ms = config.overall_timeout.as_millis() as u64,
        "Simulation configured"
    );

    // 3. Ctrl+C cancels the run like the overall timeout does
    let (shutdown_tx, shutdown_rx) = shutdown_channel();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Shutdown signal received. Closing the cafeteria...");
                shutdown_tx.shutdown();
            }
            Err(e) => warn!(error = %e, "Failed to listen for Ctrl+C"),
        }
    });

    // 4. Run to completion, timeout, or Ctrl+C
    let report = simulation.run_until(shutdown_rx).await?;

    debug!(
        report = %serde_json::to_string(&report).context("Failed to serialize report")?,
        "Simulation report"
    );
    if !report.all_served() {
        warn!(
            expected = report.expected_orders,
            served = report.orders_served(),
            "Not every order was served"
        );
    }

    info!("Shutdown complete.");
    Ok(())
}
