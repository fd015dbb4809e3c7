//! # Strata Server
//!
//! Entry point for the Strata profile service.

use strata_config::ConfigLoader;
use strata_core::StrataResult;
use strata_server::{app::App, startup, telemetry};
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Application error: {}", e);
        eprintln!("Application error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> StrataResult<()> {
    // No subscriber exists yet; the loader's findings are logged below.
    let config_loader = ConfigLoader::from_default_location()?;

    telemetry::init_logging(&config_loader.config().observability);
    startup::print_banner();
    startup::report_config(&config_loader);

    let config = config_loader.into_config();

    info!("Starting Strata profile service...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let metrics = telemetry::init_metrics(&config.observability)?;

    let app = App::build(config.clone(), metrics).await?;
    startup::print_startup_info(&config);

    app.serve(shutdown_signal()).await?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}
