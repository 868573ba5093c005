//! OCPP Central System entry point.
//!
//! Runs database migrations, then starts the OCPP WebSocket server and the
//! heartbeat monitor, shutting both down gracefully on SIGTERM/SIGINT.

use std::sync::Arc;

use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use texnouz_ocpp::application::services::{ChargePointService, HeartbeatMonitor};
use texnouz_ocpp::domain::RepositoryProvider;
use texnouz_ocpp::infrastructure::database::migrator::Migrator;
use texnouz_ocpp::support::shutdown::ShutdownCoordinator;
use texnouz_ocpp::{create_event_bus, init_database, Config, DatabaseConfig, OcppServer, SeaOrmRepositoryProvider};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Starting OCPP Central System...");

    let prometheus_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus metrics recorder");
    let _ = prometheus_handle;
    info!("Prometheus metrics recorder installed");

    let config = Config::new(
        std::env::var("OCPP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
        std::env::var("OCPP_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(9000),
    );

    let db_config = DatabaseConfig::from_env();
    info!("Database: {}", db_config.url);

    let db = match init_database(&db_config).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    info!("Running database migrations...");
    if let Err(e) = Migrator::up(&db, None).await {
        error!("Failed to run migrations: {}", e);
        return Err(e.into());
    }
    info!("Migrations completed");

    let repos: Arc<dyn RepositoryProvider> = Arc::new(SeaOrmRepositoryProvider::new(db.clone()));
    let service = Arc::new(ChargePointService::new(repos.clone()));
    let event_bus = create_event_bus();
    info!("Event bus initialized");

    let shutdown = ShutdownCoordinator::new(30);
    let shutdown_signal = shutdown.signal();
    shutdown.start_signal_listener();

    let server = OcppServer::new(config, service, event_bus)
        .with_shutdown(shutdown_signal.clone());

    let heartbeat_monitor = Arc::new(HeartbeatMonitor::new(
        repos.clone(),
        server.get_session_registry(),
    ));
    heartbeat_monitor.start(shutdown_signal.clone());

    info!("OCPP Central System ready. Press Ctrl+C to shut down gracefully.");

    if let Err(e) = server.run().await {
        error!("WebSocket server error: {}", e);
    }

    info!("Performing final cleanup...");
    if let Err(e) = db.close().await {
        warn!("Error closing database connection: {}", e);
    } else {
        info!("Database connection closed");
    }

    info!("OCPP Central System shutdown complete");
    Ok(())
}
