use ident_server::{AppState, build_router, logger};

use std::error::Error;

use log::{error, info};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // .env is optional; real environment wins
    dotenvy::dotenv().ok();

    // Load and validate configuration. Missing secrets stop here.
    let config = ident_config::Config::load()?;
    config.validate()?;

    // Construct log file path if configured
    let log_file_path: Option<std::path::PathBuf> = if let Some(ref filename) = config.logging.file
    {
        let config_dir = ident_config::Config::config_dir()?;
        let log_dir = config_dir.join(&config.logging.dir);

        std::fs::create_dir_all(&log_dir)?;

        Some(log_dir.join(filename))
    } else {
        None
    };

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting ident-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    // Open the identity store and apply the schema before accepting traffic
    let database_path = config.database_path()?;
    info!("Connecting to database: {}", database_path.display());
    let pool = ident_db::connect(
        &database_path,
        config.database.max_connections,
        config.database.timeout(),
    )
    .await?;

    // Session store, token service and provider, in that order
    let app_state = AppState::from_config(&config, pool)?;
    let app = build_router(app_state);

    let listener = TcpListener::bind(config.bind_addr()).await?;
    let actual_addr = listener.local_addr()?;
    info!("Server listening on {}", actual_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => info!("Received SIGINT (Ctrl+C), shutting down"),
                Err(e) => error!("Failed to listen for SIGINT: {}", e),
            }
        })
        .await?;

    info!("Graceful shutdown complete");
    Ok(())
}
