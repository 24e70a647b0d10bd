use epl_server::{AppState, build_router, logger, reaper, settings};

use epl_db::Database;

use std::error::Error;

use log::{error, info, warn};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // .env is optional; real environment variables win
    if let Err(e) = dotenvy::dotenv()
        && !e.not_found()
    {
        eprintln!("Ignoring unreadable .env file: {}", e);
    }

    let config = epl_config::Config::load()?;
    config.validate()?;

    let log_file_path = config.log_file_path()?;
    if let Some(dir) = log_file_path.as_ref().and_then(|path| path.parent()) {
        std::fs::create_dir_all(dir)?;
    }

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting epl-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let database_path = config.database_path()?;
    info!("Connecting to database: {}", database_path.display());
    let db = Database::connect(
        &database_path,
        config.database.max_connections,
        config.database.query_timeout(),
    )
    .await?;

    let auth_settings = settings::auth_settings(&config);
    if !auth_settings.require_activation {
        warn!("Activation is not required: unactivated accounts can log in");
    }
    let state = AppState::new(db.clone(), auth_settings);

    let reaper = reaper::spawn(state.auth.clone(), reaper::DEFAULT_REAP_INTERVAL);

    let app = build_router(state);

    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr).await?;
    info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    reaper.abort();
    db.close().await;
    info!("Graceful shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received SIGINT (Ctrl+C), initiating graceful shutdown"),
        Err(e) => {
            error!("Failed to listen for SIGINT: {}", e);
            // Without a signal source, run until killed
            std::future::pending::<()>().await;
        }
    }
}
