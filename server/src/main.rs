use std::{fs::OpenOptions, sync::{Arc, Mutex}};

use kayak_trips_data_management::DataManager;
use kayak_trips_server::{config::ServerConfig, routes, server_state::ServerState};
use tokio::{net::TcpListener, signal};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::load()?;

    let file_layer = match &config.server.log_file {
        Some(log_file) => {
            if let Some(dir) = log_file.parent() {
                std::fs::create_dir_all(dir)?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_file)?;
            Some(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| format!("{}=debug,kayak_trips_data_management=info,tower_http=info", env!("CARGO_CRATE_NAME")).into())
        )
        .with(tracing_subscriber::fmt::layer())
        .with(file_layer)
        .init();

    tracing::info!("Starting server...");

    let data_manager = DataManager::start(&config.database).await?;
    if let Some(trip_id) = data_manager.seed_if_empty().await? {
        tracing::info!("Stored demonstration trip {}", trip_id);
    }

    let server_state = Arc::new(ServerState {
        data_manager: data_manager.clone(),
    });

    let app = routes::router(server_state, config.server.static_dir.as_deref());

    let listener = TcpListener::bind(config.server.bind).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    data_manager.close().await;
    served?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Received shutdown signal");
}
