use std::sync::Arc;

use salvo::conn::TcpListener;
use salvo::{Listener, Router};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

use casefile_app::app::api::routes;
use casefile_app::store_handler::{StoreHandler, Stores};
use casefile_core::config::load_config;
use casefile_db::db::connection::create_pool;
use casefile_db::db::memory::MemoryStore;
use casefile_db::db::pg::{PgStore, run_migrations};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    tracing::info!("Starting Casefile client records server");

    let config = load_config()?;

    tracing::info!(config = ?config, "Configuration loaded");

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping debug");
    }

    let stores = match config.database.url.as_deref() {
        Some(url) => {
            run_migrations(url).await?;

            let pool = create_pool(url, u32::from(config.database.max_connections)).await?;
            let store = Arc::new(PgStore::new(pool));

            tracing::info!("Database connection pool created.");

            Stores {
                clients: store.clone(),
                references: store,
            }
        }
        None => {
            tracing::warn!("No database URL configured; using the seeded in-memory store");
            let store = Arc::new(MemoryStore::seeded());
            Stores {
                clients: store.clone(),
                references: store,
            }
        }
    };

    let bind_addr = config.server.bind_addr();
    let acceptor = TcpListener::new(bind_addr.clone()).bind().await;

    let router = Router::new().hoop(StoreHandler { stores }).push(routes());

    tracing::info!("Server listening on {bind_addr}");

    salvo::Server::new(acceptor).serve(router).await;

    Ok(())
}
