use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use bloglist_api::config::AppConfig;
use bloglist_api::database::{MemoryStore, PgStore, Store};
use bloglist_api::AppState;

#[derive(Parser)]
#[command(name = "bloglist-api")]
#[command(about = "Blog list REST API server")]
#[command(version)]
struct Cli {
    #[arg(long, help = "Port to listen on (overrides PORT)")]
    port: Option<u16>,

    #[arg(long, help = "Keep data in memory instead of PostgreSQL")]
    in_memory: bool,

    #[arg(long, help = "Do not create missing tables on startup")]
    skip_migrate: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("bloglist_api=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::from_env();
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    config.validate()?;
    tracing::info!("Starting blog list API in {:?} mode", config.environment);

    let store: Arc<dyn Store> = if cli.in_memory {
        tracing::warn!("Using in-memory store; data is lost on exit");
        Arc::new(MemoryStore::new())
    } else {
        let store = PgStore::connect(&config.database)
            .await
            .context("failed to connect to database")?;
        if !cli.skip_migrate {
            store.migrate().await.context("failed to migrate database")?;
        }
        Arc::new(store)
    };

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    bloglist_api::serve(listener, AppState::new(config, store)).await?;
    Ok(())
}
