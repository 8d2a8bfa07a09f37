use clap::Parser;
use std::sync::Arc;
use tracing::info;

use marquee::config::Config;
use marquee::logging;
use marquee::router::app_router;
use marquee::state::AppState;
use marquee::store::Store;

#[derive(Parser)]
#[command(name = "marquee")]
#[command(about = "Booking directory for music venues, artists, and shows")]
#[command(version = "0.1.0")]
struct Cli {
    /// Port to listen on (overrides config.toml and PORT)
    #[arg(long)]
    port: Option<u16>,

    /// Path to the SQLite database file (overrides config.toml and DATABASE_PATH)
    #[arg(long)]
    database: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();
    let mut config = Config::load()?;
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(database) = cli.database {
        config.database.path = database;
    }

    info!("Opening database at {}", config.database.path);
    let store = Store::open(&config.database.path)?;

    let app = app_router(AppState {
        store: Arc::new(store),
    });

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!(
        "Web server listening on {} (visit http://127.0.0.1:{})",
        bind_addr, config.server.port
    );
    axum::serve(listener, app).await?;

    Ok(())
}
