use clap::Parser;
use tracing_subscriber::EnvFilter;

use hrdocs_api::cli::{self, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so DATABASE_URL and HRDOCS_* reach the config
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("hrdocs_api=info,tower_http=info")),
        )
        .init();

    cli::run(Cli::parse()).await
}
