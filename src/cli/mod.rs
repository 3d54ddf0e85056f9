pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;

#[derive(Parser)]
#[command(name = "hrdocs")]
#[command(about = "HR directory and document comments API server")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[arg(long, global = true, help = "SQLite database URL, overrides DATABASE_URL")]
    pub database_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve {
        #[arg(long, short, help = "Port to listen on")]
        port: Option<u16>,

        #[arg(long, help = "Address to bind")]
        host: Option<String>,
    },

    #[command(about = "Create the database schema")]
    Init,

    #[command(about = "Seed the database from fixture files")]
    Fixture {
        #[command(subcommand)]
        cmd: commands::fixture::FixtureCommands,
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    let mut config = AppConfig::from_env();
    if let Some(url) = cli.database_url {
        config.database.url = url;
    }

    match cli.command.unwrap_or(Commands::Serve { port: None, host: None }) {
        Commands::Serve { port, host } => {
            if let Some(port) = port {
                config.api.port = port;
            }
            if let Some(host) = host {
                config.api.host = host;
            }
            commands::serve::handle(config).await
        }
        Commands::Init => commands::init::handle(config, output_format).await,
        Commands::Fixture { cmd } => commands::fixture::handle(cmd, config, output_format).await,
    }
}
