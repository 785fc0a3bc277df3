use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use chatio_core::{DEFAULT_BACKFILL_BATCH_SIZE, DEFAULT_BACKFILL_LIMIT, env_non_empty};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "chatio", version)]
#[command(about = "Chat backend with semantic message search", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server
    Serve {
        #[arg(short, long, default_value = "3000")]
        port: u16,
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,
    },
    /// Semantic search over stored messages, printed as JSON
    Search {
        query: String,
        #[arg(short, long)]
        limit: Option<usize>,
        #[arg(short, long)]
        threshold: Option<f64>,
    },
    /// Generate embeddings for messages that lack them
    Backfill {
        #[arg(short, long, default_value_t = DEFAULT_BACKFILL_BATCH_SIZE)]
        batch_size: usize,
        #[arg(short, long, default_value_t = DEFAULT_BACKFILL_LIMIT)]
        limit: usize,
    },
    /// Print which search strategy the database supports
    Probe,
}

pub(crate) fn database_url() -> Result<String> {
    env_non_empty("DATABASE_URL").context("DATABASE_URL environment variable must be set")
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so JSON printed by `search` and `backfill` stays parseable.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port, host } => commands::serve::run(port, host).await?,
        Commands::Search { query, limit, threshold } => {
            commands::search::run_search(query, limit, threshold).await?;
        },
        Commands::Backfill { batch_size, limit } => {
            commands::backfill::run_backfill(batch_size, limit).await?;
        },
        Commands::Probe => commands::probe::run_probe().await?,
    }

    Ok(())
}
