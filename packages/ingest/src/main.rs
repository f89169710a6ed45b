#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the Pokémon ingestion tool.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use poke_loader_ingest::config::IngestConfig;
use poke_loader_ingest::processor::ItemProcessor;
use poke_loader_ingest::{open_store, runner_from_config};

#[derive(Parser)]
#[command(name = "poke_loader_ingest", about = "Pokémon ingestion tool")]
struct Cli {
    /// Path to the `SQLite` document store (overrides `POKE_LOADER_DB_PATH`)
    #[arg(long, global = true)]
    db: Option<PathBuf>,
    /// Collection to read and write (overrides `POKE_LOADER_COLLECTION`)
    #[arg(long, global = true)]
    collection: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load every URL in the URL list into the document store
    Run {
        /// Newline-delimited URL list (overrides `POKE_LOADER_URLS_FILE`)
        #[arg(long)]
        urls: Option<PathBuf>,
        /// Per-request timeout in seconds (overrides `POKE_LOADER_TIMEOUT_SECS`)
        #[arg(long)]
        timeout_secs: Option<u64>,
    },
    /// Load a single URL into the document store
    Process {
        /// Resource URL (e.g., "<https://pokeapi.co/api/v2/pokemon/1>")
        url: String,
        /// Per-request timeout in seconds (overrides `POKE_LOADER_TIMEOUT_SECS`)
        #[arg(long)]
        timeout_secs: Option<u64>,
    },
    /// Print the stored document for a Pokémon ID
    Show {
        /// Pokémon ID (the document key)
        id: i64,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let mut config = IngestConfig::from_env();
    if let Some(db) = cli.db {
        config = config.with_db_path(db);
    }
    if let Some(collection) = cli.collection {
        config = config.with_collection(collection);
    }

    match cli.command {
        Commands::Run { urls, timeout_secs } => {
            if let Some(urls) = urls {
                config = config.with_urls_file(urls);
            }
            if let Some(secs) = timeout_secs {
                config = config.with_timeout(Duration::from_secs(secs));
            }

            let store = open_store(&config).await?;
            let runner = runner_from_config(&config, store)?;
            let response = runner.run().await;

            println!("{}", response.message);
            if !response.is_success() {
                return Err(response.message.into());
            }
        }
        Commands::Process { url, timeout_secs } => {
            if let Some(secs) = timeout_secs {
                config = config.with_timeout(Duration::from_secs(secs));
            }

            let store = open_store(&config).await?;
            let processor = ItemProcessor::from_config(&config, store)?;
            let pokemon = processor.try_process(&url).await?;

            println!(
                "Saved {} (ID: {}) to '{}'",
                pokemon.display_name(),
                pokemon.id,
                processor.collection()
            );
        }
        Commands::Show { id } => {
            let store = open_store(&config).await?;
            let document = store
                .get(&config.collection, &id.to_string())
                .await?
                .ok_or_else(|| format!("No document with ID {id} in '{}'", config.collection))?;

            println!("{}", serde_json::to_string_pretty(&document)?);
        }
    }

    Ok(())
}
