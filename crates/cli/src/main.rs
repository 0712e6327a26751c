//! Shopify Collections CLI - one-shot collection fetches.
//!
//! # Usage
//!
//! ```bash
//! # Print the simplified document for the frontpage collection
//! shopify-collections fetch frontpage
//!
//! # Fetch products one at a time
//! shopify-collections fetch frontpage --concurrency 1
//! ```
//!
//! # Commands
//!
//! - `fetch` - Aggregate a collection and print it as JSON

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::num::NonZeroUsize;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "shopify-collections")]
#[command(author, version, about = "Shopify collections adapter CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a collection with its products and print it as JSON
    Fetch {
        /// Collection handle (e.g. `frontpage`)
        handle: String,

        /// Maximum number of product fetches in flight
        #[arg(short, long, default_value = "4")]
        concurrency: NonZeroUsize,
    },
}

#[tokio::main]
async fn main() {
    // Logs go to stderr so stdout stays pure JSON
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Fetch {
            handle,
            concurrency,
        } => commands::fetch::collection(&handle, concurrency).await?,
    }
    Ok(())
}
