//! Vitrine CLI - Catalog inspection and data checks.
//!
//! # Usage
//!
//! ```bash
//! # List brands from the bundled datasets
//! vitrine-cli brands
//!
//! # List products of brand 1, after the extended upgrade
//! vitrine-cli products --brand 1 --extended
//!
//! # Validate a data directory
//! vitrine-cli --data-dir ./data check
//! ```
//!
//! # Commands
//!
//! - `brands` - List brands
//! - `products` - List products, optionally filtered by brand
//! - `check` - Validate the datasets and report duplicate IDs

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use vitrine_core::BrandId;

mod commands;

#[derive(Parser)]
#[command(name = "vitrine-cli")]
#[command(author, version, about = "Vitrine CLI tools")]
struct Cli {
    /// Directory holding the JSON datasets (default: bundled data)
    #[arg(long, global = true, env = "STOREFRONT_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List brands
    Brands,
    /// List products
    Products {
        /// Only show products of this brand
        #[arg(short, long)]
        brand: Option<BrandId>,

        /// Upgrade to the extended product list first
        #[arg(short, long)]
        extended: bool,
    },
    /// Validate the datasets
    Check,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    let source = commands::source(cli.data_dir);

    let lines = match cli.command {
        Commands::Brands => commands::catalog::brands(source).await?,
        Commands::Products { brand, extended } => {
            commands::catalog::products(source, brand, extended).await?
        }
        Commands::Check => {
            let report = commands::check::check(source.as_ref()).await?;
            let lines = report.lines();
            if !report.is_ok() {
                commands::print(&lines);
                return Err(commands::CommandError::CheckFailed(report.problems()));
            }
            lines
        }
    };

    commands::print(&lines);
    Ok(())
}
