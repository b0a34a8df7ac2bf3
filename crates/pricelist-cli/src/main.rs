mod catalog;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "pricelist-cli")]
#[command(about = "Price list catalog command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create the catalog table if it does not exist
    Init,
    /// Replace the catalog with the rows of a spreadsheet
    Import {
        /// Path to an .xlsx, .xls or .ods price list
        path: PathBuf,
        /// Validate and map the file without writing to the database
        #[arg(long)]
        dry_run: bool,
    },
    /// Show the first catalog rows
    List {
        /// Print raw JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Search SKU, product and descriptions, with discounts applied
    Search {
        query: String,
        /// Print raw JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("pricelist-cli ready; run with --help to list commands");
        return Ok(());
    };

    let config = pricelist_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    if let Commands::Import {
        path,
        dry_run: true,
    } = &command
    {
        return catalog::run_import_dry_run(path);
    }

    let pool_config = pricelist_db::PoolConfig::from_app_config(&config);
    let pool = pricelist_db::connect_pool(&config.database_url, pool_config).await?;
    pricelist_db::ensure_schema(&pool).await?;

    match command {
        Commands::Init => println!("Database initialized."),
        Commands::Import { path, .. } => catalog::run_import(&pool, &path).await?,
        Commands::List { json } => catalog::run_list(&pool, json).await?,
        Commands::Search { query, json } => {
            let discounts = match &config.discounts_path {
                Some(path) => pricelist_core::load_discounts(path)?,
                None => pricelist_core::DiscountTable::default(),
            };
            let format = pricelist_core::PriceFormat::new(config.group_separator);
            catalog::run_search(&pool, &query, &discounts, format, json).await?;
        }
    }

    pool.close().await;
    Ok(())
}

#[cfg(test)]
mod tests;
