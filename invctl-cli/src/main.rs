//! invctl CLI - product inventory on a local SQLite file
//!
//! Opens (and on first use migrates) the database, runs one command, and
//! closes the database again.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use invctl_core::config::DatabaseConfig;
use invctl_core::{Database, InventoryConfig};
use tracing::info;

mod commands;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "invctl",
    author,
    version,
    about = "Track products and stock levels in a local SQLite database"
)]
struct Cli {
    /// Config file (default: ~/.invctl/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Database file (overrides config)
    #[arg(long, global = true, env = "INVCTL_DB", value_name = "PATH")]
    db: Option<PathBuf>,

    /// Schema migration script (overrides config)
    #[arg(long, global = true, env = "INVCTL_MIGRATIONS", value_name = "PATH")]
    migrations: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create the database and apply the schema
    Init,
    /// List all products, ordered by name
    List(commands::product::ListArgs),
    /// Show one product by id or SKU
    Get(commands::product::GetArgs),
    /// Add a new product
    Add(commands::product::AddArgs),
    /// Change fields of an existing product
    Update(commands::product::UpdateArgs),
    /// Delete a product by id
    Remove(commands::product::RemoveArgs),
    /// Save products from a JSON file
    Import(commands::transfer::ImportArgs),
    /// Write all products as JSON
    Export(commands::transfer::ExportArgs),
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = InventoryConfig::load(cli.config.as_deref()).context("Failed to load config")?;

    tracing_setup::init(&tracing_setup::TracingConfig {
        debug: cli.debug,
        default_level: config.logging.level.clone(),
    })
    .ok();

    let db_path = cli.db.clone().unwrap_or(config.database.path);
    let script = cli
        .migrations
        .clone()
        .unwrap_or(config.database.migration_script);

    ensure_default_dir(&db_path)?;

    let mut db = Database::with_migration_script(script);
    db.initialize(&db_path)
        .await
        .with_context(|| format!("Failed to open database {}", db_path.display()))?;

    let result = run(cli.command, &mut db).await;

    db.close().await.context("Failed to close database")?;
    result
}

async fn run(command: Commands, db: &mut Database) -> Result<()> {
    match command {
        Commands::Init => {
            let path = db.path().context("Database is not open")?;
            info!("Database ready at {}", path.display());
            println!("{}", path.display());
        }
        Commands::List(args) => commands::run_list(args, db).await?,
        Commands::Get(args) => commands::run_get(args, db).await?,
        Commands::Add(args) => commands::run_add(args, db).await?,
        Commands::Update(args) => commands::run_update(args, db).await?,
        Commands::Remove(args) => commands::run_remove(args, db).await?,
        Commands::Import(args) => commands::run_import(args, db).await?,
        Commands::Export(args) => commands::run_export(args, db).await?,
    }
    Ok(())
}

/// Create ~/.invctl when the database lives at its default location
fn ensure_default_dir(db_path: &Path) -> Result<()> {
    if db_path != DatabaseConfig::default().path {
        return Ok(());
    }

    if let Some(parent) = db_path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
            info!("Created data directory: {}", parent.display());
        }
    }
    Ok(())
}
