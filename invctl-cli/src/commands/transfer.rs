//! Import/export of products as JSON
//!
//! Import accepts a single product object or an array of them. Each record is
//! saved independently: a record with `"id": 0` (or no id) is inserted, any
//! other id updates that row.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use invctl_core::{Database, Product, ProductRepo};
use serde_json::Value;

#[derive(Parser, Debug)]
pub struct ImportArgs {
    /// JSON file with a product object or an array of products
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

#[derive(Parser, Debug)]
pub struct ExportArgs {
    /// Write to this file instead of stdout
    #[arg(long = "out", value_name = "PATH")]
    pub output: Option<PathBuf>,
}

pub async fn run_import(args: ImportArgs, db: &mut Database) -> Result<()> {
    let content = fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("Invalid JSON in {}", args.file.display()))?;

    let records = match value {
        Value::Array(items) => items,
        object @ Value::Object(_) => vec![object],
        _ => bail!("Expected a product object or an array of products"),
    };

    let mut repo = ProductRepo::new(db.connection()?);
    let total = records.len();
    let mut failed = 0usize;

    for (index, record) in records.iter().enumerate() {
        let outcome = match Product::from_json(record) {
            Ok(mut product) => repo.save(&mut product).await.map(|()| product),
            Err(err) => Err(err),
        };

        match outcome {
            Ok(product) => {
                tracing::debug!(index, id = product.id, sku = %product.sku, "Imported product");
            }
            Err(err) => {
                failed += 1;
                tracing::warn!(index, "Skipping record: {}", err);
            }
        }
    }

    println!("Imported {} of {} products", total - failed, total);
    if failed > 0 {
        bail!("{} of {} products failed to import", failed, total);
    }
    Ok(())
}

pub async fn run_export(args: ExportArgs, db: &mut Database) -> Result<()> {
    let products = ProductRepo::new(db.connection()?).list().await?;
    let values: Vec<_> = products.iter().map(Product::to_json).collect();
    let json = serde_json::to_string_pretty(&values)?;

    match args.output {
        Some(path) => {
            fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Exported {} products to {}", values.len(), path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}
