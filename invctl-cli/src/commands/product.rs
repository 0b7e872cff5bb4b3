//! Product commands - list, get, add, update, remove

use anyhow::{bail, Context, Result};
use clap::Parser;
use invctl_core::{Database, Product, ProductRepo};

#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
pub struct GetArgs {
    /// Product id
    #[arg(required_unless_present = "sku", conflicts_with = "sku")]
    pub id: Option<i64>,

    /// Look up by SKU instead of id
    #[arg(long)]
    pub sku: Option<String>,
}

#[derive(Parser, Debug)]
pub struct AddArgs {
    /// Unique stock keeping unit (max 50 characters)
    #[arg(long)]
    pub sku: String,

    /// Display name (max 50 characters)
    #[arg(long)]
    pub name: String,

    #[arg(long, default_value = "")]
    pub description: String,

    /// Unit price
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub price: f64,

    /// Units in stock
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub quantity: i64,

    /// Reorder threshold
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub min_quantity: i64,
}

#[derive(Parser, Debug)]
pub struct UpdateArgs {
    /// Product id
    pub id: i64,

    #[arg(long)]
    pub sku: Option<String>,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long, allow_negative_numbers = true)]
    pub price: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    pub quantity: Option<i64>,

    #[arg(long, allow_negative_numbers = true)]
    pub min_quantity: Option<i64>,
}

#[derive(Parser, Debug)]
pub struct RemoveArgs {
    /// Product id
    pub id: i64,
}

pub async fn run_list(args: ListArgs, db: &mut Database) -> Result<()> {
    let products = ProductRepo::new(db.connection()?).list().await?;

    if args.json {
        let values: Vec<_> = products.iter().map(Product::to_json).collect();
        println!("{}", serde_json::to_string_pretty(&values)?);
        return Ok(());
    }

    if products.is_empty() {
        println!("No products");
        return Ok(());
    }

    println!(
        "{:>5}  {:<20} {:<30} {:>10} {:>8} {:>8}",
        "ID", "SKU", "NAME", "PRICE", "QTY", "MIN"
    );
    for p in &products {
        let flag = if p.needs_restock() { " !" } else { "" };
        println!(
            "{:>5}  {:<20} {:<30} {:>10.2} {:>8} {:>8}{}",
            p.id, p.sku, p.name, p.price, p.quantity, p.min_quantity, flag
        );
    }
    Ok(())
}

pub async fn run_get(args: GetArgs, db: &mut Database) -> Result<()> {
    let mut repo = ProductRepo::new(db.connection()?);

    let product = match (&args.sku, args.id) {
        (Some(sku), _) => repo
            .get_by_sku(sku)
            .await?
            .with_context(|| format!("No product with SKU '{}'", sku))?,
        (None, Some(id)) => repo
            .get_by_id(id)
            .await?
            .with_context(|| format!("No product with id {}", id))?,
        (None, None) => bail!("Provide a product id or --sku"),
    };

    print_product(&product)
}

pub async fn run_add(args: AddArgs, db: &mut Database) -> Result<()> {
    let mut product = Product {
        sku: args.sku,
        name: args.name,
        description: args.description,
        price: args.price,
        quantity: args.quantity,
        min_quantity: args.min_quantity,
        ..Product::default()
    };

    ProductRepo::new(db.connection()?)
        .save(&mut product)
        .await
        .context("Failed to add product")?;

    tracing::info!(id = product.id, sku = %product.sku, "Product added");
    print_product(&product)
}

pub async fn run_update(args: UpdateArgs, db: &mut Database) -> Result<()> {
    let mut repo = ProductRepo::new(db.connection()?);
    let mut product = repo
        .get_by_id(args.id)
        .await?
        .with_context(|| format!("No product with id {}", args.id))?;

    if let Some(sku) = args.sku {
        product.sku = sku;
    }
    if let Some(name) = args.name {
        product.name = name;
    }
    if let Some(description) = args.description {
        product.description = description;
    }
    if let Some(price) = args.price {
        product.price = price;
    }
    if let Some(quantity) = args.quantity {
        product.quantity = quantity;
    }
    if let Some(min_quantity) = args.min_quantity {
        product.min_quantity = min_quantity;
    }

    repo.save(&mut product)
        .await
        .with_context(|| format!("Failed to update product {}", args.id))?;

    tracing::info!(id = product.id, "Product updated");
    print_product(&product)
}

pub async fn run_remove(args: RemoveArgs, db: &mut Database) -> Result<()> {
    let mut repo = ProductRepo::new(db.connection()?);
    let mut product = repo
        .get_by_id(args.id)
        .await?
        .with_context(|| format!("No product with id {}", args.id))?;

    if !repo.remove(&mut product).await? {
        bail!("Product {} was already removed", args.id);
    }

    println!("Removed product {} ({})", args.id, product.sku);
    Ok(())
}

fn print_product(product: &Product) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&product.to_json())?);
    Ok(())
}
