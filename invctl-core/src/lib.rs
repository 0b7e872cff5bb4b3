//! invctl-core: product inventory storage
//!
//! A single `products` table in SQLite, bootstrapped from one migration
//! script, with upsert-by-id persistence and field validation.

pub mod config;
pub mod db;
pub mod error;
pub mod models;

pub use config::InventoryConfig;
pub use db::{CloseStatus, Database, ProductRepo};
pub use error::{InventoryError, Result};
pub use models::{Product, ValidationError};
