//! Product repository
//!
//! - save: upsert by sentinel id (0 = INSERT, otherwise UPDATE)
//! - SKU uniqueness comes from the schema; conflicts are mapped, not pre-checked
//! - each call prepares and releases its own statement

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};

use crate::error::{InventoryError, Result};
use crate::models::{Product, UNSAVED_ID};

const SELECT_COLUMNS: &str =
    "SELECT id, sku, name, description, price, quantity, min_quantity FROM products";

/// Product repository over a borrowed connection
pub struct ProductRepo<'a> {
    conn: &'a mut SqliteConnection,
}

impl<'a> ProductRepo<'a> {
    pub fn new(conn: &'a mut SqliteConnection) -> Self {
        Self { conn }
    }

    /// All products, ordered by name.
    pub async fn list(&mut self) -> Result<Vec<Product>> {
        let sql = format!("{SELECT_COLUMNS} ORDER BY name");
        let rows = sqlx::query(&sql)
            .fetch_all(&mut *self.conn)
            .await
            .map_err(|e| query_failed("list", e))?;

        rows.iter()
            .map(|row| product_from_row(row).map_err(|e| query_failed("list", e)))
            .collect()
    }

    /// Look up a product by id.
    pub async fn get_by_id(&mut self, id: i64) -> Result<Option<Product>> {
        let sql = format!("{SELECT_COLUMNS} WHERE id = ?");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&mut *self.conn)
            .await
            .map_err(|e| query_failed("get_by_id", e))?;

        row.as_ref()
            .map(product_from_row)
            .transpose()
            .map_err(|e| query_failed("get_by_id", e))
    }

    /// Look up a product by SKU.
    pub async fn get_by_sku(&mut self, sku: &str) -> Result<Option<Product>> {
        let sql = format!("{SELECT_COLUMNS} WHERE sku = ?");
        let row = sqlx::query(&sql)
            .bind(sku)
            .fetch_optional(&mut *self.conn)
            .await
            .map_err(|e| query_failed("get_by_sku", e))?;

        row.as_ref()
            .map(product_from_row)
            .transpose()
            .map_err(|e| query_failed("get_by_sku", e))
    }

    /// Number of stored products
    pub async fn count(&mut self) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM products")
            .fetch_one(&mut *self.conn)
            .await
            .map_err(|e| query_failed("count", e))?;
        Ok(row.try_get("count")?)
    }

    /// Insert or update `product`, depending on whether its id is the sentinel.
    ///
    /// On insert the storage-assigned id is written back into `product.id`.
    ///
    /// # Errors
    ///
    /// - [`InventoryError::Validation`] before any storage access
    /// - [`InventoryError::DuplicateSku`] on a unique constraint conflict
    /// - [`InventoryError::NotFound`] if an update matches no row
    pub async fn save(&mut self, product: &mut Product) -> Result<()> {
        if let Err(err) = product.validate() {
            tracing::warn!(sku = %product.sku, "Validation error: {}", err);
            return Err(err.into());
        }

        if product.id == UNSAVED_ID {
            self.insert(product).await
        } else {
            self.update(product).await
        }
    }

    async fn insert(&mut self, product: &mut Product) -> Result<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO products (sku, name, description, price, quantity, min_quantity)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&product.sku)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.quantity)
        .bind(product.min_quantity)
        .execute(&mut *self.conn)
        .await
        .map_err(|e| write_failed("INSERT", &product.sku, e))?;

        product.id = result.last_insert_rowid();
        tracing::debug!(id = product.id, sku = %product.sku, "Inserted product");
        Ok(())
    }

    async fn update(&mut self, product: &Product) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE products
            SET sku = ?, name = ?, description = ?, price = ?, quantity = ?, min_quantity = ?,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = ?
            "#,
        )
        .bind(&product.sku)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.quantity)
        .bind(product.min_quantity)
        .bind(product.id)
        .execute(&mut *self.conn)
        .await
        .map_err(|e| write_failed("UPDATE", &product.sku, e))?;

        if result.rows_affected() == 0 {
            tracing::error!(id = product.id, "UPDATE error: no such product");
            return Err(InventoryError::NotFound { id: product.id });
        }

        tracing::debug!(id = product.id, sku = %product.sku, "Updated product");
        Ok(())
    }

    /// Delete `product` by id and reset its id to the sentinel.
    ///
    /// Returns `false` without touching storage for an unsaved product. When
    /// no row matched the id, returns `false` and leaves `product.id` as is.
    pub async fn remove(&mut self, product: &mut Product) -> Result<bool> {
        if product.id == UNSAVED_ID {
            return Ok(false);
        }

        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(product.id)
            .execute(&mut *self.conn)
            .await
            .map_err(|e| {
                tracing::error!(id = product.id, "DELETE error: {}", e);
                InventoryError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            tracing::warn!(id = product.id, "DELETE matched no product");
            return Ok(false);
        }

        tracing::debug!(id = product.id, "Deleted product");
        product.id = UNSAVED_ID;
        Ok(true)
    }
}

fn product_from_row(row: &SqliteRow) -> std::result::Result<Product, sqlx::Error> {
    Ok(Product {
        id: row.try_get("id")?,
        sku: row.try_get("sku")?,
        name: row.try_get("name")?,
        description: row
            .try_get::<Option<String>, _>("description")?
            .unwrap_or_default(),
        price: row.try_get("price")?,
        quantity: row.try_get("quantity")?,
        min_quantity: row.try_get("min_quantity")?,
    })
}

fn query_failed(op: &str, err: sqlx::Error) -> InventoryError {
    tracing::error!("SQL error in {}: {}", op, err);
    InventoryError::Database(err)
}

fn write_failed(op: &str, sku: &str, err: sqlx::Error) -> InventoryError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            tracing::error!(sku, "{} error: duplicate SKU", op);
            return InventoryError::DuplicateSku {
                sku: sku.to_owned(),
            };
        }
    }
    tracing::error!(sku, "{} error: {}", op, err);
    InventoryError::Database(err)
}
