//! Product entity and field validation
//!
//! `id == 0` marks a product that has never been inserted. The repository
//! uses that sentinel to choose between INSERT and UPDATE.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ValidationError;
use crate::error::{InventoryError, Result};

/// Maximum length for SKU and name, in characters
pub const MAX_FIELD_LEN: usize = 50;

/// Id carried by a product that is not (or no longer) stored
pub const UNSAVED_ID: i64 = 0;

/// A stocked item
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    pub id: i64,
    pub sku: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub quantity: i64,
    pub min_quantity: i64,
}

impl Product {
    /// Build an unsaved product with the required fields set
    pub fn new(sku: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            sku: sku.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// True once the product has been inserted and not removed since
    pub fn is_persisted(&self) -> bool {
        self.id != UNSAVED_ID
    }

    /// At or below the reorder threshold
    pub fn needs_restock(&self) -> bool {
        self.quantity <= self.min_quantity
    }

    /// Check every field rule, stopping at the first violation.
    ///
    /// # Rules (in order)
    /// - SKU and name non-empty
    /// - price, quantity and min quantity not negative
    /// - SKU and name at most 50 characters
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        if self.sku.is_empty() {
            return Err(ValidationError::Empty { field: "SKU" });
        }

        if self.name.is_empty() {
            return Err(ValidationError::Empty { field: "Name" });
        }

        if self.price.is_nan() || self.price < 0.0 {
            return Err(ValidationError::Negative { field: "Price" });
        }

        if self.quantity < 0 {
            return Err(ValidationError::Negative { field: "Quantity" });
        }

        if self.min_quantity < 0 {
            return Err(ValidationError::Negative {
                field: "Min quantity",
            });
        }

        if self.sku.chars().count() > MAX_FIELD_LEN {
            return Err(ValidationError::TooLong {
                field: "SKU",
                max: MAX_FIELD_LEN,
            });
        }

        if self.name.chars().count() > MAX_FIELD_LEN {
            return Err(ValidationError::TooLong {
                field: "Name",
                max: MAX_FIELD_LEN,
            });
        }

        Ok(())
    }

    /// Like [`Product::validate`], but logs the violated rule and returns a flag.
    pub fn is_valid(&self) -> bool {
        match self.validate() {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(sku = %self.sku, "Validation error: {}", err);
                false
            }
        }
    }

    /// Serialize to a JSON object carrying all seven fields.
    pub fn to_json(&self) -> Value {
        serde_json::json!({
            "id": self.id,
            "sku": self.sku,
            "name": self.name,
            "description": self.description,
            "price": self.price,
            "quantity": self.quantity,
            "min_quantity": self.min_quantity,
        })
    }

    /// Deserialize from a JSON object. Missing keys keep their default value.
    pub fn from_json(value: &Value) -> Result<Self> {
        Self::deserialize(value).map_err(|e| InventoryError::json("product", e))
    }
}
