//! Domain models

pub mod product;
pub mod validation;

pub use product::{Product, MAX_FIELD_LEN, UNSAVED_ID};
pub use validation::ValidationError;
