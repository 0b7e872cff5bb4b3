//! Command implementations for invctl CLI

pub mod product;
pub mod transfer;

// Re-export dispatcher functions for flat access from main.rs
pub use product::{run_add, run_get, run_list, run_remove, run_update};
pub use transfer::{run_export, run_import};
