//! Database layer - connection manager, migration and repositories
//!
//! - One connection, no pool
//! - Repositories borrow the connection mutably for the length of a call
//! - Rely on DB constraints, handle conflicts - no check-then-insert

pub mod connection;
pub mod migrations;
pub mod products;

pub use connection::{CloseStatus, Database};
pub use migrations::{run_migrations, DEFAULT_MIGRATION_SCRIPT};
pub use products::ProductRepo;
