//! Command handlers for CLI operations
//!
//! `serve` runs the HTTP server (or only checks its configuration);
//! `migrate` manages the PostgreSQL schema.

pub mod migrate;
pub mod serve;

pub use migrate::MigrateCommandHandler;
pub use serve::ServeCommandHandler;
