/// Shared infrastructure concerns
///
/// Database pool and configuration used by every persistence adapter.
pub mod config;
pub mod database;

// Re-exports for convenience
pub use config::DatabaseConfig;
pub use database::{Database, DbConnection, DbPool};
