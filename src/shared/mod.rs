// Shared Kernel - Domain Driven Design
// Following Clean Architecture + Hexagonal Architecture patterns

pub mod errors; // Shared error types
pub mod infrastructure; // Shared infrastructure (database, configuration)
pub mod utils; // Shared utilities (logging)
pub mod validation; // Field validation accumulator and rules

// Re-exports for convenience
pub use errors::{AppError, AppResult};
pub use infrastructure::{Database, DatabaseConfig};
pub use validation::{Validate, ValidationErrors, ValidationResult};
