// Domain Layer - Pure values shared by every task

pub mod error;
pub mod order;
pub mod outcome;

// Re-exports
pub use error::DomainError;
pub use order::{CustomerId, Order};
pub use outcome::{BaristaState, TaskOutcome};
