// Domain Error Types

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid customer id: {0} (customer ids start at 1)")]
    InvalidCustomerId(u32),

    #[error("Invalid barista state transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },
}

pub type Result<T> = std::result::Result<T, DomainError>;
