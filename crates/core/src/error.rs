// Central Error Type for the Simulation

use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Domain error: {0}")]
    Domain(#[from] crate::domain::DomainError),

    #[error("Channel error: {0}")]
    Channel(#[from] crate::application::channel::ChannelError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;
