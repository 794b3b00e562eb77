// Cafeteria Core - Domain, Ports and Simulation Logic
// NO logging setup, NO signal handling (those live in the app crate)

pub mod application;
pub mod domain;
pub mod error;
pub mod port;

pub use error::{AppError, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
