// Application Layer - Channel, Tasks and Coordinator

pub mod barista;
pub mod channel;
pub mod constants;
pub mod customer;
pub mod shutdown;
pub mod simulation;

// Re-exports
pub use barista::{Barista, BaristaReport};
pub use channel::{order_channel, ChannelError, OrderReceiver, OrderSender};
pub use customer::Customer;
pub use shutdown::{shutdown_channel, ShutdownSender, ShutdownToken};
pub use simulation::{CustomerReport, Simulation, SimulationConfig, SimulationReport};
