// Port Layer - Interfaces for the outside world (randomness, observation output)

pub mod announcer;
pub mod arrival_delay;

// Re-exports
pub use announcer::{Announcer, CafeEvent, StdoutAnnouncer};
pub use arrival_delay::{ArrivalDelay, UniformArrivalDelay};
