// Announcer Port - human-readable observation lines
//
// Observations are the program's output and go to stdout.
// Diagnostics go through tracing and stay out of this stream.

use crate::domain::{CustomerId, Order};
use std::io::Write;
use tracing::warn;

/// Something worth telling the people in the cafeteria
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CafeEvent {
    /// A customer arrived and placed an order
    Arrived(Order),
    /// The barista took an order off the channel
    Preparing(Order),
    /// The barista handed an order over
    Delivered(Order),
    /// Every expected order was delivered
    AllServed,
    CustomerInterrupted(CustomerId),
    BaristaInterrupted,
    /// The run was cut short by timeout or external cancellation
    ClosedEarly,
}

impl std::fmt::Display for CafeEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CafeEvent::Arrived(order) => write!(
                f,
                "Customer {} arrives and orders a {}",
                order.customer_id(),
                order
            ),
            CafeEvent::Preparing(order) => write!(f, "Barista is preparing the {}", order),
            CafeEvent::Delivered(order) => write!(f, "Barista delivers the {}", order),
            CafeEvent::AllServed => {
                write!(f, "All orders have been served. The cafeteria closes.")
            }
            CafeEvent::CustomerInterrupted(id) => write!(f, "Customer {} was interrupted.", id),
            CafeEvent::BaristaInterrupted => write!(f, "The barista was interrupted."),
            CafeEvent::ClosedEarly => {
                write!(f, "The cafeteria closed before all orders were served.")
            }
        }
    }
}

/// Observation sink
pub trait Announcer: Send + Sync {
    fn announce(&self, event: &CafeEvent);
}

/// Writes one line per event to stdout (production)
pub struct StdoutAnnouncer;

impl Announcer for StdoutAnnouncer {
    fn announce(&self, event: &CafeEvent) {
        let mut out = std::io::stdout().lock();
        if let Err(e) = writeln!(out, "{}", event) {
            warn!(error = %e, "Failed to write observation to stdout");
        }
    }
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::Mutex;

    /// Keeps every event in announcement order
    #[derive(Default)]
    pub struct RecordingAnnouncer {
        events: Mutex<Vec<CafeEvent>>,
    }

    impl RecordingAnnouncer {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn events(&self) -> Vec<CafeEvent> {
            self.events.lock().unwrap().clone()
        }

        pub fn lines(&self) -> Vec<String> {
            self.events().iter().map(ToString::to_string).collect()
        }

        /// Customers in the order they announced their arrival
        pub fn arrivals(&self) -> Vec<CustomerId> {
            self.events()
                .into_iter()
                .filter_map(|e| match e {
                    CafeEvent::Arrived(order) => Some(order.customer_id()),
                    _ => None,
                })
                .collect()
        }

        /// Customers in the order their coffee was delivered
        pub fn deliveries(&self) -> Vec<CustomerId> {
            self.events()
                .into_iter()
                .filter_map(|e| match e {
                    CafeEvent::Delivered(order) => Some(order.customer_id()),
                    _ => None,
                })
                .collect()
        }

        pub fn count(&self, predicate: impl Fn(&CafeEvent) -> bool) -> usize {
            self.events().iter().filter(|e| predicate(e)).count()
        }
    }

    impl Announcer for RecordingAnnouncer {
        fn announce(&self, event: &CafeEvent) {
            self.events.lock().unwrap().push(event.clone());
        }
    }
}
