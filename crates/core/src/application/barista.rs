// Barista task - the single consumer of the order channel

use crate::application::channel::OrderReceiver;
use crate::application::shutdown::ShutdownToken;
use crate::domain::{BaristaState, Order, TaskOutcome};
use crate::error::Result;
use crate::port::{Announcer, CafeEvent};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// What the barista got through before stopping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaristaReport {
    pub outcome: TaskOutcome,
    pub final_state: BaristaState,
    /// Orders taken off the channel, including one cut short mid-preparation
    pub received: usize,
    /// Orders delivered, in delivery order
    pub served: Vec<Order>,
}

impl BaristaReport {
    /// Report for a barista whose task never returned (panicked or aborted)
    pub fn lost(outcome: TaskOutcome) -> Self {
        Self {
            outcome,
            final_state: BaristaState::Interrupted,
            received: 0,
            served: Vec::new(),
        }
    }
}

pub struct Barista {
    orders: OrderReceiver,
    expected: usize,
    preparation_time: Duration,
    announcer: Arc<dyn Announcer>,
}

impl Barista {
    pub fn new(
        orders: OrderReceiver,
        expected: usize,
        preparation_time: Duration,
        announcer: Arc<dyn Announcer>,
    ) -> Self {
        Self {
            orders,
            expected,
            preparation_time,
            announcer,
        }
    }

    /// Serve exactly `expected` orders, in channel order, then close.
    ///
    /// Cancellation is checked while waiting for an order and while
    /// preparing one; either way the barista stops without finishing
    /// the remaining orders.
    pub async fn run(mut self, mut shutdown: ShutdownToken) -> Result<BaristaReport> {
        info!(expected = self.expected, "Barista open for orders");
        let mut state = BaristaState::Waiting;
        let mut received = 0;
        let mut served = Vec::with_capacity(self.expected);

        for _ in 0..self.expected {
            let next = tokio::select! {
                biased;
                _ = shutdown.wait() => None,
                next = self.orders.receive() => Some(next),
            };
            let order = match next {
                Some(Ok(order)) => order,
                Some(Err(e)) => {
                    warn!(error = %e, served = served.len(), "No more orders can arrive");
                    return self.interrupted(state, received, served);
                }
                None => {
                    info!(served = served.len(), "Barista interrupted while waiting");
                    return self.interrupted(state, received, served);
                }
            };
            received += 1;

            state = Self::advance(state, BaristaState::Processing)?;
            self.announcer.announce(&CafeEvent::Preparing(order.clone()));

            let finished = tokio::select! {
                biased;
                _ = shutdown.wait() => false,
                _ = sleep(self.preparation_time) => true,
            };
            if !finished {
                info!(
                    customer_id = %order.customer_id(),
                    served = served.len(),
                    "Barista interrupted while preparing"
                );
                return self.interrupted(state, received, served);
            }

            self.announcer.announce(&CafeEvent::Delivered(order.clone()));
            served.push(order);
            state = Self::advance(state, BaristaState::Waiting)?;
        }

        state = Self::advance(state, BaristaState::Done)?;
        self.announcer.announce(&CafeEvent::AllServed);
        info!(served = served.len(), "All orders served");

        Ok(BaristaReport {
            outcome: TaskOutcome::Completed,
            final_state: state,
            received,
            served,
        })
    }

    fn advance(from: BaristaState, to: BaristaState) -> Result<BaristaState> {
        let next = from.transition(to)?;
        debug!(from = %from, to = %next, "Barista state change");
        Ok(next)
    }

    fn interrupted(
        &self,
        state: BaristaState,
        received: usize,
        served: Vec<Order>,
    ) -> Result<BaristaReport> {
        let final_state = Self::advance(state, BaristaState::Interrupted)?;
        self.announcer.announce(&CafeEvent::BaristaInterrupted);
        Ok(BaristaReport {
            outcome: TaskOutcome::Interrupted,
            final_state,
            received,
            served,
        })
    }
}
