// Customer task - arrives after a random delay and places exactly one order

use crate::application::channel::OrderSender;
use crate::application::shutdown::ShutdownToken;
use crate::domain::{CustomerId, Order, TaskOutcome};
use crate::port::{Announcer, ArrivalDelay, CafeEvent};
use std::sync::Arc;
use tokio::time::sleep;
use tracing::{debug, info, warn};

pub struct Customer {
    id: CustomerId,
    orders: OrderSender,
    arrival_delay: Arc<dyn ArrivalDelay>,
    announcer: Arc<dyn Announcer>,
}

impl Customer {
    pub fn new(
        id: CustomerId,
        orders: OrderSender,
        arrival_delay: Arc<dyn ArrivalDelay>,
        announcer: Arc<dyn Announcer>,
    ) -> Self {
        Self {
            id,
            orders,
            arrival_delay,
            announcer,
        }
    }

    /// Walk in, order, leave.
    ///
    /// A shutdown during the walk means no order is ever sent.
    pub async fn run(self, mut shutdown: ShutdownToken) -> TaskOutcome {
        let delay = self.arrival_delay.delay_for(self.id);
        debug!(
            customer_id = %self.id,
            delay_ms = delay.as_millis() as u64,
            "Customer on the way"
        );

        tokio::select! {
            biased;
            _ = shutdown.wait() => {
                info!(customer_id = %self.id, "Customer interrupted before ordering");
                self.announcer.announce(&CafeEvent::CustomerInterrupted(self.id));
                return TaskOutcome::Interrupted;
            }
            _ = sleep(delay) => {}
        }

        // Never announce an order that has nowhere to go
        if self.orders.is_closed() {
            warn!(customer_id = %self.id, "Barista already gone, leaving without ordering");
            self.announcer.announce(&CafeEvent::CustomerInterrupted(self.id));
            return TaskOutcome::Interrupted;
        }

        let order = Order::for_customer(self.id);
        self.announcer.announce(&CafeEvent::Arrived(order.clone()));

        match self.orders.send(order) {
            Ok(()) => {
                debug!(customer_id = %self.id, "Order handed off");
                TaskOutcome::Completed
            }
            Err(e) => {
                warn!(customer_id = %self.id, error = %e, "Order could not be handed off");
                self.announcer.announce(&CafeEvent::CustomerInterrupted(self.id));
                TaskOutcome::Interrupted
            }
        }
    }
}
