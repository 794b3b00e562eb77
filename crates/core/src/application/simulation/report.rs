// Simulation report - terminal states of every task in one run

use crate::application::barista::BaristaReport;
use crate::domain::{CustomerId, TaskOutcome};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerReport {
    pub customer_id: CustomerId,
    pub outcome: TaskOutcome,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub elapsed_ms: u64,
    pub expected_orders: usize,
    /// Sorted by customer id
    pub customers: Vec<CustomerReport>,
    pub barista: BaristaReport,
    /// The overall timeout fired before every task finished
    pub timed_out: bool,
    /// An external shutdown request cut the run short
    pub cancelled: bool,
}

impl SimulationReport {
    /// Orders that actually made it into the channel
    pub fn orders_sent(&self) -> usize {
        self.customers
            .iter()
            .filter(|c| c.outcome == TaskOutcome::Completed)
            .count()
    }

    pub fn orders_served(&self) -> usize {
        self.barista.served.len()
    }

    pub fn all_served(&self) -> bool {
        self.barista.outcome == TaskOutcome::Completed
            && self.orders_served() == self.expected_orders
    }
}
