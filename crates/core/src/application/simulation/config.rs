// Simulation configuration

use crate::application::constants::*;
use crate::error::{AppError, Result};
use std::time::Duration;

/// Knobs for one simulation run. `Default` is the classic cafeteria:
/// five customers, 0.5-2.5s arrivals, 1s per coffee, 60s safety bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationConfig {
    pub customers: usize,
    pub arrival_min: Duration,
    pub arrival_max: Duration,
    pub preparation_time: Duration,
    pub overall_timeout: Duration,
    pub shutdown_grace: Duration,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            customers: DEFAULT_CUSTOMERS,
            arrival_min: ARRIVAL_MIN,
            arrival_max: ARRIVAL_MAX,
            preparation_time: PREPARATION_TIME,
            overall_timeout: OVERALL_TIMEOUT,
            shutdown_grace: SHUTDOWN_GRACE,
        }
    }
}

impl SimulationConfig {
    pub fn with_customers(mut self, customers: usize) -> Self {
        self.customers = customers;
        self
    }

    pub fn with_arrival_window(mut self, min: Duration, max: Duration) -> Self {
        self.arrival_min = min;
        self.arrival_max = max;
        self
    }

    pub fn with_preparation_time(mut self, preparation_time: Duration) -> Self {
        self.preparation_time = preparation_time;
        self
    }

    pub fn with_overall_timeout(mut self, overall_timeout: Duration) -> Self {
        self.overall_timeout = overall_timeout;
        self
    }

    pub fn with_shutdown_grace(mut self, shutdown_grace: Duration) -> Self {
        self.shutdown_grace = shutdown_grace;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.arrival_min > self.arrival_max {
            return Err(AppError::Config(format!(
                "arrival window is inverted: {:?} > {:?}",
                self.arrival_min, self.arrival_max
            )));
        }
        if self.overall_timeout.is_zero() {
            return Err(AppError::Config(
                "overall timeout must be greater than zero".to_string(),
            ));
        }
        if u32::try_from(self.customers).is_err() {
            return Err(AppError::Config(format!(
                "too many customers: {} (max {})",
                self.customers,
                u32::MAX
            )));
        }
        Ok(())
    }
}
