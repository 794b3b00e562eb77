// Simulation coordinator - owns the channel, spawns every task, bounds the run

mod config;
mod report;

pub use config::SimulationConfig;
pub use report::{CustomerReport, SimulationReport};

use crate::application::barista::{Barista, BaristaReport};
use crate::application::channel::order_channel;
use crate::application::customer::Customer;
use crate::application::shutdown::{shutdown_channel, ShutdownToken};
use crate::domain::{CustomerId, TaskOutcome};
use crate::error::{AppError, Result};
use crate::port::{Announcer, ArrivalDelay, CafeEvent, StdoutAnnouncer, UniformArrivalDelay};
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::task::{JoinError, JoinSet};
use tokio::time::{sleep, Instant};
use tracing::{debug, error, info, info_span, warn, Instrument};
use uuid::Uuid;

/// What a spawned task hands back when it finishes on its own
enum Finished {
    Customer(CustomerId, TaskOutcome),
    Barista(Result<BaristaReport>),
}

/// Outcome of one wait on the task set
enum Step {
    Joined(Option<std::result::Result<Finished, JoinError>>),
    TimedOut,
    Cancelled,
}

/// Terminal states collected while tasks finish
struct Tally {
    customers: BTreeMap<CustomerId, Option<TaskOutcome>>,
    barista: Option<BaristaReport>,
}

impl Tally {
    fn record(&mut self, joined: std::result::Result<Finished, JoinError>) {
        match joined {
            Ok(Finished::Customer(id, outcome)) => {
                debug!(customer_id = %id, outcome = %outcome, "Customer finished");
                self.customers.insert(id, Some(outcome));
            }
            Ok(Finished::Barista(Ok(report))) => {
                debug!(outcome = %report.outcome, served = report.served.len(), "Barista finished");
                self.barista = Some(report);
            }
            Ok(Finished::Barista(Err(e))) => {
                error!(error = %e, "Barista failed");
                self.barista = Some(BaristaReport::lost(TaskOutcome::Interrupted));
            }
            Err(join_err) => {
                // Identity is lost with the task; the slot is filled in by finish()
                if join_err.is_panic() {
                    error!("Task panicked: {:?}", join_err);
                } else {
                    debug!("Task aborted: {:?}", join_err);
                }
            }
        }
    }

    /// Tasks that never reported get `unreported` as their outcome
    fn finish(self, unreported: TaskOutcome) -> (Vec<CustomerReport>, BaristaReport) {
        let customers = self
            .customers
            .into_iter()
            .map(|(customer_id, outcome)| CustomerReport {
                customer_id,
                outcome: outcome.unwrap_or(unreported),
            })
            .collect();
        let barista = self
            .barista
            .unwrap_or_else(|| BaristaReport::lost(unreported));
        (customers, barista)
    }
}

/// One cafeteria: N customers, one barista, one order channel per run
pub struct Simulation {
    config: SimulationConfig,
    arrival_delay: Arc<dyn ArrivalDelay>,
    announcer: Arc<dyn Announcer>,
}

impl Simulation {
    /// Create a simulation with explicit ports (tests use mocks here)
    pub fn new(
        config: SimulationConfig,
        arrival_delay: Arc<dyn ArrivalDelay>,
        announcer: Arc<dyn Announcer>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            arrival_delay,
            announcer,
        })
    }

    /// Random arrivals within the configured window, observations on stdout
    pub fn with_defaults(config: SimulationConfig) -> Result<Self> {
        let arrival_delay = Arc::new(UniformArrivalDelay::new(
            config.arrival_min,
            config.arrival_max,
        )?);
        Self::new(config, arrival_delay, Arc::new(StdoutAnnouncer))
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Run until every order is served or the overall timeout elapses
    pub async fn run(&self) -> Result<SimulationReport> {
        self.run_until(ShutdownToken::never()).await
    }

    /// Like `run`, but `external` can cut the run short at any time.
    ///
    /// Each call builds a fresh channel and shutdown context, so runs share
    /// nothing.
    pub async fn run_until(&self, external: ShutdownToken) -> Result<SimulationReport> {
        let run_id = Uuid::new_v4();
        let span = info_span!("simulation", run_id = %run_id, customers = self.config.customers);
        self.run_inner(run_id, external).instrument(span).await
    }

    async fn run_inner(
        &self,
        run_id: Uuid,
        mut external: ShutdownToken,
    ) -> Result<SimulationReport> {
        let started_at = Utc::now();
        let clock = Instant::now();
        let expected = self.config.customers;
        let customer_count = u32::try_from(expected)
            .map_err(|_| AppError::Config(format!("too many customers: {}", expected)))?;

        let (orders_tx, orders_rx) = order_channel();
        let (stop, shutdown) = shutdown_channel();
        let mut tasks = JoinSet::new();
        let mut tally = Tally {
            customers: BTreeMap::new(),
            barista: None,
        };

        for raw in 1..=customer_count {
            let id = CustomerId::new(raw)?;
            let customer = Customer::new(
                id,
                orders_tx.clone(),
                Arc::clone(&self.arrival_delay),
                Arc::clone(&self.announcer),
            );
            let token = shutdown.clone();
            tasks.spawn(async move { Finished::Customer(id, customer.run(token).await) });
            tally.customers.insert(id, None);
        }
        // Only customers hold write ends from here on
        drop(orders_tx);

        let barista = Barista::new(
            orders_rx,
            expected,
            self.config.preparation_time,
            Arc::clone(&self.announcer),
        );
        tasks.spawn(async move { Finished::Barista(barista.run(shutdown).await) });
        info!("Cafeteria open");

        let deadline = sleep(self.config.overall_timeout);
        tokio::pin!(deadline);
        let mut timed_out = false;
        let mut cancelled = false;

        loop {
            let step = tokio::select! {
                biased;
                joined = tasks.join_next() => Step::Joined(joined),
                _ = &mut deadline => Step::TimedOut,
                _ = external.wait() => Step::Cancelled,
            };
            match step {
                Step::Joined(Some(joined)) => tally.record(joined),
                Step::Joined(None) => break,
                Step::TimedOut => {
                    warn!(
                        timeout_ms = self.config.overall_timeout.as_millis() as u64,
                        remaining = tasks.len(),
                        "Overall timeout elapsed, cancelling remaining tasks"
                    );
                    timed_out = true;
                    break;
                }
                Step::Cancelled => {
                    info!(remaining = tasks.len(), "Shutdown requested, cancelling remaining tasks");
                    cancelled = true;
                    break;
                }
            }
        }

        let mut aborted = false;
        if timed_out || cancelled {
            stop.shutdown();

            let grace = sleep(self.config.shutdown_grace);
            tokio::pin!(grace);
            loop {
                let joined = tokio::select! {
                    biased;
                    joined = tasks.join_next() => Some(joined),
                    _ = &mut grace => None,
                };
                match joined {
                    Some(Some(joined)) => tally.record(joined),
                    Some(None) => break,
                    None => {
                        warn!(remaining = tasks.len(), "Grace period over, aborting remaining tasks");
                        tasks.abort_all();
                        aborted = true;
                        break;
                    }
                }
            }
            // Aborted tasks resolve at their next poll; nothing waits on real work here
            while let Some(joined) = tasks.join_next().await {
                tally.record(joined);
            }
            self.announcer.announce(&CafeEvent::ClosedEarly);
        }

        let unreported = if aborted && timed_out {
            TaskOutcome::TimedOut
        } else {
            TaskOutcome::Interrupted
        };
        let (customers, barista) = tally.finish(unreported);

        let report = SimulationReport {
            run_id,
            started_at,
            elapsed_ms: clock.elapsed().as_millis() as u64,
            expected_orders: expected,
            customers,
            barista,
            timed_out,
            cancelled,
        };

        info!(
            sent = report.orders_sent(),
            served = report.orders_served(),
            timed_out = report.timed_out,
            cancelled = report.cancelled,
            elapsed_ms = report.elapsed_ms,
            "Simulation finished"
        );
        Ok(report)
    }
}
