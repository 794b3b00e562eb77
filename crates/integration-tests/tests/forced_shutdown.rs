//! Forced shutdown: external cancellation and the overall timeout
//!
//! - The barista never receives more orders than were sent
//! - Every task stops within the grace period
//! - The coordinator returns without deadlock

use cafeteria_core::application::{shutdown_channel, Simulation, SimulationConfig};
use cafeteria_core::domain::{BaristaState, TaskOutcome};
use cafeteria_core::port::announcer::mocks::RecordingAnnouncer;
use cafeteria_core::port::arrival_delay::mocks::{FixedArrivalDelay, ScriptedArrivalDelay};
use cafeteria_core::port::{ArrivalDelay, CafeEvent};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{sleep, Instant};

fn simulation(
    config: SimulationConfig,
    delay: Arc<dyn ArrivalDelay>,
) -> (Simulation, Arc<RecordingAnnouncer>) {
    let announcer = Arc::new(RecordingAnnouncer::new());
    let sim = Simulation::new(config, delay, announcer.clone()).unwrap();
    (sim, announcer)
}

#[tokio::test(start_paused = true)]
async fn test_cancel_before_any_arrival() {
    let config = SimulationConfig::default().with_customers(5);
    let grace = config.shutdown_grace;
    let (sim, announcer) = simulation(
        config,
        Arc::new(FixedArrivalDelay(Duration::from_millis(500))),
    );

    let (stop, token) = shutdown_channel();
    tokio::spawn(async move {
        sleep(Duration::from_millis(100)).await;
        stop.shutdown();
    });

    let start = Instant::now();
    let report = sim.run_until(token).await.unwrap();

    assert!(report.cancelled);
    assert!(!report.timed_out);
    assert!(start.elapsed() <= Duration::from_millis(100) + grace);
    assert_eq!(report.orders_sent(), 0);
    assert!(report.barista.received <= report.orders_sent());
    assert_eq!(report.barista.outcome, TaskOutcome::Interrupted);
    assert!(report
        .customers
        .iter()
        .all(|c| c.outcome == TaskOutcome::Interrupted));

    assert_eq!(
        announcer.count(|e| matches!(e, CafeEvent::CustomerInterrupted(_))),
        5
    );
    assert_eq!(announcer.count(|e| *e == CafeEvent::BaristaInterrupted), 1);
    assert_eq!(announcer.count(|e| *e == CafeEvent::AllServed), 0);
    assert_eq!(announcer.events().last(), Some(&CafeEvent::ClosedEarly));
}

#[tokio::test(start_paused = true)]
async fn test_cancel_mid_service() {
    // Customers 1 and 2 order before the cut; 3 and 4 never do
    let (sim, announcer) = simulation(
        SimulationConfig::default().with_customers(4),
        Arc::new(ScriptedArrivalDelay::from_millis(&[500, 1000, 3000, 4000])),
    );

    let (stop, token) = shutdown_channel();
    tokio::spawn(async move {
        sleep(Duration::from_millis(1200)).await;
        stop.shutdown();
    });

    let report = sim.run_until(token).await.unwrap();

    assert!(report.cancelled);
    assert_eq!(report.orders_sent(), 2);
    assert!(report.barista.received <= report.orders_sent());
    // customer 1 was being prepared (500ms..1500ms) when the cut came
    assert!(report.barista.served.is_empty());
    assert_eq!(report.barista.final_state, BaristaState::Interrupted);
    assert_eq!(announcer.deliveries().len(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_overall_timeout_forces_shutdown() {
    let config = SimulationConfig::default()
        .with_customers(5)
        .with_overall_timeout(Duration::from_secs(3));
    let grace = config.shutdown_grace;
    let (sim, announcer) = simulation(
        config,
        Arc::new(FixedArrivalDelay(Duration::from_millis(500))),
    );

    let start = Instant::now();
    let report = sim.run().await.unwrap();

    assert!(report.timed_out);
    assert!(!report.cancelled);
    assert!(start.elapsed() <= Duration::from_secs(3) + grace);
    // All five ordered at 500ms; coffees finish at 1.5s and 2.5s, the third is cut
    assert_eq!(report.orders_sent(), 5);
    assert_eq!(report.orders_served(), 2);
    assert_eq!(report.barista.received, 3);
    assert!(report.barista.received <= report.orders_sent());
    assert!(!report.all_served());
    assert_eq!(announcer.events().last(), Some(&CafeEvent::ClosedEarly));
}

#[tokio::test(start_paused = true)]
async fn test_cancelled_run_does_not_leak_into_next() {
    let (sim, _) = simulation(
        SimulationConfig::default().with_customers(3),
        Arc::new(FixedArrivalDelay(Duration::from_millis(500))),
    );

    let (stop, token) = shutdown_channel();
    stop.shutdown();
    let cancelled = sim.run_until(token).await.unwrap();
    assert!(cancelled.cancelled);
    assert_eq!(cancelled.orders_served(), 0);

    let fresh = sim.run().await.unwrap();
    assert!(fresh.all_served());
    assert_eq!(fresh.barista.received, 3);
}

#[tokio::test(start_paused = true)]
async fn test_tasks_still_running_after_grace_are_aborted() {
    // No grace at all: nothing gets a chance to observe the shutdown
    let config = SimulationConfig::default()
        .with_customers(3)
        .with_overall_timeout(Duration::from_secs(1))
        .with_shutdown_grace(Duration::ZERO);
    let (sim, announcer) = simulation(
        config,
        Arc::new(FixedArrivalDelay(Duration::from_secs(30))),
    );

    let start = Instant::now();
    let report = sim.run().await.unwrap();

    assert!(report.timed_out);
    assert!(!report.cancelled);
    assert!(start.elapsed() < Duration::from_secs(30));
    assert_eq!(report.customers.len(), 3);
    assert!(report
        .customers
        .iter()
        .all(|c| c.outcome == TaskOutcome::TimedOut));
    assert_eq!(report.barista.outcome, TaskOutcome::TimedOut);
    assert_eq!(report.barista.received, 0);
    assert!(report.barista.served.is_empty());

    // Aborted tasks say nothing; only the coordinator's closing line is printed
    assert_eq!(
        announcer.lines(),
        vec!["The cafeteria closed before all orders were served."]
    );
    assert_eq!(announcer.events().last(), Some(&CafeEvent::ClosedEarly));
}
