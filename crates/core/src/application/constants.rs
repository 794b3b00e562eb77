// Simulation constants (no magic values)
use std::time::Duration;

/// Customers arriving in a default run
pub const DEFAULT_CUSTOMERS: usize = 5;

/// Earliest a customer arrives (500ms)
pub const ARRIVAL_MIN: Duration = Duration::from_millis(500);

/// Latest a customer arrives (2.5s)
pub const ARRIVAL_MAX: Duration = Duration::from_millis(2500);

/// Time the barista spends on each order (1s)
pub const PREPARATION_TIME: Duration = Duration::from_secs(1);

/// Upper bound on a whole run (60s)
/// Far above any realistic run; a safety net, not a tuning knob
pub const OVERALL_TIMEOUT: Duration = Duration::from_secs(60);

/// How long cancelled tasks get to wind down before being aborted (5s)
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);
