// Arrival Delay Port (for deterministic testing)

use crate::domain::CustomerId;
use crate::error::{AppError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;
use std::time::Duration;

/// Decides how long a customer takes to arrive before ordering
pub trait ArrivalDelay: Send + Sync {
    fn delay_for(&self, customer: CustomerId) -> Duration;
}

/// Uniform random delay in `[min, max]` (production)
pub struct UniformArrivalDelay {
    min: Duration,
    max: Duration,
    rng: Mutex<StdRng>,
}

impl UniformArrivalDelay {
    /// Entropy-seeded delay source
    pub fn new(min: Duration, max: Duration) -> Result<Self> {
        Self::with_rng(min, max, StdRng::from_entropy())
    }

    /// Reproducible delay source (same seed, same sequence of draws)
    pub fn seeded(min: Duration, max: Duration, seed: u64) -> Result<Self> {
        Self::with_rng(min, max, StdRng::seed_from_u64(seed))
    }

    fn with_rng(min: Duration, max: Duration, rng: StdRng) -> Result<Self> {
        if min > max {
            return Err(AppError::Config(format!(
                "arrival window is inverted: {:?} > {:?}",
                min, max
            )));
        }
        Ok(Self {
            min,
            max,
            rng: Mutex::new(rng),
        })
    }
}

impl ArrivalDelay for UniformArrivalDelay {
    fn delay_for(&self, _customer: CustomerId) -> Duration {
        // A poisoned RNG is still a valid RNG
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.gen_range(self.min..=self.max)
    }
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::collections::HashMap;

    /// Every customer arrives after the same delay
    pub struct FixedArrivalDelay(pub Duration);

    impl ArrivalDelay for FixedArrivalDelay {
        fn delay_for(&self, _customer: CustomerId) -> Duration {
            self.0
        }
    }

    /// Per-customer delays; customers without an entry use the fallback
    pub struct ScriptedArrivalDelay {
        delays: HashMap<u32, Duration>,
        fallback: Duration,
    }

    impl ScriptedArrivalDelay {
        /// `delays_ms[i]` is the delay of customer `i + 1`
        pub fn from_millis(delays_ms: &[u64]) -> Self {
            let delays = delays_ms
                .iter()
                .enumerate()
                .map(|(i, ms)| (i as u32 + 1, Duration::from_millis(*ms)))
                .collect();
            Self {
                delays,
                fallback: Duration::ZERO,
            }
        }

        pub fn with_fallback(mut self, fallback: Duration) -> Self {
            self.fallback = fallback;
            self
        }
    }

    impl ArrivalDelay for ScriptedArrivalDelay {
        fn delay_for(&self, customer: CustomerId) -> Duration {
            self.delays
                .get(&customer.get())
                .copied()
                .unwrap_or(self.fallback)
        }
    }
}
