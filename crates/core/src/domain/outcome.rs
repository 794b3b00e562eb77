// Task Outcome and Barista State Models

use crate::domain::error::{DomainError, Result};
use serde::{Deserialize, Serialize};

/// Terminal state of a spawned task, observed by the coordinator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskOutcome {
    /// Task finished all of its work
    Completed,
    /// Task observed cancellation and stopped on its own
    Interrupted,
    /// Task was still running after the timeout grace period and was aborted
    TimedOut,
}

impl std::fmt::Display for TaskOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskOutcome::Completed => write!(f, "COMPLETED"),
            TaskOutcome::Interrupted => write!(f, "INTERRUPTED"),
            TaskOutcome::TimedOut => write!(f, "TIMED_OUT"),
        }
    }
}

/// Barista state machine: WAITING -> PROCESSING -> WAITING -> ... -> DONE
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BaristaState {
    Waiting,
    Processing,
    Done,
    Interrupted,
}

impl std::fmt::Display for BaristaState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BaristaState::Waiting => write!(f, "WAITING"),
            BaristaState::Processing => write!(f, "PROCESSING"),
            BaristaState::Done => write!(f, "DONE"),
            BaristaState::Interrupted => write!(f, "INTERRUPTED"),
        }
    }
}

impl BaristaState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, BaristaState::Done | BaristaState::Interrupted)
    }

    /// Validate and return the next state
    pub fn transition(self, to: BaristaState) -> Result<BaristaState> {
        let allowed = match (self, to) {
            (BaristaState::Waiting, BaristaState::Processing) => true,
            (BaristaState::Processing, BaristaState::Waiting) => true,
            (BaristaState::Waiting, BaristaState::Done) => true,
            (from, BaristaState::Interrupted) => !from.is_terminal(),
            _ => false,
        };
        if !allowed {
            return Err(DomainError::InvalidStateTransition {
                from: self.to_string(),
                to: to.to_string(),
            });
        }
        Ok(to)
    }
}
