// Order Domain Model

use crate::domain::error::{DomainError, Result};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;

/// Customer identity (1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct CustomerId(NonZeroU32);

impl CustomerId {
    pub fn new(id: u32) -> Result<Self> {
        NonZeroU32::new(id)
            .map(Self)
            .ok_or(DomainError::InvalidCustomerId(id))
    }

    pub fn get(&self) -> u32 {
        self.0.get()
    }
}

impl TryFrom<u32> for CustomerId {
    type Error = DomainError;

    fn try_from(id: u32) -> Result<Self> {
        Self::new(id)
    }
}

impl From<CustomerId> for u32 {
    fn from(id: CustomerId) -> Self {
        id.get()
    }
}

impl std::fmt::Display for CustomerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single customer's request.
///
/// Orders are immutable once built: the customer creates one at send time
/// and ownership moves to the barista through the order channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    customer_id: CustomerId,
    label: String,
}

impl Order {
    /// Build the order a customer places on arrival
    pub fn for_customer(customer_id: CustomerId) -> Self {
        Self {
            customer_id,
            label: format!("coffee for customer {}", customer_id),
        }
    }

    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl std::fmt::Display for Order {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label)
    }
}
