//! Configuration and outcome types for the subscription manager.

use serde::{Deserialize, Serialize};

/// Default limit on distinct meal types per subscriber.
pub const DEFAULT_MAX_MEALS_PER_SUBSCRIBER: usize = 3;

/// What to do when a subscriber adds a meal they already subscribe to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Add the quantity to the existing subscription.
    #[default]
    Merge,
    /// Fail with a duplicate-subscription error.
    Reject,
}

/// Configuration for a [`SubscriptionManager`](super::SubscriptionManager).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ManagerConfig {
    /// Max distinct meal types per subscriber (None = unlimited).
    /// Default: 3
    pub max_meals_per_subscriber: Option<usize>,

    /// Re-subscription handling.
    /// Default: merge quantities
    pub duplicate_policy: DuplicatePolicy,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            max_meals_per_subscriber: Some(DEFAULT_MAX_MEALS_PER_SUBSCRIBER),
            duplicate_policy: DuplicatePolicy::Merge,
        }
    }
}

/// Where a subscription ended up after a change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionState {
    /// First add for this (subscriber, meal) pair.
    Created,
    /// Still held with a positive balance.
    Active,
    /// Balance reached zero and the record is gone.
    Removed,
}

/// Result of a successful add or remove.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionChange {
    pub first_name: String,
    pub surname: String,
    pub meal: String,
    /// Quantity added or removed.
    pub quantity: u32,
    /// Meal balance after the change.
    pub meal_balance: u32,
    /// Subscribed balance after the change (0 once removed).
    pub subscribed_balance: u32,
    pub state: SubscriptionState,
}

impl SubscriptionChange {
    /// Full name of the subscriber.
    pub fn subscriber_name(&self) -> String {
        format!("{} {}", self.first_name, self.surname)
    }
}
