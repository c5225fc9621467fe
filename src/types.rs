//! Core types for the subscription desk.
//!
//! Every type here compares on its order key only, so `==` and `cmp` always
//! agree. Mutable fields (balances) never take part in the order.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A meal type offered by the dining service.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Meal {
    /// Unique, case-sensitive name.
    name: String,

    /// Servings still available for new subscriptions.
    balance: u32,
}

impl Meal {
    pub fn new(name: impl Into<String>, balance: u32) -> Self {
        Self {
            name: name.into(),
            balance,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn balance(&self) -> u32 {
        self.balance
    }

    pub fn set_balance(&mut self, balance: u32) {
        self.balance = balance;
    }
}

impl PartialEq for Meal {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Meal {}

impl PartialOrd for Meal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Meal {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

impl fmt::Display for Meal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.balance)
    }
}

/// A registered subscriber.
///
/// Ordered by surname, then first name. Both fields form the identity.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Subscriber {
    first_name: String,
    surname: String,
}

impl Subscriber {
    pub fn new(first_name: impl Into<String>, surname: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            surname: surname.into(),
        }
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn surname(&self) -> &str {
        &self.surname
    }

    /// Whether this subscriber has the given name.
    pub fn is_named(&self, first_name: &str, surname: &str) -> bool {
        self.first_name == first_name && self.surname == surname
    }
}

impl PartialOrd for Subscriber {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Subscriber {
    fn cmp(&self, other: &Self) -> Ordering {
        self.surname
            .cmp(&other.surname)
            .then_with(|| self.first_name.cmp(&other.first_name))
    }
}

impl fmt::Display for Subscriber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first_name, self.surname)
    }
}

/// Quantity of one meal committed by one subscriber.
///
/// Ordered by subscriber, then meal name, so a catalog of subscriptions
/// groups each subscriber's meals together in roster order.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Subscription {
    subscriber: Subscriber,
    meal: String,
    balance: u32,
}

impl Subscription {
    pub fn new(subscriber: Subscriber, meal: impl Into<String>, balance: u32) -> Self {
        Self {
            subscriber,
            meal: meal.into(),
            balance,
        }
    }

    pub fn subscriber(&self) -> &Subscriber {
        &self.subscriber
    }

    pub fn meal(&self) -> &str {
        &self.meal
    }

    /// Subscribed balance.
    pub fn balance(&self) -> u32 {
        self.balance
    }

    pub fn set_balance(&mut self, balance: u32) {
        self.balance = balance;
    }

    /// Whether this record links the named subscriber to `meal`.
    pub fn matches(&self, first_name: &str, surname: &str, meal: &str) -> bool {
        self.meal == meal && self.subscriber.is_named(first_name, surname)
    }
}

impl PartialEq for Subscription {
    fn eq(&self, other: &Self) -> bool {
        self.subscriber == other.subscriber && self.meal == other.meal
    }
}

impl Eq for Subscription {}

impl PartialOrd for Subscription {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Subscription {
    fn cmp(&self, other: &Self) -> Ordering {
        self.subscriber
            .cmp(&other.subscriber)
            .then_with(|| self.meal.cmp(&other.meal))
    }
}

impl fmt::Display for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Subscriber: {} Subscriptions: {} {}",
            self.subscriber, self.meal, self.balance
        )
    }
}
