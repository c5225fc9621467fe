//! Subscription manager mediating between the three catalogs.
//!
//! The manager owns one [`SortedList`](crate::collection::SortedList) each
//! for meals, subscribers and subscriptions, and is the only place where
//! meal balances and subscribed balances change. Every operation validates
//! fully before it mutates anything.
//!
//! # Example
//!
//! ```ignore
//! let mut manager = SubscriptionManager::default();
//! manager.register_meal(Meal::new("Pasta", 10))?;
//! manager.register_subscriber(Subscriber::new("Ann", "Lee"))?;
//!
//! let change = manager.add_meal_subscription("Ann", "Lee", "Pasta", 4)?;
//! assert_eq!(change.meal_balance, 6);
//!
//! for meal in manager.meals() {
//!     println!("{}", meal);
//! }
//! ```

mod manager;
mod types;

pub use manager::SubscriptionManager;
pub use types::{DuplicatePolicy, ManagerConfig, SubscriptionChange, SubscriptionState};
