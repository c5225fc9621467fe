//! # Meal Subscriptions
//!
//! Subscription desk for a dining service: a catalog of meals with
//! available balances, a roster of subscribers, and subscription records
//! committing servings of a meal to a subscriber.
//!
//! ## Core Concepts
//!
//! - **Catalogs**: each is a [`SortedList`], a singly linked chain kept in
//!   order on every insert and merged with other sorted chains in one pass
//! - **Value types**: [`Meal`], [`Subscriber`] and [`Subscription`] compare
//!   on their identity only, never on balances
//! - **Manager**: [`SubscriptionManager`] validates every request before
//!   touching any balance
//! - **Console**: [`Console`] is the clerk's menu over any reader and writer
//!
//! ## Example
//!
//! ```ignore
//! use meal_subscriptions::{ManagerConfig, Seed, SubscriptionManager};
//!
//! let seed = Seed::load("input_data.txt")?;
//! let mut manager = SubscriptionManager::from_seed(seed, ManagerConfig::default())?;
//!
//! manager.add_meal_subscription("Ann", "Lee", "Pasta", 4)?;
//! for subscription in manager.subscriptions() {
//!     println!("{}", subscription);
//! }
//! ```

pub mod collection;
pub mod console;
pub mod error;
pub mod manager;
pub mod seed;
pub mod types;

// Re-exports
pub use collection::SortedList;
pub use console::{Console, ConsoleConfig, LetterBox};
pub use error::{parse_quantity, ErrorKind, Result, SubscriptionError};
pub use manager::{
    DuplicatePolicy, ManagerConfig, SubscriptionChange, SubscriptionManager, SubscriptionState,
};
pub use seed::Seed;
pub use types::*;
