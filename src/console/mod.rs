//! Clerk-facing console front end.
//!
//! A [`Console`] reads menu choices and prompt answers line by line from any
//! `BufRead`, drives a [`SubscriptionManager`](crate::SubscriptionManager),
//! and writes everything the clerk sees to any `Write`. Requests refused for
//! lack of meals produce apology letters collected in a [`LetterBox`].

mod letters;
mod session;

pub use letters::LetterBox;
pub use session::{Console, ConsoleConfig, DEFAULT_ATTEMPTS};
