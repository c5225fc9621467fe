//! Error types for the subscription desk.

use thiserror::Error;

/// Broad category of a [`SubscriptionError`].
///
/// Front ends match on this to decide whether to re-prompt, give up, or
/// record an apology letter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    IllegalMealQuantity,
    IllegalSubscriptionQuantity,
    IllegalNumberInput,
    NoSuchMeal,
    NoSuchSubscriber,
    NoSuchSubscription,
    Duplicate,
    Seed,
    Io,
    Serialization,
}

/// Main error type for manager, seed and console operations.
#[derive(Debug, Error)]
pub enum SubscriptionError {
    #[error("The number of {meal} meals you would like to add ({requested}) exceeds the number of {meal} meals currently available ({available}).")]
    InsufficientMeals {
        meal: String,
        requested: u32,
        available: u32,
    },

    #[error("The quantity of meals you want to remove ({requested}) exceeds the number of meals {subscriber} is subscribed to ({subscribed}).")]
    ExceedsSubscribed {
        subscriber: String,
        requested: u32,
        subscribed: u32,
    },

    #[error("Subscription cannot be added.\nEach subscriber is allowed to subscribe to a maximum of {limit} different meal types and subscriber \"{subscriber}\" has already reached that limit.")]
    SubscriptionLimit { subscriber: String, limit: usize },

    #[error("{0}")]
    IllegalNumberInput(String),

    #[error("Meal type \"{0}\" doesn't exist.")]
    NoSuchMeal(String),

    #[error("Subscriber \"{0}\" doesn't exist.")]
    NoSuchSubscriber(String),

    #[error("Subscriber \"{0}\" has no subscriptions.")]
    NoSubscriptions(String),

    #[error("Subscriber \"{subscriber}\" is not subscribed to {meal} meals.")]
    NoSuchSubscription { subscriber: String, meal: String },

    #[error("Subscriber \"{subscriber}\" is already subscribed to {meal} meals.")]
    DuplicateSubscription { subscriber: String, meal: String },

    #[error("Meal type \"{0}\" is already registered.")]
    DuplicateMeal(String),

    #[error("Subscriber \"{0}\" is already registered.")]
    DuplicateSubscriber(String),

    #[error("Invalid seed data at line {line}: {message}")]
    Seed { line: usize, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl SubscriptionError {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SubscriptionError::InsufficientMeals { .. }
            | SubscriptionError::ExceedsSubscribed { .. } => ErrorKind::IllegalMealQuantity,
            SubscriptionError::SubscriptionLimit { .. } => ErrorKind::IllegalSubscriptionQuantity,
            SubscriptionError::IllegalNumberInput(_) => ErrorKind::IllegalNumberInput,
            SubscriptionError::NoSuchMeal(_) => ErrorKind::NoSuchMeal,
            SubscriptionError::NoSuchSubscriber(_) => ErrorKind::NoSuchSubscriber,
            SubscriptionError::NoSubscriptions(_)
            | SubscriptionError::NoSuchSubscription { .. } => ErrorKind::NoSuchSubscription,
            SubscriptionError::DuplicateSubscription { .. }
            | SubscriptionError::DuplicateMeal(_)
            | SubscriptionError::DuplicateSubscriber(_) => ErrorKind::Duplicate,
            SubscriptionError::Seed { .. } => ErrorKind::Seed,
            SubscriptionError::Io(_) => ErrorKind::Io,
            SubscriptionError::Serialization(_) => ErrorKind::Serialization,
        }
    }

    /// Whether a front end can report this error and carry on.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self.kind(),
            ErrorKind::Io | ErrorKind::Seed | ErrorKind::Serialization
        )
    }
}

impl From<serde_json::Error> for SubscriptionError {
    fn from(e: serde_json::Error) -> Self {
        SubscriptionError::Serialization(e.to_string())
    }
}

/// Result type for subscription operations.
pub type Result<T> = std::result::Result<T, SubscriptionError>;

/// Parse a quantity typed by a clerk.
///
/// Malformed text is an [`ErrorKind::IllegalNumberInput`]; the sign is left
/// for the manager to validate.
pub fn parse_quantity(input: &str) -> Result<i64> {
    input
        .trim()
        .parse::<i64>()
        .map_err(|_| SubscriptionError::IllegalNumberInput("Your input must be a number.".into()))
}
