//! Subscription manager enforcing the desk's domain rules.

use crate::collection::{Iter, SortedList};
use crate::error::{Result, SubscriptionError};
use crate::seed::Seed;
use crate::types::{Meal, Subscriber, Subscription};
use tracing::{debug, info};

use super::types::{DuplicatePolicy, ManagerConfig, SubscriptionChange, SubscriptionState};

/// Owns the meal, subscriber and subscription catalogs.
pub struct SubscriptionManager {
    config: ManagerConfig,
    meals: SortedList<Meal>,
    subscribers: SortedList<Subscriber>,
    subscriptions: SortedList<Subscription>,
}

impl SubscriptionManager {
    /// Create a manager with empty catalogs.
    pub fn new(config: ManagerConfig) -> Self {
        Self {
            config,
            meals: SortedList::new(),
            subscribers: SortedList::new(),
            subscriptions: SortedList::new(),
        }
    }

    /// Create a manager seeded with meals and subscribers.
    pub fn from_seed(seed: Seed, config: ManagerConfig) -> Result<Self> {
        let mut manager = Self::new(config);
        let subscribers = manager.register_subscribers(seed.subscribers)?;
        let meals = manager.register_meals(seed.meals)?;
        info!(subscribers, meals, "Catalogs seeded");
        Ok(manager)
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    // --- Catalog Population ---

    /// Add a meal to the catalog.
    pub fn register_meal(&mut self, meal: Meal) -> Result<()> {
        if self.meals.contains(&meal) {
            return Err(SubscriptionError::DuplicateMeal(meal.name().to_string()));
        }
        debug!(meal = meal.name(), balance = meal.balance(), "Registered meal");
        self.meals.insert(meal);
        Ok(())
    }

    /// Add a subscriber to the roster.
    pub fn register_subscriber(&mut self, subscriber: Subscriber) -> Result<()> {
        if self.subscribers.contains(&subscriber) {
            return Err(SubscriptionError::DuplicateSubscriber(subscriber.to_string()));
        }
        debug!(subscriber = %subscriber, "Registered subscriber");
        self.subscribers.insert(subscriber);
        Ok(())
    }

    /// Add a batch of meals in one merge.
    ///
    /// The whole batch is rejected if any name is already registered or
    /// appears twice in it. Returns the number of meals added.
    pub fn register_meals<I>(&mut self, meals: I) -> Result<usize>
    where
        I: IntoIterator<Item = Meal>,
    {
        let batch: SortedList<Meal> = meals.into_iter().collect();
        if let Some(duplicate) = first_duplicate(&batch, &self.meals) {
            return Err(SubscriptionError::DuplicateMeal(duplicate.name().to_string()));
        }
        let count = batch.len();
        self.meals.merge(batch);
        debug!(count, total = self.meals.len(), "Merged meal batch");
        Ok(count)
    }

    /// Add a batch of subscribers in one merge.
    pub fn register_subscribers<I>(&mut self, subscribers: I) -> Result<usize>
    where
        I: IntoIterator<Item = Subscriber>,
    {
        let batch: SortedList<Subscriber> = subscribers.into_iter().collect();
        if let Some(duplicate) = first_duplicate(&batch, &self.subscribers) {
            return Err(SubscriptionError::DuplicateSubscriber(duplicate.to_string()));
        }
        let count = batch.len();
        self.subscribers.merge(batch);
        debug!(count, total = self.subscribers.len(), "Merged subscriber batch");
        Ok(count)
    }

    // --- Subscription Operations ---

    /// Commit `quantity` servings of `meal` to a subscriber.
    ///
    /// Checks run in order: quantity, meal, subscriber, per-subscriber
    /// limits, then available balance. Nothing changes unless all pass.
    pub fn add_meal_subscription(
        &mut self,
        first_name: &str,
        surname: &str,
        meal: &str,
        quantity: i64,
    ) -> Result<SubscriptionChange> {
        let quantity = validate_quantity(quantity, "add")?;
        let available = self.require_meal(meal)?.balance();
        let subscriber = self.require_subscriber(first_name, surname)?.clone();
        let existing = self
            .subscription(first_name, surname, meal)
            .map(Subscription::balance);

        match existing {
            Some(_) if self.config.duplicate_policy == DuplicatePolicy::Reject => {
                return Err(SubscriptionError::DuplicateSubscription {
                    subscriber: subscriber.to_string(),
                    meal: meal.to_string(),
                });
            }
            Some(_) => {}
            None => {
                if let Some(limit) = self.config.max_meals_per_subscriber {
                    if self.subscriptions_for(first_name, surname).count() >= limit {
                        return Err(SubscriptionError::SubscriptionLimit {
                            subscriber: subscriber.to_string(),
                            limit,
                        });
                    }
                }
            }
        }

        if !self.is_enough_meal(meal, quantity) {
            return Err(SubscriptionError::InsufficientMeals {
                meal: meal.to_string(),
                requested: quantity,
                available,
            });
        }

        let meal_balance = available - quantity;
        self.set_meal_balance(meal, meal_balance);

        let (subscribed_balance, state) = match existing {
            Some(current) => {
                let updated = current + quantity;
                if let Some(record) = self
                    .subscriptions
                    .find_mut(|s| s.matches(first_name, surname, meal))
                {
                    record.set_balance(updated);
                }
                (updated, SubscriptionState::Active)
            }
            None => {
                self.subscriptions
                    .insert(Subscription::new(subscriber, meal, quantity));
                (quantity, SubscriptionState::Created)
            }
        };

        debug!(
            first_name,
            surname,
            meal,
            quantity,
            meal_balance,
            subscribed_balance,
            ?state,
            "Added meal subscription"
        );

        Ok(SubscriptionChange {
            first_name: first_name.to_string(),
            surname: surname.to_string(),
            meal: meal.to_string(),
            quantity,
            meal_balance,
            subscribed_balance,
            state,
        })
    }

    /// Return `quantity` servings of `meal` from a subscriber to the meal.
    ///
    /// The subscription is removed once its balance reaches zero.
    pub fn remove_meal_subscription(
        &mut self,
        first_name: &str,
        surname: &str,
        meal: &str,
        quantity: i64,
    ) -> Result<SubscriptionChange> {
        let quantity = validate_quantity(quantity, "remove")?;
        self.require_subscriber(first_name, surname)?;
        let available = self.require_meal(meal)?.balance();
        self.require_subscriptions(first_name, surname)?;
        let subscribed = self
            .require_subscription(first_name, surname, meal)?
            .balance();

        if quantity > subscribed {
            return Err(SubscriptionError::ExceedsSubscribed {
                subscriber: format!("{} {}", first_name, surname),
                requested: quantity,
                subscribed,
            });
        }

        let meal_balance = available + quantity;
        self.set_meal_balance(meal, meal_balance);

        let subscribed_balance = subscribed - quantity;
        let state = if subscribed_balance == 0 {
            self.subscriptions
                .remove_first(|s| s.matches(first_name, surname, meal));
            SubscriptionState::Removed
        } else {
            if let Some(record) = self
                .subscriptions
                .find_mut(|s| s.matches(first_name, surname, meal))
            {
                record.set_balance(subscribed_balance);
            }
            SubscriptionState::Active
        };

        debug!(
            first_name,
            surname,
            meal,
            quantity,
            meal_balance,
            subscribed_balance,
            ?state,
            "Removed meal subscription"
        );

        Ok(SubscriptionChange {
            first_name: first_name.to_string(),
            surname: surname.to_string(),
            meal: meal.to_string(),
            quantity,
            meal_balance,
            subscribed_balance,
            state,
        })
    }

    fn set_meal_balance(&mut self, meal: &str, balance: u32) {
        if let Some(entry) = self.meals.find_mut(|m| m.name() == meal) {
            entry.set_balance(balance);
        }
    }

    // --- Lookups ---

    pub fn is_meal(&self, name: &str) -> bool {
        self.meal(name).is_some()
    }

    pub fn is_subscriber(&self, first_name: &str, surname: &str) -> bool {
        self.subscriber(first_name, surname).is_some()
    }

    /// Whether the subscriber holds any subscription at all.
    pub fn has_subscriptions(&self, first_name: &str, surname: &str) -> bool {
        self.subscriptions_for(first_name, surname).next().is_some()
    }

    /// Whether the subscriber holds a subscription for `meal`.
    pub fn is_subscription(&self, first_name: &str, surname: &str, meal: &str) -> bool {
        self.subscription(first_name, surname, meal).is_some()
    }

    /// Whether `meal` has at least `quantity` servings left.
    pub fn is_enough_meal(&self, meal: &str, quantity: u32) -> bool {
        self.meal(meal).is_some_and(|m| m.balance() >= quantity)
    }

    pub fn meal(&self, name: &str) -> Option<&Meal> {
        self.meals.find(|m| m.name() == name)
    }

    pub fn subscriber(&self, first_name: &str, surname: &str) -> Option<&Subscriber> {
        self.subscribers.find(|s| s.is_named(first_name, surname))
    }

    pub fn subscription(&self, first_name: &str, surname: &str, meal: &str) -> Option<&Subscription> {
        self.subscriptions
            .find(|s| s.matches(first_name, surname, meal))
    }

    /// Subscriptions held by one subscriber, ordered by meal name.
    pub fn subscriptions_for<'a>(
        &'a self,
        first_name: &'a str,
        surname: &'a str,
    ) -> impl Iterator<Item = &'a Subscription> + 'a {
        self.subscriptions
            .iter()
            .filter(move |s| s.subscriber().is_named(first_name, surname))
    }

    pub fn require_meal(&self, name: &str) -> Result<&Meal> {
        self.meal(name)
            .ok_or_else(|| SubscriptionError::NoSuchMeal(name.to_string()))
    }

    pub fn require_subscriber(&self, first_name: &str, surname: &str) -> Result<&Subscriber> {
        self.subscriber(first_name, surname).ok_or_else(|| {
            SubscriptionError::NoSuchSubscriber(format!("{} {}", first_name, surname))
        })
    }

    pub fn require_subscriptions(&self, first_name: &str, surname: &str) -> Result<()> {
        if self.has_subscriptions(first_name, surname) {
            Ok(())
        } else {
            Err(SubscriptionError::NoSubscriptions(format!(
                "{} {}",
                first_name, surname
            )))
        }
    }

    pub fn require_subscription(
        &self,
        first_name: &str,
        surname: &str,
        meal: &str,
    ) -> Result<&Subscription> {
        self.subscription(first_name, surname, meal).ok_or_else(|| {
            SubscriptionError::NoSuchSubscription {
                subscriber: format!("{} {}", first_name, surname),
                meal: meal.to_string(),
            }
        })
    }

    // --- Read-only Views ---

    pub fn meals(&self) -> Iter<'_, Meal> {
        self.meals.iter()
    }

    pub fn subscribers(&self) -> Iter<'_, Subscriber> {
        self.subscribers.iter()
    }

    pub fn subscriptions(&self) -> Iter<'_, Subscription> {
        self.subscriptions.iter()
    }
}

impl Default for SubscriptionManager {
    fn default() -> Self {
        Self::new(ManagerConfig::default())
    }
}

/// Check a requested quantity is a positive number of servings.
fn validate_quantity(quantity: i64, action: &str) -> Result<u32> {
    if quantity <= 0 {
        return Err(SubscriptionError::IllegalNumberInput(format!(
            "The number of meals you would like to {} needs to be greater than 0.",
            action
        )));
    }
    u32::try_from(quantity).map_err(|_| {
        SubscriptionError::IllegalNumberInput(format!(
            "The number of meals you would like to {} is too large.",
            action
        ))
    })
}

/// First element of `batch` that repeats within it or already exists in
/// `catalog`. Walks both sorted lists once.
fn first_duplicate<'a, T: Ord>(batch: &'a SortedList<T>, catalog: &SortedList<T>) -> Option<&'a T> {
    let mut existing = catalog.iter().peekable();
    let mut previous: Option<&T> = None;

    for value in batch {
        if previous.is_some_and(|p| p == value) {
            return Some(value);
        }
        while existing.next_if(|e| *e < value).is_some() {}
        if existing.peek().is_some_and(|e| *e == value) {
            return Some(value);
        }
        previous = Some(value);
    }
    None
}
