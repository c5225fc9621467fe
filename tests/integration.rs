//! Integration tests for the subscription manager.

use meal_subscriptions::{
    DuplicatePolicy, ManagerConfig, Meal, Seed, Subscriber, SubscriptionManager,
    SubscriptionState,
};

fn test_desk(config: ManagerConfig) -> SubscriptionManager {
    let seed = Seed {
        subscribers: vec![
            Subscriber::new("Ann", "Lee"),
            Subscriber::new("Bob", "Kim"),
            Subscriber::new("Cat", "Ng"),
        ],
        meals: vec![
            Meal::new("Pasta", 10),
            Meal::new("Curry", 6),
            Meal::new("Soup", 4),
            Meal::new("Salad", 3),
        ],
    };
    SubscriptionManager::from_seed(seed, config).unwrap()
}

fn meal_balance(manager: &SubscriptionManager, meal: &str) -> u32 {
    manager.meal(meal).unwrap().balance()
}

// --- Scenarios ---

#[test]
fn test_add_then_remove_pasta() {
    let mut manager = test_desk(ManagerConfig::default());

    let change = manager
        .add_meal_subscription("Ann", "Lee", "Pasta", 4)
        .unwrap();
    assert_eq!(change.state, SubscriptionState::Created);
    assert_eq!(meal_balance(&manager, "Pasta"), 6);

    let records: Vec<_> = manager.subscriptions().map(|s| s.to_string()).collect();
    assert_eq!(records, vec!["Subscriber: Ann Lee Subscriptions: Pasta 4"]);

    // 4 + 7 would exceed the 10 servings
    let err = manager
        .add_meal_subscription("Ann", "Lee", "Pasta", 7)
        .unwrap_err();
    assert_eq!(err.kind(), meal_subscriptions::ErrorKind::IllegalMealQuantity);
    assert_eq!(meal_balance(&manager, "Pasta"), 6);
    assert_eq!(
        manager.subscription("Ann", "Lee", "Pasta").unwrap().balance(),
        4
    );

    let change = manager
        .remove_meal_subscription("Ann", "Lee", "Pasta", 4)
        .unwrap();
    assert_eq!(change.state, SubscriptionState::Removed);
    assert_eq!(meal_balance(&manager, "Pasta"), 10);
    assert!(!manager.is_subscription("Ann", "Lee", "Pasta"));
    assert_eq!(manager.subscriptions().len(), 0);
}

#[test]
fn test_resubscribing_merges_by_default() {
    let mut manager = test_desk(ManagerConfig::default());

    manager.add_meal_subscription("Bob", "Kim", "Curry", 2).unwrap();
    let change = manager
        .add_meal_subscription("Bob", "Kim", "Curry", 3)
        .unwrap();

    assert_eq!(change.state, SubscriptionState::Active);
    assert_eq!(change.subscribed_balance, 5);
    assert_eq!(meal_balance(&manager, "Curry"), 1);
    assert_eq!(manager.subscriptions().len(), 1);
}

#[test]
fn test_resubscribing_rejected_under_reject_policy() {
    let mut manager = test_desk(ManagerConfig {
        duplicate_policy: DuplicatePolicy::Reject,
        ..Default::default()
    });

    manager.add_meal_subscription("Bob", "Kim", "Curry", 2).unwrap();
    let err = manager
        .add_meal_subscription("Bob", "Kim", "Curry", 3)
        .unwrap_err();

    assert_eq!(err.kind(), meal_subscriptions::ErrorKind::Duplicate);
    assert_eq!(meal_balance(&manager, "Curry"), 4);
    assert_eq!(
        manager.subscription("Bob", "Kim", "Curry").unwrap().balance(),
        2
    );
}

// --- Catalog Order ---

#[test]
fn test_subscriptions_group_by_subscriber() {
    let mut manager = test_desk(ManagerConfig::default());

    manager.add_meal_subscription("Ann", "Lee", "Soup", 1).unwrap();
    manager.add_meal_subscription("Cat", "Ng", "Pasta", 1).unwrap();
    manager.add_meal_subscription("Bob", "Kim", "Salad", 1).unwrap();
    manager.add_meal_subscription("Ann", "Lee", "Curry", 1).unwrap();
    manager.add_meal_subscription("Bob", "Kim", "Curry", 1).unwrap();

    let order: Vec<_> = manager
        .subscriptions()
        .map(|s| format!("{}/{}", s.subscriber().surname(), s.meal()))
        .collect();
    assert_eq!(
        order,
        vec!["Kim/Curry", "Kim/Salad", "Lee/Curry", "Lee/Soup", "Ng/Pasta"]
    );

    let anns: Vec<_> = manager
        .subscriptions_for("Ann", "Lee")
        .map(|s| s.meal())
        .collect();
    assert_eq!(anns, vec!["Curry", "Soup"]);
}

#[test]
fn test_catalog_views_are_sorted() {
    let manager = test_desk(ManagerConfig::default());

    let meals: Vec<_> = manager.meals().map(|m| m.name()).collect();
    assert_eq!(meals, vec!["Curry", "Pasta", "Salad", "Soup"]);

    let roster: Vec<_> = manager.subscribers().map(|s| s.to_string()).collect();
    assert_eq!(roster, vec!["Bob Kim", "Ann Lee", "Cat Ng"]);
}

// --- Balance Invariants ---

#[test]
fn test_balances_conserved_across_many_operations() {
    let mut manager = test_desk(ManagerConfig {
        max_meals_per_subscriber: None,
        ..Default::default()
    });
    let originals: Vec<(String, u32)> = manager
        .meals()
        .map(|m| (m.name().to_string(), m.balance()))
        .collect();

    let people = [("Ann", "Lee"), ("Bob", "Kim"), ("Cat", "Ng")];
    let meals = ["Pasta", "Curry", "Soup", "Salad"];

    // Deterministic mix of adds and removes, some of which fail.
    for step in 0..300i64 {
        let (first, surname) = people[(step % 3) as usize];
        let meal = meals[((step * 7) % 4) as usize];
        let quantity = (step * 13) % 5 - 1;
        if step % 3 == 0 {
            let _ = manager.remove_meal_subscription(first, surname, meal, quantity);
        } else {
            let _ = manager.add_meal_subscription(first, surname, meal, quantity);
        }

        for (name, original) in &originals {
            let available = meal_balance(&manager, name);
            let committed: u32 = manager
                .subscriptions()
                .filter(|s| s.meal() == name)
                .map(|s| s.balance())
                .sum();
            assert_eq!(available + committed, *original, "step {} meal {}", step, name);
        }
        for subscription in manager.subscriptions() {
            assert!(subscription.balance() >= 1);
        }
    }
}

#[test]
fn test_exhausting_a_meal() {
    let mut manager = test_desk(ManagerConfig::default());

    manager.add_meal_subscription("Ann", "Lee", "Salad", 3).unwrap();
    assert_eq!(meal_balance(&manager, "Salad"), 0);
    assert!(!manager.is_enough_meal("Salad", 1));

    let err = manager
        .add_meal_subscription("Bob", "Kim", "Salad", 1)
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "The number of Salad meals you would like to add (1) exceeds the number of Salad meals currently available (0)."
    );
    assert!(!manager.has_subscriptions("Bob", "Kim"));
}
