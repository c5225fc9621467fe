//! Property tests for the sorted linked list.

use meal_subscriptions::{Meal, SortedList, Subscriber};
use proptest::prelude::*;
use std::cmp::Ordering;

/// Orders on `key` only; `seq` records arrival order.
#[derive(Clone, Debug)]
struct Tagged {
    key: u8,
    seq: usize,
}

impl PartialEq for Tagged {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Tagged {}

impl PartialOrd for Tagged {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tagged {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

fn is_sorted<T: Ord>(list: &SortedList<T>) -> bool {
    list.iter().zip(list.iter().skip(1)).all(|(a, b)| a <= b)
}

fn sorted_copy(values: &[i32]) -> Vec<i32> {
    let mut copy = values.to_vec();
    copy.sort();
    copy
}

proptest! {
    #[test]
    fn inserts_stay_sorted(values in prop::collection::vec(any::<i32>(), 0..200)) {
        let list: SortedList<i32> = values.iter().copied().collect();

        prop_assert!(is_sorted(&list));
        prop_assert_eq!(list.len(), values.len());
        prop_assert_eq!(list.iter().copied().collect::<Vec<_>>(), sorted_copy(&values));
    }

    #[test]
    fn merge_is_sorted_union(
        left in prop::collection::vec(-50i32..50, 0..100),
        right in prop::collection::vec(-50i32..50, 0..100),
    ) {
        let mut merged: SortedList<i32> = left.iter().copied().collect();
        merged.merge(right.iter().copied().collect());

        let mut expected = left.clone();
        expected.extend(&right);
        expected.sort();

        prop_assert!(is_sorted(&merged));
        prop_assert_eq!(merged.len(), left.len() + right.len());
        prop_assert_eq!(merged.iter().copied().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn inserts_and_merges_interleaved(
        batches in prop::collection::vec(prop::collection::vec(any::<i16>(), 0..20), 0..10),
        singles in prop::collection::vec(any::<i16>(), 0..50),
    ) {
        let mut list = SortedList::new();
        let mut all = Vec::new();

        for (batch, single) in batches.iter().zip(singles.iter().chain(std::iter::repeat(&0))) {
            list.insert(*single);
            all.push(*single);
            list.merge(batch.iter().copied().collect());
            all.extend(batch);
        }

        all.sort();
        prop_assert!(is_sorted(&list));
        prop_assert_eq!(list.into_iter().collect::<Vec<_>>(), all);
    }

    #[test]
    fn insertion_order_does_not_change_result(values in prop::collection::vec(any::<u16>(), 0..100)) {
        let forward: SortedList<u16> = values.iter().copied().collect();
        let backward: SortedList<u16> = values.iter().rev().copied().collect();

        prop_assert!(forward.iter().eq(backward.iter()));
    }

    #[test]
    fn equal_keys_keep_insertion_order(keys in prop::collection::vec(0u8..4, 0..100)) {
        let list: SortedList<Tagged> = keys
            .iter()
            .enumerate()
            .map(|(seq, &key)| Tagged { key, seq })
            .collect();

        let items: Vec<_> = list.iter().collect();
        for pair in items.windows(2) {
            if pair[0].key == pair[1].key {
                prop_assert!(pair[0].seq < pair[1].seq);
            }
        }
    }

    #[test]
    fn merge_puts_receiver_first_on_ties(
        left in prop::collection::vec(0u8..4, 0..50),
        right in prop::collection::vec(0u8..4, 0..50),
    ) {
        // seq < 1000 marks the receiver, seq >= 1000 the argument
        let mut merged: SortedList<Tagged> = left
            .iter()
            .enumerate()
            .map(|(seq, &key)| Tagged { key, seq })
            .collect();
        merged.merge(
            right
                .iter()
                .enumerate()
                .map(|(seq, &key)| Tagged { key, seq: 1000 + seq })
                .collect(),
        );

        let items: Vec<_> = merged.iter().collect();
        for pair in items.windows(2) {
            if pair[0].key == pair[1].key {
                prop_assert!(pair[0].seq < pair[1].seq);
            }
        }
    }

    #[test]
    fn remove_first_keeps_order(
        values in prop::collection::vec(0i32..20, 1..60),
        target in 0i32..20,
    ) {
        let mut list: SortedList<i32> = values.iter().copied().collect();
        let removed = list.remove_first(|v| *v == target);

        prop_assert_eq!(removed.is_some(), values.contains(&target));
        prop_assert!(is_sorted(&list));
        prop_assert_eq!(list.len(), values.len() - usize::from(removed.is_some()));
        prop_assert_eq!(list.iter().count(), list.len());
    }
}

#[test]
fn test_meals_sort_by_name() {
    let meals: SortedList<Meal> = [
        Meal::new("Soup", 1),
        Meal::new("Curry", 2),
        Meal::new("Pasta", 3),
    ]
    .into_iter()
    .collect();

    let names: Vec<_> = meals.iter().map(|m| m.name()).collect();
    assert_eq!(names, vec!["Curry", "Pasta", "Soup"]);
}

#[test]
fn test_subscribers_sort_by_surname_then_first_name() {
    let roster: SortedList<Subscriber> = [
        Subscriber::new("Zoe", "Adams"),
        Subscriber::new("Ann", "Lee"),
        Subscriber::new("Amy", "Adams"),
    ]
    .into_iter()
    .collect();

    let names: Vec<_> = roster.iter().map(|s| s.to_string()).collect();
    assert_eq!(names, vec!["Amy Adams", "Zoe Adams", "Ann Lee"]);
}
