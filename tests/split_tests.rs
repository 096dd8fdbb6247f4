// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use spendwise::models::{Category, NewExpense};
use spendwise::store::{Store, split_evenly};

fn dinner(store: &Store, amount: Decimal) -> i64 {
    store
        .add_expense(
            "default",
            &NewExpense::new(
                NaiveDate::from_ymd_opt(2024, 4, 12).unwrap(),
                Category::Food,
                "Team dinner",
                amount,
            ),
        )
        .unwrap()
}

fn people(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn ninety_across_three_is_thirty_each() {
    let store = Store::open_in_memory().unwrap();
    let parent = dinner(&store, Decimal::new(90, 0));
    let ids = store
        .split_expense("default", parent, &people(&["Ann", "Ben", "Cat"]), None)
        .unwrap();
    assert_eq!(ids.len(), 3);

    let rows = store.splits_for("default", parent).unwrap();
    assert_eq!(rows.len(), 3);
    for s in &rows {
        assert_eq!(s.expense_id, parent);
        assert_eq!(s.amount, Decimal::new(30, 0));
    }
    let names: Vec<&str> = rows.iter().map(|s| s.person.as_str()).collect();
    assert_eq!(names, vec!["Ann", "Ben", "Cat"]);
}

#[test]
fn uneven_shares_still_sum_to_total() {
    let shares = split_evenly(Decimal::new(100, 0), 3);
    assert_eq!(
        shares,
        vec![
            Decimal::new(3334, 2),
            Decimal::new(3333, 2),
            Decimal::new(3333, 2)
        ]
    );
    assert_eq!(shares.iter().copied().sum::<Decimal>(), Decimal::new(100, 0));
    assert!(split_evenly(Decimal::new(10, 0), 0).is_empty());
}

#[test]
fn explicit_total_overrides_parent_amount() {
    let store = Store::open_in_memory().unwrap();
    let parent = dinner(&store, Decimal::new(90, 0));
    store
        .split_expense("default", parent, &people(&["Ann", "Ben"]), Some(Decimal::new(50, 0)))
        .unwrap();
    let rows = store.splits("default").unwrap();
    assert!(rows.iter().all(|s| s.amount == Decimal::new(25, 0)));
}

#[test]
fn missing_parent_is_not_found() {
    let store = Store::open_in_memory().unwrap();
    let err = store
        .split_expense("default", 42, &people(&["Ann"]), None)
        .unwrap_err();
    assert!(err.is_not_found());
    assert!(store.splits("default").unwrap().is_empty());
}

#[test]
fn foreign_parent_is_not_found() {
    let store = Store::open_in_memory().unwrap();
    let parent = dinner(&store, Decimal::new(90, 0));
    let err = store
        .split_expense("mallory", parent, &people(&["Ann"]), None)
        .unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn empty_or_blank_people_are_rejected_without_writing() {
    let store = Store::open_in_memory().unwrap();
    let parent = dinner(&store, Decimal::new(90, 0));
    assert!(
        store
            .split_expense("default", parent, &[], None)
            .unwrap_err()
            .is_validation()
    );
    assert!(
        store
            .split_expense("default", parent, &people(&["Ann", "  "]), None)
            .unwrap_err()
            .is_validation()
    );
    assert!(store.splits_for("default", parent).unwrap().is_empty());
}

#[test]
fn deleting_the_parent_cascades_to_splits() {
    let store = Store::open_in_memory().unwrap();
    let parent = dinner(&store, Decimal::new(60, 0));
    store
        .split_expense("default", parent, &people(&["Ann", "Ben"]), None)
        .unwrap();
    store.delete_expense("default", parent).unwrap();
    assert!(store.splits("default").unwrap().is_empty());
}

#[test]
fn total_below_a_cent_per_person_is_rejected() {
    let store = Store::open_in_memory().unwrap();
    let parent = dinner(&store, Decimal::new(90, 0));
    let err = store
        .split_expense("default", parent, &people(&["Ann", "Ben", "Cat"]), Some(Decimal::new(1, 2)))
        .unwrap_err();
    assert!(err.is_validation());
    assert!(store.splits_for("default", parent).unwrap().is_empty());

    // exactly one cent each is fine
    store
        .split_expense("default", parent, &people(&["Ann", "Ben", "Cat"]), Some(Decimal::new(3, 2)))
        .unwrap();
    assert!(
        store
            .splits_for("default", parent)
            .unwrap()
            .iter()
            .all(|s| s.amount == Decimal::new(1, 2))
    );
}

#[test]
fn single_share_can_be_removed() {
    let store = Store::open_in_memory().unwrap();
    let parent = dinner(&store, Decimal::new(90, 0));
    let ids = store
        .split_expense("default", parent, &people(&["Ann", "Ben", "Cat"]), None)
        .unwrap();

    assert_eq!(store.split("default", ids[1]).unwrap().person, "Ben");
    assert!(store.delete_split("mallory", ids[1]).unwrap_err().is_not_found());
    store.delete_split("default", ids[1]).unwrap();
    assert!(store.split("default", ids[1]).unwrap_err().is_not_found());
    assert!(store.delete_split("default", ids[1]).unwrap_err().is_not_found());

    let left: Vec<String> = store
        .splits_for("default", parent)
        .unwrap()
        .into_iter()
        .map(|s| s.person)
        .collect();
    assert_eq!(left, vec!["Ann", "Cat"]);
    assert_eq!(store.expense("default", parent).unwrap().amount, Decimal::new(90, 0));
}
