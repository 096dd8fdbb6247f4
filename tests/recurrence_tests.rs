// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use spendwise::models::{Category, Frequency, NewExpense, NewRecurring, RecurringExpense};
use spendwise::recurrence::{materialize, next_occurrence, occurrences};
use spendwise::store::Store;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn rule(start: &str, end: Option<&str>, frequency: Frequency) -> RecurringExpense {
    RecurringExpense {
        id: 7,
        owner: "default".into(),
        start_date: d(start),
        end_date: end.map(d),
        category: Category::Utilities,
        description: "Rent".into(),
        amount: Decimal::new(1200, 0),
        currency: "USD".into(),
        frequency,
    }
}

fn strs(dates: Vec<NaiveDate>) -> Vec<String> {
    dates.into_iter().map(|d| d.to_string()).collect()
}

#[test]
fn monthly_from_the_31st_clamps_without_drifting() {
    let r = rule("2024-01-31", None, Frequency::Monthly);
    assert_eq!(
        strs(occurrences(&r, d("2024-05-01"))),
        vec!["2024-01-31", "2024-02-29", "2024-03-31", "2024-04-30"]
    );
}

#[test]
fn yearly_from_leap_day_lands_on_feb_28() {
    let r = rule("2024-02-29", None, Frequency::Yearly);
    assert_eq!(
        strs(occurrences(&r, d("2028-03-01"))),
        vec!["2024-02-29", "2025-02-28", "2026-02-28", "2027-02-28", "2028-02-29"]
    );
}

#[test]
fn weekly_and_daily_steps() {
    let r = rule("2024-03-01", None, Frequency::Weekly);
    assert_eq!(
        strs(occurrences(&r, d("2024-03-15"))),
        vec!["2024-03-01", "2024-03-08", "2024-03-15"]
    );
    let r = rule("2024-03-01", None, Frequency::Daily);
    assert_eq!(occurrences(&r, d("2024-03-10")).len(), 10);
}

#[test]
fn end_date_bounds_the_series() {
    let r = rule("2024-01-01", Some("2024-03-15"), Frequency::Monthly);
    assert_eq!(
        strs(occurrences(&r, d("2024-12-31"))),
        vec!["2024-01-01", "2024-02-01", "2024-03-01"]
    );
}

#[test]
fn nothing_is_due_before_the_start() {
    let r = rule("2024-06-01", None, Frequency::Monthly);
    assert!(occurrences(&r, d("2024-05-31")).is_empty());
}

#[test]
fn next_occurrence_respects_end_date() {
    let r = rule("2024-01-31", Some("2024-04-15"), Frequency::Monthly);
    assert_eq!(next_occurrence(&r, d("2024-02-10")), Some(d("2024-02-29")));
    assert_eq!(next_occurrence(&r, d("2024-03-31")), None);
    assert_eq!(next_occurrence(&r, d("2023-12-01")), Some(d("2024-01-31")));
}

#[test]
fn materialized_rows_carry_rule_fields() {
    let r = rule("2024-01-15", None, Frequency::Monthly);
    let rows = materialize(&r, d("2024-02-20"));
    assert_eq!(rows.len(), 2);
    for e in &rows {
        assert_eq!(e.id, 7);
        assert!(e.recurring);
        assert_eq!(e.recurrence_period, Some(Frequency::Monthly));
        assert_eq!(e.category, Category::Utilities);
        assert_eq!(e.amount, Decimal::new(1200, 0));
    }
}

#[test]
fn ledger_merges_stored_and_materialized_rows() {
    let store = Store::open_in_memory().unwrap();
    store
        .add_expense(
            "default",
            &NewExpense::new(d("2024-02-10"), Category::Food, "Groceries", Decimal::new(40, 0)),
        )
        .unwrap();
    let id = store
        .add_recurring(
            "default",
            &NewRecurring {
                start_date: d("2024-01-01"),
                end_date: None,
                category: Category::Utilities,
                description: "Internet".into(),
                amount: Decimal::new(30, 0),
                currency: "USD".into(),
                frequency: Frequency::Monthly,
            },
        )
        .unwrap();

    let ledger = store.ledger("default", d("2024-03-05")).unwrap();
    let summary: Vec<(String, bool)> = ledger
        .iter()
        .map(|e| (e.date.to_string(), e.recurring))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("2024-01-01".to_string(), true),
            ("2024-02-01".to_string(), true),
            ("2024-02-10".to_string(), false),
            ("2024-03-01".to_string(), true),
        ]
    );
    assert!(ledger.iter().filter(|e| e.recurring).all(|e| e.id == id));

    // Only the rule is persisted.
    assert_eq!(store.expenses("default").unwrap().len(), 1);
    assert_eq!(store.recurring("default").unwrap().len(), 1);
}

#[test]
fn rule_with_end_before_start_is_rejected() {
    let store = Store::open_in_memory().unwrap();
    let err = store
        .add_recurring(
            "default",
            &NewRecurring {
                start_date: d("2024-05-01"),
                end_date: Some(d("2024-04-01")),
                category: Category::Other,
                description: String::new(),
                amount: Decimal::new(5, 0),
                currency: "USD".into(),
                frequency: Frequency::Weekly,
            },
        )
        .unwrap_err();
    assert!(err.is_validation());
    assert!(store.recurring("default").unwrap().is_empty());
}

#[test]
fn deleting_a_rule_drops_its_occurrences() {
    let store = Store::open_in_memory().unwrap();
    let id = store
        .add_recurring(
            "default",
            &NewRecurring {
                start_date: d("2024-01-01"),
                end_date: None,
                category: Category::Entertainment,
                description: "Streaming".into(),
                amount: Decimal::new(999, 2),
                currency: "USD".into(),
                frequency: Frequency::Monthly,
            },
        )
        .unwrap();
    assert_eq!(store.ledger("default", d("2024-03-01")).unwrap().len(), 3);
    store.delete_recurring("default", id).unwrap();
    assert!(store.ledger("default", d("2024-03-01")).unwrap().is_empty());
    assert!(store.recurring_rule("default", id).unwrap_err().is_not_found());
}
