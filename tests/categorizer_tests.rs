// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use spendwise::categorizer::{Categorizer, ModelCache, fingerprint, tokenize};
use spendwise::cli::build_cli;
use spendwise::commands::categorize::predictions;
use spendwise::models::{Category, Expense, NewExpense};
use spendwise::store::Store;

fn training() -> Vec<(&'static str, Category)> {
    vec![
        ("lunch at the cafe", Category::Food),
        ("groceries and coffee", Category::Food),
        ("bus ticket downtown", Category::Transport),
        ("train ticket", Category::Transport),
        ("movie night", Category::Entertainment),
    ]
}

fn as_expenses(samples: &[(&str, Category)]) -> Vec<Expense> {
    samples
        .iter()
        .enumerate()
        .map(|(i, (text, cat))| Expense {
            id: i as i64 + 1,
            owner: "default".into(),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            category: *cat,
            description: text.to_string(),
            amount: Decimal::ONE,
            currency: "USD".into(),
            recurring: false,
            recurrence_period: None,
        })
        .collect()
}

#[test]
fn tokens_are_lowercased_words_of_two_or_more_chars() {
    assert_eq!(tokenize("A Bus-Ticket, x 42!"), vec!["bus", "ticket", "42"]);
    assert!(tokenize("a b c").is_empty());
}

#[test]
fn predicts_from_shared_vocabulary() {
    let model = Categorizer::fit(training());
    assert_eq!(model.predict("ticket for the bus"), Some(Category::Transport));
    assert_eq!(model.predict("Coffee"), Some(Category::Food));
    assert_eq!(model.predict("late MOVIE"), Some(Category::Entertainment));
}

#[test]
fn unseen_words_fall_back_to_the_prior() {
    let model = Categorizer::fit(training());
    // Food has the largest share of documents (tied with Transport, earlier in order).
    assert_eq!(model.predict("zzz qqq"), Some(Category::Food));
    assert_eq!(model.predict(""), Some(Category::Food));
}

#[test]
fn single_category_always_wins() {
    let model = Categorizer::fit(vec![("power bill", Category::Utilities)]);
    assert_eq!(model.classes(), &[Category::Utilities]);
    assert_eq!(model.predict("pizza"), Some(Category::Utilities));
}

#[test]
fn nothing_fitted_predicts_nothing() {
    let model = Categorizer::fit(Vec::<(&str, Category)>::new());
    assert_eq!(model.vocabulary_len(), 0);
    assert_eq!(model.predict("anything"), None);
}

#[test]
fn cache_refits_only_when_training_set_changes() {
    let mut records = as_expenses(&training());
    let mut cache = ModelCache::new();
    cache.get_or_fit(&records);
    cache.get_or_fit(&records);
    assert_eq!(cache.fits(), 1);

    let before = fingerprint(&records);
    records[0].category = Category::Other;
    assert_ne!(fingerprint(&records), before);
    assert_eq!(
        cache.get_or_fit(&records).predict("cafe"),
        Some(Category::Other)
    );
    assert_eq!(cache.fits(), 2);
}

#[test]
fn categorize_command_fits_once_for_many_texts() {
    let store = Store::open_in_memory().unwrap();
    for (text, cat) in training() {
        store
            .add_expense(
                "default",
                &NewExpense::new(
                    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                    cat,
                    text,
                    Decimal::ONE,
                ),
            )
            .unwrap();
    }
    let m = build_cli().get_matches_from([
        "spendwise",
        "categorize",
        "--text",
        "bus to work",
        "--text",
        "cafe breakfast",
    ]);
    let (_, sub) = m.subcommand().unwrap();
    let mut cache = ModelCache::new();
    let out = predictions(&store, "default", &mut cache, sub).unwrap();
    assert_eq!(
        out,
        vec![
            ("bus to work".to_string(), Some(Category::Transport)),
            ("cafe breakfast".to_string(), Some(Category::Food)),
        ]
    );
    assert_eq!(cache.fits(), 1);
}
