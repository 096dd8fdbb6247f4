// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use spendwise::cli::build_cli;
use spendwise::commands::{expenses, reports};
use spendwise::config::{
    Config, ENV_DB, ENV_SMTP_FROM, ENV_SMTP_HOST, ENV_SMTP_PASSWORD, ENV_SMTP_USER, ENV_USER,
};
use spendwise::models::{Category, Frequency, NewExpense, NewIncome, NewRecurring};
use spendwise::store::Store;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn seeded() -> Store {
    let store = Store::open_in_memory().unwrap();
    for (date, cat, amount, ccy) in [
        ("2025-01-01", Category::Food, 10, "USD"),
        ("2025-01-02", Category::Transport, 20, "USD"),
        ("2025-01-03", Category::Food, 30, "USD"),
        ("2025-02-01", Category::Utilities, 40, "EUR"),
    ] {
        store
            .add_expense(
                "default",
                &NewExpense {
                    currency: ccy.into(),
                    ..NewExpense::new(d(date), cat, "", Decimal::new(amount, 0))
                },
            )
            .unwrap();
    }
    store
}

fn sub_matches(args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["spendwise"];
    argv.extend_from_slice(args);
    let m = build_cli().get_matches_from(argv);
    let (_, group) = m.subcommand().unwrap();
    let (_, leaf) = group.subcommand().unwrap();
    leaf.clone()
}

#[test]
fn cli_definition_is_consistent() {
    build_cli().debug_assert();
}

#[test]
fn expense_list_is_newest_first_and_limited() {
    let store = seeded();
    let m = sub_matches(&["expense", "list", "--to", "2025-01-31", "--limit", "2"]);
    let rows = expenses::query_rows(&store, "default", &m).unwrap();
    let dates: Vec<String> = rows.iter().map(|e| e.date.to_string()).collect();
    assert_eq!(dates, vec!["2025-01-03", "2025-01-02"]);
}

#[test]
fn expense_list_filters_by_category_and_amount() {
    let store = seeded();
    let m = sub_matches(&["expense", "list", "--category", "food", "--min", "15"]);
    let rows = expenses::query_rows(&store, "default", &m).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].amount, Decimal::new(30, 0));
}

#[test]
fn expense_list_includes_recurring_through_date() {
    let store = seeded();
    store
        .add_recurring(
            "default",
            &NewRecurring {
                start_date: d("2025-01-15"),
                end_date: None,
                category: Category::Entertainment,
                description: "Gym".into(),
                amount: Decimal::new(25, 0),
                currency: "USD".into(),
                frequency: Frequency::Weekly,
            },
        )
        .unwrap();
    let m = sub_matches(&[
        "expense",
        "list",
        "--category",
        "Entertainment",
        "--through",
        "2025-01-29",
    ]);
    let rows = expenses::query_rows(&store, "default", &m).unwrap();
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|e| e.recurring));
}

#[test]
fn bad_category_filter_is_an_error() {
    let store = seeded();
    let m = sub_matches(&["expense", "list", "--category", "Groceries"]);
    let err = expenses::query_rows(&store, "default", &m).unwrap_err();
    assert!(err.to_string().contains("Groceries"));
}

#[test]
fn monthly_report_converts_to_requested_currency() {
    let store = seeded();
    store
        .conn()
        .execute(
            "INSERT INTO fx_rates(date,base,quote,rate) VALUES ('2025-01-01','USD','EUR','0.8')",
            [],
        )
        .unwrap();
    let m = sub_matches(&["report", "monthly", "--base"]);
    let rows = reports::spend_rows(&store, "default", &m).unwrap();
    let total: Decimal = rows.iter().map(|e| e.amount).sum();
    assert_eq!(total, Decimal::new(110, 0));
    assert!(rows.iter().all(|e| e.currency == "USD"));
}

#[test]
fn cashflow_puts_every_month_in_one_currency() {
    let store = seeded();
    store
        .conn()
        .execute(
            "INSERT INTO fx_rates(date,base,quote,rate) VALUES ('2025-01-01','USD','EUR','0.8')",
            [],
        )
        .unwrap();
    store
        .add_income(
            "default",
            &NewIncome {
                date: d("2025-02-10"),
                source: "Salary".into(),
                description: String::new(),
                amount: Decimal::new(100, 0),
                currency: "USD".into(),
            },
        )
        .unwrap();

    let rows = reports::cashflow_rows(&store, "default", &sub_matches(&["report", "cashflow"])).unwrap();
    let feb = &rows["2025-02"];
    assert_eq!(feb.income, Decimal::new(100, 0));
    assert_eq!(feb.expense, Decimal::new(50, 0));
    assert_eq!(feb.net, Decimal::new(50, 0));
    assert_eq!(rows["2025-01"].expense, Decimal::new(60, 0));

    let m = sub_matches(&["report", "cashflow", "--currency", "eur"]);
    let rows = reports::cashflow_rows(&store, "default", &m).unwrap();
    let feb = &rows["2025-02"];
    assert_eq!(feb.income, Decimal::new(80, 0));
    assert_eq!(feb.expense, Decimal::new(40, 0));
    assert_eq!(rows["2025-01"].expense, Decimal::new(48, 0));
}

#[test]
fn edit_and_remove_subcommands_parse() {
    let m = sub_matches(&["debt", "edit", "--id", "3", "--amount", "12.50"]);
    assert_eq!(m.get_one::<i64>("id"), Some(&3));
    assert_eq!(m.get_one::<String>("amount").map(String::as_str), Some("12.50"));

    let m = sub_matches(&["recurring", "edit", "--id", "4", "--no-end"]);
    assert!(m.get_flag("no-end"));
    assert!(
        build_cli()
            .try_get_matches_from(["spendwise", "recurring", "edit", "--id", "4", "--no-end", "--end", "2025-01-01"])
            .is_err()
    );

    let m = sub_matches(&["split", "rm", "--id", "9"]);
    assert_eq!(m.get_one::<i64>("id"), Some(&9));
}

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |k| map.get(k).cloned()
}

#[test]
fn config_reads_db_and_user() {
    let cfg = Config::from_lookup(lookup(&[
        (ENV_DB, "/tmp/ledger.sqlite"),
        (ENV_USER, " alice "),
    ]))
    .unwrap();
    assert_eq!(cfg.db_path.to_string_lossy(), "/tmp/ledger.sqlite");
    assert_eq!(cfg.user, "alice");
    assert!(cfg.mail.is_none());
}

#[test]
fn config_rejects_empty_db_path() {
    assert!(Config::from_lookup(lookup(&[(ENV_DB, "  ")])).is_err());
}

#[test]
fn config_mail_is_all_or_nothing() {
    let partial = Config::from_lookup(lookup(&[
        (ENV_DB, "x.sqlite"),
        (ENV_SMTP_HOST, "smtp.example.com"),
    ]));
    let err = partial.unwrap_err().to_string();
    assert!(err.contains(ENV_SMTP_PASSWORD));

    let full = Config::from_lookup(lookup(&[
        (ENV_DB, "x.sqlite"),
        (ENV_SMTP_HOST, "smtp.example.com"),
        (ENV_SMTP_USER, "mailer"),
        (ENV_SMTP_PASSWORD, "hunter2"),
        (ENV_SMTP_FROM, "ledger@example.com"),
    ]))
    .unwrap();
    let mail = full.mail.unwrap();
    assert_eq!(mail.host, "smtp.example.com");
    assert_eq!(mail.from, "ledger@example.com");
    assert!(!format!("{:?}", mail).contains("hunter2"));
    assert_eq!(full.user, "default");
}
