// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Derived views over an in-memory record set.
//!
//! Everything here is pure: the same input always yields the same output, and
//! an empty slice is a valid input that produces an empty (or zero) result.
//! Amounts are summed as-is; callers convert currencies first if they need to.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Category, Debt, DebtKind, Expense, Income};

/// Calendar `YYYY-MM` bucket for a date.
pub fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

pub fn total(records: &[Expense]) -> Decimal {
    records.iter().map(|e| e.amount).sum()
}

pub fn daily_totals(records: &[Expense]) -> BTreeMap<NaiveDate, Decimal> {
    let mut out = BTreeMap::new();
    for e in records {
        *out.entry(e.date).or_insert(Decimal::ZERO) += e.amount;
    }
    out
}

pub fn monthly_totals(records: &[Expense]) -> BTreeMap<String, Decimal> {
    let mut out = BTreeMap::new();
    for e in records {
        *out.entry(month_key(e.date)).or_insert(Decimal::ZERO) += e.amount;
    }
    out
}

pub fn category_totals(records: &[Expense]) -> BTreeMap<Category, Decimal> {
    let mut out = BTreeMap::new();
    for e in records {
        *out.entry(e.category).or_insert(Decimal::ZERO) += e.amount;
    }
    out
}

/// Selection criteria for [`filter`]. Every bound is inclusive and every
/// criterion is optional; the default filter keeps everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub category: Option<Category>,
    pub min_amount: Option<Decimal>,
    pub max_amount: Option<Decimal>,
}

impl ExpenseFilter {
    pub fn matches(&self, e: &Expense) -> bool {
        self.from.is_none_or(|d| e.date >= d)
            && self.to.is_none_or(|d| e.date <= d)
            && self.category.is_none_or(|c| e.category == c)
            && self.min_amount.is_none_or(|a| e.amount >= a)
            && self.max_amount.is_none_or(|a| e.amount <= a)
    }
}

pub fn filter(records: &[Expense], f: &ExpenseFilter) -> Vec<Expense> {
    records.iter().filter(|e| f.matches(e)).cloned().collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CashflowRow {
    pub income: Decimal,
    pub expense: Decimal,
    pub net: Decimal,
}

/// Income and spend per calendar month.
pub fn cashflow(expenses: &[Expense], income: &[Income]) -> BTreeMap<String, CashflowRow> {
    let mut out: BTreeMap<String, CashflowRow> = BTreeMap::new();
    for e in expenses {
        out.entry(month_key(e.date)).or_default().expense += e.amount;
    }
    for i in income {
        out.entry(month_key(i.date)).or_default().income += i.amount;
    }
    for row in out.values_mut() {
        row.net = row.income - row.expense;
    }
    out
}

/// Net position per person: positive means the person owes the user
/// (loans handed out), negative means the user owes them.
pub fn debt_balances(debts: &[Debt]) -> BTreeMap<String, Decimal> {
    let mut out = BTreeMap::new();
    for d in debts {
        let signed = match d.kind {
            DebtKind::Loan => d.amount,
            DebtKind::Debt => -d.amount,
        };
        *out.entry(d.person.clone()).or_insert(Decimal::ZERO) += signed;
    }
    out
}
