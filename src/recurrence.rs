// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Lazy expansion of recurring expense rules into dated occurrences.
//!
//! Each occurrence is computed from the rule's start date rather than from the
//! previous occurrence, so month-end clamping never drifts: a rule starting on
//! Jan 31 yields Feb 28 (or 29) and then Mar 31.

use chrono::{Days, Months, NaiveDate};

use crate::models::{Expense, Frequency, RecurringExpense};

/// Date of the `n`th occurrence (0-based) of a series starting at `start`.
pub fn nth_occurrence(start: NaiveDate, freq: Frequency, n: u32) -> Option<NaiveDate> {
    match freq {
        Frequency::Daily => start.checked_add_days(Days::new(u64::from(n))),
        Frequency::Weekly => start.checked_add_days(Days::new(u64::from(n) * 7)),
        Frequency::Monthly => start.checked_add_months(Months::new(n)),
        Frequency::Yearly => start.checked_add_months(Months::new(n.checked_mul(12)?)),
    }
}

/// Last date an occurrence may fall on: `through`, or the rule's end date if earlier.
fn horizon(rule: &RecurringExpense, through: NaiveDate) -> NaiveDate {
    match rule.end_date {
        Some(end) if end < through => end,
        _ => through,
    }
}

/// All occurrence dates of `rule` on or before `through` (and its end date).
pub fn occurrences(rule: &RecurringExpense, through: NaiveDate) -> Vec<NaiveDate> {
    let last = horizon(rule, through);
    let mut out = Vec::new();
    let mut n = 0u32;
    while let Some(d) = nth_occurrence(rule.start_date, rule.frequency, n) {
        if d > last {
            break;
        }
        out.push(d);
        n += 1;
    }
    out
}

/// First occurrence strictly after `after`, if the rule has not ended by then.
pub fn next_occurrence(rule: &RecurringExpense, after: NaiveDate) -> Option<NaiveDate> {
    let mut n = 0u32;
    while let Some(d) = nth_occurrence(rule.start_date, rule.frequency, n) {
        if let Some(end) = rule.end_date {
            if d > end {
                return None;
            }
        }
        if d > after {
            return Some(d);
        }
        n += 1;
    }
    None
}

/// Expands a rule into expense rows. Each row carries the rule id as its `id`.
pub fn materialize(rule: &RecurringExpense, through: NaiveDate) -> Vec<Expense> {
    occurrences(rule, through)
        .into_iter()
        .map(|date| Expense {
            id: rule.id,
            owner: rule.owner.clone(),
            date,
            category: rule.category,
            description: rule.description.clone(),
            amount: rule.amount,
            currency: rule.currency.clone(),
            recurring: true,
            recurrence_period: Some(rule.frequency),
        })
        .collect()
}
