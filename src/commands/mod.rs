// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod budgets;
pub mod categorize;
pub mod debts;
pub mod expenses;
pub mod exporter;
pub mod fx;
pub mod income;
pub mod recurring;
pub mod reports;
pub mod splits;
pub mod users;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::ArgMatches;

use crate::aggregate::ExpenseFilter;
use crate::utils::{parse_date, parse_decimal};

pub(crate) fn arg<'a>(m: &'a ArgMatches, name: &str) -> Result<&'a str> {
    m.get_one::<String>(name)
        .map(|s| s.as_str())
        .with_context(|| format!("--{} is required", name))
}

pub(crate) fn opt<'a>(m: &'a ArgMatches, name: &str) -> Option<&'a str> {
    m.get_one::<String>(name)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
}

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// `--through`, or today.
pub fn through_from_args(m: &ArgMatches) -> Result<NaiveDate> {
    match opt(m, "through") {
        Some(d) => parse_date(d),
        None => Ok(today()),
    }
}

pub fn filter_from_args(m: &ArgMatches) -> Result<ExpenseFilter> {
    Ok(ExpenseFilter {
        from: opt(m, "from").map(parse_date).transpose()?,
        to: opt(m, "to").map(parse_date).transpose()?,
        category: opt(m, "category").map(str::parse).transpose()?,
        min_amount: opt(m, "min").map(parse_decimal).transpose()?,
        max_amount: opt(m, "max").map(parse_decimal).transpose()?,
    })
}
