// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

/// Owner used for rows written without an explicit user.
pub const DEFAULT_OWNER: &str = "default";
pub const DEFAULT_CURRENCY: &str = "USD";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Food,
    Transport,
    Entertainment,
    Utilities,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Entertainment => "Entertainment",
            Category::Utilities => "Utilities",
            Category::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "Daily",
            Frequency::Weekly => "Weekly",
            Frequency::Monthly => "Monthly",
            Frequency::Yearly => "Yearly",
        }
    }
}

/// `Debt` is money the user owes; `Loan` is money owed to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DebtKind {
    Debt,
    Loan,
}

impl DebtKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DebtKind::Debt => "Debt",
            DebtKind::Loan => "Loan",
        }
    }
}

// Text-backed enums share parsing, display and SQLite mapping.
macro_rules! text_enum {
    ($ty:ident, $what:literal, [$($variant:ident),+]) => {
        impl FromStr for $ty {
            type Err = LedgerError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let t = s.trim();
                $(
                    if t.eq_ignore_ascii_case(stringify!($variant)) {
                        return Ok($ty::$variant);
                    }
                )+
                Err(LedgerError::validation(format!(
                    concat!("Unknown ", $what, " '{}'"),
                    t
                )))
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ToSql for $ty {
            fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
                Ok(ToSqlOutput::from(self.as_str()))
            }
        }

        impl FromSql for $ty {
            fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
                let s = value.as_str()?;
                s.parse().map_err(|e| FromSqlError::Other(Box::new(e)))
            }
        }
    };
}

text_enum!(Category, "category", [Food, Transport, Entertainment, Utilities, Other]);
text_enum!(Frequency, "frequency", [Daily, Weekly, Monthly, Yearly]);
text_enum!(DebtKind, "debt type", [Debt, Loan]);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub owner: String,
    pub date: NaiveDate,
    pub category: Category,
    pub description: String,
    pub amount: Decimal,
    pub currency: String,
    pub recurring: bool,
    pub recurrence_period: Option<Frequency>,
}

/// Fields a caller supplies when creating or editing an expense.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub date: NaiveDate,
    pub category: Category,
    pub description: String,
    pub amount: Decimal,
    pub currency: String,
    pub recurring: bool,
    pub recurrence_period: Option<Frequency>,
}

impl NewExpense {
    pub fn new(date: NaiveDate, category: Category, description: &str, amount: Decimal) -> Self {
        NewExpense {
            date,
            category,
            description: description.to_string(),
            amount,
            currency: DEFAULT_CURRENCY.to_string(),
            recurring: false,
            recurrence_period: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Income {
    pub id: i64,
    pub owner: String,
    pub date: NaiveDate,
    pub source: String,
    pub description: String,
    pub amount: Decimal,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewIncome {
    pub date: NaiveDate,
    pub source: String,
    pub description: String,
    pub amount: Decimal,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringExpense {
    pub id: i64,
    pub owner: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub category: Category,
    pub description: String,
    pub amount: Decimal,
    pub currency: String,
    pub frequency: Frequency,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewRecurring {
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub category: Category,
    pub description: String,
    pub amount: Decimal,
    pub currency: String,
    pub frequency: Frequency,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitExpense {
    pub id: i64,
    pub owner: String,
    pub expense_id: i64,
    pub person: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debt {
    pub id: i64,
    pub owner: String,
    pub date: NaiveDate,
    pub person: String,
    pub description: String,
    pub amount: Decimal,
    pub kind: DebtKind,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewDebt {
    pub date: NaiveDate,
    pub person: String,
    pub description: String,
    pub amount: Decimal,
    pub kind: DebtKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub email: Option<String>,
}
