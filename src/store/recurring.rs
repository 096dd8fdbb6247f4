// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::{OptionalExtension, Row, params};
use tracing::{debug, info};

use super::{Store, decimal_col, normalize_currency, owner_key, require_owner, require_positive};
use crate::error::{LedgerError, Result};
use crate::models::{Expense, NewRecurring, RecurringExpense};
use crate::recurrence;

const COLUMNS: &str =
    "id, owner, start_date, end_date, category, description, amount, currency, frequency";

fn from_row(r: &Row<'_>) -> rusqlite::Result<RecurringExpense> {
    Ok(RecurringExpense {
        id: r.get(0)?,
        owner: r.get(1)?,
        start_date: r.get(2)?,
        end_date: r.get(3)?,
        category: r.get(4)?,
        description: r.get(5)?,
        amount: decimal_col(r, 6)?,
        currency: r.get(7)?,
        frequency: r.get(8)?,
    })
}

fn validate(new: &NewRecurring) -> Result<NewRecurring> {
    if let Some(end) = new.end_date {
        if end < new.start_date {
            return Err(LedgerError::validation(
                "End date must not be before the start date.",
            ));
        }
    }
    Ok(NewRecurring {
        start_date: new.start_date,
        end_date: new.end_date,
        category: new.category,
        description: new.description.trim().to_string(),
        amount: require_positive(new.amount)?,
        currency: normalize_currency(&new.currency)?,
        frequency: new.frequency,
    })
}

impl Store {
    pub fn add_recurring(&self, owner: &str, new: &NewRecurring) -> Result<i64> {
        let owner = require_owner(owner)?;
        let r = validate(new)?;
        self.conn.execute(
            "INSERT INTO recurring_expenses(owner, start_date, end_date, category, description, amount, currency, frequency)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                owner,
                r.start_date,
                r.end_date,
                r.category,
                r.description,
                r.amount.to_string(),
                r.currency,
                r.frequency
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        info!(owner, id, frequency = %r.frequency, "recurring expense added");
        Ok(id)
    }

    pub fn recurring(&self, owner: &str) -> Result<Vec<RecurringExpense>> {
        let owner = owner_key(owner);
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {COLUMNS} FROM recurring_expenses WHERE owner=?1 ORDER BY start_date, id"
        ))?;
        let rows = stmt.query_map(params![owner], from_row)?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    pub fn recurring_rule(&self, owner: &str, id: i64) -> Result<RecurringExpense> {
        let owner = owner_key(owner);
        self.conn
            .query_row(
                &format!("SELECT {COLUMNS} FROM recurring_expenses WHERE owner=?1 AND id=?2"),
                params![owner, id],
                from_row,
            )
            .optional()?
            .ok_or_else(|| LedgerError::not_found("Recurring expense", id))
    }

    /// Rewrites the rule; occurrences follow on the next read.
    pub fn update_recurring(&self, owner: &str, id: i64, new: &NewRecurring) -> Result<bool> {
        let owner = owner_key(owner);
        let r = validate(new)?;
        let current = self.recurring_rule(owner, id)?;
        if current.start_date == r.start_date
            && current.end_date == r.end_date
            && current.category == r.category
            && current.description == r.description
            && current.amount == r.amount
            && current.currency == r.currency
            && current.frequency == r.frequency
        {
            return Ok(false);
        }
        self.conn.execute(
            "UPDATE recurring_expenses SET start_date=?1, end_date=?2, category=?3, description=?4,
                    amount=?5, currency=?6, frequency=?7
             WHERE owner=?8 AND id=?9",
            params![
                r.start_date,
                r.end_date,
                r.category,
                r.description,
                r.amount.to_string(),
                r.currency,
                r.frequency,
                owner,
                id
            ],
        )?;
        info!(owner, id, "recurring expense updated");
        Ok(true)
    }

    pub fn delete_recurring(&self, owner: &str, id: i64) -> Result<()> {
        let owner = owner_key(owner);
        let n = self.conn.execute(
            "DELETE FROM recurring_expenses WHERE owner=?1 AND id=?2",
            params![owner, id],
        )?;
        if n == 0 {
            return Err(LedgerError::not_found("Recurring expense", id));
        }
        info!(owner, id, "recurring expense deleted");
        Ok(())
    }

    /// Stored expenses plus every recurring occurrence due on or before `through`,
    /// ordered by date.
    pub fn ledger(&self, owner: &str, through: NaiveDate) -> Result<Vec<Expense>> {
        let owner = owner_key(owner);
        let mut out = self.expenses(owner)?;
        for rule in self.recurring(owner)? {
            let occ = recurrence::materialize(&rule, through);
            debug!(rule = rule.id, count = occ.len(), "materialized recurring occurrences");
            out.extend(occ);
        }
        out.sort_by(|a, b| a.date.cmp(&b.date));
        Ok(out)
    }
}
