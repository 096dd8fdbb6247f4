// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::{OptionalExtension, Row, params};
use tracing::info;

use super::{Store, decimal_col, normalize_currency, owner_key, require_owner, require_positive};
use crate::error::{LedgerError, Result};
use crate::models::{Expense, NewExpense};

const COLUMNS: &str =
    "id, owner, date, category, description, amount, currency, recurring, recurrence_period";

fn from_row(r: &Row<'_>) -> rusqlite::Result<Expense> {
    Ok(Expense {
        id: r.get(0)?,
        owner: r.get(1)?,
        date: r.get(2)?,
        category: r.get(3)?,
        description: r.get(4)?,
        amount: decimal_col(r, 5)?,
        currency: r.get(6)?,
        recurring: r.get(7)?,
        recurrence_period: r.get(8)?,
    })
}

/// Returns the normalized form of `new`, or the first validation failure.
fn validate(new: &NewExpense) -> Result<NewExpense> {
    let amount = require_positive(new.amount)?;
    let currency = normalize_currency(&new.currency)?;
    if new.recurring && new.recurrence_period.is_none() {
        return Err(LedgerError::validation(
            "Recurring expenses need a recurrence period.",
        ));
    }
    Ok(NewExpense {
        date: new.date,
        category: new.category,
        description: new.description.trim().to_string(),
        amount,
        currency,
        recurring: new.recurring,
        recurrence_period: if new.recurring {
            new.recurrence_period
        } else {
            None
        },
    })
}

impl Store {
    pub fn add_expense(&self, owner: &str, new: &NewExpense) -> Result<i64> {
        let owner = require_owner(owner)?;
        let e = validate(new)?;
        self.conn.execute(
            "INSERT INTO expenses(owner, date, category, description, amount, currency, recurring, recurrence_period)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                owner,
                e.date,
                e.category,
                e.description,
                e.amount.to_string(),
                e.currency,
                e.recurring,
                e.recurrence_period
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        info!(owner, id, amount = %e.amount, category = %e.category, "expense added");
        Ok(id)
    }

    pub fn expenses(&self, owner: &str) -> Result<Vec<Expense>> {
        let owner = owner_key(owner);
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {COLUMNS} FROM expenses WHERE owner=?1 ORDER BY date, id"
        ))?;
        let rows = stmt.query_map(params![owner], from_row)?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    pub fn expense(&self, owner: &str, id: i64) -> Result<Expense> {
        let owner = owner_key(owner);
        self.conn
            .query_row(
                &format!("SELECT {COLUMNS} FROM expenses WHERE owner=?1 AND id=?2"),
                params![owner, id],
                from_row,
            )
            .optional()?
            .ok_or_else(|| LedgerError::not_found("Expense", id))
    }

    /// Overwrites every editable field; returns `false` when nothing changed.
    pub fn update_expense(&self, owner: &str, id: i64, new: &NewExpense) -> Result<bool> {
        let owner = owner_key(owner);
        let e = validate(new)?;
        let current = self.expense(owner, id)?;
        if current.date == e.date
            && current.category == e.category
            && current.description == e.description
            && current.amount == e.amount
            && current.currency == e.currency
            && current.recurring == e.recurring
            && current.recurrence_period == e.recurrence_period
        {
            return Ok(false);
        }
        self.conn.execute(
            "UPDATE expenses SET date=?1, category=?2, description=?3, amount=?4, currency=?5,
                    recurring=?6, recurrence_period=?7
             WHERE owner=?8 AND id=?9",
            params![
                e.date,
                e.category,
                e.description,
                e.amount.to_string(),
                e.currency,
                e.recurring,
                e.recurrence_period,
                owner,
                id
            ],
        )?;
        info!(owner, id, "expense updated");
        Ok(true)
    }

    pub fn delete_expense(&self, owner: &str, id: i64) -> Result<()> {
        let owner = owner_key(owner);
        let n = self.conn.execute(
            "DELETE FROM expenses WHERE owner=?1 AND id=?2",
            params![owner, id],
        )?;
        if n == 0 {
            return Err(LedgerError::not_found("Expense", id));
        }
        info!(owner, id, "expense deleted");
        Ok(())
    }
}
