// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::{Decimal, RoundingStrategy};
use rusqlite::{OptionalExtension, Row, params};
use tracing::info;

use super::{Store, decimal_col, owner_key, require_owner, require_positive, require_text};
use crate::error::{LedgerError, Result};
use crate::models::SplitExpense;

const COLUMNS: &str = "id, owner, expense_id, person, amount";

fn from_row(r: &Row<'_>) -> rusqlite::Result<SplitExpense> {
    Ok(SplitExpense {
        id: r.get(0)?,
        owner: r.get(1)?,
        expense_id: r.get(2)?,
        person: r.get(3)?,
        amount: decimal_col(r, 4)?,
    })
}

/// Divides `total` into `n` cent-rounded shares that add back up to `total`.
/// Any leftover cents go to the first share, so a total under one cent per
/// person yields zero shares.
pub fn split_evenly(total: Decimal, n: usize) -> Vec<Decimal> {
    if n == 0 {
        return Vec::new();
    }
    let count = Decimal::from(n as u64);
    let share = (total / count).round_dp_with_strategy(2, RoundingStrategy::ToZero);
    let mut shares = vec![share; n];
    shares[0] += total - share * count;
    shares
}

impl Store {
    /// Splits an expense across `people`, one row per person, in a single
    /// transaction. `total` defaults to the parent expense's amount.
    pub fn split_expense(
        &self,
        owner: &str,
        expense_id: i64,
        people: &[String],
        total: Option<Decimal>,
    ) -> Result<Vec<i64>> {
        let owner = require_owner(owner)?;
        if people.is_empty() {
            return Err(LedgerError::validation(
                "At least one person is required to split an expense.",
            ));
        }
        let names = people
            .iter()
            .map(|p| require_text(p, "Person name"))
            .collect::<Result<Vec<_>>>()?;
        let parent = self.expense(owner, expense_id)?;
        let total = require_positive(total.unwrap_or(parent.amount))?;

        let shares = split_evenly(total, names.len());
        if shares.iter().any(|s| s.is_zero()) {
            return Err(LedgerError::validation(format!(
                "{} is too small to split between {} people.",
                total,
                names.len()
            )));
        }

        let tx = self.conn.unchecked_transaction()?;
        let mut ids = Vec::with_capacity(names.len());
        for (name, share) in names.iter().zip(shares) {
            tx.execute(
                "INSERT INTO split_expenses(owner, expense_id, person, amount) VALUES (?1, ?2, ?3, ?4)",
                params![owner, expense_id, name, share.to_string()],
            )?;
            ids.push(tx.last_insert_rowid());
        }
        tx.commit()?;
        info!(owner, expense_id, people = names.len(), total = %total, "expense split");
        Ok(ids)
    }

    pub fn splits(&self, owner: &str) -> Result<Vec<SplitExpense>> {
        let owner = owner_key(owner);
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {COLUMNS} FROM split_expenses WHERE owner=?1 ORDER BY expense_id, id"
        ))?;
        let rows = stmt.query_map(params![owner], from_row)?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    pub fn splits_for(&self, owner: &str, expense_id: i64) -> Result<Vec<SplitExpense>> {
        let owner = owner_key(owner);
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {COLUMNS} FROM split_expenses WHERE owner=?1 AND expense_id=?2 ORDER BY id"
        ))?;
        let rows = stmt.query_map(params![owner, expense_id], from_row)?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    pub fn split(&self, owner: &str, id: i64) -> Result<SplitExpense> {
        let owner = owner_key(owner);
        self.conn
            .query_row(
                &format!("SELECT {COLUMNS} FROM split_expenses WHERE owner=?1 AND id=?2"),
                params![owner, id],
                from_row,
            )
            .optional()?
            .ok_or_else(|| LedgerError::not_found("Split", id))
    }

    /// Removes one person's share. The parent expense is left as is.
    pub fn delete_split(&self, owner: &str, id: i64) -> Result<()> {
        let owner = owner_key(owner);
        let n = self.conn.execute(
            "DELETE FROM split_expenses WHERE owner=?1 AND id=?2",
            params![owner, id],
        )?;
        if n == 0 {
            return Err(LedgerError::not_found("Split", id));
        }
        info!(owner, id, "split share deleted");
        Ok(())
    }
}
