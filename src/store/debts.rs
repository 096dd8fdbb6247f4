// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::{OptionalExtension, Row, params};
use tracing::info;

use super::{Store, decimal_col, owner_key, require_owner, require_positive, require_text};
use crate::error::{LedgerError, Result};
use crate::models::{Debt, NewDebt};

const COLUMNS: &str = "id, owner, date, person, description, amount, kind";

fn from_row(r: &Row<'_>) -> rusqlite::Result<Debt> {
    Ok(Debt {
        id: r.get(0)?,
        owner: r.get(1)?,
        date: r.get(2)?,
        person: r.get(3)?,
        description: r.get(4)?,
        amount: decimal_col(r, 5)?,
        kind: r.get(6)?,
    })
}

fn validate(new: &NewDebt) -> Result<NewDebt> {
    Ok(NewDebt {
        date: new.date,
        person: require_text(&new.person, "Person name")?,
        description: new.description.trim().to_string(),
        amount: require_positive(new.amount)?,
        kind: new.kind,
    })
}

impl Store {
    pub fn add_debt(&self, owner: &str, new: &NewDebt) -> Result<i64> {
        let owner = require_owner(owner)?;
        let d = validate(new)?;
        self.conn.execute(
            "INSERT INTO debts(owner, date, person, description, amount, kind)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                owner,
                d.date,
                d.person,
                d.description,
                d.amount.to_string(),
                d.kind
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        info!(owner, id, kind = %d.kind, "debt recorded");
        Ok(id)
    }

    pub fn debts(&self, owner: &str) -> Result<Vec<Debt>> {
        let owner = owner_key(owner);
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {COLUMNS} FROM debts WHERE owner=?1 ORDER BY date, id"
        ))?;
        let rows = stmt.query_map(params![owner], from_row)?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    pub fn debt(&self, owner: &str, id: i64) -> Result<Debt> {
        let owner = owner_key(owner);
        self.conn
            .query_row(
                &format!("SELECT {COLUMNS} FROM debts WHERE owner=?1 AND id=?2"),
                params![owner, id],
                from_row,
            )
            .optional()?
            .ok_or_else(|| LedgerError::not_found("Debt", id))
    }

    pub fn update_debt(&self, owner: &str, id: i64, new: &NewDebt) -> Result<bool> {
        let owner = owner_key(owner);
        let d = validate(new)?;
        let current = self.debt(owner, id)?;
        if current.date == d.date
            && current.person == d.person
            && current.description == d.description
            && current.amount == d.amount
            && current.kind == d.kind
        {
            return Ok(false);
        }
        self.conn.execute(
            "UPDATE debts SET date=?1, person=?2, description=?3, amount=?4, kind=?5
             WHERE owner=?6 AND id=?7",
            params![
                d.date,
                d.person,
                d.description,
                d.amount.to_string(),
                d.kind,
                owner,
                id
            ],
        )?;
        info!(owner, id, "debt updated");
        Ok(true)
    }

    pub fn delete_debt(&self, owner: &str, id: i64) -> Result<()> {
        let owner = owner_key(owner);
        let n = self.conn.execute(
            "DELETE FROM debts WHERE owner=?1 AND id=?2",
            params![owner, id],
        )?;
        if n == 0 {
            return Err(LedgerError::not_found("Debt", id));
        }
        info!(owner, id, "debt deleted");
        Ok(())
    }
}
