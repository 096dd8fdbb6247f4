// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::{OptionalExtension, Row, params};
use tracing::info;

use super::{
    Store, decimal_col, normalize_currency, owner_key, require_owner, require_positive, require_text,
};
use crate::error::{LedgerError, Result};
use crate::models::{Income, NewIncome};

const COLUMNS: &str = "id, owner, date, source, description, amount, currency";

fn from_row(r: &Row<'_>) -> rusqlite::Result<Income> {
    Ok(Income {
        id: r.get(0)?,
        owner: r.get(1)?,
        date: r.get(2)?,
        source: r.get(3)?,
        description: r.get(4)?,
        amount: decimal_col(r, 5)?,
        currency: r.get(6)?,
    })
}

fn validate(new: &NewIncome) -> Result<NewIncome> {
    Ok(NewIncome {
        date: new.date,
        source: require_text(&new.source, "Income source")?,
        description: new.description.trim().to_string(),
        amount: require_positive(new.amount)?,
        currency: normalize_currency(&new.currency)?,
    })
}

impl Store {
    pub fn add_income(&self, owner: &str, new: &NewIncome) -> Result<i64> {
        let owner = require_owner(owner)?;
        let i = validate(new)?;
        self.conn.execute(
            "INSERT INTO income(owner, date, source, description, amount, currency)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                owner,
                i.date,
                i.source,
                i.description,
                i.amount.to_string(),
                i.currency
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        info!(owner, id, amount = %i.amount, "income added");
        Ok(id)
    }

    pub fn income(&self, owner: &str) -> Result<Vec<Income>> {
        let owner = owner_key(owner);
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {COLUMNS} FROM income WHERE owner=?1 ORDER BY date, id"
        ))?;
        let rows = stmt.query_map(params![owner], from_row)?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    pub fn income_entry(&self, owner: &str, id: i64) -> Result<Income> {
        let owner = owner_key(owner);
        self.conn
            .query_row(
                &format!("SELECT {COLUMNS} FROM income WHERE owner=?1 AND id=?2"),
                params![owner, id],
                from_row,
            )
            .optional()?
            .ok_or_else(|| LedgerError::not_found("Income", id))
    }

    pub fn update_income(&self, owner: &str, id: i64, new: &NewIncome) -> Result<bool> {
        let owner = owner_key(owner);
        let i = validate(new)?;
        let current = self.income_entry(owner, id)?;
        if current.date == i.date
            && current.source == i.source
            && current.description == i.description
            && current.amount == i.amount
            && current.currency == i.currency
        {
            return Ok(false);
        }
        self.conn.execute(
            "UPDATE income SET date=?1, source=?2, description=?3, amount=?4, currency=?5
             WHERE owner=?6 AND id=?7",
            params![
                i.date,
                i.source,
                i.description,
                i.amount.to_string(),
                i.currency,
                owner,
                id
            ],
        )?;
        info!(owner, id, "income updated");
        Ok(true)
    }

    pub fn delete_income(&self, owner: &str, id: i64) -> Result<()> {
        let owner = owner_key(owner);
        let n = self.conn.execute(
            "DELETE FROM income WHERE owner=?1 AND id=?2",
            params![owner, id],
        )?;
        if n == 0 {
            return Err(LedgerError::not_found("Income", id));
        }
        info!(owner, id, "income deleted");
        Ok(())
    }
}
