// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! SQLite-backed ledger store.
//!
//! A [`Store`] owns its connection; callers construct one explicitly and pass
//! it around. Every entity operation is scoped by an owner username, and a row
//! that belongs to a different owner behaves exactly like a missing row.

mod debts;
mod expenses;
mod income;
mod recurring;
mod settings;
mod splits;
mod users;

pub use splits::split_evenly;

// Owner keys are stored trimmed; lookups must match.
fn owner_key(owner: &str) -> &str {
    owner.trim()
}

use std::path::Path;

use rusqlite::types::Type;
use rusqlite::{Connection, Row};
use rust_decimal::Decimal;
use tracing::debug;

use crate::db;
use crate::error::{LedgerError, Result};

pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "opening ledger database");
        Self::from_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    /// Wraps an existing connection, creating any missing tables.
    pub fn from_connection(conn: Connection) -> Result<Self> {
        db::init_schema(&conn)?;
        Ok(Store { conn })
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| LedgerError::Db(e))
    }
}

pub(crate) fn decimal_col(r: &Row<'_>, idx: usize) -> rusqlite::Result<Decimal> {
    let s: String = r.get(idx)?;
    s.parse::<Decimal>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

pub(crate) fn require_owner(owner: &str) -> Result<&str> {
    let owner = owner.trim();
    if owner.is_empty() {
        return Err(LedgerError::validation("Owner is required."));
    }
    Ok(owner)
}

pub(crate) fn require_text(value: &str, field: &str) -> Result<String> {
    let v = value.trim();
    if v.is_empty() {
        return Err(LedgerError::validation(format!("{} is required.", field)));
    }
    Ok(v.to_string())
}

/// Largest amount a single row may carry. Keeps every ledger sum far from
/// the `Decimal` range.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

pub(crate) fn require_positive(amount: Decimal) -> Result<Decimal> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::validation("Amount must be greater than 0."));
    }
    if amount > MAX_AMOUNT {
        return Err(LedgerError::validation(format!(
            "Amount must not exceed {}.",
            MAX_AMOUNT
        )));
    }
    Ok(amount)
}

pub(crate) fn normalize_currency(ccy: &str) -> Result<String> {
    let c = ccy.trim();
    if c.len() != 3 || !c.chars().all(|ch| ch.is_ascii_alphabetic()) {
        return Err(LedgerError::validation(format!(
            "Invalid currency '{}', expected a 3-letter code",
            c
        )));
    }
    Ok(c.to_uppercase())
}
