// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::Connection;
use std::fs;
use std::path::PathBuf;

use crate::error::{LedgerError, Result};

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Spendwise", "spendwise"));

/// Platform data dir location used when no explicit database path is configured.
pub fn default_db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2).ok_or_else(|| {
        LedgerError::Config("Could not determine platform-specific data dir".into())
    })?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir)?;
    Ok(data_dir.join("spendwise.sqlite"))
}

pub(crate) fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS users(
        username TEXT PRIMARY KEY,
        password_hash TEXT NOT NULL,
        email TEXT,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );

    CREATE TABLE IF NOT EXISTS expenses(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        owner TEXT NOT NULL,
        date TEXT NOT NULL,
        category TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        amount TEXT NOT NULL,
        currency TEXT NOT NULL,
        recurring INTEGER NOT NULL DEFAULT 0,
        recurrence_period TEXT,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    CREATE INDEX IF NOT EXISTS idx_expenses_owner_date ON expenses(owner, date);

    CREATE TABLE IF NOT EXISTS income(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        owner TEXT NOT NULL,
        date TEXT NOT NULL,
        source TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        amount TEXT NOT NULL,
        currency TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_income_owner_date ON income(owner, date);

    -- only the rule is stored; occurrences are derived on read
    CREATE TABLE IF NOT EXISTS recurring_expenses(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        owner TEXT NOT NULL,
        start_date TEXT NOT NULL,
        end_date TEXT,
        category TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        amount TEXT NOT NULL,
        currency TEXT NOT NULL,
        frequency TEXT NOT NULL CHECK(frequency IN ('Daily','Weekly','Monthly','Yearly'))
    );

    CREATE TABLE IF NOT EXISTS split_expenses(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        owner TEXT NOT NULL,
        expense_id INTEGER NOT NULL,
        person TEXT NOT NULL,
        amount TEXT NOT NULL,
        FOREIGN KEY(expense_id) REFERENCES expenses(id) ON DELETE CASCADE
    );

    CREATE TABLE IF NOT EXISTS debts(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        owner TEXT NOT NULL,
        date TEXT NOT NULL,
        person TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        amount TEXT NOT NULL,
        kind TEXT NOT NULL CHECK(kind IN ('Debt','Loan'))
    );

    -- FX rates: store base->quote rate (1 base = rate quote) per day
    CREATE TABLE IF NOT EXISTS fx_rates(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        date TEXT NOT NULL,
        base TEXT NOT NULL,
        quote TEXT NOT NULL,
        rate TEXT NOT NULL,
        UNIQUE(date, base, quote)
    );
    "#,
    )?;
    Ok(())
}
