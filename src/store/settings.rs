// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use rusqlite::{OptionalExtension, params};

use super::{Store, owner_key, require_owner};
use crate::error::{LedgerError, Result};

fn budget_key(owner: &str) -> String {
    format!("monthly_budget:{}", owner)
}

impl Store {
    pub fn setting(&self, key: &str) -> Result<Option<String>> {
        let v: Option<String> = self
            .conn
            .query_row("SELECT value FROM settings WHERE key=?1", params![key], |r| {
                r.get(0)
            })
            .optional()?;
        Ok(v)
    }

    pub fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO settings(key, value) VALUES(?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value=excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn monthly_budget(&self, owner: &str) -> Result<Option<Decimal>> {
        let owner = owner_key(owner);
        match self.setting(&budget_key(owner))? {
            Some(s) => {
                let d = s.parse::<Decimal>().map_err(|e| {
                    LedgerError::validation(format!("Invalid stored budget '{}': {}", s, e))
                })?;
                Ok(Some(d))
            }
            None => Ok(None),
        }
    }

    pub fn set_monthly_budget(&self, owner: &str, amount: Decimal) -> Result<()> {
        let owner = require_owner(owner)?;
        if amount <= Decimal::ZERO {
            return Err(LedgerError::validation("Budget must be greater than 0."));
        }
        self.set_setting(&budget_key(owner), &amount.to_string())
    }
}
