// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::{OptionalExtension, params};
use tracing::{info, warn};

use super::{Store, require_text};
use crate::auth::{hash_password, verify_password};
use crate::error::{LedgerError, Result};
use crate::models::User;

impl Store {
    pub fn create_user(&self, username: &str, password: &str, email: Option<&str>) -> Result<()> {
        let username = require_text(username, "Username")?;
        if password.is_empty() {
            return Err(LedgerError::validation("Password is required."));
        }
        let email = email.map(str::trim).filter(|e| !e.is_empty());
        if let Some(e) = email {
            if !e.contains('@') {
                return Err(LedgerError::validation(format!("Invalid email '{}'", e)));
            }
        }
        if self.user(&username)?.is_some() {
            return Err(LedgerError::validation("Username already exists."));
        }
        let hash = hash_password(password)?;
        self.conn.execute(
            "INSERT INTO users(username, password_hash, email) VALUES (?1, ?2, ?3)",
            params![username, hash, email],
        )?;
        info!(username = %username, "user created");
        Ok(())
    }

    pub fn user(&self, username: &str) -> Result<Option<User>> {
        let u = self
            .conn
            .query_row(
                "SELECT username, password_hash, email FROM users WHERE username=?1",
                params![username.trim()],
                |r| {
                    Ok(User {
                        username: r.get(0)?,
                        password_hash: r.get(1)?,
                        email: r.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(u)
    }

    /// `false` for an unknown user or a wrong password.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<bool> {
        let Some(user) = self.user(username)? else {
            warn!(username, "login for unknown user");
            return Ok(false);
        };
        let ok = verify_password(password, &user.password_hash);
        if !ok {
            warn!(username, "login with wrong password");
        }
        Ok(ok)
    }
}
