// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::path::PathBuf;

use crate::db;
use crate::error::{LedgerError, Result};
use crate::models::DEFAULT_OWNER;

pub const ENV_DB: &str = "SPENDWISE_DB";
pub const ENV_USER: &str = "SPENDWISE_USER";
pub const ENV_SMTP_HOST: &str = "SPENDWISE_SMTP_HOST";
pub const ENV_SMTP_USER: &str = "SPENDWISE_SMTP_USER";
pub const ENV_SMTP_PASSWORD: &str = "SPENDWISE_SMTP_PASSWORD";
pub const ENV_SMTP_FROM: &str = "SPENDWISE_SMTP_FROM";

#[derive(Clone)]
pub struct MailConfig {
    pub host: String,
    pub username: String,
    pub password: String,
    pub from: String,
}

impl fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailConfig")
            .field("host", &self.host)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("from", &self.from)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub user: String,
    pub mail: Option<MailConfig>,
}

impl Config {
    /// Reads the process environment, after loading `.env` if one exists.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let db_path = match get(ENV_DB) {
            Some(p) if p.trim().is_empty() => {
                return Err(LedgerError::Config(format!("{} is set but empty", ENV_DB)));
            }
            Some(p) => PathBuf::from(p.trim()),
            None => db::default_db_path()?,
        };
        let user = get(ENV_USER)
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_OWNER.to_string());
        Ok(Config {
            db_path,
            user,
            mail: mail_from_lookup(&get)?,
        })
    }
}

// Mail settings are all-or-nothing.
fn mail_from_lookup(get: &impl Fn(&str) -> Option<String>) -> Result<Option<MailConfig>> {
    let keys = [ENV_SMTP_HOST, ENV_SMTP_USER, ENV_SMTP_PASSWORD, ENV_SMTP_FROM];
    let vals: Vec<Option<String>> = keys
        .iter()
        .map(|k| get(k).filter(|v| !v.trim().is_empty()))
        .collect();
    if vals.iter().all(Option::is_none) {
        return Ok(None);
    }
    let missing: Vec<&str> = keys
        .iter()
        .zip(&vals)
        .filter(|(_, v)| v.is_none())
        .map(|(k, _)| *k)
        .collect();
    if !missing.is_empty() {
        return Err(LedgerError::Config(format!(
            "incomplete mail relay settings, missing {}",
            missing.join(", ")
        )));
    }
    let mut it = vals.into_iter().flatten();
    Ok(Some(MailConfig {
        host: it.next().unwrap_or_default(),
        username: it.next().unwrap_or_default(),
        password: it.next().unwrap_or_default(),
        from: it.next().unwrap_or_default(),
    }))
}
