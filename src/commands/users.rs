// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{arg, opt};
use crate::store::Store;
use anyhow::{Result, bail};

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("register", sub)) => {
            let username = arg(sub, "username")?;
            store.create_user(username, arg(sub, "password")?, opt(sub, "email"))?;
            println!("User '{}' created successfully.", username.trim());
        }
        Some(("login", sub)) => {
            let username = arg(sub, "username")?;
            if !store.authenticate(username, arg(sub, "password")?)? {
                bail!("Invalid username or password.");
            }
            println!("Authentication successful. Use --user {} to work on this ledger.", username.trim());
        }
        _ => {}
    }
    Ok(())
}
