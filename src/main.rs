// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use clap::ArgMatches;

use spendwise::config::Config;
use spendwise::notify::{LogNotifier, Notifier};
use spendwise::store::Store;
use spendwise::{cli, commands};

/// `--user` from the deepest subcommand that carries it, else the configured owner.
fn owner_from(matches: &ArgMatches, fallback: &str) -> String {
    let mut found = matches.get_one::<String>("user");
    let mut m = matches;
    while let Some((_, sub)) = m.subcommand() {
        if let Some(u) = sub.get_one::<String>("user") {
            found = Some(u);
        }
        m = sub;
    }
    found
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

#[cfg(feature = "smtp")]
fn build_notifier(cfg: &Config) -> Box<dyn Notifier> {
    match &cfg.mail {
        Some(mail) => Box::new(spendwise::notify::SmtpNotifier::new(mail.clone())),
        None => Box::new(LogNotifier),
    }
}

#[cfg(not(feature = "smtp"))]
fn build_notifier(cfg: &Config) -> Box<dyn Notifier> {
    if cfg.mail.is_some() {
        tracing::warn!("mail relay configured but built without the `smtp` feature");
    }
    Box::new(LogNotifier)
}

fn main() -> Result<()> {
    spendwise::init_tracing();
    let matches = cli::build_cli().get_matches();
    let cfg = Config::from_env().context("Invalid startup configuration")?;
    let owner = owner_from(&matches, &cfg.user);

    let store = Store::open(&cfg.db_path)
        .with_context(|| format!("Open DB at {}", cfg.db_path.display()))?;
    let notifier = build_notifier(&cfg);

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", cfg.db_path.display());
        }
        Some(("user", sub)) => commands::users::handle(&store, sub)?,
        Some(("expense", sub)) => commands::expenses::handle(&store, &owner, sub)?,
        Some(("income", sub)) => commands::income::handle(&store, &owner, sub)?,
        Some(("recurring", sub)) => commands::recurring::handle(&store, &owner, sub)?,
        Some(("split", sub)) => commands::splits::handle(&store, &owner, sub)?,
        Some(("debt", sub)) => commands::debts::handle(&store, &owner, sub)?,
        Some(("report", sub)) => commands::reports::handle(&store, &owner, sub)?,
        Some(("budget", sub)) => {
            commands::budgets::handle(&store, &owner, notifier.as_ref(), sub)?
        }
        Some(("categorize", sub)) => commands::categorize::handle(&store, &owner, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&store, &owner, sub)?,
        Some(("fx", sub)) => commands::fx::handle(store.conn(), sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    store.close()?;
    Ok(())
}
