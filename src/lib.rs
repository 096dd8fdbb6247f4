// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod aggregate;
pub mod auth;
pub mod budget;
pub mod categorizer;
pub mod cli;
pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod notify;
pub mod recurrence;
pub mod store;
pub mod utils;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Installs the global tracing subscriber on stderr. `RUST_LOG` overrides the
/// default `spendwise=warn` filter.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{EnvFilter, fmt};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("spendwise=warn"));

        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    });
}
