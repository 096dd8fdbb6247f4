// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use tracing::{info, warn};

use crate::budget::{BudgetReport, BudgetStatus};
use crate::error::Result;

pub trait Notifier {
    fn send(&self, subject: &str, body: &str, recipient: &str) -> Result<()>;
}

/// Writes notifications to the log instead of delivering them.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn send(&self, subject: &str, body: &str, recipient: &str) -> Result<()> {
        info!(recipient, subject, body, "notification (no mail relay configured)");
        Ok(())
    }
}

#[cfg(feature = "smtp")]
pub use smtp::SmtpNotifier;

#[cfg(feature = "smtp")]
mod smtp {
    use lettre::transport::smtp::authentication::Credentials;
    use lettre::{Message, SmtpTransport, Transport};

    use super::Notifier;
    use crate::config::MailConfig;
    use crate::error::{LedgerError, Result};

    pub struct SmtpNotifier {
        cfg: MailConfig,
    }

    impl SmtpNotifier {
        pub fn new(cfg: MailConfig) -> Self {
            SmtpNotifier { cfg }
        }
    }

    fn external(e: impl std::fmt::Display) -> LedgerError {
        LedgerError::External(e.to_string())
    }

    impl Notifier for SmtpNotifier {
        fn send(&self, subject: &str, body: &str, recipient: &str) -> Result<()> {
            let email = Message::builder()
                .from(self.cfg.from.parse().map_err(external)?)
                .to(recipient.parse().map_err(external)?)
                .subject(subject)
                .body(body.to_string())
                .map_err(external)?;
            let mailer = SmtpTransport::relay(&self.cfg.host)
                .map_err(external)?
                .credentials(Credentials::new(
                    self.cfg.username.clone(),
                    self.cfg.password.clone(),
                ))
                .build();
            mailer.send(&email).map_err(external)?;
            Ok(())
        }
    }
}

/// Sends a budget-exceeded alert. Returns whether a message went out; any
/// delivery failure is logged and reported as `false`, never raised.
pub fn notify_budget(notifier: &dyn Notifier, report: &BudgetReport, recipient: &str) -> bool {
    if report.status != BudgetStatus::Exceeded {
        return false;
    }
    let body = format!(
        "You have exceeded your monthly budget. Total spent: {:.2} (budget {:.2}).",
        report.total_spent, report.budget
    );
    match notifier.send("Budget Exceeded", &body, recipient) {
        Ok(()) => true,
        Err(e) => {
            warn!(recipient, error = %e, "budget notification failed");
            false
        }
    }
}
