// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BudgetStatus {
    Exceeded,
    Warning,
    Ok,
}

/// Share of the budget at which spending starts to warn (80%).
pub fn warning_ratio() -> Decimal {
    Decimal::new(8, 1)
}

/// `Exceeded` above the budget, `Warning` from 80% of it up to and including
/// the budget itself, `Ok` below that.
pub fn evaluate(total_spent: Decimal, budget: Decimal) -> BudgetStatus {
    if total_spent > budget {
        BudgetStatus::Exceeded
    } else if total_spent >= budget * warning_ratio() {
        BudgetStatus::Warning
    } else {
        BudgetStatus::Ok
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetReport {
    pub total_spent: Decimal,
    pub budget: Decimal,
    pub remaining: Decimal,
    pub status: BudgetStatus,
}

impl BudgetReport {
    pub fn new(total_spent: Decimal, budget: Decimal) -> Self {
        BudgetReport {
            total_spent,
            budget,
            remaining: budget - total_spent,
            status: evaluate(total_spent, budget),
        }
    }

    pub fn message(&self) -> String {
        match self.status {
            BudgetStatus::Exceeded => format!(
                "Budget exceeded! You have spent {:.2} of {:.2}.",
                self.total_spent, self.budget
            ),
            BudgetStatus::Warning => format!(
                "Warning: you have used {:.0}% of your budget ({:.2} of {:.2}).",
                self.used_percent(),
                self.total_spent,
                self.budget
            ),
            BudgetStatus::Ok => format!(
                "You are within your budget. {:.2} remaining.",
                self.remaining
            ),
        }
    }

    fn used_percent(&self) -> Decimal {
        if self.budget.is_zero() {
            return Decimal::ZERO;
        }
        self.total_spent / self.budget * Decimal::ONE_HUNDRED
    }
}
