//! Projection inputs and outputs

use serde::{Deserialize, Serialize};

/// Client-initiated transaction type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Operation {
    Deposit,
    Withdrawal,
}

/// Proposed transaction to preview
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransactionRequest {
    pub amount: f64,
    pub operation: Operation,
}

impl TransactionRequest {
    pub fn deposit(amount: f64) -> Self {
        Self { amount, operation: Operation::Deposit }
    }

    pub fn withdrawal(amount: f64) -> Self {
        Self { amount, operation: Operation::Withdrawal }
    }
}

/// Projected balances after a deposit, withdrawal or payout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    pub operation: Operation,

    /// Amount the projection was computed for, after sanitizing
    pub amount: f64,

    pub new_invested: f64,
    pub new_available_profit: f64,
    pub new_total_balance: f64,

    /// Portion of a withdrawal taken from accrued profit
    pub deduct_from_profit: f64,

    /// Portion of a withdrawal taken from principal
    pub deduct_from_capital: f64,

    /// True iff the withdrawal exceeds available profit
    pub is_capital_impacted: bool,

    /// Next month's profit on the new invested capital
    pub projected_monthly_profit: f64,
}

impl ProjectionResult {
    /// Change in projected monthly profit relative to a baseline figure
    pub fn monthly_profit_change(&self, current_monthly_profit: f64) -> f64 {
        self.projected_monthly_profit - current_monthly_profit
    }
}
