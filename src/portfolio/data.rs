//! Portfolio data structures matching the portal's portfolio record

use serde::{Deserialize, Serialize};

/// How monthly profit is accrued
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProfitMode {
    /// Profit accrues on invested capital only
    #[default]
    Fixed,
    /// Profit accrues on invested capital plus unpaid profit
    Compounding,
}

/// Whether the portfolio is currently earning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccrualStatus {
    #[default]
    Active,
    Paused,
}

/// Read-only view of a client portfolio at the time of the preview
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    /// Principal currently recorded as invested
    pub total_invested: f64,

    /// Accrued profit not yet withdrawn or paid out
    pub available_profit: f64,

    /// Monthly accrual rate in percent (0 = use the product default)
    pub profit_percentage: f64,

    #[serde(default)]
    pub profit_mode: ProfitMode,

    #[serde(default)]
    pub accrual_status: AccrualStatus,
}

impl PortfolioSnapshot {
    pub fn new(total_invested: f64, available_profit: f64, profit_percentage: f64) -> Self {
        Self {
            total_invested,
            available_profit,
            profit_percentage,
            profit_mode: ProfitMode::Fixed,
            accrual_status: AccrualStatus::Active,
        }
    }

    pub fn with_mode(mut self, mode: ProfitMode) -> Self {
        self.profit_mode = mode;
        self
    }

    pub fn with_status(mut self, status: AccrualStatus) -> Self {
        self.accrual_status = status;
        self
    }

    /// Invested capital plus available profit
    pub fn total_balance(&self) -> f64 {
        self.total_invested + self.available_profit
    }
}

/// Header details printed on a payout statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientDetails {
    pub user_id: String,
    pub name: String,
    pub mobile: Option<String>,
}

impl ClientDetails {
    pub fn new(user_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            name: name.into(),
            mobile: None,
        }
    }

    pub fn with_mobile(mut self, mobile: impl Into<String>) -> Self {
        self.mobile = Some(mobile.into());
        self
    }
}
