//! Month-by-month profit accrual for a single portfolio
//!
//! Mirrors the server's monthly profit job: profit is the base times the
//! monthly rate, rounded half-up to the paisa, and is credited to available
//! profit. Paused portfolios and portfolios without a positive rate accrue
//! nothing.

use log::{debug, info};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{ProjectionError, Result};
use crate::portfolio::{AccrualStatus, PortfolioSnapshot, ProfitMode};

/// Longest horizon a schedule may cover (100 years)
pub const MAX_ACCRUAL_MONTHS: u32 = 1_200;

/// Running balances while stepping through the schedule
#[derive(Debug, Clone)]
struct AccrualState {
    month: u32,
    invested: f64,
    available_profit: f64,
    total_profit_earned: f64,
}

impl AccrualState {
    fn from_snapshot(snapshot: &PortfolioSnapshot) -> Self {
        Self {
            month: 0,
            invested: snapshot.total_invested.max(0.0),
            available_profit: snapshot.available_profit.max(0.0),
            total_profit_earned: 0.0,
        }
    }

    /// Balance profit is computed on for this month
    fn base(&self, mode: ProfitMode) -> f64 {
        match mode {
            ProfitMode::Fixed => self.invested,
            ProfitMode::Compounding => self.invested + self.available_profit,
        }
    }
}

/// One month of accrual
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccrualRow {
    /// Projection month (1-indexed)
    pub month: u32,
    pub opening_base: f64,
    /// Monthly rate in percent
    pub rate: f64,
    pub profit: f64,
    /// Available profit after this month's credit
    pub available_profit: f64,
    pub total_balance: f64,
    /// No profit accrued (paused or no positive rate)
    pub skipped: bool,
}

/// Complete accrual projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccrualSchedule {
    pub mode: ProfitMode,
    /// Invested capital before the first month
    pub opening_invested: f64,
    /// Available profit before the first month
    pub opening_available_profit: f64,
    pub rows: Vec<AccrualRow>,
}

/// Totals over an accrual schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccrualSummary {
    pub total_months: u32,
    pub accruing_months: u32,
    pub total_profit: f64,
    pub final_available_profit: f64,
    pub final_total_balance: f64,
}

impl AccrualSchedule {
    /// Totals over the schedule; an empty schedule reports the opening balances
    pub fn summary(&self) -> AccrualSummary {
        let final_available_profit = self
            .rows
            .last()
            .map(|r| r.available_profit)
            .unwrap_or(self.opening_available_profit);
        let final_total_balance = self
            .rows
            .last()
            .map(|r| r.total_balance)
            .unwrap_or(self.opening_invested + self.opening_available_profit);

        AccrualSummary {
            total_months: self.rows.len() as u32,
            accruing_months: self.rows.iter().filter(|r| !r.skipped).count() as u32,
            total_profit: self.rows.iter().fold(0.0, |acc, r| acc + r.profit),
            final_available_profit,
            final_total_balance,
        }
    }
}

/// Decimal from the shortest text that round-trips the float (`1.005`, not `1.00499...`)
fn to_decimal(value: f64) -> Option<Decimal> {
    value.to_string().parse().ok()
}

fn half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Round half-up to two decimal places.
///
/// Rounding is done in decimal so that `1.005` becomes `1.01`. Values outside
/// the decimal range are returned unchanged.
pub fn round_to_paisa(value: f64) -> f64 {
    to_decimal(value)
        .and_then(|d| half_up(d).to_f64())
        .unwrap_or(value)
}

/// Profit for one month: `base * rate / 100`, rounded half-up to the paisa
pub fn monthly_profit(base: f64, rate: f64) -> f64 {
    to_decimal(base)
        .zip(to_decimal(rate))
        .and_then(|(b, r)| b.checked_mul(r))
        .and_then(|p| p.checked_div(Decimal::ONE_HUNDRED))
        .and_then(|p| half_up(p).to_f64())
        .unwrap_or_else(|| round_to_paisa(base * rate / 100.0))
}

/// Project `months` of accrual from the snapshot.
///
/// Horizons longer than [`MAX_ACCRUAL_MONTHS`] are rejected.
pub fn project(snapshot: &PortfolioSnapshot, months: u32) -> Result<AccrualSchedule> {
    if months > MAX_ACCRUAL_MONTHS {
        return Err(ProjectionError::HorizonTooLong {
            months,
            max: MAX_ACCRUAL_MONTHS,
        });
    }

    let mut state = AccrualState::from_snapshot(snapshot);
    let opening_invested = state.invested;
    let opening_available_profit = state.available_profit;
    let mut rows = Vec::with_capacity(months as usize);

    // No default-rate fallback here: the accrual job skips unset rates
    let rate = snapshot.profit_percentage;
    let accruing = snapshot.accrual_status == AccrualStatus::Active && rate > 0.0;
    if !accruing {
        debug!(
            "Portfolio not accruing (status {:?}, rate {}), schedule will be flat",
            snapshot.accrual_status, rate
        );
    }

    for _ in 0..months {
        state.month += 1;
        let opening_base = state.base(snapshot.profit_mode);

        let profit = if accruing {
            monthly_profit(opening_base, rate)
        } else {
            0.0
        };

        state.available_profit += profit;
        state.total_profit_earned += profit;

        rows.push(AccrualRow {
            month: state.month,
            opening_base,
            rate: if accruing { rate } else { 0.0 },
            profit,
            available_profit: state.available_profit,
            total_balance: state.invested + state.available_profit,
            skipped: !accruing,
        });
    }

    info!(
        "Projected {} months of {:?} accrual, total profit {:.2}",
        months, snapshot.profit_mode, state.total_profit_earned
    );

    Ok(AccrualSchedule {
        mode: snapshot.profit_mode,
        opening_invested,
        opening_available_profit,
        rows,
    })
}
