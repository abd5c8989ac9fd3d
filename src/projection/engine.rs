//! Core projection calculator for deposit and withdrawal previews

use log::debug;

use super::accrual::{self, AccrualSchedule};
use super::amount::{sanitize, Amount};
use super::growth::{self, GrowthMode, GrowthProjection};
use super::result::{Operation, ProjectionResult, TransactionRequest};
use crate::error::{ProjectionError, Result};
use crate::portfolio::PortfolioSnapshot;
use crate::terms::ProductTerms;

/// Stateless calculator holding the product terms it was built with
#[derive(Debug, Clone, Default)]
pub struct ProjectionCalculator {
    terms: ProductTerms,
}

impl ProjectionCalculator {
    /// Create a calculator with the given product terms
    pub fn new(terms: ProductTerms) -> Self {
        Self { terms }
    }

    pub fn terms(&self) -> &ProductTerms {
        &self.terms
    }

    /// Monthly profit the portfolio earns today
    pub fn current_monthly_profit(&self, snapshot: &PortfolioSnapshot) -> f64 {
        self.monthly_profit(snapshot, non_negative(snapshot.total_invested))
    }

    /// Run the projection matching the request's operation
    pub fn project(&self, snapshot: &PortfolioSnapshot, request: &TransactionRequest) -> ProjectionResult {
        match request.operation {
            Operation::Deposit => self.project_deposit(snapshot, request.amount),
            Operation::Withdrawal => self.project_withdrawal(snapshot, request.amount),
        }
    }

    /// Project balances after a deposit.
    ///
    /// Non-finite or non-positive amounts project as a zero deposit.
    pub fn project_deposit(&self, snapshot: &PortfolioSnapshot, amount: f64) -> ProjectionResult {
        let amount = sanitize(amount);
        let invested = non_negative(snapshot.total_invested);
        let profit = non_negative(snapshot.available_profit);

        let new_invested = invested + amount;

        ProjectionResult {
            operation: Operation::Deposit,
            amount,
            new_invested,
            new_available_profit: profit,
            new_total_balance: new_invested + profit,
            deduct_from_profit: 0.0,
            deduct_from_capital: 0.0,
            is_capital_impacted: false,
            projected_monthly_profit: self.monthly_profit(snapshot, new_invested),
        }
    }

    /// Project balances after a withdrawal, drawing on profit before capital.
    ///
    /// Amounts larger than the whole balance are not rejected; the resulting
    /// balances clamp at zero and `is_capital_impacted` is set.
    pub fn project_withdrawal(&self, snapshot: &PortfolioSnapshot, amount: f64) -> ProjectionResult {
        let amount = sanitize(amount);
        let invested = non_negative(snapshot.total_invested);
        let profit = non_negative(snapshot.available_profit);

        let deduct_from_profit = amount.min(profit);
        let deduct_from_capital = (amount - profit).max(0.0);

        let new_available_profit = profit - deduct_from_profit;
        let new_invested = (invested - deduct_from_capital).max(0.0);

        ProjectionResult {
            operation: Operation::Withdrawal,
            amount,
            new_invested,
            new_available_profit,
            new_total_balance: new_invested + new_available_profit,
            deduct_from_profit,
            deduct_from_capital,
            is_capital_impacted: deduct_from_capital > 0.0,
            projected_monthly_profit: self.monthly_profit(snapshot, new_invested),
        }
    }

    /// Reject withdrawals larger than invested capital plus available profit
    pub fn validate_withdrawal(&self, snapshot: &PortfolioSnapshot, amount: Amount) -> Result<()> {
        let available = non_negative(snapshot.total_invested) + non_negative(snapshot.available_profit);
        if amount.value() > available {
            return Err(ProjectionError::ExceedsBalance {
                requested: amount.value(),
                available,
            });
        }
        Ok(())
    }

    /// Deposit projection for raw input, failing instead of coercing
    pub fn try_project_deposit(&self, snapshot: &PortfolioSnapshot, amount: f64) -> Result<ProjectionResult> {
        let amount = Amount::new(amount)?;
        Ok(self.project_deposit(snapshot, amount.value()))
    }

    /// Withdrawal projection for raw input, failing on bad or excessive amounts
    pub fn try_project_withdrawal(&self, snapshot: &PortfolioSnapshot, amount: f64) -> Result<ProjectionResult> {
        let amount = Amount::new(amount)?;
        self.validate_withdrawal(snapshot, amount)?;
        Ok(self.project_withdrawal(snapshot, amount.value()))
    }

    /// Strict variant of `project`
    pub fn try_project(&self, snapshot: &PortfolioSnapshot, request: &TransactionRequest) -> Result<ProjectionResult> {
        match request.operation {
            Operation::Deposit => self.try_project_deposit(snapshot, request.amount),
            Operation::Withdrawal => self.try_project_withdrawal(snapshot, request.amount),
        }
    }

    /// Growth of a lump sum under the fixed or compounded product
    pub fn project_compound_growth(&self, principal: f64, months: u32, mode: GrowthMode) -> GrowthProjection {
        growth::project(&self.terms, principal, months, mode)
    }

    /// Month-by-month profit accrual for the portfolio
    pub fn project_accrual(&self, snapshot: &PortfolioSnapshot, months: u32) -> Result<AccrualSchedule> {
        accrual::project(snapshot, months)
    }

    fn monthly_profit(&self, snapshot: &PortfolioSnapshot, invested: f64) -> f64 {
        let rate = self.terms.effective_rate(snapshot.profit_percentage);
        debug!("Monthly profit on {:.2} at {}%", invested, rate);
        invested * rate / 100.0
    }
}

/// Negative and NaN balances count as zero
fn non_negative(value: f64) -> f64 {
    value.max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portfolio::ClientDetails;
    use crate::statement::{PayoutDetails, ProfitPeriod};
    use approx::assert_abs_diff_eq;
    use chrono::NaiveDate;

    fn calculator() -> ProjectionCalculator {
        ProjectionCalculator::default()
    }

    #[test]
    fn test_withdrawal_spills_into_capital() {
        let snapshot = PortfolioSnapshot::new(100_000.0, 3_000.0, 4.0);
        let result = calculator().project_withdrawal(&snapshot, 5_000.0);

        assert_eq!(result.deduct_from_profit, 3_000.0);
        assert_eq!(result.deduct_from_capital, 2_000.0);
        assert_eq!(result.new_invested, 98_000.0);
        assert_eq!(result.new_available_profit, 0.0);
        assert_eq!(result.new_total_balance, 98_000.0);
        assert!(result.is_capital_impacted);
        assert_abs_diff_eq!(result.projected_monthly_profit, 3_920.0, epsilon = 1e-9);
    }

    #[test]
    fn test_withdrawal_from_profit_only() {
        let snapshot = PortfolioSnapshot::new(100_000.0, 5_000.0, 4.0);
        let result = calculator().project_withdrawal(&snapshot, 3_000.0);

        assert_eq!(result.deduct_from_profit, 3_000.0);
        assert_eq!(result.deduct_from_capital, 0.0);
        assert_eq!(result.new_invested, 100_000.0);
        assert_eq!(result.new_available_profit, 2_000.0);
        assert!(!result.is_capital_impacted);
        // Profit-bearing base untouched
        assert_abs_diff_eq!(result.projected_monthly_profit, 4_000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_withdrawal_deductions_sum_to_amount() {
        let calc = calculator();
        let snapshots = [
            PortfolioSnapshot::new(100_000.0, 3_000.0, 4.0),
            PortfolioSnapshot::new(12_345.67, 890.12, 3.5),
            PortfolioSnapshot::new(0.0, 0.0, 0.0),
            PortfolioSnapshot::new(500.0, 0.1, 4.0),
        ];
        let amounts = [0.01, 1.0, 890.12, 2_999.99, 13_235.79, 250_000.0];

        for snapshot in &snapshots {
            for &amount in &amounts {
                let result = calc.project_withdrawal(snapshot, amount);
                assert_abs_diff_eq!(result.deduct_from_profit + result.deduct_from_capital, amount, epsilon = 1e-9);
                assert!(result.new_available_profit >= 0.0);
                assert!(result.new_invested >= 0.0);
                assert!(result.deduct_from_profit >= 0.0 && result.deduct_from_capital >= 0.0);
            }
        }
    }

    #[test]
    fn test_withdrawal_beyond_balance_clamps() {
        let snapshot = PortfolioSnapshot::new(10_000.0, 1_000.0, 4.0);
        let result = calculator().project_withdrawal(&snapshot, 50_000.0);

        assert_eq!(result.new_invested, 0.0);
        assert_eq!(result.new_available_profit, 0.0);
        assert_eq!(result.new_total_balance, 0.0);
        assert_eq!(result.deduct_from_capital, 49_000.0);
        assert!(result.is_capital_impacted);
        assert_eq!(result.projected_monthly_profit, 0.0);
    }

    #[test]
    fn test_deposit_adds_to_invested() {
        let calc = calculator();
        let snapshot = PortfolioSnapshot::new(100_000.0, 2_500.0, 5.0);

        for amount in [0.0, 1.0, 25_000.0, 1_234.56] {
            let result = calc.project_deposit(&snapshot, amount);
            assert_eq!(result.new_invested, snapshot.total_invested + amount);
            assert_eq!(result.new_available_profit, 2_500.0);
            assert!(!result.is_capital_impacted);
        }

        let result = calc.project_deposit(&snapshot, 25_000.0);
        assert_abs_diff_eq!(result.projected_monthly_profit, 6_250.0, epsilon = 1e-9);
    }

    #[test]
    fn test_deposit_uses_default_rate_when_unset() {
        let snapshot = PortfolioSnapshot::new(50_000.0, 0.0, 0.0);
        let result = calculator().project_deposit(&snapshot, 50_000.0);
        assert_abs_diff_eq!(result.projected_monthly_profit, 4_000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_invalid_amounts_project_as_zero() {
        let calc = calculator();
        let snapshot = PortfolioSnapshot::new(100_000.0, 3_000.0, 4.0);

        for amount in [f64::NAN, -500.0, f64::INFINITY] {
            let deposit = calc.project_deposit(&snapshot, amount);
            assert_eq!(deposit.amount, 0.0);
            assert_eq!(deposit.new_invested, 100_000.0);

            let withdrawal = calc.project_withdrawal(&snapshot, amount);
            assert_eq!(withdrawal.new_available_profit, 3_000.0);
            assert!(!withdrawal.is_capital_impacted);
        }
    }

    #[test]
    fn test_projection_is_idempotent() {
        let calc = calculator();
        let snapshot = PortfolioSnapshot::new(73_210.55, 1_911.37, 3.7);

        let a = calc.project_withdrawal(&snapshot, 2_500.25);
        let b = calc.project_withdrawal(&snapshot, 2_500.25);
        assert_eq!(a.new_invested.to_bits(), b.new_invested.to_bits());
        assert_eq!(a.projected_monthly_profit.to_bits(), b.projected_monthly_profit.to_bits());
        assert_eq!(a, b);

        assert_eq!(calc.project_deposit(&snapshot, 10.0), calc.project_deposit(&snapshot, 10.0));

        for mode in [GrowthMode::Fixed, GrowthMode::Compounded] {
            let first = calc.project_compound_growth(125_000.0, 18, mode);
            let second = calc.project_compound_growth(125_000.0, 18, mode);
            assert_eq!(first.final_amount.to_bits(), second.final_amount.to_bits());
            assert_eq!(first, second);
        }

        let accrual = calc.project_accrual(&snapshot, 6).unwrap();
        assert_eq!(accrual, calc.project_accrual(&snapshot, 6).unwrap());

        let client = ClientDetails::new("MVK0100", "Test Client");
        let paid_on = NaiveDate::from_ymd_opt(2025, 9, 30).unwrap();
        let payout = PayoutDetails {
            amount: 2_500.25,
            period: ProfitPeriod::month_of(paid_on),
            paid_on,
            transaction_id: None,
        };
        let first = calc.project_payout_message(&client, &snapshot, &payout);
        let second = calc.project_payout_message(&client, &snapshot, &payout);
        assert_eq!(first.message, second.message);
        assert_eq!(first.projection, second.projection);
    }

    #[test]
    fn test_strict_projections() {
        let calc = calculator();
        let snapshot = PortfolioSnapshot::new(10_000.0, 500.0, 4.0);

        assert!(matches!(calc.try_project_deposit(&snapshot, -1.0), Err(ProjectionError::InvalidAmount(_))));
        assert!(matches!(
            calc.try_project_withdrawal(&snapshot, 10_500.01),
            Err(ProjectionError::ExceedsBalance { .. })
        ));

        let full = calc.try_project_withdrawal(&snapshot, 10_500.0).unwrap();
        assert_eq!(full.new_total_balance, 0.0);

        let request = TransactionRequest::deposit(1_000.0);
        assert_eq!(calc.try_project(&snapshot, &request).unwrap().new_invested, 11_000.0);
    }

    #[test]
    fn test_dispatch_by_operation() {
        let calc = calculator();
        let snapshot = PortfolioSnapshot::new(10_000.0, 500.0, 4.0);

        let result = calc.project(&snapshot, &TransactionRequest::withdrawal(700.0));
        assert_eq!(result.operation, Operation::Withdrawal);
        assert_eq!(result.deduct_from_capital, 200.0);
        assert_abs_diff_eq!(result.monthly_profit_change(calc.current_monthly_profit(&snapshot)), -8.0, epsilon = 1e-9);
    }
}
