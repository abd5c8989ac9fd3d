//! Lump-sum growth under the fixed (simple) and compounded products

use log::warn;
use serde::{Deserialize, Serialize};

use crate::terms::ProductTerms;

/// Interest scheme offered to the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GrowthMode {
    /// Flat monthly rate on the principal
    Fixed,
    /// Monthly compounding, offered only for longer horizons
    Compounded,
}

/// Outcome of a growth projection.
///
/// `rate` is the monthly rate in percent; `None` marks the not-applicable
/// sentinel, in which case the amounts are zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthProjection {
    pub final_amount: f64,
    pub profit: f64,
    pub rate: Option<f64>,
}

impl GrowthProjection {
    pub fn not_applicable() -> Self {
        Self {
            final_amount: 0.0,
            profit: 0.0,
            rate: None,
        }
    }

    pub fn is_applicable(&self) -> bool {
        self.rate.is_some()
    }
}

/// Project growth of `principal` over `months`
pub fn project(terms: &ProductTerms, principal: f64, months: u32, mode: GrowthMode) -> GrowthProjection {
    match mode {
        GrowthMode::Fixed => {
            // Simple interest: P * r * t
            let profit = principal * terms.fixed_monthly_rate() * months as f64;
            GrowthProjection {
                final_amount: principal + profit,
                profit,
                rate: Some(terms.fixed_monthly_rate_percent),
            }
        }
        GrowthMode::Compounded => {
            if months < terms.min_compounding_months {
                return GrowthProjection::not_applicable();
            }
            let exponent = match i32::try_from(months) {
                Ok(exponent) => exponent,
                Err(_) => {
                    warn!("Compounding horizon of {} months is out of range", months);
                    return GrowthProjection::not_applicable();
                }
            };
            // A = P * (1 + r)^t
            let final_amount = principal * (1.0 + terms.compounding_monthly_rate()).powi(exponent);
            GrowthProjection {
                final_amount,
                profit: final_amount - principal,
                rate: Some(terms.compounding_monthly_rate_percent),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fixed_growth() {
        let terms = ProductTerms::default();
        let result = project(&terms, 100_000.0, 12, GrowthMode::Fixed);

        assert_relative_eq!(result.profit, 48_000.0, max_relative = 1e-12);
        assert_relative_eq!(result.final_amount, 148_000.0, max_relative = 1e-12);
        assert_eq!(result.rate, Some(4.0));
    }

    #[test]
    fn test_compounded_growth_twelve_months() {
        let terms = ProductTerms::default();
        let result = project(&terms, 100_000.0, 12, GrowthMode::Compounded);

        // 100000 * 1.036^12
        assert_relative_eq!(result.final_amount, 152_868.169_396, max_relative = 1e-9);
        assert_relative_eq!(result.profit, result.final_amount - 100_000.0);
        assert_eq!(result.rate, Some(3.6));
    }

    #[test]
    fn test_compounding_threshold() {
        let terms = ProductTerms::default();

        let six = project(&terms, 100_000.0, 6, GrowthMode::Compounded);
        assert_eq!(six, GrowthProjection::not_applicable());
        assert!(!six.is_applicable());

        let seven = project(&terms, 100_000.0, 7, GrowthMode::Compounded);
        assert!(seven.is_applicable());
        assert_relative_eq!(seven.final_amount, 128_090.903_166, max_relative = 1e-9);
        assert!(seven.profit > 0.0);
    }

    #[test]
    fn test_compounding_horizon_out_of_range() {
        let terms = ProductTerms::default();

        let huge = project(&terms, 100_000.0, u32::MAX, GrowthMode::Compounded);
        assert_eq!(huge, GrowthProjection::not_applicable());

        let past_i32 = project(&terms, 100_000.0, i32::MAX as u32 + 1, GrowthMode::Compounded);
        assert!(!past_i32.is_applicable());
    }

    #[test]
    fn test_fixed_is_available_for_any_horizon() {
        let terms = ProductTerms::default();
        let result = project(&terms, 10_000.0, 0, GrowthMode::Fixed);
        assert_eq!(result.final_amount, 10_000.0);
        assert_eq!(result.profit, 0.0);
    }
}
