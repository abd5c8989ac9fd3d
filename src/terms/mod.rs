//! Product terms: the rates and thresholds quoted to clients

pub mod loader;

pub use loader::LoadedTerms;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;

/// Default path to the product terms file
pub const DEFAULT_TERMS_PATH: &str = "data/product_terms.csv";

/// Flat monthly rate for simple-interest growth, in percent
pub const DEFAULT_FIXED_MONTHLY_RATE_PERCENT: f64 = 4.0;

/// Monthly rate for compounded growth, in percent
pub const DEFAULT_COMPOUNDING_MONTHLY_RATE_PERCENT: f64 = 3.6;

/// Rate used when a portfolio has no profit percentage set
pub const DEFAULT_PROFIT_PERCENTAGE: f64 = 4.0;

/// Shortest horizon for which compounding is offered
pub const DEFAULT_MIN_COMPOUNDING_MONTHS: u32 = 7;

/// Business constants injected into the calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductTerms {
    pub fixed_monthly_rate_percent: f64,
    pub compounding_monthly_rate_percent: f64,
    pub default_profit_percentage: f64,
    pub min_compounding_months: u32,
}

impl Default for ProductTerms {
    fn default() -> Self {
        Self {
            fixed_monthly_rate_percent: DEFAULT_FIXED_MONTHLY_RATE_PERCENT,
            compounding_monthly_rate_percent: DEFAULT_COMPOUNDING_MONTHLY_RATE_PERCENT,
            default_profit_percentage: DEFAULT_PROFIT_PERCENTAGE,
            min_compounding_months: DEFAULT_MIN_COMPOUNDING_MONTHS,
        }
    }
}

impl ProductTerms {
    /// Load terms from the default location (data/product_terms.csv)
    pub fn from_csv() -> Result<Self> {
        Self::from_csv_path(Path::new(DEFAULT_TERMS_PATH))
    }

    /// Load terms from a specific file; keys missing from the file keep their defaults
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let loaded = LoadedTerms::load_from(path)?;
        loaded.to_terms()
    }

    /// Portfolio rate, falling back to the default when unset or zero
    pub fn effective_rate(&self, profit_percentage: f64) -> f64 {
        if profit_percentage > 0.0 {
            profit_percentage
        } else {
            self.default_profit_percentage
        }
    }

    pub fn fixed_monthly_rate(&self) -> f64 {
        self.fixed_monthly_rate_percent / 100.0
    }

    pub fn compounding_monthly_rate(&self) -> f64 {
        self.compounding_monthly_rate_percent / 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_terms() {
        let terms = ProductTerms::default();
        assert_relative_eq!(terms.fixed_monthly_rate(), 0.04, max_relative = 1e-12);
        assert_relative_eq!(terms.compounding_monthly_rate(), 0.036, max_relative = 1e-12);
        // Growth factors used by the projections are exact
        assert_eq!(1.0 + terms.fixed_monthly_rate(), 1.04);
        assert_eq!(1.0 + terms.compounding_monthly_rate(), 1.036);
        assert_eq!(terms.min_compounding_months, 7);
    }

    #[test]
    fn test_effective_rate_falls_back() {
        let terms = ProductTerms::default();
        assert_eq!(terms.effective_rate(0.0), 4.0);
        assert_eq!(terms.effective_rate(-1.0), 4.0);
        assert_eq!(terms.effective_rate(5.5), 5.5);
    }
}
