//! CSV-based product terms loader
//!
//! Reads `key,value` rows using the portal's global configuration keys.
//! Unknown keys are ignored so the same file can carry settings that only
//! the server uses (payout window, proration method, ...).

use log::{debug, warn};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::ProductTerms;
use crate::error::{ProjectionError, Result};

pub const FIXED_MONTHLY_RATE_PERCENT: &str = "FIXED_MONTHLY_RATE_PERCENT";
pub const COMPOUNDING_MONTHLY_RATE_PERCENT: &str = "COMPOUNDING_MONTHLY_RATE_PERCENT";
pub const DEFAULT_PROFIT_PERCENTAGE: &str = "DEFAULT_PROFIT_PERCENTAGE";
pub const MIN_COMPOUNDING_MONTHS: &str = "MIN_COMPOUNDING_MONTHS";

const KNOWN_KEYS: [&str; 4] = [
    FIXED_MONTHLY_RATE_PERCENT,
    COMPOUNDING_MONTHLY_RATE_PERCENT,
    DEFAULT_PROFIT_PERCENTAGE,
    MIN_COMPOUNDING_MONTHS,
];

/// Raw key/value pairs as read from disk
#[derive(Debug, Clone, Default)]
pub struct LoadedTerms {
    pub values: HashMap<String, String>,
}

impl LoadedTerms {
    /// Load terms from a CSV file with a `key,value` header
    pub fn load_from(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Self::load_from_reader(file)
    }

    /// Load terms from any reader (e.g. string buffer)
    pub fn load_from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let mut values = HashMap::new();

        for result in reader.records() {
            let record = result?;
            let key = record.get(0).unwrap_or_default().to_string();
            let value = record.get(1).unwrap_or_default().to_string();

            if !KNOWN_KEYS.contains(&key.as_str()) {
                debug!("Ignoring unrecognised term {}", key);
            }
            values.insert(key, value);
        }

        Ok(Self { values })
    }

    /// Overlay loaded values on the default terms
    pub fn to_terms(&self) -> Result<ProductTerms> {
        let mut terms = ProductTerms::default();

        if let Some(rate) = self.percent(FIXED_MONTHLY_RATE_PERCENT)? {
            terms.fixed_monthly_rate_percent = rate;
        }
        if let Some(rate) = self.percent(COMPOUNDING_MONTHLY_RATE_PERCENT)? {
            terms.compounding_monthly_rate_percent = rate;
        }
        if let Some(rate) = self.percent(DEFAULT_PROFIT_PERCENTAGE)? {
            terms.default_profit_percentage = rate;
        }
        if let Some(raw) = self.values.get(MIN_COMPOUNDING_MONTHS) {
            terms.min_compounding_months = raw.parse().map_err(|_| invalid(MIN_COMPOUNDING_MONTHS, raw))?;
        }

        if terms.default_profit_percentage <= 0.0 {
            warn!("Default profit percentage is {}, deposits will project zero profit", terms.default_profit_percentage);
        }

        Ok(terms)
    }

    fn percent(&self, key: &str) -> Result<Option<f64>> {
        let Some(raw) = self.values.get(key) else {
            return Ok(None);
        };
        let value: f64 = raw.parse().map_err(|_| invalid(key, raw))?;
        if !value.is_finite() || value < 0.0 {
            return Err(invalid(key, raw));
        }
        Ok(Some(value))
    }
}

fn invalid(key: &str, value: &str) -> ProjectionError {
    ProjectionError::InvalidTerm {
        key: key.to_string(),
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_terms_overlay() {
        let data = "key,value\n\
                    FIXED_MONTHLY_RATE_PERCENT,4.5\n\
                    COMPOUNDING_MONTHLY_RATE_PERCENT, 3.2\n\
                    PAYOUT_WINDOW_START_DAY,5\n";
        let loaded = LoadedTerms::load_from_reader(data.as_bytes()).unwrap();
        let terms = loaded.to_terms().unwrap();

        assert_eq!(terms.fixed_monthly_rate_percent, 4.5);
        assert_eq!(terms.compounding_monthly_rate_percent, 3.2);
        // Untouched keys keep defaults
        assert_eq!(terms.default_profit_percentage, 4.0);
        assert_eq!(terms.min_compounding_months, 7);
    }

    #[test]
    fn test_rejects_bad_values() {
        let data = "key,value\nFIXED_MONTHLY_RATE_PERCENT,four\n";
        let loaded = LoadedTerms::load_from_reader(data.as_bytes()).unwrap();
        assert!(matches!(loaded.to_terms(), Err(ProjectionError::InvalidTerm { .. })));

        let data = "key,value\nMIN_COMPOUNDING_MONTHS,-3\n";
        let loaded = LoadedTerms::load_from_reader(data.as_bytes()).unwrap();
        assert!(loaded.to_terms().is_err());

        let data = "key,value\nDEFAULT_PROFIT_PERCENTAGE,-1\n";
        let loaded = LoadedTerms::load_from_reader(data.as_bytes()).unwrap();
        assert!(loaded.to_terms().is_err());
    }
}
