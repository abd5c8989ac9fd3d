//! Validated transaction amounts
//!
//! The calculator itself is lenient: bad input projects as a zero amount.
//! Callers that submit a request use `Amount` to reject bad input up front.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ProjectionError, Result};

/// A finite, strictly positive amount
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Amount(f64);

impl Amount {
    pub fn new(value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(ProjectionError::InvalidAmount(format!("{} is not a finite number", value)));
        }
        if value <= 0.0 {
            return Err(ProjectionError::InvalidAmount(format!("{} must be greater than zero", value)));
        }
        Ok(Self(value))
    }

    /// Parse user input such as "5000" or " 2500.50 "
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let value: f64 = trimmed
            .parse()
            .map_err(|_| ProjectionError::InvalidAmount(format!("'{}' is not a number", trimmed)))?;
        Self::new(value)
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

/// Coerce raw input to the amount the lenient projections use
pub fn sanitize(amount: f64) -> f64 {
    if amount.is_finite() && amount > 0.0 {
        amount
    } else {
        0.0
    }
}

impl FromStr for Amount {
    type Err = ProjectionError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<f64> for Amount {
    type Error = ProjectionError;

    fn try_from(value: f64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Amount> for f64 {
    fn from(amount: Amount) -> f64 {
        amount.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
