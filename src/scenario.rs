//! Scenario runner for batch projections
//!
//! Holds one calculator and runs many previews against it, in parallel
//! where the batch is large enough to matter.

use log::warn;
use rayon::prelude::*;
use serde::Serialize;

use crate::error::Result;
use crate::portfolio::{BookEntry, PortfolioSnapshot};
use crate::projection::{GrowthMode, GrowthProjection, ProjectionCalculator, ProjectionResult, TransactionRequest};
use crate::terms::ProductTerms;

/// Projection outcome for one book entry
#[derive(Debug, Clone, Serialize)]
pub struct BookProjection {
    pub client_id: String,
    pub result: ProjectionResult,
    /// Validation failure for the request, if any; the lenient result is still reported
    pub rejection: Option<String>,
}

/// Pre-built runner for batch projections
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::from_csv()?;
/// let previews = runner.run_book(&load_book("portfolios.csv")?);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    calculator: ProjectionCalculator,
}

impl ScenarioRunner {
    /// Create runner with default product terms
    pub fn new() -> Self {
        Self::default()
    }

    /// Create runner by loading product terms from the default CSV file
    pub fn from_csv() -> Result<Self> {
        Ok(Self::with_terms(ProductTerms::from_csv()?))
    }

    /// Create runner from a specific terms file
    pub fn from_csv_path(path: &std::path::Path) -> Result<Self> {
        Ok(Self::with_terms(ProductTerms::from_csv_path(path)?))
    }

    pub fn with_terms(terms: ProductTerms) -> Self {
        Self {
            calculator: ProjectionCalculator::new(terms),
        }
    }

    pub fn calculator(&self) -> &ProjectionCalculator {
        &self.calculator
    }

    /// Run a single projection
    pub fn run(&self, snapshot: &PortfolioSnapshot, request: &TransactionRequest) -> ProjectionResult {
        self.calculator.project(snapshot, request)
    }

    /// Preview several candidate requests against one portfolio
    pub fn run_requests(&self, snapshot: &PortfolioSnapshot, requests: &[TransactionRequest]) -> Vec<ProjectionResult> {
        requests.iter().map(|r| self.calculator.project(snapshot, r)).collect()
    }

    /// Project every entry of a book in parallel.
    ///
    /// Entries whose request fails strict validation are still projected
    /// leniently and carry the rejection reason.
    pub fn run_book(&self, entries: &[BookEntry]) -> Vec<BookProjection> {
        entries
            .par_iter()
            .map(|entry| {
                let rejection = match self.calculator.try_project(&entry.snapshot, &entry.request) {
                    Ok(_) => None,
                    Err(e) => {
                        warn!("Request for {} rejected: {}", entry.client_id, e);
                        Some(e.to_string())
                    }
                };
                BookProjection {
                    client_id: entry.client_id.clone(),
                    result: self.calculator.project(&entry.snapshot, &entry.request),
                    rejection,
                }
            })
            .collect()
    }

    /// Growth table for several horizons
    pub fn growth_table(&self, principal: f64, horizons: &[u32], mode: GrowthMode) -> Vec<(u32, GrowthProjection)> {
        horizons
            .iter()
            .map(|&months| (months, self.calculator.project_compound_growth(principal, months, mode)))
            .collect()
    }
}
