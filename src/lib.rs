//! Portfolio Projection - preview calculations for a managed investment portal
//!
//! This library provides:
//! - Deposit and withdrawal previews with profit-first deduction
//! - Fixed vs. compounded growth projections
//! - Monthly profit accrual schedules
//! - Payout settlement statements in the client-facing format
//! - Batch projection over a book of portfolios

pub mod error;
pub mod access;
pub mod terms;
pub mod portfolio;
pub mod projection;
pub mod statement;
pub mod scenario;

// Re-export commonly used types
pub use error::{ProjectionError, Result};
pub use access::{AuthContext, Role, StaticAuth};
pub use terms::ProductTerms;
pub use portfolio::{PortfolioSnapshot, ClientDetails, ProfitMode, AccrualStatus};
pub use projection::{ProjectionCalculator, ProjectionResult, TransactionRequest, Operation, Amount, GrowthMode, GrowthProjection};
pub use statement::{PayoutDetails, PayoutStatement, ProfitPeriod};
pub use scenario::ScenarioRunner;
