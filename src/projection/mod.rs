//! Projection calculator for deposit, withdrawal, growth and accrual previews

mod amount;
mod engine;
mod result;
pub mod accrual;
pub mod growth;

pub use amount::{sanitize, Amount};
pub use engine::ProjectionCalculator;
pub use result::{Operation, ProjectionResult, TransactionRequest};
pub use accrual::{AccrualRow, AccrualSchedule, AccrualSummary};
pub use growth::{GrowthMode, GrowthProjection};
