//! Error type shared by validation, term loading and statement generation

use thiserror::Error;

use crate::access::Role;

#[derive(Debug, Error)]
pub enum ProjectionError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Requested {requested:.2} exceeds available balance {available:.2}")]
    ExceedsBalance { requested: f64, available: f64 },

    #[error("Accrual horizon of {months} months exceeds the {max} month limit")]
    HorizonTooLong { months: u32, max: u32 },

    #[error("Invalid value for {key}: {value}")]
    InvalidTerm { key: String, value: String },

    #[error("Role {role:?} may not generate payout statements")]
    Unauthorized { role: Role },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ProjectionError>;
