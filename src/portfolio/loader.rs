//! Load a book of portfolios with pending transactions from CSV

use super::{AccrualStatus, PortfolioSnapshot, ProfitMode};
use crate::error::{ProjectionError, Result};
use crate::projection::{Operation, TransactionRequest};
use csv::Reader;
use std::path::Path;

/// Raw CSV row
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    client_id: String,
    total_invested: f64,
    available_profit: f64,
    #[serde(default)]
    profit_percentage: Option<f64>,
    #[serde(default)]
    profit_mode: Option<String>,
    #[serde(default)]
    status: Option<String>,
    operation: String,
    amount: f64,
}

/// One portfolio paired with the transaction to preview against it
#[derive(Debug, Clone, PartialEq)]
pub struct BookEntry {
    pub client_id: String,
    pub snapshot: PortfolioSnapshot,
    pub request: TransactionRequest,
}

impl CsvRow {
    fn into_entry(self) -> Result<BookEntry> {
        let profit_mode = match self.profit_mode.as_deref().map(str::trim) {
            None | Some("") | Some("FIXED") => ProfitMode::Fixed,
            Some("COMPOUNDING") => ProfitMode::Compounding,
            Some(other) => return Err(unknown("profit_mode", other)),
        };

        let accrual_status = match self.status.as_deref().map(str::trim) {
            None | Some("") | Some("ACTIVE") => AccrualStatus::Active,
            Some("PAUSED") => AccrualStatus::Paused,
            Some(other) => return Err(unknown("status", other)),
        };

        let operation = match self.operation.trim() {
            "DEPOSIT" => Operation::Deposit,
            "WITHDRAWAL" => Operation::Withdrawal,
            other => return Err(unknown("operation", other)),
        };

        Ok(BookEntry {
            client_id: self.client_id,
            snapshot: PortfolioSnapshot {
                total_invested: self.total_invested,
                available_profit: self.available_profit,
                profit_percentage: self.profit_percentage.unwrap_or(0.0),
                profit_mode,
                accrual_status,
            },
            request: TransactionRequest {
                amount: self.amount,
                operation,
            },
        })
    }
}

fn unknown(key: &str, value: &str) -> ProjectionError {
    ProjectionError::InvalidTerm {
        key: key.to_string(),
        value: value.to_string(),
    }
}

/// Load all book entries from a CSV file
pub fn load_book<P: AsRef<Path>>(path: P) -> Result<Vec<BookEntry>> {
    let reader = Reader::from_path(path)?;
    collect_entries(reader)
}

/// Load book entries from any reader (e.g., string buffer)
pub fn load_book_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<BookEntry>> {
    collect_entries(Reader::from_reader(reader))
}

fn collect_entries<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<BookEntry>> {
    let mut entries = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        entries.push(row.into_entry()?);
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOOK: &str = "\
client_id,total_invested,available_profit,profit_percentage,profit_mode,status,operation,amount
MVK001,100000,3000,4,FIXED,ACTIVE,WITHDRAWAL,5000
MVK002,250000,0,,COMPOUNDING,PAUSED,DEPOSIT,50000
";

    #[test]
    fn test_load_book() {
        let entries = load_book_from_reader(BOOK.as_bytes()).unwrap();
        assert_eq!(entries.len(), 2);

        let first = &entries[0];
        assert_eq!(first.client_id, "MVK001");
        assert_eq!(first.snapshot.available_profit, 3000.0);
        assert_eq!(first.request.operation, Operation::Withdrawal);

        let second = &entries[1];
        assert_eq!(second.snapshot.profit_percentage, 0.0);
        assert_eq!(second.snapshot.profit_mode, ProfitMode::Compounding);
        assert_eq!(second.snapshot.accrual_status, AccrualStatus::Paused);
        assert_eq!(second.request.amount, 50000.0);
    }

    #[test]
    fn test_unknown_operation_rejected() {
        let data = "client_id,total_invested,available_profit,profit_percentage,profit_mode,status,operation,amount\n\
                    X,1,0,4,FIXED,ACTIVE,TRANSFER,5\n";
        let err = load_book_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, ProjectionError::InvalidTerm { ref key, .. } if key == "operation"));
    }
}
