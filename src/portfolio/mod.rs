//! Portfolio snapshots and book loading

mod data;
pub mod loader;

pub use data::{PortfolioSnapshot, ProfitMode, AccrualStatus, ClientDetails};
pub use loader::{load_book, load_book_from_reader, BookEntry};
