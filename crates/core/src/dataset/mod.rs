//! Ticket dataset: record types and the immutable in-memory store.

mod store;
mod timestamp;
mod types;

pub use store::Dataset;
pub use timestamp::parse_timestamp;
pub use types::{DatasetSummary, Ticket, TicketField};

use thiserror::Error;

/// Errors raised while loading the dataset. All of them are fatal at startup.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to read dataset {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing required column: {0}")]
    MissingColumn(&'static str),

    #[error("Row {row}: expected at most {expected} fields, found {found}")]
    TooManyFields { row: u64, expected: usize, found: usize },

    #[error("Row {row} (ticket {ticket_id:?}): unparseable created_date {value:?}")]
    InvalidCreatedDate {
        row: u64,
        ticket_id: String,
        value: String,
    },
}
