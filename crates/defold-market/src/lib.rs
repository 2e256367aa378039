//! Genomic data marketplace: the contract surface, a local SQLite ledger
//! implementing it, and the dashboard workflow that feeds parsed FASTA
//! records into it.

pub mod address;
pub mod amount;
pub mod contract;
pub mod dashboard;
pub mod db;
pub mod ledger;
pub mod seed_data;
pub mod submission;

pub use address::Address;
pub use amount::Wei;
pub use contract::{ContractEvent, DataId, GenomicDataContract};
pub use ledger::SqliteLedger;
pub use submission::{GenomicDataSubmission, SubmissionConfig};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MarketError>;

#[derive(Debug, Error)]
pub enum MarketError {
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid address: {0}")]
    InvalidAddress(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Unknown genomic data id {0}")]
    UnknownData(DataId),
    #[error("Insufficient payment: price is {price} wei, got {paid} wei")]
    InsufficientPayment { price: Wei, paid: Wei },
    #[error("Genomic data {0} already purchased by this account")]
    AlreadyPurchased(DataId),
    #[error("Cannot purchase your own genomic data {0}")]
    OwnData(DataId),
    #[error("Access to genomic data {0} requires a purchase")]
    AccessDenied(DataId),
    #[error("Rating must be between 1 and 5, got {0}")]
    InvalidRating(u8),
    #[error("Researchers cannot rate themselves")]
    SelfRating,
    #[error("Please upload a FASTA file before submitting")]
    NoFileSelected,
    #[error("Please enter a title for the data")]
    MissingTitle,
    #[error("The uploaded file contains no FASTA records")]
    NoRecords,
}
