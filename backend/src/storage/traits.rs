//! # Storage Traits
//!
//! The response storage abstraction shared by the relational and CSV
//! backends, plus the error type every storage boundary returns.

use async_trait::async_trait;
use std::fmt;

use crate::domain::models::response::SurveyResponse;

/// Errors raised by a storage backend
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Unsupported database URL scheme '{0}'")]
    UnsupportedScheme(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV header is missing column '{0}'")]
    InvalidHeader(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Which backend is serving reads and writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    Sql,
    Csv,
}

impl StorageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKind::Sql => "sql",
            StorageKind::Csv => "csv",
        }
    }
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trait defining the interface for survey response storage
///
/// Both backends honor the same contract: append-only writes and reads
/// that return every record in insertion order.
#[async_trait]
pub trait ResponseStorage: Send + Sync {
    /// Backend identifier for diagnostics
    fn kind(&self) -> StorageKind;

    /// Prepare the backend (create the table or file). Must be idempotent.
    async fn initialize(&self) -> StorageResult<()>;

    /// Append one response
    async fn store_response(&self, response: &SurveyResponse) -> StorageResult<()>;

    /// All responses, oldest first
    async fn list_responses(&self) -> StorageResult<Vec<SurveyResponse>>;
}
