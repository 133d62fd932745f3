//! # Storage Module
//!
//! Handles persistence of survey responses and the admin token.
//!
//! Two interchangeable backends implement [`ResponseStorage`]:
//!
//! - **SQL**: a `responses` table, one connection per operation
//! - **CSV**: an append-only `responses.csv` in the data directory
//!
//! [`ResponseStore`] picks one of them at startup and is the only thing the
//! rest of the application talks to. Records are append-only; nothing is
//! cached between requests.

pub mod csv;
pub mod response_store;
pub mod sql;
pub mod token_store;
pub mod traits;

pub use response_store::ResponseStore;
pub use token_store::TokenStore;
pub use traits::{ResponseStorage, StorageError, StorageKind, StorageResult};
