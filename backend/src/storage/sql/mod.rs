//! # SQL Storage Module
//!
//! Relational storage for survey responses in a single `responses` table.
//! PostgreSQL in production; SQLite URLs work too and are what the tests use.

pub mod connection;
pub mod response_repository;

pub use connection::{SqlConnection, SqlDialect};
pub use response_repository::SqlResponseRepository;
