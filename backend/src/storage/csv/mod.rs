//! # CSV Storage Module
//!
//! Flat-file fallback storage used when no relational database is reachable.
//! All responses live in a single append-only `responses.csv` in the data
//! directory, UTF-8 with a leading byte-order mark so spreadsheet
//! applications detect the encoding.
//!
//! Access is serialized inside one process. Separate processes writing the
//! same file are not coordinated.

pub mod connection;
pub mod response_repository;

#[cfg(test)]
pub mod test_utils;

pub use connection::CsvConnection;
pub use response_repository::CsvResponseRepository;

/// UTF-8 byte-order mark written at the start of every CSV document
pub const UTF8_BOM: &str = "\u{feff}";

/// Writer settings shared by the responses file and the CSV export:
/// minimal quoting and CRLF line endings
pub fn writer_builder() -> csv::WriterBuilder {
    let mut builder = csv::WriterBuilder::new();
    builder
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Necessary)
        .terminator(csv::Terminator::CRLF);
    builder
}
