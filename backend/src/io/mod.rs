//! # IO Layer
//!
//! HTTP routes and the HTML they render. Handlers translate domain results
//! into status codes and pages; they hold no business rules.

pub mod rest;
pub mod views;
