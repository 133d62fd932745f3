//! # Domain Module
//!
//! Business rules of the survey: what a valid submission is, how a record
//! is built from it, how responses are exported, and the confirmation email.
//! Persistence is delegated to [`crate::storage`].

pub mod email_service;
pub mod export_service;
pub mod html;
pub mod models;
pub mod survey_service;

pub use email_service::{EmailConfig, EmailService};
pub use export_service::ExportService;
pub use survey_service::{SubmissionOutcome, SurveyService};
