pub mod response;

pub use response::{SurveyField, SurveyResponse, SurveyValidationError};
