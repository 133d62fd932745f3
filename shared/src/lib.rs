use serde::{Deserialize, Serialize};

/// Raw survey form as posted by the browser.
///
/// Every field defaults to an empty string so that a form with a missing
/// input still deserializes and can be reported back with field errors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SurveyForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub position: String,
    /// Free-text seminar feedback, optional
    #[serde(default)]
    pub comment: String,
}

impl SurveyForm {
    /// Copy of the form with surrounding whitespace removed from every field
    pub fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            email: self.email.trim().to_string(),
            company: self.company.trim().to_string(),
            position: self.position.trim().to_string(),
            comment: self.comment.trim().to_string(),
        }
    }
}

/// Admin login form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdminLoginForm {
    #[serde(default)]
    pub token: String,
}

/// Payload returned by `GET /health`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    /// Active backend: "sql" or "csv"
    pub storage: String,
    /// Whether a relational connection string was configured
    pub database_url_set: bool,
    /// Whether the relational backend was reachable at startup
    pub relational_connected: bool,
    /// Number of stored responses, or None when storage could not be read
    pub response_count: Option<usize>,
}
