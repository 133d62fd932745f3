use std::collections::BTreeMap;
use std::fmt;

use chrono::Local;
use serde::{Deserialize, Serialize};
use shared::SurveyForm;

/// Format used for `submitted_at`, server local time
pub const SUBMITTED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Inline message shown next to an empty required field
pub const REQUIRED_FIELD_MESSAGE: &str = "この項目は必須です。";

/// One stored survey submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyResponse {
    pub submitted_at: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub company: String,
    pub position: String,
    pub comment: String,
}

/// The seven record fields in canonical column order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurveyField {
    SubmittedAt,
    Name,
    Phone,
    Email,
    Company,
    Position,
    Comment,
}

impl SurveyField {
    pub const ALL: [SurveyField; 7] = [
        SurveyField::SubmittedAt,
        SurveyField::Name,
        SurveyField::Phone,
        SurveyField::Email,
        SurveyField::Company,
        SurveyField::Position,
        SurveyField::Comment,
    ];

    /// Fields a visitor must fill in
    pub const REQUIRED: [SurveyField; 5] = [
        SurveyField::Name,
        SurveyField::Phone,
        SurveyField::Email,
        SurveyField::Company,
        SurveyField::Position,
    ];

    /// Column / form input name
    pub fn as_str(&self) -> &'static str {
        match self {
            SurveyField::SubmittedAt => "submitted_at",
            SurveyField::Name => "name",
            SurveyField::Phone => "phone",
            SurveyField::Email => "email",
            SurveyField::Company => "company",
            SurveyField::Position => "position",
            SurveyField::Comment => "comment",
        }
    }

    /// Display label, also the CSV header cell
    pub fn label(&self) -> &'static str {
        match self {
            SurveyField::SubmittedAt => "受付日時",
            SurveyField::Name => "氏名",
            SurveyField::Phone => "電話番号",
            SurveyField::Email => "メールアドレス",
            SurveyField::Company => "会社名",
            SurveyField::Position => "役職",
            SurveyField::Comment => "セミナー感想",
        }
    }

    /// Canonical CSV header row
    pub fn header_labels() -> [&'static str; 7] {
        Self::ALL.map(|field| field.label())
    }
}

impl fmt::Display for SurveyField {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl SurveyResponse {
    /// Build a record from an already validated form, stamped with the current local time
    pub fn from_form(form: &SurveyForm) -> Self {
        Self::from_form_at(form, Local::now().format(SUBMITTED_AT_FORMAT).to_string())
    }

    pub fn from_form_at(form: &SurveyForm, submitted_at: String) -> Self {
        Self {
            submitted_at,
            name: form.name.clone(),
            phone: form.phone.clone(),
            email: form.email.clone(),
            company: form.company.clone(),
            position: form.position.clone(),
            comment: form.comment.clone(),
        }
    }

    pub fn get(&self, field: SurveyField) -> &str {
        match field {
            SurveyField::SubmittedAt => &self.submitted_at,
            SurveyField::Name => &self.name,
            SurveyField::Phone => &self.phone,
            SurveyField::Email => &self.email,
            SurveyField::Company => &self.company,
            SurveyField::Position => &self.position,
            SurveyField::Comment => &self.comment,
        }
    }

    /// Values in canonical column order
    pub fn values(&self) -> [&str; 7] {
        SurveyField::ALL.map(|field| self.get(field))
    }

    /// Rebuild a record from values in canonical column order
    pub fn from_values<S: Into<String>>(values: [S; 7]) -> Self {
        let [submitted_at, name, phone, email, company, position, comment] = values;
        Self {
            submitted_at: submitted_at.into(),
            name: name.into(),
            phone: phone.into(),
            email: email.into(),
            company: company.into(),
            position: position.into(),
            comment: comment.into(),
        }
    }
}

/// Field-level validation failures for a survey form, together with the
/// values the visitor entered so the form can be shown again unchanged
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Survey form has {} missing required field(s)", .errors.len())]
pub struct SurveyValidationError {
    pub errors: BTreeMap<SurveyField, &'static str>,
    pub values: SurveyForm,
}

impl SurveyValidationError {
    pub fn message_for(&self, field: SurveyField) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }
}

/// Trim the form and check that every required field is present
pub fn validate_form(form: &SurveyForm) -> Result<SurveyForm, SurveyValidationError> {
    let values = form.trimmed();

    let errors: BTreeMap<SurveyField, &'static str> = SurveyField::REQUIRED
        .iter()
        .filter(|field| form_value(&values, **field).is_empty())
        .map(|field| (*field, REQUIRED_FIELD_MESSAGE))
        .collect();

    if errors.is_empty() {
        Ok(values)
    } else {
        Err(SurveyValidationError { errors, values })
    }
}

/// Value of a form input by field; `SubmittedAt` is never part of the form
pub fn form_value(form: &SurveyForm, field: SurveyField) -> &str {
    match field {
        SurveyField::SubmittedAt => "",
        SurveyField::Name => &form.name,
        SurveyField::Phone => &form.phone,
        SurveyField::Email => &form.email,
        SurveyField::Company => &form.company,
        SurveyField::Position => &form.position,
        SurveyField::Comment => &form.comment,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn complete_form() -> SurveyForm {
        SurveyForm {
            name: "田中太郎".to_string(),
            phone: "03-1234-5678".to_string(),
            email: "a@b.com".to_string(),
            company: "Acme".to_string(),
            position: "CEO".to_string(),
            comment: String::new(),
        }
    }

    #[test]
    fn test_validate_accepts_complete_form_with_empty_comment() {
        let values = validate_form(&complete_form()).expect("form should be valid");
        assert_eq!(values, complete_form());
    }

    #[test]
    fn test_validate_reports_each_missing_field() {
        let form = SurveyForm {
            name: "  ".to_string(),
            email: String::new(),
            ..complete_form()
        };

        let err = validate_form(&form).unwrap_err();
        assert_eq!(err.errors.len(), 2);
        assert_eq!(err.message_for(SurveyField::Name), Some(REQUIRED_FIELD_MESSAGE));
        assert_eq!(err.message_for(SurveyField::Email), Some(REQUIRED_FIELD_MESSAGE));
        assert_eq!(err.message_for(SurveyField::Phone), None);
        // entered values come back trimmed, not cleared
        assert_eq!(err.values.company, "Acme");
        assert_eq!(err.values.name, "");
    }

    #[test]
    fn test_comment_is_never_required() {
        let form = SurveyForm {
            comment: "   ".to_string(),
            ..complete_form()
        };
        assert!(validate_form(&form).is_ok());
    }

    #[test]
    fn test_from_form_stamps_parseable_local_time() {
        let record = SurveyResponse::from_form(&complete_form());
        assert!(NaiveDateTime::parse_from_str(&record.submitted_at, SUBMITTED_AT_FORMAT).is_ok());
        assert_eq!(record.name, "田中太郎");
        assert_eq!(record.comment, "");
    }

    #[test]
    fn test_values_follow_canonical_order() {
        let record = SurveyResponse::from_form_at(&complete_form(), "2024-05-01 10:00:00".to_string());
        let values = record.values();
        assert_eq!(values[0], "2024-05-01 10:00:00");
        assert_eq!(values[1], "田中太郎");
        assert_eq!(values[6], "");
        assert_eq!(SurveyResponse::from_values(values.map(str::to_string)), record);
    }

    #[test]
    fn test_header_labels() {
        assert_eq!(
            SurveyField::header_labels(),
            ["受付日時", "氏名", "電話番号", "メールアドレス", "会社名", "役職", "セミナー感想"]
        );
    }
}
