//! Survey submission domain logic.
//!
//! Validation, record construction and the follow-up email. The REST layer
//! only renders whatever this service decides.

use shared::SurveyForm;
use tracing::{info, warn};

use crate::domain::email_service::EmailService;
use crate::domain::models::response::{validate_form, SurveyResponse, SurveyValidationError};
use crate::storage::ResponseStore;

/// Result of an accepted submission
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionOutcome {
    pub response: SurveyResponse,
    /// False when the storage write failed. The submission still counts as
    /// accepted for the visitor.
    pub persisted: bool,
}

#[derive(Clone)]
pub struct SurveyService {
    store: ResponseStore,
    email_service: Option<EmailService>,
}

impl SurveyService {
    pub fn new(store: ResponseStore, email_service: Option<EmailService>) -> Self {
        Self {
            store,
            email_service,
        }
    }

    pub fn email_enabled(&self) -> bool {
        self.email_service.is_some()
    }

    /// Validate and store a submission, then send the confirmation email.
    ///
    /// Validation errors reject the submission without writing anything.
    /// A failed write is reported through `persisted` only.
    pub async fn submit(&self, form: &SurveyForm) -> Result<SubmissionOutcome, SurveyValidationError> {
        let values = validate_form(form).map_err(|e| {
            info!("Rejected submission: {}", e);
            e
        })?;

        let response = SurveyResponse::from_form(&values);
        let persisted = self.store.save(&response).await.is_ok();
        if persisted {
            info!("✅ Accepted submission from '{}' at {}", response.name, response.submitted_at);
        } else {
            warn!("Accepted submission from '{}' but it was not persisted", response.name);
        }

        if let Some(email_service) = &self.email_service {
            email_service.spawn_confirmation(response.clone());
        }

        Ok(SubmissionOutcome { response, persisted })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::response::{SurveyField, SUBMITTED_AT_FORMAT};
    use crate::storage::csv::test_utils::TestEnvironment;
    use chrono::{Local, NaiveDateTime, Timelike};

    fn form() -> SurveyForm {
        SurveyForm {
            name: "田中太郎".to_string(),
            phone: "03-1234-5678".to_string(),
            email: "a@b.com".to_string(),
            company: "Acme".to_string(),
            position: "CEO".to_string(),
            comment: String::new(),
        }
    }

    async fn setup_service(env: &TestEnvironment) -> (SurveyService, ResponseStore) {
        let store = ResponseStore::initialize(None, &env.base_path).await;
        (SurveyService::new(store.clone(), None), store)
    }

    #[tokio::test]
    async fn test_valid_submission_adds_exactly_one_record() -> anyhow::Result<()> {
        let env = TestEnvironment::new()?;
        let (service, store) = setup_service(&env).await;

        let before_count = store.load_all().await?.len();
        let started = Local::now().naive_local().with_nanosecond(0).unwrap();
        let outcome = service.submit(&form()).await.expect("valid form");
        let finished = Local::now().naive_local();

        assert!(outcome.persisted);
        let stored = store.load_all().await?;
        assert_eq!(stored.len(), before_count + 1);

        let record = stored.last().unwrap();
        assert_eq!(record, &outcome.response);
        assert_eq!(record.name, "田中太郎");
        assert_eq!(record.comment, "");

        let submitted_at = NaiveDateTime::parse_from_str(&record.submitted_at, SUBMITTED_AT_FORMAT)?;
        assert!(started <= submitted_at && submitted_at <= finished);
        Ok(())
    }

    #[tokio::test]
    async fn test_submission_values_are_trimmed() -> anyhow::Result<()> {
        let env = TestEnvironment::new()?;
        let (service, store) = setup_service(&env).await;

        let padded = SurveyForm {
            company: "  Acme  ".to_string(),
            comment: " thanks ".to_string(),
            ..form()
        };
        service.submit(&padded).await.expect("valid form");

        let stored = store.load_all().await?;
        assert_eq!(stored[0].company, "Acme");
        assert_eq!(stored[0].comment, "thanks");
        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_submission_stores_nothing() -> anyhow::Result<()> {
        let env = TestEnvironment::new()?;
        let (service, store) = setup_service(&env).await;

        let incomplete = SurveyForm {
            phone: String::new(),
            ..form()
        };
        let err = service.submit(&incomplete).await.unwrap_err();

        assert!(err.message_for(SurveyField::Phone).is_some());
        assert_eq!(err.values.name, "田中太郎");
        assert!(store.load_all().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_storage_failure_still_accepts_submission() -> anyhow::Result<()> {
        let env = TestEnvironment::new()?;
        // a regular file where the data directory should be makes every write fail
        std::fs::write(&env.base_path, "not a directory")?;
        let (service, _store) = setup_service(&env).await;

        let outcome = service.submit(&form()).await.expect("valid form");
        assert!(!outcome.persisted);
        assert_eq!(outcome.response.name, "田中太郎");
        Ok(())
    }
}
