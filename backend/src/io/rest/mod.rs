//! # REST Interface Layer
//!
//! One router per area, merged in [`crate::create_router`]:
//!
//! - `survey_apis`: the public form, submission and thank-you page
//! - `admin_apis`: token-gated response list and CSV download
//! - `health_apis`: storage diagnostics as JSON

pub mod admin_apis;
pub mod health_apis;
pub mod survey_apis;

#[cfg(test)]
pub(crate) mod test_support {
    use axum::Router;

    use crate::config::Config;
    use crate::storage::csv::test_utils::TestEnvironment;
    use crate::{create_router, initialize_backend, AppState};

    pub const TEST_TOKEN: &str = "test-token";

    /// Config pointing every file at `env` with a fixed admin token
    pub fn test_config(env: &TestEnvironment, database_url: Option<String>) -> Config {
        let mut config = Config::from_lookup(|_| None).expect("default config");
        config.data_dir = env.base_path.clone();
        config.database_url = database_url;
        config.admin_token = Some(TEST_TOKEN.to_string());
        config
    }

    pub async fn setup_test_state(env: &TestEnvironment) -> AppState {
        initialize_backend(&test_config(env, None)).await
    }

    pub async fn setup_test_app(env: &TestEnvironment) -> (Router, AppState) {
        let state = setup_test_state(env).await;
        (create_router(state.clone()), state)
    }
}
