//! # Survey Backend
//!
//! Collects seminar survey responses through a web form and gives the
//! organizer a token-gated view and CSV download of everything collected.
//!
//! ## Architecture
//!
//! ```text
//! IO Layer (axum routes, HTML pages)
//!     ↓
//! Domain Layer (validation, export, confirmation email)
//!     ↓
//! Storage Layer (SQL or CSV backend behind one facade, admin token)
//! ```
//!
//! The storage backend is chosen once in [`initialize_backend`] and shared by
//! every handler through [`AppState`].

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::Config;
use crate::domain::{EmailService, ExportService, SurveyService};
use crate::storage::{ResponseStore, TokenStore};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub store: ResponseStore,
    pub survey_service: SurveyService,
    pub export_service: ExportService,
    pub token_store: TokenStore,
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &Config) -> AppState {
    info!("Setting up storage");
    let store = ResponseStore::initialize(config.database_url.as_deref(), &config.data_dir).await;

    let email_service = match config.email.clone() {
        Some(email_config) => match EmailService::new(email_config) {
            Ok(service) => Some(service),
            Err(e) => {
                warn!("📧 Confirmation email disabled: {:#}", e);
                None
            }
        },
        None => {
            info!("📧 SMTP not configured, confirmation email disabled");
            None
        }
    };

    info!("Setting up domain services");
    let survey_service = SurveyService::new(store.clone(), email_service);
    let export_service = ExportService::new();
    let token_store = TokenStore::new(config.admin_token.clone(), &config.data_dir);

    AppState {
        store,
        survey_service,
        export_service,
        token_store,
    }
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .merge(io::rest::survey_apis::router())
        .merge(io::rest::admin_apis::router())
        .merge(io::rest::health_apis::router())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

/// Initializes tracing with the given log level.
pub fn init_tracing(log_level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
