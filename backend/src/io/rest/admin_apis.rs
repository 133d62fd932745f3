//! # Admin Routes
//!
//! Token-gated access to the collected responses. A wrong token gets a 403
//! page that contains no record data.

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Form, Router,
};
use shared::AdminLoginForm;
use tracing::{error, info, warn};

use crate::io::views;
use crate::AppState;

const INVALID_TOKEN_MESSAGE: &str = "トークンが正しくありません。";
const TOKEN_UNAVAILABLE_MESSAGE: &str = "現在ログインできません。しばらくしてから再度お試しください。";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin", get(show_login).post(login))
        .route("/admin/:token", get(show_responses))
        .route("/admin/:token/csv", get(download_csv))
}

/// Scheme and host the visitor used, for links that are shared outside the app
fn base_url(headers: &HeaderMap) -> String {
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("http");
    let host = headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("localhost");
    format!("{}://{}", scheme, host)
}

fn forbidden() -> Response {
    (StatusCode::FORBIDDEN, Html(views::render_access_denied_page())).into_response()
}

async fn render_responses(state: &AppState, headers: &HeaderMap, token: &str) -> Response {
    let share_url = format!("{}/admin/{}", base_url(headers), token);
    let csv_url = format!("{}/csv", share_url);

    let responses = state.store.load_all().await.ok();
    Html(views::render_admin_page(responses.as_deref(), &share_url, &csv_url)).into_response()
}

pub async fn show_login() -> Html<String> {
    info!("GET /admin");
    Html(views::render_login_page(None))
}

pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<AdminLoginForm>,
) -> Response {
    info!("POST /admin");

    let token = form.token.trim();
    match state.token_store.verify(token) {
        Ok(true) => render_responses(&state, &headers, token).await,
        Ok(false) => {
            warn!("Rejected admin login with an invalid token");
            (StatusCode::FORBIDDEN, Html(views::render_login_page(Some(INVALID_TOKEN_MESSAGE)))).into_response()
        }
        Err(e) => {
            error!("❌ Failed to read admin token: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Html(views::render_login_page(Some(TOKEN_UNAVAILABLE_MESSAGE))),
            )
                .into_response()
        }
    }
}

pub async fn show_responses(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(token): Path<String>,
) -> Response {
    info!("GET /admin/<token>");

    match state.token_store.verify(&token) {
        Ok(true) => render_responses(&state, &headers, &token).await,
        Ok(false) => {
            warn!("Rejected admin view with an invalid token");
            forbidden()
        }
        Err(e) => {
            error!("❌ Failed to read admin token: {}", e);
            forbidden()
        }
    }
}

pub async fn download_csv(State(state): State<AppState>, Path(token): Path<String>) -> Response {
    info!("GET /admin/<token>/csv");

    match state.token_store.verify(&token) {
        Ok(true) => {}
        Ok(false) => {
            warn!("Rejected CSV download with an invalid token");
            return forbidden();
        }
        Err(e) => {
            error!("❌ Failed to read admin token: {}", e);
            return forbidden();
        }
    }

    match state.store.export_csv().await {
        Ok(csv) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                (header::CONTENT_DISPOSITION, state.export_service.content_disposition()),
            ],
            csv,
        )
            .into_response(),
        Err(e) => {
            error!("❌ CSV export unavailable: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "Response storage is unavailable").into_response()
        }
    }
}
