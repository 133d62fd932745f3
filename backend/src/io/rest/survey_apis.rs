//! # Survey Routes
//!
//! The public side: the questionnaire, its submission and the thank-you page.

use std::collections::BTreeMap;

use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect},
    routing::{get, post},
    Form, Router,
};
use shared::SurveyForm;
use tracing::info;

use crate::io::views;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(show_form))
        .route("/submit", post(submit_survey))
        .route("/thanks", get(show_thanks))
}

pub async fn show_form() -> Html<String> {
    info!("GET /");
    Html(views::render_form_page(&SurveyForm::default(), &BTreeMap::new()))
}

/// Store a submission and redirect, or show the form again with errors
pub async fn submit_survey(State(state): State<AppState>, Form(form): Form<SurveyForm>) -> impl IntoResponse {
    info!("POST /submit");

    match state.survey_service.submit(&form).await {
        Ok(_) => Redirect::to("/thanks").into_response(),
        Err(e) => Html(views::render_form_page(&e.values, &e.errors)).into_response(),
    }
}

pub async fn show_thanks() -> Html<String> {
    Html(views::render_thanks_page())
}
