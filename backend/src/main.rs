use anyhow::Context;
use tracing::{info, warn};

use survey_backend::config::Config;
use survey_backend::{create_router, initialize_backend, init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    init_tracing(&config.log_level);

    let app_state = initialize_backend(&config).await;
    info!("📦 Storage backend: {}", app_state.store.kind());
    if !app_state.survey_service.email_enabled() {
        info!("📧 Submissions are stored without a confirmation email");
    }

    let addr = config.server_addr();
    match app_state.token_store.get_or_create_token() {
        Ok(token) => info!("🔑 Admin page: http://{}/admin/{}", addr, token),
        Err(e) => warn!("Admin token unavailable: {}", e),
    }

    let app = create_router(app_state);

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
