//! # Response Store
//!
//! The storage facade. It decides once, at startup, whether responses go to
//! the relational database or to the CSV fallback, and every handler goes
//! through the same handle afterwards.

use std::path::Path;
use std::sync::Arc;

use tracing::{error, info, warn};

use super::csv::{CsvConnection, CsvResponseRepository};
use super::sql::{SqlConnection, SqlResponseRepository};
use super::traits::{ResponseStorage, StorageKind, StorageResult};
use crate::domain::export_service::ExportService;
use crate::domain::models::response::SurveyResponse;

#[derive(Clone)]
pub struct ResponseStore {
    backend: Arc<dyn ResponseStorage>,
    database_url_set: bool,
}

impl ResponseStore {
    /// Wrap an already initialized backend
    pub fn new(backend: Arc<dyn ResponseStorage>, database_url_set: bool) -> Self {
        Self {
            backend,
            database_url_set,
        }
    }

    /// Pick the backend for the lifetime of the process.
    ///
    /// The relational backend is used when a connection string is configured
    /// and the table can be created; any failure falls back to CSV files in
    /// `data_directory`.
    pub async fn initialize(database_url: Option<&str>, data_directory: &Path) -> Self {
        let database_url = database_url.map(str::trim).filter(|url| !url.is_empty());

        if let Some(url) = database_url {
            match Self::connect_relational(url).await {
                Ok(repo) => {
                    info!("✅ Using relational storage");
                    return Self::new(Arc::new(repo), true);
                }
                Err(e) => {
                    warn!("Relational storage unavailable, falling back to CSV: {}", e);
                }
            }
        } else {
            info!("No database URL configured, using CSV storage");
        }

        let csv_repo = CsvResponseRepository::new(CsvConnection::new(data_directory));
        info!("Using CSV storage in {}", data_directory.display());
        Self::new(Arc::new(csv_repo), database_url.is_some())
    }

    async fn connect_relational(url: &str) -> StorageResult<SqlResponseRepository> {
        let repo = SqlResponseRepository::new(SqlConnection::new(url)?);
        repo.initialize().await?;
        Ok(repo)
    }

    pub fn kind(&self) -> StorageKind {
        self.backend.kind()
    }

    /// Whether the relational backend was reachable at startup
    pub fn relational_connected(&self) -> bool {
        self.kind() == StorageKind::Sql
    }

    pub fn database_url_set(&self) -> bool {
        self.database_url_set
    }

    /// Append one response through the active backend
    pub async fn save(&self, response: &SurveyResponse) -> StorageResult<()> {
        self.backend.store_response(response).await.map_err(|e| {
            error!("❌ Failed to save response via {}: {}", self.kind(), e);
            e
        })
    }

    /// Every response in insertion order. An error means storage could not be
    /// read, which is different from an empty result.
    pub async fn load_all(&self) -> StorageResult<Vec<SurveyResponse>> {
        self.backend.list_responses().await.map_err(|e| {
            error!("❌ Failed to load responses via {}: {}", self.kind(), e);
            e
        })
    }

    /// The canonical CSV export of every response
    pub async fn export_csv(&self) -> StorageResult<String> {
        let responses = self.load_all().await?;
        let csv = ExportService::new().render_csv(&responses)?;
        info!("Exported {} responses as CSV ({} bytes)", responses.len(), csv.len());
        Ok(csv)
    }
}
