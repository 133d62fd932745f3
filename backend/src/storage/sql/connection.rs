use sqlx::any::install_default_drivers;
use sqlx::AnyConnection;
use sqlx::Connection;
use tracing::{debug, warn};

use crate::storage::traits::{StorageError, StorageResult};

/// SQL flavour behind a connection string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlDialect {
    Postgres,
    Sqlite,
}

impl SqlDialect {
    /// Detect the dialect from the URL scheme
    pub fn from_url(url: &str) -> StorageResult<Self> {
        let scheme = url.split(':').next().unwrap_or_default();
        match scheme {
            "postgres" | "postgresql" => Ok(SqlDialect::Postgres),
            "sqlite" => Ok(SqlDialect::Sqlite),
            // only the scheme is reported, the rest may hold credentials
            other => Err(StorageError::UnsupportedScheme(other.to_string())),
        }
    }

    /// DDL for the responses table
    fn create_responses_table(&self) -> &'static str {
        match self {
            SqlDialect::Postgres => {
                r#"
                CREATE TABLE IF NOT EXISTS responses (
                    id SERIAL PRIMARY KEY,
                    submitted_at TEXT NOT NULL,
                    name TEXT NOT NULL,
                    phone TEXT NOT NULL,
                    email TEXT NOT NULL,
                    company TEXT NOT NULL,
                    position TEXT NOT NULL,
                    comment TEXT NOT NULL DEFAULT ''
                );
                "#
            }
            SqlDialect::Sqlite => {
                r#"
                CREATE TABLE IF NOT EXISTS responses (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    submitted_at TEXT NOT NULL,
                    name TEXT NOT NULL,
                    phone TEXT NOT NULL,
                    email TEXT NOT NULL,
                    company TEXT NOT NULL,
                    position TEXT NOT NULL,
                    comment TEXT NOT NULL DEFAULT ''
                );
                "#
            }
        }
    }
}

/// SqlConnection opens one database connection per operation.
///
/// No pool is kept: every caller acquires a fresh connection and hands it
/// back to `release` when done, whether the statement succeeded or not.
#[derive(Clone)]
pub struct SqlConnection {
    url: String,
    dialect: SqlDialect,
}

impl SqlConnection {
    pub fn new(url: &str) -> StorageResult<Self> {
        let dialect = SqlDialect::from_url(url)?;
        Ok(Self {
            url: url.to_string(),
            dialect,
        })
    }

    pub fn dialect(&self) -> SqlDialect {
        self.dialect
    }

    /// Open a new connection
    pub async fn acquire(&self) -> StorageResult<AnyConnection> {
        install_default_drivers();
        let conn = AnyConnection::connect(&self.url).await?;
        debug!("Opened {:?} connection", self.dialect);
        Ok(conn)
    }

    /// Close a connection opened by `acquire`
    pub async fn release(conn: AnyConnection) {
        if let Err(e) = conn.close().await {
            warn!("Failed to close database connection cleanly: {}", e);
        }
    }

    /// Create the responses table if it does not exist
    pub async fn setup_schema(&self) -> StorageResult<()> {
        let mut conn = self.acquire().await?;
        let result = sqlx::query(self.dialect.create_responses_table())
            .execute(&mut conn)
            .await;
        Self::release(conn).await;
        result?;
        Ok(())
    }
}
