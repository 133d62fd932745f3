use async_trait::async_trait;
use sqlx::Row;
use tracing::{debug, info};

use super::connection::SqlConnection;
use crate::domain::models::response::SurveyResponse;
use crate::storage::traits::{ResponseStorage, StorageKind, StorageResult};

/// SQL-based response repository over the `responses` table
#[derive(Clone)]
pub struct SqlResponseRepository {
    connection: SqlConnection,
}

impl SqlResponseRepository {
    pub fn new(connection: SqlConnection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl ResponseStorage for SqlResponseRepository {
    fn kind(&self) -> StorageKind {
        StorageKind::Sql
    }

    async fn initialize(&self) -> StorageResult<()> {
        self.connection.setup_schema().await?;
        info!("Responses table ready ({:?})", self.connection.dialect());
        Ok(())
    }

    async fn store_response(&self, response: &SurveyResponse) -> StorageResult<()> {
        let mut conn = self.connection.acquire().await?;
        let result = sqlx::query(
            r#"
            INSERT INTO responses (submitted_at, name, phone, email, company, position, comment)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(&response.submitted_at)
        .bind(&response.name)
        .bind(&response.phone)
        .bind(&response.email)
        .bind(&response.company)
        .bind(&response.position)
        .bind(&response.comment)
        .execute(&mut conn)
        .await;
        SqlConnection::release(conn).await;

        result?;
        info!("Stored response from '{}' in database", response.name);
        Ok(())
    }

    async fn list_responses(&self) -> StorageResult<Vec<SurveyResponse>> {
        let mut conn = self.connection.acquire().await?;
        let result = sqlx::query(
            r#"
            SELECT submitted_at, name, phone, email, company, position, comment
            FROM responses
            ORDER BY id
            "#,
        )
        .fetch_all(&mut conn)
        .await;
        SqlConnection::release(conn).await;

        let rows = result?;
        let mut responses = Vec::with_capacity(rows.len());
        for row in rows {
            responses.push(SurveyResponse {
                submitted_at: row.try_get("submitted_at")?,
                name: row.try_get("name")?,
                phone: row.try_get("phone")?,
                email: row.try_get("email")?,
                company: row.try_get("company")?,
                position: row.try_get("position")?,
                comment: row.try_get("comment")?,
            });
        }

        debug!("Read {} responses from database", responses.len());
        Ok(responses)
    }
}
