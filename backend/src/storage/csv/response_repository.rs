use std::fs::{self, OpenOptions};
use std::io::BufWriter;

use async_trait::async_trait;
use csv::ReaderBuilder;
use tracing::{debug, info};

use super::connection::CsvConnection;
use super::{writer_builder, UTF8_BOM};
use crate::domain::models::response::{SurveyField, SurveyResponse};
use crate::storage::traits::{ResponseStorage, StorageError, StorageKind, StorageResult};

/// CSV-based response repository
#[derive(Clone)]
pub struct CsvResponseRepository {
    connection: CsvConnection,
}

impl CsvResponseRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    /// Parse the whole responses file. The header row decides which column
    /// holds which field, so a reordered header still reads correctly.
    fn read_responses(&self) -> StorageResult<Vec<SurveyResponse>> {
        self.connection.ensure_responses_file_exists()?;

        let content = fs::read_to_string(self.connection.responses_file_path())?;
        let content = content.strip_prefix(UTF8_BOM).unwrap_or(&content);

        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(content.as_bytes());

        let headers = csv_reader.headers()?.clone();
        let mut columns = [0usize; 7];
        for (slot, field) in columns.iter_mut().zip(SurveyField::ALL) {
            *slot = headers
                .iter()
                .position(|header| header == field.label())
                .ok_or_else(|| StorageError::InvalidHeader(field.label().to_string()))?;
        }

        let mut responses = Vec::new();
        for result in csv_reader.records() {
            let record = result?;
            let values = columns.map(|index| record.get(index).unwrap_or("").to_string());
            responses.push(SurveyResponse::from_values(values));
        }

        Ok(responses)
    }

    fn append_response(&self, response: &SurveyResponse) -> StorageResult<()> {
        self.connection.ensure_responses_file_exists()?;

        let file = OpenOptions::new()
            .append(true)
            .open(self.connection.responses_file_path())?;

        let mut csv_writer = writer_builder().from_writer(BufWriter::new(file));
        csv_writer.write_record(response.values())?;
        csv_writer.flush()?;
        Ok(())
    }
}

#[async_trait]
impl ResponseStorage for CsvResponseRepository {
    fn kind(&self) -> StorageKind {
        StorageKind::Csv
    }

    async fn initialize(&self) -> StorageResult<()> {
        let _guard = self.connection.lock().await;
        self.connection.ensure_responses_file_exists()
    }

    async fn store_response(&self, response: &SurveyResponse) -> StorageResult<()> {
        let _guard = self.connection.lock().await;
        self.append_response(response)?;
        info!("Stored response from '{}' in CSV", response.name);
        Ok(())
    }

    async fn list_responses(&self) -> StorageResult<Vec<SurveyResponse>> {
        let _guard = self.connection.lock().await;
        let responses = self.read_responses()?;
        debug!("Read {} responses from CSV", responses.len());
        Ok(responses)
    }
}
