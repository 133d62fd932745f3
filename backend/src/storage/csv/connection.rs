use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::NamedTempFile;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{info, warn};

use super::{writer_builder, UTF8_BOM};
use crate::domain::models::response::SurveyField;
use crate::storage::traits::StorageResult;

const RESPONSES_FILE_NAME: &str = "responses.csv";

/// CsvConnection manages the data directory and the responses file inside it
#[derive(Clone)]
pub struct CsvConnection {
    base_directory: PathBuf,
    /// Serializes file access within this process
    file_lock: Arc<Mutex<()>>,
}

impl CsvConnection {
    /// Create a connection rooted at `base_directory`.
    ///
    /// Nothing is created on disk until the first read or write.
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Self {
        Self {
            base_directory: base_directory.as_ref().to_path_buf(),
            file_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    pub fn responses_file_path(&self) -> PathBuf {
        self.base_directory.join(RESPONSES_FILE_NAME)
    }

    /// Hold this guard for the duration of a read or append
    pub async fn lock(&self) -> MutexGuard<'_, ()> {
        self.file_lock.lock().await
    }

    /// Ensure the directory and the responses file exist, writing the BOM and
    /// header row when the file is new or empty.
    ///
    /// The header document is written to a temporary file in the data
    /// directory and moved into place, so a failed write never leaves a
    /// headerless `responses.csv` behind.
    pub fn ensure_responses_file_exists(&self) -> StorageResult<()> {
        fs::create_dir_all(&self.base_directory)?;

        let file_path = self.responses_file_path();
        let replace_empty = match fs::metadata(&file_path) {
            Ok(metadata) if metadata.len() > 0 => return Ok(()),
            Ok(_) => {
                warn!("Responses file {} is empty, restoring header", file_path.display());
                true
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => false,
            Err(e) => return Err(e.into()),
        };

        let mut temp_file = NamedTempFile::new_in(&self.base_directory)?;
        temp_file.write_all(&header_document()?)?;
        temp_file.as_file().sync_all()?;

        if replace_empty {
            temp_file.persist(&file_path).map_err(|e| e.error)?;
        } else {
            match temp_file.persist_noclobber(&file_path) {
                Ok(_) => {}
                // another writer got there first
                Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => return Ok(()),
                Err(e) => return Err(e.error.into()),
            }
        }

        info!("Created responses file at {}", file_path.display());
        Ok(())
    }
}

/// BOM followed by the canonical header row
fn header_document() -> StorageResult<Vec<u8>> {
    let mut buffer = UTF8_BOM.as_bytes().to_vec();
    let mut csv_writer = writer_builder().from_writer(&mut buffer);
    csv_writer.write_record(SurveyField::header_labels())?;
    csv_writer.flush()?;
    drop(csv_writer);
    Ok(buffer)
}
