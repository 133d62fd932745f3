//! Test utilities for storage tests
//!
//! `TestEnvironment` owns a temporary directory that is removed when the
//! environment is dropped, even if the test panics.

use std::path::PathBuf;

use anyhow::Result;
use tempfile::TempDir;

use super::connection::CsvConnection;
use crate::domain::models::response::SurveyResponse;

pub struct TestEnvironment {
    /// Kept alive until drop so the directory is not removed early
    _temp_dir: TempDir,
    pub connection: CsvConnection,
    /// Data directory inside the temporary directory, not yet created
    pub base_path: PathBuf,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let base_path = temp_dir.path().join("data");
        let connection = CsvConnection::new(&base_path);

        Ok(TestEnvironment {
            _temp_dir: temp_dir,
            connection,
            base_path,
        })
    }

    /// SQLite URL for a database file inside this environment
    pub fn sqlite_url(&self) -> String {
        format!("sqlite://{}?mode=rwc", self._temp_dir.path().join("survey.db").display())
    }
}

/// A complete response with the given name and timestamp
pub fn sample_response(name: &str, submitted_at: &str) -> SurveyResponse {
    SurveyResponse {
        submitted_at: submitted_at.to_string(),
        name: name.to_string(),
        phone: "03-1234-5678".to_string(),
        email: "a@b.com".to_string(),
        company: "Acme".to_string(),
        position: "CEO".to_string(),
        comment: String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_cleanup() -> Result<()> {
        let root;
        {
            let env = TestEnvironment::new()?;
            root = env.base_path.parent().unwrap().to_path_buf();
            std::fs::create_dir_all(&env.base_path)?;
            std::fs::write(env.base_path.join("test_file.txt"), "test data")?;
            assert!(root.exists());
        }

        assert!(!root.exists());
        Ok(())
    }
}
