//! Admin access token persistence.
//!
//! A token supplied through configuration always wins so it stays stable
//! across restarts of stateless deployments. Otherwise the token is kept in
//! `admin_token.txt` in the data directory and generated on first use.

use std::fs;
use std::path::{Path, PathBuf};

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::Rng;
use tracing::info;

use crate::storage::traits::StorageResult;

const TOKEN_FILE_NAME: &str = "admin_token.txt";
const TOKEN_BYTES: usize = 32;

#[derive(Debug, Clone)]
pub struct TokenStore {
    configured_token: Option<String>,
    token_file: PathBuf,
}

impl TokenStore {
    pub fn new<P: AsRef<Path>>(configured_token: Option<String>, data_directory: P) -> Self {
        let configured_token = configured_token
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty());

        Self {
            configured_token,
            token_file: data_directory.as_ref().join(TOKEN_FILE_NAME),
        }
    }

    pub fn token_file(&self) -> &Path {
        &self.token_file
    }

    /// Return the admin token, creating and persisting one if none exists yet
    pub fn get_or_create_token(&self) -> StorageResult<String> {
        if let Some(token) = &self.configured_token {
            return Ok(token.clone());
        }

        if self.token_file.exists() {
            let token = fs::read_to_string(&self.token_file)?.trim().to_string();
            if !token.is_empty() {
                return Ok(token);
            }
        }

        if let Some(parent) = self.token_file.parent() {
            fs::create_dir_all(parent)?;
        }

        let token = generate_token();
        fs::write(&self.token_file, &token)?;
        info!("Generated new admin token at {}", self.token_file.display());
        Ok(token)
    }

    /// Whether `candidate` is exactly the admin token. Callers that accept
    /// typed input trim it first. Empty candidates never match.
    pub fn verify(&self, candidate: &str) -> StorageResult<bool> {
        if candidate.is_empty() {
            return Ok(false);
        }
        Ok(self.get_or_create_token()? == candidate)
    }
}

/// Cryptographically random URL-safe token
fn generate_token() -> String {
    let mut rng = rand::rng();
    let bytes: Vec<u8> = (0..TOKEN_BYTES).map(|_| rng.random::<u8>()).collect();
    URL_SAFE_NO_PAD.encode(&bytes)
}
