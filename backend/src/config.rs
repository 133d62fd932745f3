//! Server configuration.

use std::env;
use std::path::PathBuf;

use anyhow::Context;

use crate::domain::EmailConfig;

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Relational connection string (`POSTGRES_URL`, else `DATABASE_URL`).
    pub database_url: Option<String>,
    /// Fixed admin token; when unset a token file in `data_dir` is used.
    pub admin_token: Option<String>,
    /// Directory for the CSV fallback and the admin token file.
    pub data_dir: PathBuf,
    /// SMTP settings; confirmation email is disabled when None.
    pub email: Option<EmailConfig>,
    /// Log level used when `RUST_LOG` is not set.
    pub log_level: String,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration through `lookup`, which returns the value of a
    /// variable if it is set.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let port = match non_empty("SURVEY_PORT") {
            Some(port) => port
                .trim()
                .parse()
                .with_context(|| format!("SURVEY_PORT is not a valid port: {}", port))?,
            None => 5000,
        };

        let email = match (non_empty("SMTP_HOST"), non_empty("SMTP_USER"), non_empty("SMTP_PASSWORD")) {
            (Some(smtp_server), Some(username), Some(password)) => {
                let smtp_port = match non_empty("SMTP_PORT") {
                    Some(value) => value
                        .trim()
                        .parse()
                        .with_context(|| format!("SMTP_PORT is not a valid port: {}", value))?,
                    None => 587,
                };
                let from_email = non_empty("SMTP_FROM").unwrap_or_else(|| username.clone());
                Some(EmailConfig {
                    smtp_server,
                    smtp_port,
                    username,
                    password,
                    from_email,
                })
            }
            _ => None,
        };

        Ok(Self {
            host: non_empty("SURVEY_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            database_url: non_empty("POSTGRES_URL").or_else(|| non_empty("DATABASE_URL")),
            admin_token: non_empty("ADMIN_TOKEN"),
            data_dir: non_empty("SURVEY_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("data")),
            email,
            log_level: non_empty("SURVEY_LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        })
    }

    /// Returns the server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
