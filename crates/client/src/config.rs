//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `MEDIPOS_API_URL` - Backend base URL (default: `http://127.0.0.1:8000`)
//! - `MEDIPOS_SESSION_FILE` - Session credential file (default:
//!   `.medipos/session.json`)
//! - `MEDIPOS_STORE_NAME` - Store name printed on invoices (default:
//!   `ProtonCode Medical Store`)
//! - `MEDIPOS_INVOICE_DIR` - Directory invoice files are written to
//!   (default: current directory)

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_SESSION_FILE: &str = ".medipos/session.json";
const DEFAULT_STORE_NAME: &str = "ProtonCode Medical Store";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Client application configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL
    pub api_url: Url,
    /// Path of the session credential file
    pub session_file: PathBuf,
    /// Store name printed on invoice letterheads
    pub store_name: String,
    /// Directory invoice artifacts are written to
    pub invoice_dir: PathBuf,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `MEDIPOS_API_URL` is not a valid URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_url = get_env_or_default("MEDIPOS_API_URL", DEFAULT_API_URL)
            .parse::<Url>()
            .map_err(|e| ConfigError::InvalidEnvVar("MEDIPOS_API_URL".to_owned(), e.to_string()))?;
        let session_file =
            PathBuf::from(get_env_or_default("MEDIPOS_SESSION_FILE", DEFAULT_SESSION_FILE));
        let store_name = get_env_or_default("MEDIPOS_STORE_NAME", DEFAULT_STORE_NAME);
        let invoice_dir = PathBuf::from(get_env_or_default("MEDIPOS_INVOICE_DIR", "."));

        Ok(Self {
            api_url,
            session_file,
            store_name,
            invoice_dir,
        })
    }
}

fn get_env_or_default(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_owned())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply_when_unset() {
        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config.api_url.as_str(), "http://127.0.0.1:8000/");
        assert_eq!(config.store_name, DEFAULT_STORE_NAME);
        assert_eq!(config.session_file, PathBuf::from(DEFAULT_SESSION_FILE));
    }

    #[test]
    fn test_get_env_or_default_falls_back() {
        assert_eq!(
            get_env_or_default("MEDIPOS_DOES_NOT_EXIST", "fallback"),
            "fallback"
        );
    }
}
