//! Client Configuration
//!
//! Connection settings for the remote platform plus the local data
//! directory. Persisted as a small JSON file; the access token is
//! whatever the embedding app obtained at sign-in, storage policy for
//! it is the app's concern.

use crate::domain::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the platform REST API
    pub base_url: String,
    /// Bearer token for the signed-in user, if any
    #[serde(default)]
    pub access_token: Option<String>,
    /// Directory holding snapshot files
    pub data_dir: PathBuf,
    /// Request timeout for remote calls
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api".to_string(),
            access_token: None,
            data_dir: PathBuf::from("kopets_data"),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ClientConfig {
    /// Read a saved configuration, or None when missing or unparseable
    pub fn load(path: &Path) -> Option<Self> {
        let raw = std::fs::read_to_string(path).ok()?;
        serde_json::from_str(&raw).ok()
    }

    /// Persist the configuration as JSON
    pub fn save(&self, path: &Path) -> DomainResult<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        std::fs::write(path, json).map_err(|e| DomainError::Internal(e.to_string()))
    }

    /// Same configuration with a fresh token (e.g. after re-login)
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }
}
