//! Remote review source
//!
//! Reads reviews from the hosted backend's REST API: resolves the signed-in
//! shop owner from an access token, then selects that owner's reviews.

pub mod rest;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use rest::RestClient;

/// Environment variable holding the backend base URL
pub const URL_VAR: &str = "SUPABASE_URL";

/// Environment variable holding the public (anon) API key
pub const ANON_KEY_VAR: &str = "SUPABASE_ANON_KEY";

/// Remote source errors
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Missing backend configuration: {0} is not set")]
    MissingConfig(&'static str),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Not authenticated")]
    NotAuthenticated,
}

/// Connection settings for the hosted backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL, without trailing slash
    pub url: String,
    pub anon_key: String,
}

impl BackendConfig {
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        let url: String = url.into();
        Self {
            url: url.trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
        }
    }

    /// Read the settings from the process environment
    pub fn from_env() -> Result<Self, SourceError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the settings through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SourceError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &'static str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or(SourceError::MissingConfig(key))
        };

        let url = non_empty(URL_VAR)?;
        let anon_key = non_empty(ANON_KEY_VAR)?;
        Ok(Self::new(url, anon_key))
    }
}

/// The signed-in account as reported by the auth endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}
