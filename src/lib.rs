//! Review Dashboard - analytics backend
//!
//! This library provides the Rust backend for the customer review dashboard.
//! It handles:
//! - Normalizing stored review rows (rating coercion, sentiment labels)
//! - Summary statistics and daily trend computation
//! - SQLite review storage
//! - Fetching reviews from the hosted backend
//! - CSV and JSON export

pub mod analytics;
pub mod config;
pub mod db;
pub mod display;
pub mod export;
pub mod metrics;
pub mod models;
pub mod source;
pub mod trends;

use tracing_subscriber::EnvFilter;

pub use analytics::{Dashboard, ReviewAnalytics};
pub use config::AnalyticsConfig;
pub use models::review::{RawReviewRow, ReviewRecord, Sentiment};

/// Error type for dashboard operations
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] db::DbError),

    #[error("Source error: {0}")]
    Source(#[from] source::SourceError),

    #[error("Export error: {0}")]
    Export(#[from] export::ExportError),

    #[error("Failed to serialize dashboard: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("No account selected: pass --account or set REVIEW_DASHBOARD_ACCOUNT")]
    MissingAccount,
}

/// Install the global log subscriber, writing to stderr
///
/// Honors `RUST_LOG`; defaults to `info`.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = DashboardError::from(db::DbError::LockPoisoned);
        assert_eq!(err.to_string(), "Database error: Lock poisoned");

        let err = DashboardError::from(source::SourceError::NotAuthenticated);
        assert_eq!(err.to_string(), "Source error: Not authenticated");

        let err = DashboardError::MissingAccount;
        assert!(err.to_string().contains("REVIEW_DASHBOARD_ACCOUNT"));
    }
}
