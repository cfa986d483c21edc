//! Analytics configuration
//!
//! Every field has a default, so an empty JSON object is a valid config.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::metrics::sentiment::UnknownRatingPolicy;
use crate::trends::{is_valid_label_format, DEFAULT_LABEL_FORMAT, DEFAULT_WINDOW_DAYS};

/// Longest trend window accepted
pub const MAX_WINDOW_DAYS: u32 = 366;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Options controlling the dashboard computation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Number of days in the trend series, ending today
    pub window_days: u32,
    /// strftime format used for trend labels
    pub label_format: String,
    /// Compute `reviewsThisMonth`
    pub include_reviews_this_month: bool,
    /// Sentiment derived for reviews with an unknown rating
    pub unknown_rating: UnknownRatingPolicy,
    /// Show placeholder counts when the account has no reviews
    pub demo_trend_when_empty: bool,
    /// Trailing periods, in days, for review count comparisons
    pub comparison_periods: Vec<u32>,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            window_days: DEFAULT_WINDOW_DAYS,
            label_format: DEFAULT_LABEL_FORMAT.to_string(),
            include_reviews_this_month: true,
            unknown_rating: UnknownRatingPolicy::default(),
            demo_trend_when_empty: false,
            comparison_periods: vec![1, 7, 30],
        }
    }
}

impl AnalyticsConfig {
    /// Parse and validate a JSON config
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&content)?;
        tracing::info!("Loaded analytics config from {:?}", path);
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_days == 0 || self.window_days > MAX_WINDOW_DAYS {
            return Err(ConfigError::Invalid {
                field: "window_days",
                reason: format!("must be between 1 and {}, got {}", MAX_WINDOW_DAYS, self.window_days),
            });
        }

        if !is_valid_label_format(&self.label_format) {
            return Err(ConfigError::Invalid {
                field: "label_format",
                reason: format!("not a valid strftime format: {:?}", self.label_format),
            });
        }

        if let Some(bad) = self.comparison_periods.iter().find(|&&p| p == 0 || p > MAX_WINDOW_DAYS) {
            return Err(ConfigError::Invalid {
                field: "comparison_periods",
                reason: format!("periods must be between 1 and {}, got {}", MAX_WINDOW_DAYS, bad),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AnalyticsConfig::default();
        assert_eq!(config.window_days, 7);
        assert_eq!(config.label_format, "%d %b");
        assert!(config.include_reviews_this_month);
        assert_eq!(config.unknown_rating, UnknownRatingPolicy::Negative);
        assert!(!config.demo_trend_when_empty);
        assert_eq!(config.comparison_periods, vec![1, 7, 30]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_json_is_default() {
        let config = AnalyticsConfig::from_json_str("{}").unwrap();
        assert_eq!(config, AnalyticsConfig::default());
    }

    #[test]
    fn test_partial_json() {
        let config = AnalyticsConfig::from_json_str(
            r#"{"window_days": 14, "unknown_rating": "unknown", "include_reviews_this_month": false}"#,
        )
        .unwrap();

        assert_eq!(config.window_days, 14);
        assert_eq!(config.unknown_rating, UnknownRatingPolicy::Unknown);
        assert!(!config.include_reviews_this_month);
        assert_eq!(config.label_format, "%d %b");
    }

    #[test]
    fn test_invalid_window() {
        let err = AnalyticsConfig::from_json_str(r#"{"window_days": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "window_days", .. }));

        let err = AnalyticsConfig::from_json_str(r#"{"window_days": 400}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "window_days", .. }));
    }

    #[test]
    fn test_invalid_label_format() {
        let err = AnalyticsConfig::from_json_str(r#"{"label_format": "%Q"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "label_format", .. }));
    }

    #[test]
    fn test_invalid_comparison_period() {
        let err = AnalyticsConfig::from_json_str(r#"{"comparison_periods": [7, 0]}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "comparison_periods", .. }));
    }

    #[test]
    fn test_unknown_policy_value_rejected() {
        let err = AnalyticsConfig::from_json_str(r#"{"unknown_rating": "maybe"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_from_path() {
        let path = std::env::temp_dir().join("review_dashboard_test_config.json");
        std::fs::write(&path, r#"{"window_days": 30, "label_format": "%d/%m"}"#).unwrap();

        let config = AnalyticsConfig::from_path(&path).unwrap();
        assert_eq!(config.window_days, 30);
        assert_eq!(config.label_format, "%d/%m");

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_file() {
        let path = std::env::temp_dir().join("review_dashboard_no_such_config.json");
        let err = AnalyticsConfig::from_path(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
