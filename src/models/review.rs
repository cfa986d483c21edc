//! Review data types
//!
//! Storage-shaped rows as they come back from the review table, and the
//! normalized records the analytics run over.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::metrics::rating::coerce_rating;
use crate::metrics::sentiment::{normalize_sentiment, UnknownRatingPolicy};

/// Canonical sentiment label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
    /// Only produced when unknown ratings are configured to stay distinct
    Unknown,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
            Sentiment::Unknown => "unknown",
        }
    }

    /// Parse one of the three stored labels, ignoring case and surrounding whitespace.
    ///
    /// `unknown` is never accepted from storage; it is a derived label only.
    pub fn parse_label(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "positive" => Some(Sentiment::Positive),
            "neutral" => Some(Sentiment::Neutral),
            "negative" => Some(Sentiment::Negative),
            _ => None,
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A review row as selected from the `reviews` table
///
/// `id`, `rating` and `sentiment` are left as loose JSON values because the
/// hosted backend and older rows disagree on their types.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawReviewRow {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub review_text: Option<String>,
    #[serde(default)]
    pub sentiment: Value,
    #[serde(default)]
    pub rating: Value,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// A normalized review, ready for aggregation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRecord {
    pub id: String,
    pub client_name: String,
    pub text: String,
    /// Finite, within `0..=5`; `0` means unknown
    pub rating: f64,
    pub sentiment: Sentiment,
    /// Raw timestamp; parsed against the caller's time zone when bucketing
    pub created_at: Option<String>,
}

impl ReviewRecord {
    /// Normalize a storage row. Never fails.
    pub fn from_row(row: &RawReviewRow, policy: UnknownRatingPolicy) -> Self {
        let rating = coerce_rating(&row.rating);
        let sentiment = normalize_sentiment(&row.sentiment, rating, policy);

        Self {
            id: stringify_id(&row.id),
            client_name: row.client_name.clone().unwrap_or_default(),
            text: row.review_text.clone().unwrap_or_default(),
            rating,
            sentiment,
            created_at: row
                .created_at
                .as_ref()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        }
    }
}

/// Normalize a batch of rows, preserving their order
pub fn normalize_rows(rows: &[RawReviewRow], policy: UnknownRatingPolicy) -> Vec<ReviewRecord> {
    rows.iter().map(|row| ReviewRecord::from_row(row, policy)).collect()
}

/// Text form of a loose id; `null` becomes the empty string
pub(crate) fn stringify_id(id: &Value) -> String {
    match id {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
