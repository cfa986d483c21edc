//! Display-ready review data
//!
//! Per-review fields the dashboard cards need, computed once here so the
//! presentation layer does no arithmetic of its own.

pub mod initials;
pub mod relative;

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::metrics::rating::{rating_label, star_count};
use crate::metrics::sentiment::sentiment_from_rating;
use crate::models::review::{ReviewRecord, Sentiment};

pub use initials::initials;
pub use relative::relative_time;

/// One review card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewView {
    pub id: String,
    pub client_name: String,
    pub initials: String,
    pub text: String,
    /// Stored or derived sentiment label
    pub sentiment: Sentiment,
    pub rating: f64,
    /// Filled stars, `0..=5`
    pub stars: u8,
    pub rating_label: String,
    /// Color tone for the badge and avatar; follows the rating only
    pub tone: Sentiment,
    /// Age of the review relative to the computation's "now"
    pub timestamp: String,
    pub created_at: Option<String>,
}

impl ReviewView {
    pub fn new<Tz: TimeZone>(record: &ReviewRecord, now: &DateTime<Tz>) -> Self {
        Self {
            id: record.id.clone(),
            client_name: record.client_name.clone(),
            initials: initials(&record.client_name),
            text: record.text.clone(),
            sentiment: record.sentiment,
            rating: record.rating,
            stars: star_count(record.rating),
            rating_label: rating_label(record.rating),
            tone: sentiment_from_rating(record.rating),
            timestamp: relative_time(record.created_at.as_deref(), now),
            created_at: record.created_at.clone(),
        }
    }
}
