//! Review metrics
//!
//! Provides the per-review and aggregate calculations behind the dashboard:
//! - Rating coercion and display helpers
//! - Sentiment normalization and breakdown
//! - Summary statistics

pub mod rating;
pub mod sentiment;
pub mod summary;

pub use rating::{coerce_rating, rating_label, star_count};
pub use sentiment::{normalize_sentiment, sentiment_from_rating, SentimentBreakdown, UnknownRatingPolicy};
pub use summary::{build_summary, AnalyticsSummary};
