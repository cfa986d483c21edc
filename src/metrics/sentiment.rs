//! Sentiment normalization and breakdown
//!
//! Stored sentiment tags win when they are one of the canonical labels;
//! otherwise the label is derived from the rating.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::rating::{NEGATIVE_THRESHOLD, POSITIVE_THRESHOLD};
use crate::models::review::{ReviewRecord, Sentiment};

/// How a derived sentiment treats an unknown (`0`) rating
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownRatingPolicy {
    /// `0` falls under the `<= 2` rule and reads as negative
    #[default]
    Negative,
    /// `0` yields [`Sentiment::Unknown`]
    Unknown,
}

/// Derive a sentiment from a rating alone
pub fn sentiment_from_rating(rating: f64) -> Sentiment {
    if rating >= POSITIVE_THRESHOLD {
        Sentiment::Positive
    } else if rating <= NEGATIVE_THRESHOLD {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}

/// Map a stored sentiment value to a label, falling back to the rating
pub fn normalize_sentiment(stored: &Value, rating: f64, policy: UnknownRatingPolicy) -> Sentiment {
    if let Some(label) = stored.as_str().and_then(Sentiment::parse_label) {
        return label;
    }

    if rating == 0.0 && policy == UnknownRatingPolicy::Unknown {
        return Sentiment::Unknown;
    }

    sentiment_from_rating(rating)
}

/// Review counts and shares per sentiment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentBreakdown {
    pub positive: u32,
    pub neutral: u32,
    pub negative: u32,
    pub unknown: u32,
    /// Whole-number percentages, each rounded independently
    pub positive_percentage: Option<u32>,
    pub neutral_percentage: Option<u32>,
    pub negative_percentage: Option<u32>,
    pub unknown_percentage: Option<u32>,
}

impl SentimentBreakdown {
    pub fn from_records(records: &[ReviewRecord]) -> Self {
        let mut breakdown = Self::default();

        for record in records {
            match record.sentiment {
                Sentiment::Positive => breakdown.positive += 1,
                Sentiment::Neutral => breakdown.neutral += 1,
                Sentiment::Negative => breakdown.negative += 1,
                Sentiment::Unknown => breakdown.unknown += 1,
            }
        }

        let total = records.len() as u32;
        breakdown.positive_percentage = rounded_share(breakdown.positive, total);
        breakdown.neutral_percentage = rounded_share(breakdown.neutral, total);
        breakdown.negative_percentage = rounded_share(breakdown.negative, total);
        breakdown.unknown_percentage = rounded_share(breakdown.unknown, total);

        breakdown
    }

    pub fn total(&self) -> u32 {
        self.positive + self.neutral + self.negative + self.unknown
    }
}

fn rounded_share(count: u32, total: u32) -> Option<u32> {
    if total == 0 {
        return None;
    }
    Some((count as f64 / total as f64 * 100.0).round() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(sentiment: Sentiment) -> ReviewRecord {
        ReviewRecord {
            id: "r".to_string(),
            client_name: String::new(),
            text: String::new(),
            rating: 0.0,
            sentiment,
            created_at: None,
        }
    }

    #[test]
    fn test_sentiment_from_rating() {
        assert_eq!(sentiment_from_rating(5.0), Sentiment::Positive);
        assert_eq!(sentiment_from_rating(4.0), Sentiment::Positive);
        assert_eq!(sentiment_from_rating(3.0), Sentiment::Neutral);
        assert_eq!(sentiment_from_rating(3.9), Sentiment::Neutral);
        assert_eq!(sentiment_from_rating(2.0), Sentiment::Negative);
        assert_eq!(sentiment_from_rating(1.0), Sentiment::Negative);
    }

    #[test]
    fn test_unknown_rating_reads_negative_by_default() {
        let label = normalize_sentiment(&Value::Null, 0.0, UnknownRatingPolicy::Negative);
        assert_eq!(label, Sentiment::Negative);
    }

    #[test]
    fn test_unknown_rating_policy() {
        let label = normalize_sentiment(&Value::Null, 0.0, UnknownRatingPolicy::Unknown);
        assert_eq!(label, Sentiment::Unknown);

        // Only the unknown rating is affected
        let label = normalize_sentiment(&Value::Null, 1.0, UnknownRatingPolicy::Unknown);
        assert_eq!(label, Sentiment::Negative);

        // A stored label still wins
        let label = normalize_sentiment(&json!("neutral"), 0.0, UnknownRatingPolicy::Unknown);
        assert_eq!(label, Sentiment::Neutral);
    }

    #[test]
    fn test_stored_label_normalization() {
        assert_eq!(
            normalize_sentiment(&json!("  POSITIVE\n"), 1.0, UnknownRatingPolicy::Negative),
            Sentiment::Positive
        );
        assert_eq!(
            normalize_sentiment(&json!("negative"), 5.0, UnknownRatingPolicy::Negative),
            Sentiment::Negative
        );
    }

    #[test]
    fn test_unrecognized_label_falls_back() {
        assert_eq!(
            normalize_sentiment(&json!("mixed"), 3.0, UnknownRatingPolicy::Negative),
            Sentiment::Neutral
        );
        assert_eq!(
            normalize_sentiment(&json!(1), 5.0, UnknownRatingPolicy::Negative),
            Sentiment::Positive
        );
        assert_eq!(
            normalize_sentiment(&json!(true), 2.0, UnknownRatingPolicy::Negative),
            Sentiment::Negative
        );
    }

    #[test]
    fn test_breakdown_counts_and_rounding() {
        let records = vec![
            record(Sentiment::Positive),
            record(Sentiment::Positive),
            record(Sentiment::Neutral),
        ];

        let breakdown = SentimentBreakdown::from_records(&records);
        assert_eq!(breakdown.positive, 2);
        assert_eq!(breakdown.neutral, 1);
        assert_eq!(breakdown.negative, 0);
        assert_eq!(breakdown.total(), 3);
        // 66.67 -> 67, 33.33 -> 33
        assert_eq!(breakdown.positive_percentage, Some(67));
        assert_eq!(breakdown.neutral_percentage, Some(33));
        assert_eq!(breakdown.negative_percentage, Some(0));
    }

    #[test]
    fn test_breakdown_half_rounds_up() {
        let records = vec![record(Sentiment::Positive), record(Sentiment::Unknown)];
        let breakdown = SentimentBreakdown::from_records(&records);
        assert_eq!(breakdown.positive_percentage, Some(50));
        assert_eq!(breakdown.unknown_percentage, Some(50));

        let records: Vec<ReviewRecord> = (0..8)
            .map(|i| record(if i == 0 { Sentiment::Negative } else { Sentiment::Positive }))
            .collect();
        let breakdown = SentimentBreakdown::from_records(&records);
        // 12.5 -> 13
        assert_eq!(breakdown.negative_percentage, Some(13));
    }

    #[test]
    fn test_breakdown_empty() {
        let breakdown = SentimentBreakdown::from_records(&[]);
        assert_eq!(breakdown.total(), 0);
        assert_eq!(breakdown.positive_percentage, None);
        assert_eq!(breakdown.unknown_percentage, None);
    }
}
