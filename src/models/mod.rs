//! Data models module
//!
//! Contains the review data structures shared across the crate:
//! - Storage rows as selected from the review table
//! - Normalized review records
//! - Sentiment labels

pub mod review;
