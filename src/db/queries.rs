//! Database query implementations
//!
//! Contains functions for storing and reading review rows

use rusqlite::types::Value as SqlValue;
use rusqlite::{params, Connection};
use serde_json::Value;

use super::DbError;
use crate::models::review::{stringify_id, RawReviewRow};

/// Convert a loose JSON rating into the value stored in the untyped column
fn rating_to_sql(value: &Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        Value::Bool(b) => SqlValue::Integer(*b as i64),
        Value::Number(n) => n
            .as_i64()
            .map(SqlValue::Integer)
            .or_else(|| n.as_f64().map(SqlValue::Real))
            .unwrap_or(SqlValue::Null),
        Value::String(s) => SqlValue::Text(s.clone()),
        other => SqlValue::Text(other.to_string()),
    }
}

/// Convert a stored rating back to JSON, keeping its storage type
fn rating_from_sql(value: SqlValue) -> Value {
    match value {
        SqlValue::Null | SqlValue::Blob(_) => Value::Null,
        SqlValue::Integer(i) => Value::from(i),
        SqlValue::Real(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        SqlValue::Text(s) => Value::String(s),
    }
}

/// Primary key for a row; the same text the normalized record carries
fn id_to_sql(id: &Value) -> Result<String, DbError> {
    let id = stringify_id(id);
    if id.trim().is_empty() {
        return Err(DbError::MissingId);
    }
    Ok(id)
}

/// Insert or update a review for an account
///
/// Rows without an id are rejected with [`DbError::MissingId`].
pub fn upsert_review(conn: &Connection, user_id: &str, row: &RawReviewRow) -> Result<(), DbError> {
    let id = id_to_sql(&row.id)?;

    conn.execute(
        r#"
        INSERT INTO reviews (id, user_id, client_name, review_text, sentiment, rating, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
        ON CONFLICT(id) DO UPDATE SET
            user_id = excluded.user_id,
            client_name = excluded.client_name,
            review_text = excluded.review_text,
            sentiment = excluded.sentiment,
            rating = excluded.rating,
            created_at = excluded.created_at
        "#,
        params![
            id,
            user_id,
            row.client_name,
            row.review_text,
            row.sentiment.as_str(),
            rating_to_sql(&row.rating),
            row.created_at,
        ],
    )?;

    Ok(())
}

/// Get an account's reviews, newest first
pub fn get_reviews_for_user(conn: &Connection, user_id: &str) -> Result<Vec<RawReviewRow>, DbError> {
    let mut stmt = conn.prepare(
        r#"
        SELECT id, client_name, review_text, sentiment, rating, user_id, created_at
        FROM reviews
        WHERE user_id = ?1
        ORDER BY created_at DESC
        "#,
    )?;

    let reviews = stmt
        .query_map(params![user_id], |row| {
            let sentiment: Option<String> = row.get(3)?;
            Ok(RawReviewRow {
                id: Value::String(row.get(0)?),
                client_name: row.get(1)?,
                review_text: row.get(2)?,
                sentiment: sentiment.map(Value::String).unwrap_or(Value::Null),
                rating: rating_from_sql(row.get(4)?),
                user_id: row.get(5)?,
                created_at: row.get(6)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!("Loaded {} reviews for user {}", reviews.len(), user_id);

    Ok(reviews)
}

/// Count an account's reviews
pub fn count_reviews_for_user(conn: &Connection, user_id: &str) -> Result<u32, DbError> {
    let count: u32 = conn.query_row(
        "SELECT COUNT(*) FROM reviews WHERE user_id = ?1",
        params![user_id],
        |row| row.get(0),
    )?;
    Ok(count)
}
