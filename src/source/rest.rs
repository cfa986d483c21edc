//! REST client for the hosted backend

use std::time::Duration;

use reqwest::{RequestBuilder, Response, StatusCode};

use super::{AuthUser, BackendConfig, SourceError};
use crate::models::review::RawReviewRow;

/// Columns selected from the `reviews` table
pub const REVIEW_COLUMNS: &str = "id,client_name,review_text,sentiment,rating,user_id,created_at";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Client for the auth and review endpoints
pub struct RestClient {
    http: reqwest::Client,
    config: BackendConfig,
}

impl RestClient {
    pub fn new(config: BackendConfig) -> Result<Self, SourceError> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// URL of the endpoint describing the signed-in user
    pub fn user_url(&self) -> String {
        format!("{}/auth/v1/user", self.config.url)
    }

    /// URL selecting one account's reviews, newest first
    pub fn reviews_url(&self, user_id: &str) -> String {
        format!(
            "{}/rest/v1/reviews?select={}&user_id=eq.{}&order=created_at.desc",
            self.config.url,
            REVIEW_COLUMNS,
            urlencoding::encode(user_id)
        )
    }

    fn authorized(&self, request: RequestBuilder, access_token: &str) -> RequestBuilder {
        request
            .header("apikey", &self.config.anon_key)
            .bearer_auth(access_token)
    }

    /// Resolve the account behind an access token
    pub async fn current_user(&self, access_token: &str) -> Result<AuthUser, SourceError> {
        if access_token.trim().is_empty() {
            return Err(SourceError::NotAuthenticated);
        }

        let response = self
            .authorized(self.http.get(self.user_url()), access_token)
            .send()
            .await?;

        let user: AuthUser = check_status(response).await?.json().await?;
        tracing::debug!("Authenticated as user {}", user.id);
        Ok(user)
    }

    /// Fetch an account's reviews, newest first
    pub async fn fetch_reviews(&self, user_id: &str, access_token: &str) -> Result<Vec<RawReviewRow>, SourceError> {
        if access_token.trim().is_empty() {
            return Err(SourceError::NotAuthenticated);
        }

        let response = self
            .authorized(self.http.get(self.reviews_url(user_id)), access_token)
            .send()
            .await?;

        let rows: Vec<RawReviewRow> = check_status(response).await?.json().await?;
        tracing::info!("Fetched {} reviews for user {}", rows.len(), user_id);
        Ok(rows)
    }
}

/// Map auth failures and other non-success statuses to errors
async fn check_status(response: Response) -> Result<Response, SourceError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(SourceError::NotAuthenticated);
    }

    let body = response.text().await.unwrap_or_default();
    tracing::warn!("Backend request failed with {}: {}", status, body);
    Err(SourceError::Status {
        status: status.as_u16(),
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> RestClient {
        RestClient::new(BackendConfig::new("https://project.supabase.co/", "anon-key")).unwrap()
    }

    #[test]
    fn test_user_url() {
        assert_eq!(client().user_url(), "https://project.supabase.co/auth/v1/user");
    }

    #[test]
    fn test_reviews_url() {
        let url = client().reviews_url("5f0c-11aa");
        assert_eq!(
            url,
            "https://project.supabase.co/rest/v1/reviews?select=id,client_name,review_text,sentiment,rating,user_id,created_at&user_id=eq.5f0c-11aa&order=created_at.desc"
        );
    }

    #[test]
    fn test_reviews_url_encodes_user_id() {
        let url = client().reviews_url("a&b c");
        assert!(url.contains("user_id=eq.a%26b%20c&"));
    }

    #[tokio::test]
    async fn test_empty_token_is_not_authenticated() {
        let client = client();

        let err = client.current_user("").await.unwrap_err();
        assert!(matches!(err, SourceError::NotAuthenticated));

        let err = client.fetch_reviews("user", "   ").await.unwrap_err();
        assert!(matches!(err, SourceError::NotAuthenticated));
    }
}
