#![doc = "HTTP review client: the concrete Reviewer used by the CLI to talk to the remote review endpoint."]
//
//! # Review client (CLI <-> Core)
//!
//! Bridges the [`Reviewer`] trait from `crev-core` to the hosted review service.
//!
//! - POSTs `{"code": ...}` as JSON with the API key in an `api-key` header.
//! - `200` decodes `{"review": ...}`; `401` is an invalid key; anything else is
//!   reported with its status code and body.
//! - The endpoint can be pointed elsewhere with `CREV_REVIEW_URL`.
//! - One request per review, never retried.

use async_trait::async_trait;
use crev_core::contract::{ReviewError, ReviewRequest, ReviewResponse, Reviewer};
use reqwest::StatusCode;

/// Hosted review endpoint.
pub const REVIEW_URL: &str = "https://reviewcode-qcgl4feadq-uc.a.run.app";

/// Environment variable overriding [`REVIEW_URL`].
pub const REVIEW_URL_ENV: &str = "CREV_REVIEW_URL";

pub struct ReviewClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl ReviewClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_key, REVIEW_URL)
    }

    /// Client for the default endpoint unless `CREV_REVIEW_URL` is set.
    pub fn from_env(api_key: impl Into<String>) -> Self {
        match std::env::var(REVIEW_URL_ENV) {
            Ok(endpoint) if !endpoint.trim().is_empty() => {
                tracing::info!(endpoint = %endpoint, "Using review endpoint from environment");
                Self::with_client(reqwest::Client::new(), api_key, endpoint.trim())
            }
            _ => Self::new(api_key),
        }
    }

    pub fn with_client(
        http: reqwest::Client,
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
    ) -> Self {
        let api_key = api_key.into();
        let endpoint = endpoint.into();
        tracing::info!(
            api_key_set = !api_key.is_empty(),
            endpoint = %endpoint,
            "Initialized ReviewClient"
        );
        Self {
            http,
            endpoint,
            api_key,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Reviewer for ReviewClient {
    async fn review(&self, request: ReviewRequest) -> Result<ReviewResponse, ReviewError> {
        tracing::info!(
            endpoint = %self.endpoint,
            bytes = request.code.len(),
            "Sending review request"
        );

        let response = self
            .http
            .post(&self.endpoint)
            .header("api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = ?e, endpoint = %self.endpoint, "Failed to send review request");
                ReviewError::Transport(format!("{}: {e}", self.endpoint))
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            tracing::error!(error = ?e, "Failed to read review response body");
            ReviewError::Transport(e.to_string())
        })?;

        match status {
            StatusCode::OK => serde_json::from_str::<ReviewResponse>(&body).map_err(|e| {
                tracing::error!(error = ?e, "Failed to decode review response");
                ReviewError::Decode(e.to_string())
            }),
            StatusCode::UNAUTHORIZED => {
                tracing::error!(status = status.as_u16(), "Review request unauthorized");
                Err(ReviewError::Unauthorized)
            }
            other => {
                tracing::error!(status = other.as_u16(), body = %body, "Review request failed");
                Err(ReviewError::Status {
                    status: other.as_u16(),
                    body,
                })
            }
        }
    }
}
