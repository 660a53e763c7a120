use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Client;

use crate::core::sync::{profile_query, ProfileClient, Provider, SyncError};

const GITHUB_GRAPHQL_URL: &str = "https://api.github.com/graphql";

/// Profile provider client backed by the GitHub GraphQL API.
pub struct GithubGraphqlClient {
    client: Client,
    endpoint: String,
}

impl GithubGraphqlClient {
    /// Build a client with the bearer token (when configured) and the
    /// User-Agent baked into every request.
    pub fn new(token: Option<&str>, timeout: Duration) -> Result<Self, SyncError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "User-Agent",
            HeaderValue::from_static(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            )),
        );
        if let Some(token) = token {
            headers.insert(
                "Authorization",
                HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|e| {
                    SyncError::Transport {
                        provider: Provider::Github,
                        message: format!("invalid Authorization header: {}", e),
                    }
                })?,
            );
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| SyncError::Transport {
                provider: Provider::Github,
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            endpoint: GITHUB_GRAPHQL_URL.to_string(),
        })
    }
}

#[async_trait]
impl ProfileClient for GithubGraphqlClient {
    async fn fetch_profile(&self, username: &str) -> Result<String, SyncError> {
        let body = profile_query(username);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::RequestFailed {
                provider: Provider::Github,
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(request_error)
    }
}

// reqwest folds timeouts into its one error type; surface them distinctly.
fn request_error(err: reqwest::Error) -> SyncError {
    if err.is_timeout() {
        SyncError::TimedOut {
            provider: Provider::Github,
        }
    } else {
        SyncError::Transport {
            provider: Provider::Github,
            message: err.to_string(),
        }
    }
}
