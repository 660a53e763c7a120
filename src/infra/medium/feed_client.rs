use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::core::sync::{FeedClient, Provider, SyncError};

const RSS2JSON_URL: &str = "https://api.rss2json.com/v1/api.json";

/// Feed bridge client backed by rss2json.com, which converts a Medium
/// profile's RSS feed into JSON.
pub struct MediumFeedClient {
    client: Client,
    endpoint: String,
}

impl MediumFeedClient {
    pub fn new(timeout: Duration) -> Result<Self, SyncError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SyncError::Transport {
                provider: Provider::Medium,
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            endpoint: RSS2JSON_URL.to_string(),
        })
    }
}

#[async_trait]
impl FeedClient for MediumFeedClient {
    async fn fetch_feed(&self, username: &str) -> Result<String, SyncError> {
        // The query API percent-encodes the feed URL, so the username never
        // lands raw in the request line.
        let rss_url = format!("https://medium.com/feed/@{}", username);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("rss_url", rss_url.as_str())])
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::RequestFailed {
                provider: Provider::Medium,
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(request_error)
    }
}

fn request_error(err: reqwest::Error) -> SyncError {
    if err.is_timeout() {
        SyncError::TimedOut {
            provider: Provider::Medium,
        }
    } else {
        SyncError::Transport {
            provider: Provider::Medium,
            message: err.to_string(),
        }
    }
}
