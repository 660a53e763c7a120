// This module contains ALL the business logic for the fetch-and-persist
// workflow. Notice how it has no HTTP or filesystem code (no reqwest, no
// tokio::fs imports). It works against the traits below so it can be tested
// with in-memory fakes and reused with any transport.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::core::settings::{Settings, SettingsError};

/// File the raw GitHub response body is written to, inside the output dir.
pub const PROFILE_FILE: &str = "profile.json";
/// File the raw Medium feed body is written to, inside the output dir.
pub const BLOGS_FILE: &str = "blogs.json";

// ============================================================================
// DOMAIN MODELS
// ============================================================================

/// Which remote service a request was addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Github,
    Medium,
}

impl Provider {
    /// Remediation hint surfaced alongside request failures.
    fn advice(&self) -> &'static str {
        match self {
            Provider::Github => "Verify that your token has the necessary permissions.",
            Provider::Medium => "Verify that your Medium username is correct.",
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provider::Github => write!(f, "GitHub"),
            Provider::Medium => write!(f, "Medium"),
        }
    }
}

/// Which branches of the workflow actually produced a file.
/// Skipped branches are not an error; the report lets the caller log them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunReport {
    pub profile_saved: bool,
    pub blogs_saved: bool,
}

// ============================================================================
// ERRORS
// ============================================================================
// Every failure in the workflow maps onto one of these variants. Nothing is
// retried or downgraded; the first error aborts the run and surfaces at the
// single boundary in main.

/// Errors that can abort the fetch-and-persist workflow.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error("{provider} request failed with status {status}. {}", .provider.advice())]
    RequestFailed { provider: Provider, status: u16 },

    #[error("{provider} request could not be completed: {message}")]
    Transport { provider: Provider, message: String },

    #[error("{provider} request timed out")]
    TimedOut { provider: Provider },

    #[error("failed to write {path}: {message}")]
    Store { path: String, message: String },
}

// ============================================================================
// GRAPHQL QUERY
// ============================================================================

// The username travels in `variables`, never spliced into the document, so
// quote or control characters in it cannot alter the query.
const PROFILE_QUERY: &str = "\
query ($login: String!) {
  user(login: $login) {
    name
    bio
    avatarUrl
    location
    pinnedItems(first: 6, types: [REPOSITORY]) {
      totalCount
      edges {
        node {
          ... on Repository {
            name
            description
            forkCount
            stargazers {
              totalCount
            }
            url
            id
            diskUsage
            primaryLanguage {
              name
              color
            }
          }
        }
      }
    }
  }
}";

/// Request body for the profile provider's GraphQL endpoint.
#[derive(Debug, Serialize)]
pub struct ProfileQuery {
    query: &'static str,
    variables: ProfileQueryVariables,
}

#[derive(Debug, Serialize)]
struct ProfileQueryVariables {
    login: String,
}

/// Build the pinned-repositories profile query for a username.
pub fn profile_query(username: &str) -> ProfileQuery {
    ProfileQuery {
        query: PROFILE_QUERY,
        variables: ProfileQueryVariables {
            login: username.to_string(),
        },
    }
}

// ============================================================================
// PORTS
// ============================================================================
// The core defines WHAT it needs from the outside world; the infra layer
// provides the actual implementations.

/// Client for the profile provider (the GitHub GraphQL API).
/// Returns the raw response body; the workflow never parses it.
#[async_trait]
pub trait ProfileClient: Send + Sync {
    async fn fetch_profile(&self, username: &str) -> Result<String, SyncError>;
}

/// Client for the feed bridge (an RSS-to-JSON service).
#[async_trait]
pub trait FeedClient: Send + Sync {
    async fn fetch_feed(&self, username: &str) -> Result<String, SyncError>;
}

/// Storage abstraction for the fetched snapshots.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Overwrite `name` with `payload` in full.
    async fn write(&self, name: &str, payload: &str) -> Result<(), SyncError>;
}

// ============================================================================
// SERVICE
// ============================================================================

/// Orchestrates the two fetch-and-save branches.
///
/// The branches run strictly one after another; the Medium branch does not
/// start until the GitHub body has been written. A failure in either branch
/// aborts the whole run.
pub struct SyncService<P: ProfileClient, F: FeedClient, S: SnapshotStore> {
    profile: P,
    feed: F,
    store: S,
}

impl<P, F, S> SyncService<P, F, S>
where
    P: ProfileClient,
    F: FeedClient,
    S: SnapshotStore,
{
    pub fn new(profile: P, feed: F, store: S) -> Self {
        Self {
            profile,
            feed,
            store,
        }
    }

    /// Run the workflow: validate, then fetch and persist each enabled branch.
    pub async fn run(&self, settings: &Settings) -> Result<RunReport, SyncError> {
        settings.validate()?;

        let mut report = RunReport::default();

        if settings.github_enabled() {
            let username = settings
                .github_username
                .as_deref()
                .ok_or(SettingsError::MissingUsername)?;

            tracing::info!("Fetching GitHub profile data for {}", username);
            let body = self.profile.fetch_profile(username).await?;
            self.store.write(PROFILE_FILE, &body).await?;
            tracing::info!("Saved {}", PROFILE_FILE);
            report.profile_saved = true;
        } else {
            tracing::info!("USE_GITHUB_DATA is not \"true\", skipping the GitHub profile");
        }

        if let Some(username) = settings.medium_username.as_deref() {
            tracing::info!("Fetching Medium blog data for {}", username);
            let body = self.feed.fetch_feed(username).await?;
            self.store.write(BLOGS_FILE, &body).await?;
            tracing::info!("Saved {}", BLOGS_FILE);
            report.blogs_saved = true;
        } else {
            tracing::info!("MEDIUM_USERNAME is not set, skipping the blog feed");
        }

        Ok(report)
    }
}

// ============================================================================
// TESTS
// ============================================================================
// The workflow properties are exercised against in-memory fakes of the three
// ports, so no network or filesystem is involved.
