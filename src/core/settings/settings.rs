// Process configuration for the fetch workflow.
// Everything is environment-driven: the tool runs as a build step, so there
// are no command-line arguments - just a .env file or CI variables.

use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_OUTPUT_DIR: &str = "public";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Errors raised while validating the environment-derived settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("GitHub username is not set. Check your .env file and ensure GITHUB_USERNAME is set.")]
    MissingUsername,

    #[error(
        "GitHub token is not set. Check your .env file and ensure REACT_APP_GITHUB_TOKEN is set."
    )]
    MissingToken,

    #[error("GitHub username {0:?} contains characters outside GitHub's username alphabet")]
    InvalidUsername(String),
}

/// Immutable snapshot of the environment.
///
/// Read once at process start and passed by parameter into everything that
/// needs it, so no fetch or validation logic ever reaches back into the
/// process environment.
#[derive(Debug, Clone)]
pub struct Settings {
    pub github_token: Option<String>,
    pub github_username: Option<String>,
    pub use_github_data: Option<String>,
    pub medium_username: Option<String>,
    pub output_dir: PathBuf,
    pub timeout_secs: u64,
}

impl Settings {
    /// Read all supported variables from the process environment.
    pub fn from_env() -> Self {
        Self {
            github_token: non_empty(std::env::var("REACT_APP_GITHUB_TOKEN").ok()),
            github_username: non_empty(std::env::var("GITHUB_USERNAME").ok()),
            use_github_data: std::env::var("USE_GITHUB_DATA").ok(),
            medium_username: non_empty(std::env::var("MEDIUM_USERNAME").ok()),
            output_dir: std::env::var("OUTPUT_DIR")
                .ok()
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            timeout_secs: std::env::var("FETCH_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Whether the GitHub branch of the workflow is enabled.
    /// The flag must literally equal "true", matching the build scripts that set it.
    pub fn github_enabled(&self) -> bool {
        self.use_github_data.as_deref() == Some("true")
    }

    /// Fail fast when the GitHub branch is enabled but misconfigured.
    ///
    /// The Medium branch needs no validation: a missing username simply
    /// skips it later.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !self.github_enabled() {
            return Ok(());
        }

        let username = self
            .github_username
            .as_deref()
            .ok_or(SettingsError::MissingUsername)?;
        if self.github_token.is_none() {
            return Err(SettingsError::MissingToken);
        }
        if !is_valid_github_username(username) {
            return Err(SettingsError::InvalidUsername(username.to_string()));
        }

        Ok(())
    }
}

/// Treat empty or whitespace-only variables the same as unset ones.
fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// GitHub usernames are ASCII alphanumerics and hyphens. Rejecting anything
/// else keeps quote and control characters out of the outbound request.
fn is_valid_github_username(username: &str) -> bool {
    !username.is_empty()
        && username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn github_settings(username: Option<&str>, token: Option<&str>) -> Settings {
        Settings {
            github_token: token.map(str::to_string),
            github_username: username.map(str::to_string),
            use_github_data: Some("true".to_string()),
            medium_username: None,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    #[test]
    fn disabled_branch_needs_no_credentials() {
        let mut settings = github_settings(None, None);
        settings.use_github_data = None;
        assert!(settings.validate().is_ok());

        settings.use_github_data = Some("false".to_string());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn flag_must_literally_equal_true() {
        let mut settings = github_settings(None, None);
        settings.use_github_data = Some("TRUE".to_string());

        assert!(!settings.github_enabled());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn missing_username_is_rejected() {
        let settings = github_settings(None, Some("ghp_token"));
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::MissingUsername)
        ));
    }

    #[test]
    fn missing_token_is_rejected() {
        let settings = github_settings(Some("ada"), None);
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::MissingToken)
        ));
    }

    #[test]
    fn username_with_query_characters_is_rejected() {
        let settings = github_settings(Some("ada\") { id }"), Some("ghp_token"));
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::InvalidUsername(_))
        ));
    }

    #[test]
    fn hyphenated_usernames_are_accepted() {
        let settings = github_settings(Some("ada-lovelace-1815"), Some("ghp_token"));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn blank_variables_normalize_to_none() {
        assert_eq!(non_empty(Some("   ".to_string())), None);
        assert_eq!(non_empty(Some(String::new())), None);
        assert_eq!(non_empty(None), None);
        assert_eq!(non_empty(Some(" ada ".to_string())), Some("ada".to_string()));
    }

    #[test]
    fn error_messages_name_the_missing_variable() {
        assert!(SettingsError::MissingUsername
            .to_string()
            .contains("GITHUB_USERNAME"));
        assert!(SettingsError::MissingToken
            .to_string()
            .contains("REACT_APP_GITHUB_TOKEN"));
    }
}
