//! Runner configuration.

use crate::config::Settings;
use crate::credentials::GitHubToken;

/// Everything a run needs, built once at startup.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// GitHub token attached to every GitHub API call.
    token: GitHubToken,
    /// Loaded settings.
    settings: Settings,
    /// API key for query rewriting; `None` disables it.
    rewrite_api_key: Option<String>,
}

impl RunnerConfig {
    /// Creates a new configuration for a run.
    pub fn new(token: GitHubToken, settings: Settings) -> Self {
        Self {
            token,
            settings,
            rewrite_api_key: None,
        }
    }

    /// Sets the API key used for query rewriting.
    pub fn with_rewrite_api_key(mut self, api_key: Option<String>) -> Self {
        self.rewrite_api_key = api_key.filter(|key| !key.trim().is_empty());
        self
    }

    /// Returns the configured GitHub token.
    pub fn token(&self) -> &GitHubToken {
        &self.token
    }

    /// Returns the loaded settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns the query rewriting API key, if any.
    pub fn rewrite_api_key(&self) -> Option<&str> {
        self.rewrite_api_key.as_deref()
    }
}
