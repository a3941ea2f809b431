//! Runner error types.

/// Errors that stop a run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Settings file errors.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// The GitHub token couldn't be obtained.
    #[error(transparent)]
    Credential(#[from] crate::credentials::CredentialError),

    /// The search request was rejected before it was sent.
    #[error(transparent)]
    Search(#[from] crate::search::SearchError),

    /// GitHub API client initialization errors.
    #[error(transparent)]
    Octocrab(#[from] octocrab::Error),
}
