//! Activity probe error types.

use thiserror::Error;

/// Errors that can occur while probing a repository for workflow runs.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The identifier isn't in "owner/name" form.
    #[error("Invalid repository name '{0}', expected 'owner/name'")]
    InvalidName(String),

    /// GitHub API error, including non-success statuses.
    #[error("GitHub API error: {0}")]
    GitHubError(#[from] octocrab::Error),
}
