//! Repository search error types.

use thiserror::Error;

/// Errors that can occur during repository search.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The requested result count is above the ceiling.
    #[error("Limit must be less than or equal to {max}, got {requested}. Please reduce the limit and try again.")]
    LimitExceeded { requested: u8, max: u8 },

    /// A result count of zero was requested.
    #[error("Limit must be at least 1")]
    ZeroLimit,

    /// GitHub API error, including non-success statuses.
    #[error("GitHub API error: {0}")]
    GitHubError(#[from] octocrab::Error),
}
