//! Query rewriting error types.

use thiserror::Error;

/// Errors from the text-generation call.
///
/// None of these reach the caller of [`crate::resolve_query`]; they select
/// the fallback to the raw input and are logged.
#[derive(Debug, Error)]
pub enum RewriteError {
    /// No API key in the environment.
    #[error("Query rewriting disabled: {env_var} is not set")]
    MissingApiKey { env_var: &'static str },

    /// The HTTP client couldn't be built, or the request failed in transit.
    #[error("Rewrite request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("Rewrite endpoint returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The reply had no `choices[0].message.content`.
    #[error("Rewrite response had no message content")]
    MalformedResponse,

    /// Nothing was left after sanitizing the reply.
    #[error("Rewrite response was empty after sanitizing")]
    EmptyQuery,
}
