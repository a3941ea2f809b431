//! Credential retrieval error types.

use thiserror::Error;

/// Errors that can occur while obtaining the GitHub token.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// The credential command isn't installed.
    #[error("GitHub CLI ('{program}') is not installed")]
    CliMissing { program: String },

    /// The credential command couldn't be started.
    #[error("Failed to execute '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The credential command exited unsuccessfully.
    #[error("'{program}' failed ({status}): {stderr}")]
    CommandFailed {
        program: String,
        status: std::process::ExitStatus,
        stderr: String,
    },

    /// The credential command printed nothing.
    #[error("No token found. Run 'gh auth login' first.")]
    EmptyToken,
}
