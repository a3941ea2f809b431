//! GitHub token retrieval through an external command.
//!
//! The token is obtained once at startup (by default from `gh auth token`)
//! and then carried explicitly in [`crate::RunnerConfig`].

mod error;

pub use error::CredentialError;

use std::fmt;
use std::io::ErrorKind;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info_span, Instrument};

/// An opaque GitHub bearer token.
///
/// `Debug` output is redacted so the token never ends up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct GitHubToken(String);

impl GitHubToken {
    /// Wraps a raw token string.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the raw token for use in an `Authorization` header.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for GitHubToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("GitHubToken(***)")
    }
}

/// The command that prints a GitHub token on stdout.
#[derive(Debug, Clone)]
pub struct TokenCommand {
    program: String,
    args: Vec<String>,
}

impl Default for TokenCommand {
    fn default() -> Self {
        Self::new("gh", ["auth", "token"])
    }
}

impl TokenCommand {
    /// Creates a token command from a program and its arguments.
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the program name.
    pub fn program(&self) -> &str {
        &self.program
    }
}

/// Runs the token command and returns its trimmed output.
///
/// # Errors
///
/// - [`CredentialError::CliMissing`] if the program isn't installed
/// - [`CredentialError::CommandFailed`] if it exits unsuccessfully
/// - [`CredentialError::EmptyToken`] if it prints nothing
pub async fn fetch_token(command: &TokenCommand) -> Result<GitHubToken, CredentialError> {
    let span = info_span!("fetch_token", program = %command.program);

    async {
        debug!("Requesting GitHub token");

        let output = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| match source.kind() {
                ErrorKind::NotFound => CredentialError::CliMissing {
                    program: command.program.clone(),
                },
                _ => CredentialError::Spawn {
                    program: command.program.clone(),
                    source,
                },
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CredentialError::CommandFailed {
                program: command.program.clone(),
                status: output.status,
                stderr: stderr.trim().to_string(),
            });
        }

        let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if token.is_empty() {
            return Err(CredentialError::EmptyToken);
        }

        debug!("Obtained GitHub token");
        Ok(GitHubToken(token))
    }
    .instrument(span)
    .await
}
