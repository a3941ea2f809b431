//! Checks whether a repository has any recorded GitHub Actions runs.

mod error;
mod outcome;

pub use error::ProbeError;
pub use outcome::ProbeOutcome;

use crate::search::split_full_name;
use octocrab::Octocrab;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Decides whether a repository counts as active.
///
/// Implementations must not keep state between calls: probing the same
/// repository twice against unchanged upstream state yields the same answer.
#[allow(async_fn_in_trait)]
pub trait ActivityProbe {
    /// Returns `true` if `full_name` ("owner/name") has at least one CI run.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError`] if the repository couldn't be checked.
    async fn has_ci_runs(&self, full_name: &str) -> Result<bool, ProbeError>;
}

/// Query parameters for `GET /repos/{owner}/{repo}/actions/runs`.
#[derive(Serialize)]
struct RunsParams {
    per_page: u8,
}

/// The part of the workflow runs listing that matters here.
#[derive(Deserialize)]
struct WorkflowRunsSummary {
    #[serde(default)]
    total_count: u64,
}

impl WorkflowRunsSummary {
    fn has_runs(&self) -> bool {
        self.total_count > 0
    }
}

impl ActivityProbe for Octocrab {
    /// Requests one page holding at most one workflow run and reads `total_count`.
    async fn has_ci_runs(&self, full_name: &str) -> Result<bool, ProbeError> {
        let (owner, repo) =
            split_full_name(full_name).ok_or_else(|| ProbeError::InvalidName(full_name.to_string()))?;

        let route = format!("/repos/{owner}/{repo}/actions/runs");
        let summary: WorkflowRunsSummary = self.get(route, Some(&RunsParams { per_page: 1 })).await?;

        debug!(
            repo = %full_name,
            total_count = summary.total_count,
            "Fetched workflow run count"
        );
        Ok(summary.has_runs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fanout::probe_all;
    use crate::search::RepositoryRecord;
    use crate::test_server::TestServer;

    async fn actions_server() -> TestServer {
        TestServer::start(|_, target| match target.split('?').next().unwrap_or(target) {
            "/repos/o/busy/actions/runs" => (
                200,
                r#"{"total_count": 1234, "workflow_runs": [{"id": 1}]}"#.to_string(),
            ),
            "/repos/o/idle/actions/runs" => {
                (200, r#"{"total_count": 0, "workflow_runs": []}"#.to_string())
            }
            _ => (404, r#"{"message": "Not Found"}"#.to_string()),
        })
        .await
    }

    #[tokio::test]
    async fn reads_total_count_from_actions_runs() {
        let server = actions_server().await;
        let octocrab = server.github_client();

        assert!(octocrab.has_ci_runs("o/busy").await.unwrap());
        assert!(!octocrab.has_ci_runs("o/idle").await.unwrap());
        assert!(server
            .request_lines()
            .iter()
            .all(|l| l.ends_with("/actions/runs?per_page=1 HTTP/1.1")));
    }

    #[tokio::test]
    async fn missing_repository_is_an_error() {
        let server = actions_server().await;
        let error = server.github_client().has_ci_runs("o/gone").await.unwrap_err();
        assert!(matches!(error, ProbeError::GitHubError(_)));
    }

    #[tokio::test]
    async fn malformed_name_is_rejected_without_a_request() {
        let server = actions_server().await;
        let error = server.github_client().has_ci_runs("gone").await.unwrap_err();
        assert!(matches!(error, ProbeError::InvalidName(_)));
        assert!(server.requests().is_empty());
    }

    #[tokio::test]
    async fn not_found_becomes_failed_outcome() {
        let server = actions_server().await;
        let candidates = [
            RepositoryRecord::new("o/gone"),
            RepositoryRecord::new("o/busy"),
            RepositoryRecord::new("o/idle"),
        ];
        let outcomes = probe_all(&server.github_client(), &candidates, 4).await;

        assert!(matches!(outcomes[0], ProbeOutcome::Failed { .. }));
        assert_eq!(outcomes[1], ProbeOutcome::Active);
        assert_eq!(outcomes[2], ProbeOutcome::Inactive);
    }

    #[test]
    fn counts_runs_from_total() {
        let summary: WorkflowRunsSummary =
            serde_json::from_str(r#"{"total_count": 1234, "workflow_runs": [{"id": 1}]}"#).unwrap();
        assert!(summary.has_runs());

        let summary: WorkflowRunsSummary =
            serde_json::from_str(r#"{"total_count": 0, "workflow_runs": []}"#).unwrap();
        assert!(!summary.has_runs());
    }

    #[test]
    fn missing_total_counts_as_inactive() {
        let summary: WorkflowRunsSummary = serde_json::from_str("{}").unwrap();
        assert!(!summary.has_runs());
    }

    #[test]
    fn outcome_flag() {
        assert!(ProbeOutcome::from(true).is_active());
        assert!(!ProbeOutcome::from(false).is_active());
        assert!(!ProbeOutcome::Failed {
            error: "boom".to_string()
        }
        .is_active());
    }
}
