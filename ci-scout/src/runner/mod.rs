//! Orchestrates a search run: resolve the query, search, probe, filter.

mod config;
mod error;

pub use config::RunnerConfig;
pub use error::RunnerError;

use crate::activity::ProbeOutcome;
use crate::fanout::{probe_all, retain_active};
use crate::query::resolve_query;
use crate::rate_limit::{report_rate_limit, RateLimitResource};
use crate::search::{search_repositories, validate_limit, SearchError};
use crate::summary::RunSummary;
use octocrab::Octocrab;
use tracing::{error, info, warn};

/// Runs one search from user intent to the list of active repositories.
///
/// Holds the single GitHub session shared by the search and every probe.
pub struct Runner {
    config: RunnerConfig,
    octocrab: Octocrab,
}

impl Runner {
    /// Builds a runner from the provided configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Octocrab`] if the GitHub client can't be built,
    /// for example because `api-base-url` isn't a valid URI.
    pub fn new(config: RunnerConfig) -> Result<Self, RunnerError> {
        let mut builder = Octocrab::builder().personal_token(config.token().expose().to_string());
        if let Some(base_url) = &config.settings().search.api_base_url {
            builder = builder.base_uri(base_url.as_str())?;
        }
        let octocrab = builder.build()?;
        Ok(Self { config, octocrab })
    }

    /// Executes the full flow for `intent`.
    ///
    /// A failed search or failed probes degrade to fewer results; only a
    /// rejected limit stops the run.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Search`] if the configured limit is rejected.
    /// No network call is made in that case.
    pub async fn run(&self, intent: &str) -> Result<RunSummary, RunnerError> {
        let search = &self.config.settings().search;
        validate_limit(search.limit, search.max_limit)?;

        let query = resolve_query(
            &self.config.settings().rewrite,
            self.config.rewrite_api_key(),
            intent,
        )
        .await;
        info!(query = %query.text, source = ?query.source, "Resolved search query");

        let mut summary = RunSummary::new(query);
        let candidates =
            match search_repositories(&self.octocrab, &summary.query.text, search.limit, search.max_limit)
                .await
            {
                Ok(candidates) => candidates,
                Err(SearchError::GitHubError(e)) => {
                    error!(error = %e, "Repository search failed");
                    report_rate_limit(&self.octocrab, RateLimitResource::Search).await;
                    summary.search_failed = true;
                    return Ok(summary);
                }
                Err(e) => return Err(e.into()),
            };

        summary.candidates = candidates.len();
        if candidates.is_empty() {
            info!("No repositories found");
            return Ok(summary);
        }

        let outcomes = probe_all(&self.octocrab, &candidates, search.concurrency).await;
        record_outcomes(&mut summary, &outcomes);

        if summary.probe_failures > 0 {
            warn!(
                failed = summary.probe_failures,
                "Some activity probes failed and were counted as inactive"
            );
            report_rate_limit(&self.octocrab, RateLimitResource::Core).await;
        }

        summary.repositories = retain_active(candidates, &outcomes);
        Ok(summary)
    }
}

fn record_outcomes(summary: &mut RunSummary, outcomes: &[ProbeOutcome]) {
    for outcome in outcomes {
        summary.record_outcome(outcome);
    }
}
