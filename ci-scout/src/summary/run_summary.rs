//! Run summary types.

use crate::activity::ProbeOutcome;
use crate::query::ResolvedQuery;
use crate::search::RepositoryRecord;

/// Summary of a complete run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// The query sent to the search endpoint.
    pub query: ResolvedQuery,

    /// Number of repositories returned by search.
    pub candidates: usize,

    /// Number of repositories with recorded CI runs.
    pub active: usize,

    /// Number of repositories without CI runs.
    pub inactive: usize,

    /// Number of probes that failed and were counted as inactive.
    pub probe_failures: usize,

    /// Whether the search call itself failed.
    pub search_failed: bool,

    /// Active repositories in search order.
    pub repositories: Vec<RepositoryRecord>,
}

impl RunSummary {
    /// Creates a new empty summary for `query`.
    #[must_use]
    pub fn new(query: ResolvedQuery) -> Self {
        Self {
            query,
            candidates: 0,
            active: 0,
            inactive: 0,
            probe_failures: 0,
            search_failed: false,
            repositories: Vec::new(),
        }
    }

    /// Updates the counters with a probe outcome.
    pub fn record_outcome(&mut self, outcome: &ProbeOutcome) {
        match outcome {
            ProbeOutcome::Active => self.active += 1,
            ProbeOutcome::Inactive => self.inactive += 1,
            ProbeOutcome::Failed { .. } => {
                self.inactive += 1;
                self.probe_failures += 1;
            }
        }
    }

    /// Returns true if no active repositories were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.repositories.is_empty()
    }
}
