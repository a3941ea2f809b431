//! Concurrent activity probing over search results.
//!
//! Every candidate is probed exactly once. Probes run as futures on the
//! current task, at most `concurrency` at a time, and the results come back
//! in input order so they can be paired with candidates by position.

use crate::activity::{ActivityProbe, ProbeOutcome};
use crate::search::RepositoryRecord;
use futures::stream::{self, StreamExt};
use tracing::{debug, info, info_span, warn, Instrument};

/// Probes every candidate and returns one outcome per candidate, in input order.
///
/// Waits for all probes to finish. A failed probe becomes
/// [`ProbeOutcome::Failed`] and never aborts the batch.
pub async fn probe_all<P: ActivityProbe>(
    probe: &P,
    candidates: &[RepositoryRecord],
    concurrency: usize,
) -> Vec<ProbeOutcome> {
    let span = info_span!("fan_out", candidates = candidates.len(), concurrency);

    async {
        let outcomes: Vec<ProbeOutcome> = stream::iter(candidates)
            .map(|repo| probe_one(probe, repo))
            .buffered(concurrency.max(1))
            .collect()
            .await;

        info!(
            active = outcomes.iter().filter(|o| o.is_active()).count(),
            "Activity probing complete"
        );
        outcomes
    }
    .instrument(span)
    .await
}

async fn probe_one<P: ActivityProbe>(probe: &P, repo: &RepositoryRecord) -> ProbeOutcome {
    match probe.has_ci_runs(&repo.full_name).await {
        Ok(active) => {
            debug!(repo = %repo.full_name, active, "Probed repository");
            ProbeOutcome::from(active)
        }
        Err(e) => {
            warn!(
                repo = %repo.full_name,
                error = %e,
                "Activity probe failed, treating as inactive"
            );
            ProbeOutcome::Failed {
                error: e.to_string(),
            }
        }
    }
}

/// Keeps the candidates whose outcome at the same position is active.
#[must_use]
pub fn retain_active(
    candidates: Vec<RepositoryRecord>,
    outcomes: &[ProbeOutcome],
) -> Vec<RepositoryRecord> {
    debug_assert_eq!(candidates.len(), outcomes.len());
    candidates
        .into_iter()
        .zip(outcomes)
        .filter(|(_, outcome)| outcome.is_active())
        .map(|(repo, _)| repo)
        .collect()
}

/// Probes all candidates and returns the active ones, in input order.
pub async fn filter_active<P: ActivityProbe>(
    probe: &P,
    candidates: Vec<RepositoryRecord>,
    concurrency: usize,
) -> Vec<RepositoryRecord> {
    let outcomes = probe_all(probe, &candidates, concurrency).await;
    retain_active(candidates, &outcomes)
}
