//! GitHub API quota diagnostics.
//!
//! Quota is only reported, never waited on: when a search fails the caller
//! logs the current limits so exhaustion is visible.

use octocrab::Octocrab;
use tracing::{info, warn};

/// Rate limit information for a specific resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitInfo {
    /// Requests remaining in the current window.
    pub remaining: u32,
    /// Unix timestamp when the rate limit resets.
    pub reset: u64,
    /// Total requests allowed per window.
    pub limit: u32,
}

impl RateLimitInfo {
    /// Returns true if no requests remain in the current window.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }
}

/// Quota buckets the GitHub API tracks separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitResource {
    /// The search endpoints.
    Search,
    /// Everything else, including repository and Actions endpoints.
    Core,
}

impl RateLimitResource {
    fn as_str(self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Core => "core",
        }
    }
}

/// Checks the current rate limit status for `resource`.
///
/// # Errors
///
/// Returns an error if the rate limit API call fails.
pub async fn check_rate_limit(
    octocrab: &Octocrab,
    resource: RateLimitResource,
) -> Result<RateLimitInfo, octocrab::Error> {
    let rate_limit = octocrab.ratelimit().get().await?;
    let rate = match resource {
        RateLimitResource::Search => &rate_limit.resources.search,
        RateLimitResource::Core => &rate_limit.resources.core,
    };

    Ok(RateLimitInfo {
        remaining: rate.remaining as u32,
        reset: rate.reset,
        limit: rate.limit as u32,
    })
}

/// Logs the quota of `resource`; a failed lookup is logged too.
pub async fn report_rate_limit(octocrab: &Octocrab, resource: RateLimitResource) {
    match check_rate_limit(octocrab, resource).await {
        Ok(info) => log_rate_limit(resource.as_str(), &info),
        Err(e) => warn!(error = %e, resource = resource.as_str(), "Failed to fetch rate limit status"),
    }
}

fn log_rate_limit(resource: &str, info: &RateLimitInfo) {
    if info.is_exhausted() {
        warn!(
            resource,
            limit = info.limit,
            reset_at = info.reset,
            "GitHub rate limit exhausted"
        );
    } else {
        info!(
            resource,
            remaining = info.remaining,
            limit = info.limit,
            reset_at = info.reset,
            "GitHub rate limit status"
        );
    }
}
