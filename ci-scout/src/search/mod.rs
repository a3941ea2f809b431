//! Repository search using the GitHub Search API.
//!
//! A single page of results is requested. The requested page size is checked
//! against a ceiling before any request is made.

mod error;
mod repository;

pub use error::SearchError;
pub use repository::RepositoryRecord;
pub(crate) use repository::split_full_name;

use octocrab::Octocrab;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span, warn, Instrument};

/// Query parameters for `GET /search/repositories`.
#[derive(Serialize)]
struct SearchParams<'a> {
    q: &'a str,
    per_page: u8,
}

/// Body of a repository search response.
#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    total_count: u64,
    #[serde(default)]
    incomplete_results: bool,
    #[serde(default)]
    items: Vec<RepositoryRecord>,
}

/// Checks a requested result count against the ceiling.
///
/// # Errors
///
/// Returns [`SearchError::LimitExceeded`] if `limit > max_limit`, or
/// [`SearchError::ZeroLimit`] if `limit` is zero.
pub fn validate_limit(limit: u8, max_limit: u8) -> Result<u8, SearchError> {
    if limit == 0 {
        return Err(SearchError::ZeroLimit);
    }
    if limit > max_limit {
        return Err(SearchError::LimitExceeded {
            requested: limit,
            max: max_limit,
        });
    }
    Ok(limit)
}

/// Searches repositories matching `query`, returning at most `limit` records.
///
/// Records are returned in the order GitHub ranked them.
///
/// # Arguments
///
/// * `octocrab` - Authenticated GitHub client
/// * `query` - Search string, qualifiers allowed
/// * `limit` - Page size to request
/// * `max_limit` - Ceiling for `limit`
///
/// # Errors
///
/// Returns [`SearchError`] if the limit is rejected (no request is made) or
/// the API call fails.
pub async fn search_repositories(
    octocrab: &Octocrab,
    query: &str,
    limit: u8,
    max_limit: u8,
) -> Result<Vec<RepositoryRecord>, SearchError> {
    let per_page = validate_limit(limit, max_limit)?;

    let span = info_span!("search", query = %query, per_page);

    async {
        debug!("Executing repository search");

        let params = SearchParams { q: query, per_page };
        let response: SearchResponse = octocrab
            .get("/search/repositories", Some(&params))
            .await?;

        if response.incomplete_results {
            warn!("GitHub reported incomplete search results");
        }

        info!(
            count = response.items.len(),
            total = response.total_count,
            "Search complete"
        );
        Ok(response.items)
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_MAX_SEARCH_LIMIT;

    #[test]
    fn accepts_limits_up_to_ceiling() {
        assert_eq!(validate_limit(1, DEFAULT_MAX_SEARCH_LIMIT).unwrap(), 1);
        assert_eq!(validate_limit(5, DEFAULT_MAX_SEARCH_LIMIT).unwrap(), 5);
        assert_eq!(validate_limit(50, DEFAULT_MAX_SEARCH_LIMIT).unwrap(), 50);
    }

    #[test]
    fn rejects_limits_above_ceiling() {
        let error = validate_limit(51, DEFAULT_MAX_SEARCH_LIMIT).unwrap_err();
        assert!(matches!(
            error,
            SearchError::LimitExceeded {
                requested: 51,
                max: 50
            }
        ));
    }

    #[test]
    fn rejects_zero_limit() {
        assert!(matches!(
            validate_limit(0, DEFAULT_MAX_SEARCH_LIMIT),
            Err(SearchError::ZeroLimit)
        ));
    }

    #[test]
    fn parses_search_response_in_order() {
        let json = r#"{
            "total_count": 2,
            "incomplete_results": false,
            "items": [
                {"full_name": "numpy/numpy", "id": 1},
                {"full_name": "scipy/scipy", "id": 2}
            ]
        }"#;
        let response: SearchResponse = serde_json::from_str(json).unwrap();
        let names: Vec<_> = response.items.iter().map(|r| r.full_name.as_str()).collect();
        assert_eq!(names, ["numpy/numpy", "scipy/scipy"]);
    }

    #[test]
    fn missing_items_is_empty() {
        let response: SearchResponse = serde_json::from_str(r#"{"total_count": 0}"#).unwrap();
        assert!(response.items.is_empty());
    }
}
