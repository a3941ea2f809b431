#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod activity;
pub mod config;
pub mod credentials;
pub mod fanout;
pub mod query;
pub mod rate_limit;
pub mod report;
pub mod runner;
pub mod search;
pub mod summary;

#[cfg(test)]
mod test_server;

pub use activity::{ActivityProbe, ProbeError, ProbeOutcome};
pub use config::{config_path_from_env, ConfigError, Settings};
pub use credentials::{fetch_token, CredentialError, GitHubToken, TokenCommand};
pub use fanout::{filter_active, probe_all, retain_active};
pub use query::{resolve_query, QuerySource, ResolvedQuery, RewriteError, API_KEY_ENV};
pub use rate_limit::{check_rate_limit, RateLimitInfo, RateLimitResource};
pub use report::{write_report, OutputFormat};
pub use runner::{Runner, RunnerConfig, RunnerError};
pub use search::{search_repositories, validate_limit, RepositoryRecord, SearchError};
pub use summary::RunSummary;
