//! Settings loading.
//!
//! All settings are optional. A missing settings file means defaults; the
//! model and temperature used for query rewriting can also be overridden
//! through environment variables.

mod error;
mod settings;

pub use error::ConfigError;
pub use settings::{
    OutputSettings, RewriteSettings, SearchSettings, Settings, DEFAULT_MAX_SEARCH_LIMIT,
    DEFAULT_PROBE_CONCURRENCY, DEFAULT_REWRITE_BASE_URL, DEFAULT_REWRITE_MODEL,
    DEFAULT_REWRITE_TEMPERATURE, DEFAULT_REWRITE_TIMEOUT_SECS, DEFAULT_SEARCH_LIMIT,
    GITHUB_MAX_PAGE_SIZE,
};

use std::path::PathBuf;

/// Environment variable naming the settings file.
pub const CONFIG_PATH_ENV: &str = "CI_SCOUT_CONFIG";

/// Settings file looked up in the working directory by default.
pub const DEFAULT_CONFIG_FILE: &str = "ci-scout.toml";

/// Returns the settings file path from `CI_SCOUT_CONFIG`, or the default file name.
#[must_use]
pub fn config_path_from_env() -> PathBuf {
    std::env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}
