//! Settings file deserialization and validation.

use crate::config::ConfigError;
use crate::report::OutputFormat;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};
use url::Url;

/// Number of repositories requested when the settings file doesn't say.
pub const DEFAULT_SEARCH_LIMIT: u8 = 10;

/// Largest page size a caller may request from the search endpoint.
pub const DEFAULT_MAX_SEARCH_LIMIT: u8 = 50;

/// Hard page size cap of the GitHub search API.
pub const GITHUB_MAX_PAGE_SIZE: u8 = 100;

/// In-flight activity probes; matches the ceiling so a full page runs at once.
pub const DEFAULT_PROBE_CONCURRENCY: usize = 50;

/// OpenAI-compatible endpoint used for query rewriting.
pub const DEFAULT_REWRITE_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Model used for query rewriting.
pub const DEFAULT_REWRITE_MODEL: &str = "llama-3.3-70b-versatile";

/// Request timeout for the rewriting call, in seconds.
pub const DEFAULT_REWRITE_TIMEOUT_SECS: u64 = 5;

/// Low temperature keeps the generated query deterministic.
pub const DEFAULT_REWRITE_TEMPERATURE: f64 = 0.1;

const MODEL_ENV: &str = "CI_SCOUT_LLM_MODEL";
const TEMPERATURE_ENV: &str = "CI_SCOUT_LLM_TEMPERATURE";

/// Top-level structure of the settings file.
///
/// ```toml
/// [search]
/// limit = 10
/// max-limit = 50
/// concurrency = 50
///
/// [rewrite]
/// model = "llama-3.3-70b-versatile"
/// base-url = "https://api.groq.com/openai/v1"
/// timeout-secs = 5
/// temperature = 0.1
///
/// [output]
/// format = "pretty"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Repository search and activity probing.
    pub search: SearchSettings,

    /// Optional LLM query rewriting.
    pub rewrite: RewriteSettings,

    /// Result printing.
    pub output: OutputSettings,
}

/// `[search]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct SearchSettings {
    /// Number of repositories to request.
    pub limit: u8,

    /// Ceiling above which a requested limit is rejected.
    pub max_limit: u8,

    /// Maximum number of activity probes in flight.
    pub concurrency: usize,

    /// GitHub API root, for GitHub Enterprise installs.
    pub api_base_url: Option<String>,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            limit: DEFAULT_SEARCH_LIMIT,
            max_limit: DEFAULT_MAX_SEARCH_LIMIT,
            concurrency: DEFAULT_PROBE_CONCURRENCY,
            api_base_url: None,
        }
    }
}

/// `[rewrite]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct RewriteSettings {
    /// Chat model name.
    pub model: String,

    /// Base URL of the OpenAI-compatible API (without `/chat/completions`).
    pub base_url: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// Sampling temperature (0.0-2.0).
    pub temperature: f64,
}

impl Default for RewriteSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_REWRITE_MODEL.to_string(),
            base_url: DEFAULT_REWRITE_BASE_URL.to_string(),
            timeout_secs: DEFAULT_REWRITE_TIMEOUT_SECS,
            temperature: DEFAULT_REWRITE_TEMPERATURE,
        }
    }
}

/// `[output]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputSettings {
    /// How surviving records are printed.
    pub format: OutputFormat,
}

impl Settings {
    /// Loads settings from `path`, falling back to defaults if the file doesn't exist.
    ///
    /// Environment overrides are applied after parsing, then the result is validated.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file can't be read, isn't valid TOML,
    /// or holds out-of-range values.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut settings: Settings = if path.exists() {
            debug!(path = %path.display(), "Loading settings");
            let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::IoError {
                path: path.display().to_string(),
                source,
            })?;
            toml::from_str(&contents).map_err(|source| ConfigError::TomlError {
                path: path.display().to_string(),
                source,
            })?
        } else {
            debug!(path = %path.display(), "No settings file, using defaults");
            Settings::default()
        };

        settings.rewrite.apply_env_overrides();
        settings.validate(path)?;
        Ok(settings)
    }

    /// Checks value ranges and URL syntax.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] naming the offending field.
    pub fn validate(&self, path: &Path) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::ValidationError {
            path: path.display().to_string(),
            message,
        };

        let search = &self.search;
        if search.max_limit == 0 || search.max_limit > GITHUB_MAX_PAGE_SIZE {
            return Err(invalid(format!(
                "search.max-limit must be between 1 and {GITHUB_MAX_PAGE_SIZE}, got {}",
                search.max_limit
            )));
        }
        if search.concurrency == 0 {
            return Err(invalid("search.concurrency must be at least 1".to_string()));
        }
        if let Some(api_base_url) = &search.api_base_url {
            Url::parse(api_base_url)
                .map_err(|e| invalid(format!("search.api-base-url is not a valid URL: {e}")))?;
        }

        let rewrite = &self.rewrite;
        if rewrite.model.trim().is_empty() {
            return Err(invalid("rewrite.model must not be empty".to_string()));
        }
        Url::parse(&rewrite.base_url)
            .map_err(|e| invalid(format!("rewrite.base-url is not a valid URL: {e}")))?;
        if rewrite.timeout_secs == 0 {
            return Err(invalid("rewrite.timeout-secs must be at least 1".to_string()));
        }
        if !is_valid_temperature(rewrite.temperature) {
            return Err(invalid(format!(
                "rewrite.temperature must be finite and in range 0.0-2.0, got {}",
                rewrite.temperature
            )));
        }

        // `limit` vs `max-limit` is checked by the search client.
        Ok(())
    }
}

impl RewriteSettings {
    /// Applies `CI_SCOUT_LLM_MODEL` and `CI_SCOUT_LLM_TEMPERATURE`.
    ///
    /// Environment variables take precedence over the settings file.
    fn apply_env_overrides(&mut self) {
        if let Ok(model) = std::env::var(MODEL_ENV) {
            if !model.trim().is_empty() {
                self.model = model;
            }
        }
        if let Some(temperature) = env_temperature() {
            self.temperature = temperature;
        }
    }
}

/// Reads the temperature override, ignoring unparsable or out-of-range values.
fn env_temperature() -> Option<f64> {
    let value = std::env::var(TEMPERATURE_ENV).ok()?;
    match value.parse::<f64>() {
        Ok(temp) if is_valid_temperature(temp) => Some(temp),
        _ => {
            warn!(
                "Invalid temperature {value} from environment variable: must be finite and in range 0.0-2.0"
            );
            None
        }
    }
}

fn is_valid_temperature(value: f64) -> bool {
    value.is_finite() && (0.0..=2.0).contains(&value)
}
