//! Turns free-text intent into a GitHub search query.
//!
//! When an API key is available the intent is sent to an OpenAI-compatible
//! chat completions endpoint which answers with a qualifier-based query
//! (e.g. `language:rust topic:cli sort:stars`). Any failure falls back to the
//! raw input, so [`resolve_query`] always produces a usable query.

mod error;

pub use error::RewriteError;

use crate::config::RewriteSettings;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, info_span, warn, Instrument};

/// Environment variable holding the API key for the rewriting endpoint.
pub const API_KEY_ENV: &str = "GROQ_API_KEY";

const SYSTEM_INSTRUCTION: &str = "You are a GitHub Search Query Generator. \
Convert the user's intent into a precise GitHub search string.\n\
Rules:\n\
1. Output ONLY the query string.\n\
2. ONLY quote values if they strictly contain spaces (e.g. topic:\"data science\"). \
NEVER quote single words (e.g. topic:python).\n\
3. Use keywords instead of strict topics if the topic name is uncertain.\n\
4. Do NOT use Markdown or explain your answer.";

/// Where a resolved query came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuerySource {
    /// Produced by the text-generation endpoint.
    Rewritten,
    /// The user's input, passed through unchanged.
    Original,
}

/// A search query ready for the repository search endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedQuery {
    /// Query text, GitHub qualifier syntax allowed.
    pub text: String,
    /// Whether the text was rewritten.
    pub source: QuerySource,
}

impl ResolvedQuery {
    fn original(intent: &str) -> Self {
        Self {
            text: intent.to_string(),
            source: QuerySource::Original,
        }
    }
}

/// Resolves user intent into a search query, never failing.
///
/// Without an API key rewriting is skipped silently; any other failure is
/// logged and the input is returned byte-for-byte.
pub async fn resolve_query(
    settings: &RewriteSettings,
    api_key: Option<&str>,
    intent: &str,
) -> ResolvedQuery {
    let span = info_span!("resolve_query", model = %settings.model);

    async {
        match rewrite_query(settings, api_key, intent).await {
            Ok(text) => {
                info!(query = %text, "Rewrote search query");
                ResolvedQuery {
                    text,
                    source: QuerySource::Rewritten,
                }
            }
            Err(e @ RewriteError::MissingApiKey { .. }) => {
                debug!(reason = %e, "Using input as search query");
                ResolvedQuery::original(intent)
            }
            Err(e) => {
                warn!(error = %e, "Query rewriting failed, using input as search query");
                ResolvedQuery::original(intent)
            }
        }
    }
    .instrument(span)
    .await
}

/// Asks the text-generation endpoint for a search query.
///
/// # Errors
///
/// Returns [`RewriteError`] on a missing key, transport failure, non-success
/// status, malformed reply, or a reply that sanitizes to nothing.
pub async fn rewrite_query(
    settings: &RewriteSettings,
    api_key: Option<&str>,
    intent: &str,
) -> Result<String, RewriteError> {
    let api_key = api_key
        .filter(|key| !key.trim().is_empty())
        .ok_or(RewriteError::MissingApiKey {
            env_var: API_KEY_ENV,
        })?;

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(settings.timeout_secs))
        .build()?;

    let request = ChatRequest {
        model: &settings.model,
        messages: [
            ChatMessage {
                role: "system",
                content: SYSTEM_INSTRUCTION,
            },
            ChatMessage {
                role: "user",
                content: intent,
            },
        ],
        temperature: settings.temperature,
    };

    let url = completions_url(&settings.base_url);
    debug!(url = %url, "Requesting query rewrite");

    let response = client
        .post(&url)
        .bearer_auth(api_key)
        .json(&request)
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(RewriteError::Status { status, body });
    }

    let parsed: ChatResponse =
        serde_json::from_str(&body).map_err(|_| RewriteError::MalformedResponse)?;
    let content = parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or(RewriteError::MalformedResponse)?;

    let query = sanitize_query(&content);
    if query.is_empty() {
        return Err(RewriteError::EmptyQuery);
    }
    Ok(query)
}

/// Strips Markdown code fences and ticks from model output.
///
/// Double quotes are kept: they group multi-word qualifier values such as
/// `topic:"data science"`.
#[must_use]
pub fn sanitize_query(raw: &str) -> String {
    raw.trim().replace('`', "").trim().to_string()
}

fn completions_url(base_url: &str) -> String {
    format!("{}/chat/completions", base_url.trim_end_matches('/'))
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f64,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    content: Option<String>,
}
