use reqwest::{Client, ClientBuilder};
use regex::Regex;
use std::time::Duration;
use once_cell::sync::Lazy;
use tracing::debug;
use crate::error::{AppError, Result};

pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Upper bound on the extracted excerpt, in characters.
pub const MAX_EXTRACTED_CHARS: usize = 3000;

pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

// Compile the patterns once; they are used for every fetched page
static SCRIPT_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<script\b.*?</script>").expect("script pattern is valid")
});

static STYLE_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<style\b.*?</style>").expect("style pattern is valid")
});

static ANY_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<[^>]+>").expect("tag pattern is valid")
});

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s+").expect("whitespace pattern is valid")
});

/// Fetches raw page markup. Cloning is cheap and shares the connection pool.
#[derive(Clone)]
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new() -> Result<Self> {
        Self::with_timeout(FETCH_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .pool_max_idle_per_host(10)
            .build()
            .map_err(|e| AppError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Any non-2xx status is reported as a fetch failure, same as transport errors.
    pub async fn fetch_html(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::FetchError(format!(
                "Request failed with status code {}",
                status.as_u16()
            )));
        }

        let html = response.text().await?;
        debug!(url = %url, bytes = html.len(), "Fetched page");
        Ok(html)
    }
}

/// Reduces markup to a whitespace-normalized plain-text excerpt.
///
/// This is a textual pass, not a parse: unbalanced or malformed markup is
/// stripped as far as the patterns reach and never rejected. Entities are
/// left as they appear in the source.
pub fn extract_text(html: &str) -> String {
    let text = SCRIPT_BLOCK.replace_all(html, " ");
    let text = STYLE_BLOCK.replace_all(&text, " ");
    let text = ANY_TAG.replace_all(&text, " ");
    let text = WHITESPACE_RUN.replace_all(&text, " ");

    truncate_chars(text.trim(), MAX_EXTRACTED_CHARS).to_string()
}

/// Returns at most `max` characters of `text`, never splitting a code point.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
