use serde::{Deserialize, Serialize};
use reqwest::Client;
use tracing::{debug, error};
use crate::config::Config;
use crate::error::{Result, AppError};
use crate::scraper::truncate_chars;

pub const SUMMARY_WORDS: usize = 7;

/// Characters of extracted page text embedded in the prompt.
pub const PROMPT_CONTENT_CHARS: usize = 1500;

pub const MAX_OUTPUT_TOKENS: u32 = 30;

pub const NO_API_KEY_SUMMARY: &str = "No API key configured for summary";
pub const FAILED_SUMMARY: &str = "Could not generate summary for this content";

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// Produces seven-word page summaries through the generative-language API.
#[derive(Clone)]
pub struct Summarizer {
    client: Client,
    api_key: Option<String>,
    endpoint: String,
}

impl Summarizer {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            api_key: config.gemini_api_key.clone(),
            endpoint: config.gemini_api_url.clone(),
        }
    }

    /// Never fails: every problem degrades to one of the fixed fallback strings.
    pub async fn summarize(&self, url: &str, content: &str) -> String {
        let Some(api_key) = self.api_key.as_deref() else {
            return NO_API_KEY_SUMMARY.to_string();
        };

        let prompt = build_prompt(url, content);
        match self.generate(api_key, &prompt).await {
            Ok(text) => {
                let summary = normalize_summary(&text);
                debug!(url = %url, summary = %summary, "Generated summary");
                summary
            }
            Err(e) => {
                error!(url = %url, error = %e, "Summary generation failed");
                FAILED_SUMMARY.to_string()
            }
        }
    }

    async fn generate(&self, api_key: &str, prompt: &str) -> Result<String> {
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.0,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        };

        // The key travels in the query string, so strip URLs from any error text
        let res = self
            .client
            .post(&self.endpoint)
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::LlmError(e.without_url().to_string()))?;

        let status = res.status();
        if !status.is_success() {
            return Err(AppError::LlmError(format!(
                "Generation API returned status {}",
                status.as_u16()
            )));
        }

        let parsed: GenerateResponse = res
            .json()
            .await
            .map_err(|e| AppError::LlmError(e.without_url().to_string()))?;

        parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts.into_iter().next())
            .and_then(|part| part.text)
            .ok_or_else(|| AppError::LlmError("Invalid response format from LLM".to_string()))
    }
}

pub fn build_prompt(url: &str, content: &str) -> String {
    let excerpt = truncate_chars(content, PROMPT_CONTENT_CHARS);

    let mut result = String::with_capacity(excerpt.len() + url.len() + 320);
    result.push_str("\nSummarize this website content in EXACTLY SEVEN WORDS. Not 6, not 8, but EXACTLY 7 words.\n");
    result.push_str("Make the summary informative about the actual content, not generic.\n");
    result.push_str("Just give the 7-word summary directly.\n\n");
    result.push_str("URL: ");
    result.push_str(url);
    result.push_str("\n\nContent: \n");
    result.push_str(excerpt);
    result.push_str("\n\nYour 7-word summary (EXACTLY 7 words):");
    result
}

/// Keeps the first seven whitespace-separated words, joined by single spaces.
///
/// Shorter replies are returned as they are; nothing is padded.
pub fn normalize_summary(text: &str) -> String {
    text.split_whitespace()
        .take(SUMMARY_WORDS)
        .collect::<Vec<_>>()
        .join(" ")
}
