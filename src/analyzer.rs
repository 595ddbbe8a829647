use std::collections::HashMap;
use tracing::{info, warn};

use crate::api::models::AnalysisResultEntry;
use crate::scraper::extract_text;
use crate::AppState;

/// URLs past this position in a request are ignored.
pub const MAX_URLS_PER_REQUEST: usize = 10;

pub const DEFAULT_SUCCESS_SUMMARY: &str = "Website content analyzed successfully";
pub const UNREACHABLE_SUMMARY: &str = "Could not access or analyze this site";

pub fn bound_urls(mut urls: Vec<String>) -> Vec<String> {
    urls.truncate(MAX_URLS_PER_REQUEST);
    urls
}

/// Fetches, extracts and summarizes every URL concurrently.
///
/// Each URL gets its own task and its own entry; a failing or panicking
/// task only affects that entry. Duplicate URLs resolve to the later one.
pub async fn analyze(state: &AppState, urls: Vec<String>) -> HashMap<String, AnalysisResultEntry> {
    let urls = bound_urls(urls);
    info!(count = urls.len(), "Analyzing URLs");

    let handles: Vec<_> = urls
        .into_iter()
        .map(|url| {
            let state = state.clone();
            let task_url = url.clone();
            let handle = tokio::spawn(async move { analyze_one(&state, &task_url).await });
            (url, handle)
        })
        .collect();

    let mut results = HashMap::with_capacity(handles.len());
    for (url, handle) in handles {
        let entry = match handle.await {
            Ok(entry) => entry,
            Err(e) => {
                warn!(url = %url, error = %e, "Analysis task did not complete");
                AnalysisResultEntry::error(format!("Analysis task failed: {}", e), UNREACHABLE_SUMMARY)
            }
        };
        results.insert(url, entry);
    }

    results
}

async fn analyze_one(state: &AppState, url: &str) -> AnalysisResultEntry {
    let html = match state.fetcher.fetch_html(url).await {
        Ok(html) => html,
        Err(e) => {
            warn!(url = %url, error = %e, "Error processing URL");
            return AnalysisResultEntry::error(e.to_string(), UNREACHABLE_SUMMARY);
        }
    };

    let text = extract_text(&html);
    let summary = state.summarizer.summarize(url, &text).await;

    if summary.is_empty() {
        AnalysisResultEntry::success(DEFAULT_SUCCESS_SUMMARY)
    } else {
        AnalysisResultEntry::success(summary)
    }
}
