use std::collections::HashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AppError, Result};

pub const INVALID_URLS_MESSAGE: &str = "Please provide an array of URLs to analyze";

/// Body of `POST /analyze`. `urls` stays untyped until validated so that
/// missing and mistyped fields both produce the same client error.
#[derive(Deserialize, Default)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub urls: Option<Value>,
}

impl AnalyzeRequest {
    /// Rejects a missing, non-array or empty `urls` field, or one holding non-strings.
    pub fn into_urls(self) -> Result<Vec<String>> {
        let invalid = || AppError::InvalidRequest(INVALID_URLS_MESSAGE.to_string());

        let Some(Value::Array(items)) = self.urls else {
            return Err(invalid());
        };
        if items.is_empty() {
            return Err(invalid());
        }

        items
            .into_iter()
            .map(|item| match item {
                Value::String(url) => Ok(url),
                _ => Err(invalid()),
            })
            .collect()
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    Success,
    Error,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct AnalysisResultEntry {
    pub status: EntryStatus,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnalysisResultEntry {
    pub fn success(summary: impl Into<String>) -> Self {
        Self {
            status: EntryStatus::Success,
            summary: summary.into(),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            status: EntryStatus::Error,
            summary: summary.into(),
            error: Some(message.into()),
        }
    }
}

#[derive(Serialize)]
pub struct AnalyzeResponse {
    pub results: HashMap<String, AnalysisResultEntry>,
}
