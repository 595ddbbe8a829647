pub mod analyzer;
pub mod api;
pub mod config;
pub mod error;
pub mod llm;
pub mod scraper;

use std::sync::Arc;
use config::Config;
use llm::Summarizer;
use scraper::PageFetcher;

/// Application state that will be shared across handlers and analysis tasks
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub fetcher: PageFetcher,
    pub summarizer: Summarizer,
}

impl AppState {
    pub fn new(config: Config) -> error::Result<Self> {
        let fetcher = PageFetcher::new()?;
        let summarizer = Summarizer::new(&config);

        Ok(Self {
            config: Arc::new(config),
            fetcher,
            summarizer,
        })
    }
}
