use crate::cache::write_cache;
use crate::config::AggregatorConfig;
use crate::traits::FeedFetcher;
use crate::types::{FetchError, NewsItem, Result};
use crate::{FeedParser, Fetcher};
use futures::future::join_all;
use std::path::PathBuf;
use tracing::{error, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The cache document was rewritten with this many items.
    Written { items: usize, path: PathBuf },
    /// Nothing came back; the previous cache document was left alone.
    NoData,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedFailure {
    pub key: String,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub outcome: RunOutcome,
    pub succeeded: Vec<String>,
    pub failures: Vec<FeedFailure>,
}

pub struct NewsAggregator {
    config: AggregatorConfig,
    fetcher: Box<dyn FeedFetcher>,
}

impl NewsAggregator {
    pub fn new(config: AggregatorConfig) -> Result<Self> {
        let fetcher = Fetcher::new(&config.endpoint, config.fetch.clone())?;
        Ok(Self::with_fetcher(config, Box::new(fetcher)))
    }

    pub fn with_fetcher(config: AggregatorConfig, fetcher: Box<dyn FeedFetcher>) -> Self {
        Self { config, fetcher }
    }

    pub fn config(&self) -> &AggregatorConfig {
        &self.config
    }

    /// Fetch every source, merge what succeeded and rewrite the cache document.
    ///
    /// Per-feed failures are logged and reported, never returned. An `Err`
    /// only comes from writing the output.
    pub async fn run(&self) -> Result<RunReport> {
        let sources = &self.config.sources;
        info!("Fetching {} feeds", sources.len());

        let outcomes = join_all(sources.iter().map(|source| self.fetcher.fetch(source))).await;

        let mut merged: Vec<NewsItem> = Vec::new();
        let mut succeeded = Vec::new();
        let mut failures = Vec::new();

        for (source, outcome) in sources.iter().zip(outcomes) {
            match outcome {
                Ok(items) => {
                    succeeded.push(source.key.clone());
                    merged.extend(items);
                }
                Err(e) => {
                    warn!("{}", e);
                    failures.push(FeedFailure::from_error(&e));
                }
            }
        }

        info!(
            "Successfully fetched {}/{} feeds ({} items)",
            succeeded.len(),
            sources.len(),
            merged.len()
        );

        if merged.is_empty() {
            error!("No items fetched from any feed; keeping existing cache");
            return Ok(RunReport {
                outcome: RunOutcome::NoData,
                succeeded,
                failures,
            });
        }

        let items = FeedParser::new().finalize(merged, self.config.max_items);
        write_cache(&self.config.output_path, &items)?;

        Ok(RunReport {
            outcome: RunOutcome::Written {
                items: items.len(),
                path: self.config.output_path.clone(),
            },
            succeeded,
            failures,
        })
    }
}

impl FeedFailure {
    fn from_error(err: &FetchError) -> Self {
        Self {
            key: err.feed_key().to_string(),
            reason: err.to_string(),
        }
    }
}
