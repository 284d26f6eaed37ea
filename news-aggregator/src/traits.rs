use crate::types::{FeedSource, FetchError, NewsItem};
use async_trait::async_trait;

/// Trait for pulling the items of one feed source
#[async_trait]
pub trait FeedFetcher: Send + Sync {
    /// Fetch and normalize every item the source currently publishes.
    /// A failure only concerns this one source.
    async fn fetch(&self, source: &FeedSource) -> std::result::Result<Vec<NewsItem>, FetchError>;
}
