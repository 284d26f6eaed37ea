pub mod types;
pub mod config;
pub mod traits;
pub mod fetcher;
pub mod parser;
pub mod cache;
pub mod aggregator;

pub use types::*;
pub use config::AggregatorConfig;
pub use traits::FeedFetcher;
pub use fetcher::Fetcher;
pub use parser::FeedParser;
pub use cache::{read_cache, write_cache};
pub use aggregator::{FeedFailure, NewsAggregator, RunOutcome, RunReport};
