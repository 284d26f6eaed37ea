use crate::types::{FeedSource, FetchConfig};
use std::path::{Path, PathBuf};

pub const DEFAULT_ENDPOINT: &str = "https://api.rss2json.com/v1/api.json";
pub const DEFAULT_MAX_ITEMS: usize = 60;
pub const OUTPUT_RELATIVE_PATH: &str = "data/news.json";

/// Everything a run needs, passed explicitly instead of living in globals.
#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    pub sources: Vec<FeedSource>,
    pub endpoint: String,
    pub output_path: PathBuf,
    pub max_items: usize,
    pub fetch: FetchConfig,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            sources: default_sources(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            output_path: project_root().join(OUTPUT_RELATIVE_PATH),
            max_items: DEFAULT_MAX_ITEMS,
            fetch: FetchConfig::default(),
        }
    }
}

impl AggregatorConfig {
    pub fn with_sources(mut self, sources: Vec<FeedSource>) -> Self {
        self.sources = sources;
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    pub fn with_fetch_config(mut self, fetch: FetchConfig) -> Self {
        self.fetch = fetch;
        self
    }
}

/// Workspace root, one level above this crate's manifest.
pub fn project_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .unwrap_or(manifest_dir)
        .to_path_buf()
}

pub fn default_sources() -> Vec<FeedSource> {
    vec![
        FeedSource::new("bbc", "BBC News", "https://feeds.bbci.co.uk/news/rss.xml"),
        FeedSource::new("npr", "NPR", "https://feeds.npr.org/1001/rss.xml"),
        FeedSource::new(
            "aljazeera",
            "Al Jazeera",
            "https://www.aljazeera.com/xml/rss/all.xml",
        ),
        FeedSource::new("dw", "DW", "https://rss.dw.com/rdf/rss-en-top"),
        FeedSource::new(
            "pbs",
            "PBS NewsHour",
            "https://www.pbs.org/newshour/feeds/rss/headlines",
        ),
        FeedSource::new(
            "guardian",
            "The Guardian",
            "https://www.theguardian.com/world/rss",
        ),
    ]
}
