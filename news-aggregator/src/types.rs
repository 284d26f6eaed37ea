use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A configured news origin, fetched indirectly through the conversion API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSource {
    pub key: String,
    pub display_name: String,
    pub feed_url: String,
}

impl FeedSource {
    pub fn new(key: &str, display_name: &str, feed_url: &str) -> Self {
        Self {
            key: key.to_string(),
            display_name: display_name.to_string(),
            feed_url: feed_url.to_string(),
        }
    }
}

/// One entry of the cache document. Field order here is the on-disk order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    pub title: String,
    pub link: String,
    pub source: String,
    pub pub_date: String,
    pub summary: String,
    pub image_url: Option<String>,
}

/// Response body of the RSS-to-JSON conversion service.
///
/// Everything is optional and loosely typed: a missing or odd `status` is
/// an upstream rejection, not a decoding failure.
#[derive(Debug, Default, Deserialize)]
pub struct FeedPayload {
    #[serde(default)]
    pub status: Option<serde_json::Value>,
    #[serde(default)]
    pub message: Option<serde_json::Value>,
    #[serde(default)]
    pub items: Option<Vec<serde_json::Value>>,
}

impl FeedPayload {
    pub fn is_ok(&self) -> bool {
        self.status.as_ref().and_then(|s| s.as_str()) == Some(PAYLOAD_STATUS_OK)
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_ref().and_then(|m| m.as_str())
    }
}

/// One entry of `items`. Fields that are not strings read as absent.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawItem {
    pub title: Option<serde_json::Value>,
    pub link: Option<serde_json::Value>,
    pub pub_date: Option<serde_json::Value>,
    pub description: Option<serde_json::Value>,
    pub thumbnail: Option<serde_json::Value>,
    pub enclosure: Option<serde_json::Value>,
}

impl RawItem {
    pub fn enclosure_thumbnail(&self) -> Option<&str> {
        self.enclosure
            .as_ref()
            .and_then(|e| e.get("thumbnail"))
            .and_then(|t| t.as_str())
    }
}

/// String content of an optional JSON field.
pub fn json_str(value: &Option<serde_json::Value>) -> Option<&str> {
    value.as_ref().and_then(|v| v.as_str())
}

pub const PAYLOAD_STATUS_OK: &str = "ok";

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout_ms: u64,
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "News-Aggregator/1.0".to_string(),
            timeout_ms: 15_000,
            max_redirects: 1,
        }
    }
}

/// Why a single feed produced no items. Never aborts sibling fetches.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request for feed {key} timed out")]
    Timeout { key: String },

    #[error("transport error for feed {key}: {source}")]
    Transport {
        key: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} for feed {key}")]
    Status { key: String, status: u16 },

    #[error("conversion service rejected feed {key}: {message}")]
    Upstream { key: String, message: String },

    #[error("invalid response body for feed {key}: {source}")]
    Parse {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    pub fn feed_key(&self) -> &str {
        match self {
            FetchError::Timeout { key }
            | FetchError::Transport { key, .. }
            | FetchError::Status { key, .. }
            | FetchError::Upstream { key, .. }
            | FetchError::Parse { key, .. } => key,
        }
    }

    /// Classify a reqwest failure for the given feed.
    pub fn from_reqwest(key: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout { key: key.to_string() }
        } else {
            FetchError::Transport {
                key: key.to_string(),
                source: err,
            }
        }
    }
}

/// Failures that escape a run and turn into a non-zero exit.
#[derive(Debug, thiserror::Error)]
pub enum AggregatorError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AggregatorError>;
