use crate::parser::FeedParser;
use crate::traits::FeedFetcher;
use crate::types::{FeedSource, FetchConfig, FetchError, NewsItem, Result};
use async_trait::async_trait;
use reqwest::{header, Client, Response};
use std::time::{Duration, Instant};
use tracing::{debug, info};
use url::Url;

/// Fetches feeds through the RSS-to-JSON conversion endpoint.
pub struct Fetcher {
    client: Client,
    config: FetchConfig,
    endpoint: Url,
}

impl Fetcher {
    pub fn new(endpoint: &str, config: FetchConfig) -> Result<Self> {
        // Redirects are followed by hand so the hop count stays exact.
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_millis(config.timeout_ms))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        Ok(Self {
            client,
            config,
            endpoint: Url::parse(endpoint)?,
        })
    }

    /// Conversion endpoint with the feed address as its `rss_url` parameter.
    pub fn request_url(&self, source: &FeedSource) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("rss_url", &source.feed_url);
        url
    }

    pub async fn fetch_feed(&self, source: &FeedSource) -> std::result::Result<Vec<NewsItem>, FetchError> {
        let start_time = Instant::now();
        let url = self.request_url(source);

        debug!("Fetching feed {}: {}", source.key, url);

        let response = self.get_with_redirects(&source.key, url).await?;
        let status = response.status();

        if !status.is_success() {
            return Err(FetchError::Status {
                key: source.key.clone(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::from_reqwest(&source.key, e))?;

        let items = FeedParser::parse_payload(source, &body)?;

        info!(
            "Fetched {} items from {} in {}ms",
            items.len(),
            source.key,
            start_time.elapsed().as_millis()
        );

        Ok(items)
    }

    async fn get_with_redirects(&self, key: &str, url: Url) -> std::result::Result<Response, FetchError> {
        let mut response = self.send(key, url).await?;
        let mut hops = 0;

        while hops < self.config.max_redirects && response.status().is_redirection() {
            let Some(next) = redirect_target(&response) else {
                break;
            };
            debug!("Following redirect for {} to {}", key, next);
            response = self.send(key, next).await?;
            hops += 1;
        }

        Ok(response)
    }

    async fn send(&self, key: &str, url: Url) -> std::result::Result<Response, FetchError> {
        self.client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(key, e))
    }
}

fn redirect_target(response: &Response) -> Option<Url> {
    let location = response.headers().get(header::LOCATION)?.to_str().ok()?;
    response.url().join(location).ok()
}

#[async_trait]
impl FeedFetcher for Fetcher {
    async fn fetch(&self, source: &FeedSource) -> std::result::Result<Vec<NewsItem>, FetchError> {
        self.fetch_feed(source).await
    }
}
