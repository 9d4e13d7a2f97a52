use crate::error::{CrawlError, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const USER_AGENT: &str = "linktally/0.1 (https://github.com/eka-septian/linktally)";

/// HTTP document fetcher. Succeeds only for responses that look like an
/// HTML page; everything else is an error the controller abandons.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT_SECS)
    }

    pub fn with_timeout(timeout_secs: u64) -> Self {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.div_ceil(2)))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }

    /// GET `url` and return the body, or fail if the transport fails,
    /// the status is an error, or the response is not HTML.
    pub async fn fetch(&self, url: &str) -> Result<String> {
        debug!("Fetching {}", url);

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if status.as_u16() >= 400 {
            return Err(CrawlError::HttpStatus(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        if !content_type.contains("text/html") {
            return Err(CrawlError::UnsupportedContentType(content_type));
        }

        Ok(response.text().await?)
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}
