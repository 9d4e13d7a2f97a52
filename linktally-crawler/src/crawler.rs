use crate::error::{CrawlError, Result};
use crate::extract::extract_links;
use crate::fetch::HttpFetcher;
use crate::normalize::normalize_url;
use futures::future::BoxFuture;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;
use tokio::sync::{Mutex, Semaphore};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use url::Url;

const DEFAULT_MAX_CONCURRENCY: usize = 5;
const DEFAULT_MAX_PAGES: usize = 25;

/// Crawls a single site from a seed URL, following only same-host links,
/// and counts how many times each normalized page is linked to.
pub struct Crawler {
    base_url: Url,
    fetcher: HttpFetcher,
    max_concurrency: usize,
    max_pages: usize,
}

impl Crawler {
    pub fn new(raw_base_url: &str) -> Result<Self> {
        let base_url = Url::parse(raw_base_url)
            .map_err(|e| CrawlError::InvalidUrl(format!("Couldn't parse base URL: {e}")))?;

        Ok(Self {
            base_url,
            fetcher: HttpFetcher::new(),
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            max_pages: DEFAULT_MAX_PAGES,
        })
    }

    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        // A zero-capacity gate would wedge every visit at admission.
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn with_fetcher(mut self, fetcher: HttpFetcher) -> Self {
        self.fetcher = fetcher;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Run the crawl to completion and return the visit table: normalized
    /// page key -> number of internal links pointing at it (the seed
    /// counts as one reference). Per-page failures are logged and
    /// dropped; the crawl itself never fails.
    pub async fn crawl(&self) -> HashMap<String, u64> {
        info!(
            "Starting crawl of {} (max {} in flight, max {} pages)",
            self.base_url, self.max_concurrency, self.max_pages
        );

        let ctx = Arc::new(CrawlContext {
            fetcher: self.fetcher.clone(),
            base_host: self.base_url.host_str().unwrap_or_default().to_string(),
            max_pages: self.max_pages,
            gate: Semaphore::new(self.max_concurrency),
            pages: Mutex::new(HashMap::new()),
            tasks: Mutex::new(Vec::new()),
        });

        let seed = tokio::spawn(visit(ctx.clone(), self.base_url.to_string()));
        ctx.tasks.lock().await.push(seed);

        // Drain the completion tracker. Every task registers its children
        // before it finishes, so the list only reads empty once the whole
        // transitive fan-out has quiesced.
        loop {
            let next = ctx.tasks.lock().await.pop();
            match next {
                Some(handle) => {
                    if let Err(e) = handle.await {
                        warn!("Crawl task failed to join: {}", e);
                    }
                }
                None => break,
            }
        }

        let pages = ctx.pages.lock().await;
        info!("Crawl complete. {} distinct pages visited", pages.len());
        pages.clone()
    }
}

/// Shared state for one crawl run. The visit table is the only
/// concurrently mutated data; the gate bounds in-flight visits.
struct CrawlContext {
    fetcher: HttpFetcher,
    base_host: String,
    max_pages: usize,
    gate: Semaphore,
    pages: Mutex<HashMap<String, u64>>,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl CrawlContext {
    /// Check-and-increment under a single lock. Returns true when the
    /// caller is the first visitor of `key` and therefore owns fetching
    /// and expanding that page. Two tasks must never both see true for
    /// the same key.
    async fn record_visit(&self, key: String) -> bool {
        let mut pages = self.pages.lock().await;
        match pages.entry(key) {
            Entry::Occupied(mut entry) => {
                *entry.get_mut() += 1;
                false
            }
            Entry::Vacant(entry) => {
                entry.insert(1);
                true
            }
        }
    }

    async fn page_cap_reached(&self) -> bool {
        self.pages.lock().await.len() >= self.max_pages
    }
}

/// One visit task. Boxed because the fan-out is recursive: each page
/// spawns a fresh visit per extracted link and returns without waiting
/// for them.
fn visit(ctx: Arc<CrawlContext>, raw_url: String) -> BoxFuture<'static, ()> {
    Box::pin(async move {
        // One permit per in-flight visit, released on every exit path.
        let _permit = match ctx.gate.acquire().await {
            Ok(permit) => permit,
            // The gate is never closed while the context is alive.
            Err(_) => return,
        };

        // Soft cap: checked at entry only, so tasks admitted before the
        // table filled up may still push it slightly past the limit.
        if ctx.page_cap_reached().await {
            debug!("Page cap reached, dropping {}", raw_url);
            return;
        }

        let current = match Url::parse(&raw_url) {
            Ok(url) => url,
            Err(e) => {
                warn!("Couldn't parse discovered URL {}: {}", raw_url, e);
                return;
            }
        };

        if current.host_str() != Some(ctx.base_host.as_str()) {
            debug!("Skipping foreign host link: {}", raw_url);
            return;
        }

        let key = match normalize_url(&raw_url) {
            Ok(key) => key,
            Err(e) => {
                warn!("Couldn't normalize {}: {}", raw_url, e);
                return;
            }
        };

        if !ctx.record_visit(key).await {
            // Repeat visit. The first visitor already owns this page.
            return;
        }

        info!("Crawling {}", raw_url);

        let body = match ctx.fetcher.fetch(&raw_url).await {
            Ok(body) => body,
            Err(e) => {
                warn!("Fetch failed for {}: {}", raw_url, e);
                return;
            }
        };

        let links = match extract_links(&body, &current) {
            Ok(links) => links,
            Err(e) => {
                warn!("Link extraction failed for {}: {}", raw_url, e);
                return;
            }
        };

        for next_url in links {
            let handle = tokio::spawn(visit(ctx.clone(), next_url));
            ctx.tasks.lock().await.push(handle);
        }
    })
}
