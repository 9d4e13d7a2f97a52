pub mod crawler;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod normalize;
pub mod report;

pub use crawler::Crawler;
pub use error::CrawlError;
pub use fetch::HttpFetcher;
pub use report::PageCount;
