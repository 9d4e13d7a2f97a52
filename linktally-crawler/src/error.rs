use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrawlError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP error status: {0}")]
    HttpStatus(u16),

    #[error("Unsupported content type: {0}")]
    UnsupportedContentType(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Task join error: {0}")]
    Join(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, CrawlError>;
