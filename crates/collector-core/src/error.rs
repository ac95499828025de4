use thiserror::Error;

/// Failure retrieving or extracting one article. Soft: the article is skipped.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Request failed for {url}: {message}")]
    Request { url: String, message: String },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("No readable content at {0}")]
    EmptyContent(String),
}

/// Persistence failure. Hard: aborts the current pass.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Read error: {0}")]
    Read(String),

    #[error("Write error: {0}")]
    Write(String),

    #[error("Decode error: {0}")]
    Decode(String),
}

/// Asset or article listing failure. Hard: aborts the whole cycle.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

#[derive(Error, Debug)]
pub enum CollectorError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

pub type CollectorResult<T> = Result<T, CollectorError>;
