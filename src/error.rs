use thiserror::Error;

/// Why a single source produced no items.
///
/// These never leave the fetcher: a failing source degrades to an empty
/// item list so the other sources still render.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("malformed response: {0}")]
    Json(#[from] serde_json::Error),
    #[error("feed service reported '{0}'")]
    ServiceStatus(String),
    #[error("response has no items")]
    MissingItems,
    #[error("invalid link: {0}")]
    Link(#[from] url::ParseError),
}

/// A source descriptor that could never produce properly attributed items.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SourceError {
    #[error("source name must not be empty")]
    EmptyName,
    #[error("source '{0}': url must not be empty")]
    EmptyUrl(String),
    #[error("invalid community name '{0}'")]
    InvalidCommunity(String),
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PageError {
    #[error("page size must be greater than zero")]
    ZeroPageSize,
    #[error("page {index} is out of range (total pages: {total_pages})")]
    InvalidPage { index: usize, total_pages: usize },
}
