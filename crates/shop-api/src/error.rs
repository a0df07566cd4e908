use thiserror::Error;

/// What the rendering layer gets when a fetch does not produce data. The
/// underlying transport failure is logged where it happens and never
/// crosses this boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Failed to load products. Please try again.")]
    CatalogUnavailable,
    #[error("Category `{0}` not found")]
    CategoryNotFound(String),
    #[error("Product `{0}` not found")]
    ProductNotFound(String),
    #[error("Failed to load categories")]
    CategoriesUnavailable,
}

/// Reasons a single request failed. All of them are treated alike by the
/// callers, which only care about which resource was requested.
#[derive(Error, Debug)]
pub(crate) enum TransportError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("server responded with {0}")]
    Status(reqwest::StatusCode),
    #[error("invalid JSON body: {0}")]
    Body(#[from] serde_json::Error),
    #[error("unexpected payload: {0}")]
    Payload(String),
}

/// Errors constructing a client.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Invalid API base URL `{url}`: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("Failed to create HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}
