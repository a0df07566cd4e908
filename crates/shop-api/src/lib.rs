//! Client for the Fake Store REST API.
//!
//! [`StoreClient`] talks HTTP; everything above it goes through the
//! [`CatalogSource`] trait and only ever sees [`FetchError`] on failure.

pub mod client;
mod error;
pub mod loader;
pub mod source;

pub use client::StoreClient;
pub use error::{ClientError, FetchError};
pub use loader::{LoadResult, Loaded, PendingCatalog, load_catalog, spawn_catalog_load};
pub use source::{CatalogSource, StaticSource};

pub const DEFAULT_API_URL: &str = "https://fakestoreapi.com";

/// Upstream base URL, overridable with `SHOP_API_URL`.
pub fn get_api_base_url() -> String {
    if let Ok(url) = std::env::var("SHOP_API_URL") {
        return url;
    }

    DEFAULT_API_URL.to_string()
}
