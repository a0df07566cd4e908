use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::Value;
use shop_catalog::{Decoded, Product, ProductId, decode_collection, decode_product};
use url::Url;

use crate::error::{ClientError, FetchError, TransportError};
use crate::source::CatalogSource;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Blocking client for the Fake Store REST API.
#[derive(Debug, Clone)]
pub struct StoreClient {
    base_url: Url,
    client: Client,
}

impl StoreClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let client = Client::builder()
            .user_agent(format!("shop/{}", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Self::with_http_client(base_url, client)
    }

    pub fn with_http_client(base_url: &str, client: Client) -> Result<Self, ClientError> {
        let invalid = |reason: &str| ClientError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: reason.to_string(),
        };

        let base_url = Url::parse(base_url).map_err(|e| invalid(&e.to_string()))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(invalid("scheme must be http or https"));
        }
        if base_url.cannot_be_a_base() {
            return Err(invalid("URL cannot be used as a base"));
        }

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build the URL for a resource path. Each segment is percent-encoded,
    /// so category names with spaces or slashes stay a single segment.
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        url.set_query(None);
        url.set_fragment(None);
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn get_json(&self, segments: &[&str]) -> Result<Value, TransportError> {
        let url = self.endpoint(segments);
        log::debug!("GET {url}");

        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status));
        }

        let body = response.text()?;
        Ok(serde_json::from_str(&body)?)
    }

    fn get_collection(&self, segments: &[&str]) -> Result<Decoded, TransportError> {
        let value = self.get_json(segments)?;
        let decoded =
            decode_collection(value).map_err(|e| TransportError::Payload(e.to_string()))?;
        if !decoded.rejected.is_empty() {
            log::warn!(
                "Rejected {} malformed product records from /{}",
                decoded.rejected.len(),
                segments.join("/")
            );
        }
        Ok(decoded)
    }
}

impl CatalogSource for StoreClient {
    fn fetch_products(&self) -> Result<Decoded, FetchError> {
        self.get_collection(&["products"]).map_err(|e| {
            log::warn!("Failed to fetch products: {e}");
            FetchError::CatalogUnavailable
        })
    }

    fn fetch_product(&self, id: ProductId) -> Result<Product, FetchError> {
        let fetched = self
            .get_json(&["products", &id.to_string()])
            .and_then(|value| {
                decode_product(value).map_err(|e| TransportError::Payload(e.to_string()))
            });

        fetched.map_err(|e| {
            log::warn!("Failed to fetch product {id}: {e}");
            FetchError::ProductNotFound(id.to_string())
        })
    }

    fn fetch_category(&self, name: &str) -> Result<Decoded, FetchError> {
        self.get_collection(&["products", "category", name])
            .map_err(|e| {
                log::warn!("Failed to fetch category `{name}`: {e}");
                FetchError::CategoryNotFound(name.to_string())
            })
    }

    fn fetch_categories(&self) -> Result<Vec<String>, FetchError> {
        let fetched = self
            .get_json(&["products", "categories"])
            .and_then(|value| {
                serde_json::from_value::<Vec<String>>(value).map_err(TransportError::from)
            });

        fetched.map_err(|e| {
            log::warn!("Failed to fetch categories: {e}");
            FetchError::CategoriesUnavailable
        })
    }
}
