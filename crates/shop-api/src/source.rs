use std::collections::BTreeMap;

use shop_catalog::{Decoded, Product, ProductId};

use crate::error::FetchError;

/// Read-only access to the upstream catalog, one call per resource.
///
/// Implementations convert every transport problem into the matching
/// [`FetchError`] variant; callers never see the underlying cause.
pub trait CatalogSource: Send + Sync {
    fn fetch_products(&self) -> Result<Decoded, FetchError>;

    fn fetch_product(&self, id: ProductId) -> Result<Product, FetchError>;

    /// Products of one category. An unknown category is
    /// [`FetchError::CategoryNotFound`]; a known but empty one is `Ok`.
    fn fetch_category(&self, name: &str) -> Result<Decoded, FetchError>;

    fn fetch_categories(&self) -> Result<Vec<String>, FetchError>;
}

/// A source serving a fixed product list, grouped by each product's
/// category. `None` simulates an upstream that is down.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    products: Option<Vec<Product>>,
    categories: BTreeMap<String, Vec<Product>>,
}

impl StaticSource {
    pub fn new(products: Vec<Product>) -> Self {
        let mut categories: BTreeMap<String, Vec<Product>> = BTreeMap::new();
        for product in &products {
            categories
                .entry(product.category.clone())
                .or_default()
                .push(product.clone());
        }
        Self {
            products: Some(products),
            categories,
        }
    }

    pub fn unavailable() -> Self {
        Self::default()
    }

    /// Register a category with no products in it.
    pub fn with_empty_category(mut self, name: impl Into<String>) -> Self {
        self.categories.entry(name.into()).or_default();
        self
    }
}

impl CatalogSource for StaticSource {
    fn fetch_products(&self) -> Result<Decoded, FetchError> {
        let products = self.products.clone().ok_or(FetchError::CatalogUnavailable)?;
        Ok(Decoded {
            products,
            rejected: Vec::new(),
        })
    }

    fn fetch_product(&self, id: ProductId) -> Result<Product, FetchError> {
        self.products
            .iter()
            .flatten()
            .find(|product| product.id == id)
            .cloned()
            .ok_or_else(|| FetchError::ProductNotFound(id.to_string()))
    }

    fn fetch_category(&self, name: &str) -> Result<Decoded, FetchError> {
        match (&self.products, self.categories.get(name)) {
            (Some(_), Some(products)) => Ok(Decoded {
                products: products.clone(),
                rejected: Vec::new(),
            }),
            _ => Err(FetchError::CategoryNotFound(name.to_string())),
        }
    }

    fn fetch_categories(&self) -> Result<Vec<String>, FetchError> {
        match self.products {
            Some(_) => Ok(self.categories.keys().cloned().collect()),
            None => Err(FetchError::CategoriesUnavailable),
        }
    }
}
