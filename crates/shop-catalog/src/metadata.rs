use serde::Serialize;

use crate::product::Product;

pub const NOT_FOUND_TITLE: &str = "Product Not Found";
pub const NOT_FOUND_DESCRIPTION: &str = "No details available";

/// Title and description attached to a product detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
}

impl PageMetadata {
    pub fn for_product(product: Option<&Product>) -> Self {
        match product {
            Some(product) => Self {
                title: product.title.clone(),
                description: product.description.clone(),
            },
            None => Self::not_found(),
        }
    }

    pub fn not_found() -> Self {
        Self {
            title: NOT_FOUND_TITLE.to_string(),
            description: NOT_FOUND_DESCRIPTION.to_string(),
        }
    }
}
