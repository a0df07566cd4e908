use thiserror::Error;

use crate::product::ProductId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Duplicate product id {0} in catalog")]
    DuplicateProductId(ProductId),
    #[error("Unknown sort option `{0}` (expected one of: default, title-asc, title-desc, price-asc, price-desc)")]
    InvalidSortOption(String),
    #[error("Expected a JSON array of products, found {0}")]
    NotACollection(&'static str),
}

/// Why a single upstream record was refused at the boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("malformed record: {0}")]
    Shape(String),
    #[error("title is empty")]
    EmptyTitle,
    #[error("price {0} is negative")]
    NegativePrice(String),
    #[error("image reference `{0}` is not a valid URI")]
    InvalidImage(String),
    #[error("id {0} already seen earlier in the collection")]
    DuplicateId(ProductId),
}
