//! # shop-catalog
//!
//! Product records and the in-memory query pipeline behind the storefront
//! listing: search by title, sort, and paginate a collection fetched once
//! from the upstream API.
//!
//! ```rust
//! use shop_catalog::{CatalogPipeline, Product, SortOption};
//!
//! let mut pipeline = CatalogPipeline::load(Vec::<Product>::new()).unwrap();
//! pipeline.set_search_term("jacket");
//! pipeline.set_sort_option(SortOption::PriceAscending);
//! let view = pipeline.current_view();
//! assert_eq!(view.total_pages, 1);
//! assert!(view.items.is_empty());
//! ```

pub mod category;
pub mod collate;
mod error;
pub mod metadata;
pub mod page;
pub mod pipeline;
pub mod product;
pub mod query;

pub use category::category_label;
pub use error::{CatalogError, RecordError};
pub use metadata::PageMetadata;
pub use page::PAGE_SIZE;
pub use pipeline::{CatalogPipeline, CatalogView, derive_view};
pub use product::{
    Decoded, Product, ProductId, Rating, Rejected, decode_collection, decode_product, format_price,
};
pub use query::{QueryState, SortOption};
