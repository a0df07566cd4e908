use std::io::{self, Write};

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use shop_api::{CatalogSource, FetchError};
use shop_catalog::{PageMetadata, Product, ProductId};

use crate::render::write_product_detail;

#[derive(Args, Debug, Clone)]
#[command(about = "Show a single product")]
pub struct ProductArgs {
    /// Product id
    pub id: String,

    /// Print page metadata and the product as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct ProductOutput<'a> {
    metadata: PageMetadata,
    product: Option<&'a Product>,
}

/// Fetch a product by its route id. Ids that are not numbers cannot exist
/// upstream and are reported the same way as unknown ones.
pub fn fetch(source: &dyn CatalogSource, raw_id: &str) -> Result<Product, FetchError> {
    let id: ProductId = raw_id
        .parse()
        .map_err(|_| FetchError::ProductNotFound(raw_id.to_string()))?;
    source.fetch_product(id)
}

pub fn execute(args: ProductArgs, source: &dyn CatalogSource) -> Result<()> {
    let fetched = fetch(source, &args.id);
    let product = fetched.as_ref().ok();

    let mut writer = io::stdout().lock();
    if args.json {
        let output = ProductOutput {
            metadata: PageMetadata::for_product(product),
            product,
        };
        writeln!(writer, "{}", serde_json::to_string_pretty(&output)?)?;
    } else {
        match product {
            Some(product) => write_product_detail(product, &mut writer)?,
            None => writeln!(writer, "{}", PageMetadata::not_found().title.bold())?,
        }
    }

    fetched?;
    Ok(())
}
