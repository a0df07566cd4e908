use std::io::{self, Write};

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use shop_api::CatalogSource;
use shop_catalog::pipeline::arrange;
use shop_catalog::{Product, QueryState, SortOption, category_label};

use crate::render::{CATEGORY_NOT_FOUND, NO_CATEGORY_PRODUCTS, write_product_table};

#[derive(Args, Debug, Clone)]
#[command(about = "List product categories")]
pub struct CategoriesArgs {
    /// Print the raw category names as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
#[command(about = "Show the products of one category")]
pub struct CategoryArgs {
    /// Category name as listed by `shop categories --json`
    pub name: String,

    /// Sort order: default, title-asc, title-desc, price-asc, price-desc
    #[arg(long, default_value_t = SortOption::Default)]
    pub sort: SortOption,
}

pub fn execute_categories(args: CategoriesArgs, source: &dyn CatalogSource) -> Result<()> {
    let categories = source.fetch_categories()?;

    let mut writer = io::stdout().lock();
    if args.json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&categories)?)?;
        return Ok(());
    }

    writeln!(writer, "{}", "Product Categories".bold())?;
    for name in &categories {
        writeln!(writer, "• {}", category_label(name))?;
    }
    Ok(())
}

pub fn execute_category(args: CategoryArgs, source: &dyn CatalogSource) -> Result<()> {
    let decoded = match source.fetch_category(&args.name) {
        Ok(decoded) => decoded,
        Err(e) => {
            println!("{}", CATEGORY_NOT_FOUND.bold());
            return Err(e.into());
        }
    };
    let state = QueryState::default().with_sort(args.sort);
    let products: Vec<Product> = arrange(&decoded.products, &state)
        .into_iter()
        .cloned()
        .collect();

    let mut writer = io::stdout().lock();
    writeln!(writer, "{}", category_label(&args.name).bold())?;
    writeln!(writer, "{}", "← shop categories".dimmed())?;

    if products.is_empty() {
        writeln!(writer, "{NO_CATEGORY_PRODUCTS}")?;
    } else {
        write_product_table(&products, &mut writer)?;
    }
    Ok(())
}
