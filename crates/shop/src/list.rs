use std::io::{self, Write};
use std::sync::Arc;

use anyhow::Result;
use clap::{Args, ValueEnum};
use serde::Serialize;
use shop_api::CatalogSource;
use shop_catalog::{CatalogView, QueryState, SortOption};

use crate::load::load_with_spinner;
use crate::render::{NO_PRODUCTS, write_catalog_view};

#[derive(ValueEnum, Debug, Clone, Default)]
pub enum ListFormat {
    #[default]
    Table,
    Json,
}

impl std::fmt::Display for ListFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListFormat::Table => write!(f, "table"),
            ListFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Args, Debug, Clone)]
#[command(about = "List products with search, sorting and pagination")]
pub struct ListArgs {
    /// Only show products whose title contains this text (case-insensitive)
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Sort order: default, title-asc, title-desc, price-asc, price-desc
    #[arg(long, default_value_t = SortOption::Default)]
    pub sort: SortOption,

    /// Page to show; out-of-range pages are clamped
    #[arg(short, long, default_value_t = 1)]
    pub page: usize,

    /// Output format
    #[arg(short, long, default_value_t = ListFormat::Table)]
    pub format: ListFormat,
}

#[derive(Serialize)]
struct ListOutput<'a> {
    query: &'a QueryState,
    view: &'a CatalogView,
    rejected: usize,
}

pub fn execute(args: ListArgs, source: Arc<dyn CatalogSource>) -> Result<()> {
    let loaded = match load_with_spinner(source) {
        Ok(loaded) => loaded,
        Err(e) => {
            if matches!(args.format, ListFormat::Table) {
                println!("{NO_PRODUCTS}");
            }
            return Err(e.into());
        }
    };

    let mut pipeline = loaded.pipeline;
    pipeline.set_search_term(args.search);
    pipeline.set_sort_option(args.sort);
    pipeline.set_page(args.page);
    let view = pipeline.current_view();

    let mut writer = io::stdout().lock();
    match args.format {
        ListFormat::Json => {
            let output = ListOutput {
                query: pipeline.state(),
                view: &view,
                rejected: loaded.rejected.len(),
            };
            writeln!(writer, "{}", serde_json::to_string_pretty(&output)?)?;
        }
        ListFormat::Table => write_catalog_view(&view, writer)?,
    }

    Ok(())
}
