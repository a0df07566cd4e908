use std::fmt;
use std::io;
use std::sync::Arc;

use anyhow::{Result, bail};
use clap::Args;
use colored::Colorize;
use inquire::{Select, Text};
use shop_api::CatalogSource;
use shop_catalog::{CatalogPipeline, CatalogView, PageMetadata, Product, SortOption};

use crate::load::load_with_spinner;
use crate::render::{
    NO_PRODUCTS, get_terminal_height, get_terminal_width, truncate_text, write_catalog_view,
    write_product_detail,
};
use crate::{product, tty};

#[derive(Args, Debug, Clone)]
#[command(about = "Browse the catalog interactively")]
pub struct BrowseArgs {
    /// Initial search term
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Initial sort order
    #[arg(long, default_value_t = SortOption::Default)]
    pub sort: SortOption,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Search,
    Sort,
    Previous,
    Next,
    Open,
    Quit,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Action::Search => "Search products",
            Action::Sort => "Change sort order",
            Action::Previous => "◀ Previous page",
            Action::Next => "Next page ▶",
            Action::Open => "Open a product",
            Action::Quit => "Quit",
        };
        f.write_str(label)
    }
}

/// Actions offered for `view`. Disabled pagination controls are left out.
fn actions(view: &CatalogView) -> Vec<Action> {
    let mut actions = vec![Action::Search, Action::Sort];
    if !view.previous_disabled {
        actions.push(Action::Previous);
    }
    if !view.next_disabled {
        actions.push(Action::Next);
    }
    if !view.is_empty() {
        actions.push(Action::Open);
    }
    actions.push(Action::Quit);
    actions
}

pub fn execute(args: BrowseArgs, source: Arc<dyn CatalogSource>) -> Result<()> {
    if !tty::is_interactive() {
        bail!("`shop browse` needs an interactive terminal; use `shop list` instead");
    }

    let loaded = match load_with_spinner(source.clone()) {
        Ok(loaded) => loaded,
        Err(e) => {
            println!("{NO_PRODUCTS}");
            return Err(e.into());
        }
    };

    let mut pipeline = loaded.pipeline;
    pipeline.set_search_term(args.search);
    pipeline.set_sort_option(args.sort);

    loop {
        let view = pipeline.current_view();
        println!();
        write_catalog_view(&view, io::stdout().lock())?;

        let prompt = Select::new("What next?", actions(&view));
        let Some(action) = prompt.prompt_skippable()? else {
            return Ok(());
        };

        match action {
            Action::Search => prompt_search(&mut pipeline)?,
            Action::Sort => prompt_sort(&mut pipeline)?,
            Action::Previous => pipeline.previous_page(),
            Action::Next => pipeline.next_page(),
            Action::Open => {
                if let Some(selected) = prompt_product(&view.items)? {
                    show_product(source.as_ref(), selected);
                }
            }
            Action::Quit => return Ok(()),
        }
    }
}

fn prompt_search(pipeline: &mut CatalogPipeline) -> Result<()> {
    let current = pipeline.state().search_term.clone();
    if let Some(term) = Text::new("Search:")
        .with_initial_value(&current)
        .with_help_message("Matches product titles, case-insensitive. Leave empty to show all.")
        .prompt_skippable()?
    {
        pipeline.set_search_term(term);
    }
    Ok(())
}

fn prompt_sort(pipeline: &mut CatalogPipeline) -> Result<()> {
    let current = SortOption::ALL
        .iter()
        .position(|option| *option == pipeline.state().sort)
        .unwrap_or(0);
    let labels: Vec<&str> = SortOption::ALL.iter().map(|option| option.label()).collect();

    let selected = Select::new("Sort by:", labels)
        .with_starting_cursor(current)
        .raw_prompt_skippable()?;
    if let Some(selected) = selected {
        pipeline.set_sort_option(SortOption::ALL[selected.index]);
    }
    Ok(())
}

fn prompt_product(items: &[Product]) -> Result<Option<&Product>> {
    let width = get_terminal_width().saturating_sub(20).max(20);
    let labels: Vec<String> = items
        .iter()
        .map(|p| {
            let title = truncate_text(&p.title, width);
            format!("{title} {}", p.display_price().green())
        })
        .collect();
    let page_size = get_terminal_height().saturating_sub(5).max(5);

    let selected = Select::new("Open product:", labels)
        .with_page_size(page_size)
        .raw_prompt_skippable()?;
    Ok(selected.map(|selected| &items[selected.index]))
}

/// Show the detail view, re-fetched so it reflects the upstream record.
fn show_product(source: &dyn CatalogSource, selected: &Product) {
    println!();
    let detail = product::fetch(source, &selected.id.to_string());
    let written = match &detail {
        Ok(detail) => write_product_detail(detail, io::stdout().lock()),
        Err(e) => {
            log::warn!("{e}");
            println!("{}", PageMetadata::not_found().title.bold());
            Ok(())
        }
    };
    if let Err(e) = written {
        log::warn!("Failed to write product detail: {e}");
    }
}
