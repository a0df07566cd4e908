#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use colored::Colorize;
use env_logger::Env;
use shop_api::{CatalogSource, StoreClient};

mod browse;
mod categories;
mod list;
mod load;
mod product;
mod render;
mod tty;

#[derive(Parser)]
#[command(name = "shop")]
#[command(about = "Browse the Fake Store catalog from the terminal", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short = 'd', long = "debug", global = true, hide = true)]
    debug: bool,

    /// Catalog API base URL (defaults to $SHOP_API_URL or https://fakestoreapi.com)
    #[arg(long = "api-url", global = true, value_name = "URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products with search, sorting and pagination
    #[command(alias = "ls")]
    List(list::ListArgs),

    /// Browse the catalog interactively
    #[command(alias = "b")]
    Browse(browse::BrowseArgs),

    /// List product categories
    Categories(categories::CategoriesArgs),

    /// Show the products of one category
    Category(categories::CategoryArgs),

    /// Show a single product
    #[command(alias = "p")]
    Product(product::ProductArgs),
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {e}", "Error:".red());
        for cause in e.chain().skip(1) {
            eprintln!("  {cause}");
        }
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Default level depends on --debug; RUST_LOG still wins.
    let env = if cli.debug {
        Env::default().default_filter_or("debug")
    } else {
        Env::default().default_filter_or("error")
    };
    env_logger::Builder::from_env(env).init();

    let base_url = cli.api_url.unwrap_or_else(shop_api::get_api_base_url);
    let client = StoreClient::new(&base_url)?;
    log::debug!("Using catalog API at {}", client.base_url());
    let source: Arc<dyn CatalogSource> = Arc::new(client);

    match cli.command {
        Commands::List(args) => list::execute(args, source),
        Commands::Browse(args) => browse::execute(args, source),
        Commands::Categories(args) => categories::execute_categories(args, source.as_ref()),
        Commands::Category(args) => categories::execute_category(args, source.as_ref()),
        Commands::Product(args) => product::execute(args, source.as_ref()),
    }
}
