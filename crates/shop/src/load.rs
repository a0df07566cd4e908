use std::sync::Arc;
use std::time::Duration;

use colored::Colorize;
use indicatif::ProgressBar;
use shop_api::{CatalogSource, LoadResult, spawn_catalog_load};

const SLOW_LOAD: Duration = Duration::from_secs(5);

/// Load the base collection behind a spinner.
pub fn load_with_spinner(source: Arc<dyn CatalogSource>) -> LoadResult {
    let spinner = ProgressBar::new_spinner();
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message("Loading products...");

    let mut pending = spawn_catalog_load(source);
    let mut warned = false;
    let result = loop {
        if let Some(result) = pending.wait_timeout(Duration::from_millis(100)) {
            break result;
        }
        if !warned && pending.elapsed() > SLOW_LOAD {
            spinner.set_message("Still loading products...");
            warned = true;
        }
    };
    spinner.finish_and_clear();

    if let Ok(loaded) = &result {
        if !loaded.rejected.is_empty() {
            eprintln!(
                "{} Skipped {} malformed product records (run with --debug for details)",
                "!".yellow(),
                loaded.rejected.len()
            );
        }
    }

    result
}
