use std::io::{self, Write};

use colored::Colorize;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{CellAlignment, Table};
use shop_catalog::{CatalogView, PageMetadata, Product, category_label};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const NO_PRODUCTS: &str = "No products found.";
pub const NO_CATEGORY_PRODUCTS: &str = "No products found in this category.";
pub const CATEGORY_NOT_FOUND: &str = "Category Not Found";

pub fn get_terminal_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(80)
}

pub fn get_terminal_height() -> usize {
    terminal_size::terminal_size()
        .map(|(_, h)| h.0 as usize)
        .unwrap_or(24)
}

/// Cut `text` to at most `max_width` columns, marking the cut with `...`
/// when there is room for it.
pub fn truncate_text(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }

    let (budget, marker) = match max_width.checked_sub(3) {
        Some(budget) => (budget, "..."),
        None => (max_width, ""),
    };

    let mut result = String::new();
    let mut width = 0;
    for ch in text.chars() {
        let char_width = ch.width().unwrap_or(0);
        if width + char_width > budget {
            break;
        }
        result.push(ch);
        width += char_width;
    }

    result + marker
}

pub fn write_product_table<W: Write>(products: &[Product], mut writer: W) -> io::Result<()> {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(comfy_table::ContentArrangement::DynamicFullWidth);
    table.set_header(vec!["ID", "Title", "Category", "Price"]);

    for product in products {
        table.add_row(vec![
            product.id.to_string(),
            product.title.clone(),
            category_label(&product.category),
            product.display_price(),
        ]);
    }

    if let Some(column) = table.column_mut(3) {
        column.set_cell_alignment(CellAlignment::Right);
    }

    writeln!(writer, "{table}")
}

/// `Page 2 of 3` with the previous/next affordances dimmed when disabled.
pub fn pagination_footer(view: &CatalogView) -> String {
    let previous = if view.previous_disabled {
        "◀ Previous".dimmed()
    } else {
        "◀ Previous".blue()
    };
    let next = if view.next_disabled {
        "Next ▶".dimmed()
    } else {
        "Next ▶".blue()
    };
    let status = format!("Page {} of {}", view.page, view.total_pages);

    format!("{previous}   {}   {next}", status.bold())
}

pub fn write_catalog_view<W: Write>(view: &CatalogView, mut writer: W) -> io::Result<()> {
    if view.is_empty() {
        writeln!(writer, "{}", NO_PRODUCTS.bold())?;
    } else {
        write_product_table(&view.items, &mut writer)?;
    }

    // Pagination is only shown when something matched.
    if view.total_filtered > 0 {
        writeln!(
            writer,
            "{}  {}",
            pagination_footer(view),
            format!("({} products)", view.total_filtered).dimmed()
        )?;
    }
    Ok(())
}

pub fn write_product_detail<W: Write>(product: &Product, mut writer: W) -> io::Result<()> {
    let metadata = PageMetadata::for_product(Some(product));

    writeln!(writer, "{}", metadata.title.bold())?;
    writeln!(writer, "{}", category_label(&product.category).yellow())?;
    writeln!(writer)?;
    if !metadata.description.is_empty() {
        writeln!(writer, "{}", metadata.description)?;
        writeln!(writer)?;
    }
    writeln!(writer, "{}", product.display_price().green().bold())?;
    if let Some(rating) = &product.rating {
        writeln!(
            writer,
            "{} {:.1} ({} reviews)",
            "Rating:".cyan(),
            rating.rate,
            rating.count
        )?;
    }
    writeln!(writer, "{} {}", "Image:".cyan(), product.image)?;
    writeln!(writer)?;
    writeln!(writer, "{}", "[ Add to Cart ]".blue().dimmed())
}
