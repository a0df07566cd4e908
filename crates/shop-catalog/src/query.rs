use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::page;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    /// Upstream fetch order.
    #[default]
    Default,
    TitleAscending,
    TitleDescending,
    PriceAscending,
    PriceDescending,
}

impl SortOption {
    pub const ALL: [SortOption; 5] = [
        SortOption::Default,
        SortOption::TitleAscending,
        SortOption::TitleDescending,
        SortOption::PriceAscending,
        SortOption::PriceDescending,
    ];

    /// Stable machine name, accepted back by [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Default => "default",
            SortOption::TitleAscending => "title-asc",
            SortOption::TitleDescending => "title-desc",
            SortOption::PriceAscending => "price-asc",
            SortOption::PriceDescending => "price-desc",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortOption::Default => "Sort By",
            SortOption::TitleAscending => "Name: A → Z",
            SortOption::TitleDescending => "Name: Z → A",
            SortOption::PriceAscending => "Price: Low to High",
            SortOption::PriceDescending => "Price: High to Low",
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOption {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "default" => Ok(SortOption::Default),
            "title-asc" | "name-asc" | "title-ascending" => Ok(SortOption::TitleAscending),
            "title-desc" | "name-desc" | "title-descending" => Ok(SortOption::TitleDescending),
            "price-asc" | "price-ascending" => Ok(SortOption::PriceAscending),
            "price-desc" | "price-descending" => Ok(SortOption::PriceDescending),
            _ => Err(CatalogError::InvalidSortOption(s.to_string())),
        }
    }
}

/// The user's current view parameters.
///
/// Transitions consume the state and return the next one, so the owner
/// decides when a new state takes effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryState {
    pub search_term: String,
    pub sort: SortOption,
    pub page: usize,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            sort: SortOption::Default,
            page: 1,
        }
    }
}

impl QueryState {
    /// Lower-cased, trimmed form of the search term used for matching.
    pub fn needle(&self) -> String {
        self.search_term.trim().to_lowercase()
    }

    /// A new search term always sends the user back to the first page.
    pub fn with_search_term(self, term: impl Into<String>) -> Self {
        Self {
            search_term: term.into(),
            page: 1,
            ..self
        }
    }

    pub fn with_sort(self, sort: SortOption) -> Self {
        Self { sort, ..self }
    }

    pub fn with_page(self, requested: usize, total_pages: usize) -> Self {
        Self {
            page: page::clamp_page(requested, total_pages),
            ..self
        }
    }

    pub fn next_page(self, total_pages: usize) -> Self {
        let requested = self.page.saturating_add(1);
        self.with_page(requested, total_pages)
    }

    pub fn previous_page(self, total_pages: usize) -> Self {
        let requested = self.page.saturating_sub(1);
        self.with_page(requested, total_pages)
    }
}
