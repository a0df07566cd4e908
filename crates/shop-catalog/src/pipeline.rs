//! The catalog query pipeline: filter, then sort, then paginate.
//!
//! Every view is recomputed from the base collection and the current
//! [`QueryState`]; nothing in between is cached. The collections served
//! here are a few thousand items at most.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;

use crate::collate::compare_titles;
use crate::error::CatalogError;
use crate::page::{self, PAGE_SIZE};
use crate::product::Product;
use crate::query::{QueryState, SortOption};

/// Products whose lower-cased title contains `needle`. `needle` must
/// already be trimmed and lower-cased (see [`QueryState::needle`]).
pub fn filter<'a>(products: &'a [Product], needle: &str) -> Vec<&'a Product> {
    products
        .iter()
        .filter(|product| needle.is_empty() || product.title.to_lowercase().contains(needle))
        .collect()
}

/// Stable in-place sort. Descending orders reverse the comparator rather
/// than the output so equal keys keep their incoming order.
pub fn sort(products: &mut [&Product], option: SortOption) {
    match option {
        SortOption::Default => {}
        SortOption::TitleAscending => products.sort_by(|a, b| compare_titles(&a.title, &b.title)),
        SortOption::TitleDescending => products.sort_by(|a, b| compare_titles(&b.title, &a.title)),
        SortOption::PriceAscending => products.sort_by(|a, b| a.price.cmp(&b.price)),
        SortOption::PriceDescending => products.sort_by(|a, b| b.price.cmp(&a.price)),
    }
}

/// Filter and sort according to `state`, ignoring its page.
pub fn arrange<'a>(products: &'a [Product], state: &QueryState) -> Vec<&'a Product> {
    let mut matched = filter(products, &state.needle());
    sort(&mut matched, state.sort);
    matched
}

/// One rendered page of the catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogView {
    pub items: Vec<Product>,
    pub page: usize,
    pub total_pages: usize,
    pub total_filtered: usize,
    pub page_size: usize,
    pub previous_disabled: bool,
    pub next_disabled: bool,
}

impl CatalogView {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Derive the page to display. The page in `state` is clamped against the
/// filtered count, so any state yields a valid view.
pub fn derive_view(products: &[Product], state: &QueryState) -> CatalogView {
    let arranged = arrange(products, state);
    let total_filtered = arranged.len();
    let total_pages = page::total_pages(total_filtered);
    let current = page::clamp_page(state.page, total_pages);

    let items = arranged[page::page_range(current, total_filtered)]
        .iter()
        .map(|product| (*product).clone())
        .collect();

    CatalogView {
        items,
        page: current,
        total_pages,
        total_filtered,
        page_size: PAGE_SIZE,
        previous_disabled: current <= 1,
        next_disabled: current >= total_pages,
    }
}

/// Owns a loaded base collection and the query state applied to it.
#[derive(Debug, Clone)]
pub struct CatalogPipeline {
    products: Arc<[Product]>,
    state: QueryState,
}

impl CatalogPipeline {
    /// Take ownership of the base collection for this session. Ids must be
    /// unique.
    pub fn load(products: impl Into<Arc<[Product]>>) -> Result<Self, CatalogError> {
        let products = products.into();

        let mut seen = HashSet::with_capacity(products.len());
        if let Some(duplicate) = products.iter().find(|p| !seen.insert(p.id)) {
            return Err(CatalogError::DuplicateProductId(duplicate.id));
        }

        log::debug!("Loaded catalog with {} products", products.len());
        Ok(Self {
            products,
            state: QueryState::default(),
        })
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn state(&self) -> &QueryState {
        &self.state
    }

    /// Replace the whole query state, e.g. one restored from the command
    /// line. The page is clamped.
    pub fn apply(&mut self, state: QueryState) {
        let total = self.total_pages_for(&state);
        let page = state.page;
        self.state = state.with_page(page, total);
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.transition(|state| state.with_search_term(term));
    }

    pub fn set_sort_option(&mut self, option: SortOption) {
        self.transition(|state| state.with_sort(option));
    }

    pub fn set_page(&mut self, requested: usize) {
        let total = self.total_pages();
        self.transition(|state| state.with_page(requested, total));
    }

    pub fn next_page(&mut self) {
        let total = self.total_pages();
        self.transition(|state| state.next_page(total));
    }

    pub fn previous_page(&mut self) {
        let total = self.total_pages();
        self.transition(|state| state.previous_page(total));
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages_for(&self.state)
    }

    pub fn current_view(&self) -> CatalogView {
        derive_view(&self.products, &self.state)
    }

    fn total_pages_for(&self, state: &QueryState) -> usize {
        page::total_pages(filter(&self.products, &state.needle()).len())
    }

    fn transition(&mut self, f: impl FnOnce(QueryState) -> QueryState) {
        let state = std::mem::take(&mut self.state);
        self.state = f(state);
        log::trace!("Query state is now {:?}", self.state);
    }
}
