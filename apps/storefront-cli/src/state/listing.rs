//! # Listing State
//!
//! The catalog plus the user's current filter selection.

use std::sync::Arc;

use storefront_core::{apply, category_label, Catalog, FilterCriteria, Product, SortOrder};
use tracing::debug;

/// Derives the visible product list from the catalog and filter criteria.
#[derive(Debug, Clone)]
pub struct ListingState {
    catalog: Arc<Catalog>,
    criteria: FilterCriteria,
}

impl ListingState {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        ListingState {
            catalog,
            criteria: FilterCriteria::default(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Products matching the current criteria, recomputed on every call.
    pub fn visible(&self) -> Vec<&Product> {
        apply(&self.catalog, &self.criteria)
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.criteria.search = search.into();
        debug!(search = %self.criteria.search, "Search updated");
    }

    /// `""` and `"all"` select every category.
    pub fn set_category(&mut self, category: impl Into<String>) {
        self.criteria.set_category(category);
        debug!(category = ?self.criteria.category, "Category updated");
    }

    pub fn set_sort(&mut self, sort: SortOrder) {
        self.criteria.sort = sort;
        debug!(sort = %sort, "Sort updated");
    }

    pub fn has_active_filters(&self) -> bool {
        self.criteria.has_active_filters()
    }

    pub fn clear_filters(&mut self) {
        self.criteria.clear();
        debug!("Filters cleared");
    }

    /// `(slug, label)` pairs for the category selector.
    pub fn category_options(&self) -> Vec<(String, String)> {
        self.catalog
            .categories()
            .into_iter()
            .map(|slug| {
                let label = category_label(&slug);
                (slug, label)
            })
            .collect()
    }
}
