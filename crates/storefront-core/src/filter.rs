//! # Filter Engine
//!
//! Derives the visible product list from the catalog and the user's criteria.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Catalog ──► 1. search ──► 2. category ──► 3. sort ──► visible list     │
//! │              name contains   exact match      stable by                 │
//! │              (ignore case)   ("all" = off)    price                     │
//! │                                                                         │
//! │  The catalog is never mutated. Each call starts from scratch.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::catalog::Catalog;
use crate::error::ValidationError;
use crate::types::Product;

/// Category value that means "no category filter".
pub const ALL_CATEGORIES: &str = "all";

// =============================================================================
// Sort Order
// =============================================================================

/// Price sort applied after filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum SortOrder {
    /// Catalog order.
    #[default]
    #[serde(rename = "default")]
    None,
    #[serde(rename = "low-to-high")]
    PriceAscending,
    #[serde(rename = "high-to-low")]
    PriceDescending,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::None => "default",
            SortOrder::PriceAscending => "low-to-high",
            SortOrder::PriceDescending => "high-to-low",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "default" | "none" => Ok(SortOrder::None),
            "low-to-high" | "asc" => Ok(SortOrder::PriceAscending),
            "high-to-low" | "desc" => Ok(SortOrder::PriceDescending),
            _ => Err(ValidationError::NotAllowed {
                field: "sort".to_string(),
                allowed: vec![
                    "default".to_string(),
                    "low-to-high".to_string(),
                    "high-to-low".to_string(),
                ],
            }),
        }
    }
}

// =============================================================================
// Filter Criteria
// =============================================================================

/// The user's current filter selection. Transient, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterCriteria {
    /// Search text, matched verbatim (no trimming).
    pub search: String,
    /// Selected category; `None` shows every category.
    pub category: Option<String>,
    pub sort: SortOrder,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Sets the category. `""` and `"all"` clear it.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.set_category(category);
        self
    }

    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        let category = category.into();
        self.category = if is_all_categories(&category) {
            None
        } else {
            Some(category)
        };
    }

    /// True when any of search, category or sort is set.
    pub fn has_active_filters(&self) -> bool {
        !self.search.is_empty() || self.selected_category().is_some() || self.sort != SortOrder::None
    }

    /// Resets search, category and sort.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Category in effect, treating `""` and `"all"` as no selection.
    pub fn selected_category(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !is_all_categories(c))
    }
}

fn is_all_categories(category: &str) -> bool {
    category.is_empty() || category == ALL_CATEGORIES
}

// =============================================================================
// Pipeline
// =============================================================================

/// Case-insensitive substring match on the product name.
///
/// Empty search text matches everything.
pub fn matches_search(product: &Product, search: &str) -> bool {
    search.is_empty() || product.name.to_lowercase().contains(&search.to_lowercase())
}

/// Exact category match. `None` matches everything.
pub fn matches_category(product: &Product, category: Option<&str>) -> bool {
    category.map_or(true, |c| product.category == c)
}

/// Stable sort by unit price.
pub fn sort_by_price(products: &mut [&Product], order: SortOrder) {
    match order {
        SortOrder::None => {}
        SortOrder::PriceAscending => products.sort_by(|a, b| a.price.cmp(&b.price)),
        SortOrder::PriceDescending => products.sort_by(|a, b| b.price.cmp(&a.price)),
    }
}

/// Applies search, then category, then sort.
///
/// ## Example
/// ```rust
/// use storefront_core::{apply, fallback_catalog, FilterCriteria};
///
/// let catalog = fallback_catalog();
/// let criteria = FilterCriteria::new().with_search("lap");
/// let names: Vec<&str> = apply(&catalog, &criteria).iter().map(|p| p.name.as_str()).collect();
/// assert_eq!(names, vec!["Laptop"]);
/// ```
pub fn apply<'a>(catalog: &'a Catalog, criteria: &FilterCriteria) -> Vec<&'a Product> {
    let category = criteria.selected_category();

    let mut visible: Vec<&Product> = catalog
        .products()
        .iter()
        .filter(|p| matches_search(p, &criteria.search))
        .filter(|p| matches_category(p, category))
        .collect();

    sort_by_price(&mut visible, criteria.sort);
    visible
}

/// Distinct categories across the whole catalog, sorted.
pub fn categories(catalog: &Catalog) -> Vec<String> {
    catalog
        .products()
        .iter()
        .map(|p| p.category.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Display label for a category slug: `"home-decoration"` → `"Home Decoration"`.
pub fn category_label(category: &str) -> String {
    category
        .split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// =============================================================================
// Unit Tests
// =============================================================================
