//! # Product Commands
//!
//! Catalog listing, category selector and product detail view.
//!
//! ## Listing Output
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  storefront products --category home --sort asc                         │
//! │                                                                         │
//! │    #16  Pillow                  $24.99  home            stock 40        │
//! │     #8  Desk Lamp               $34.99  home            out of stock    │
//! │    #15  Blender                 $49.99  home            stock 10        │
//! │     #7  Coffee Maker            $89.99  home            [2 in cart]     │
//! │                                                                         │
//! │  4 of 20 products                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use serde::Serialize;
use storefront_catalog::CatalogOrigin;
use storefront_core::{FilterCriteria, Product, ProductId, SortOrder};
use storefront_store::KeyValueStore;
use tracing::debug;

use crate::cli::ProductArgs;
use crate::error::CliResult;
use crate::state::{ListingState, Session};

// =============================================================================
// Responses
// =============================================================================

/// A product as shown in listings, with its cart quantity.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    #[serde(flatten)]
    pub product: Product,
    pub in_stock: bool,
    pub in_cart: u32,
}

impl ProductView {
    fn new<S: KeyValueStore>(product: &Product, session: &Session<S>) -> Self {
        ProductView {
            product: product.clone(),
            in_stock: !product.is_out_of_stock(),
            in_cart: session.store.quantity_of(product.id),
        }
    }
}

/// Result of `products`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListResponse {
    pub origin: CatalogOrigin,
    pub criteria: FilterCriteria,
    pub total: usize,
    pub products: Vec<ProductView>,
}

impl fmt::Display for ProductListResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.origin == CatalogOrigin::Fallback {
            writeln!(f, "(offline catalog)")?;
        }

        if self.products.is_empty() {
            return writeln!(f, "No products found matching your criteria.");
        }

        for view in &self.products {
            let p = &view.product;
            let availability = if view.in_cart > 0 {
                format!("[{} in cart]", view.in_cart)
            } else if view.in_stock {
                format!("stock {}", p.stock)
            } else {
                "out of stock".to_string()
            };
            writeln!(
                f,
                "{:>5}  {:<30} {:>10}  {:<16} {}",
                format!("#{}", p.id),
                p.name,
                p.price.to_string(),
                p.category,
                availability
            )?;
        }
        writeln!(f)?;
        writeln!(f, "{} of {} products", self.products.len(), self.total)
    }
}

/// One entry of the category selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryOption {
    pub slug: String,
    pub label: String,
}

/// Result of `categories`.
#[derive(Debug, Clone, Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<CategoryOption>,
}

impl fmt::Display for CategoriesResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<20} All Categories", "all")?;
        for c in &self.categories {
            writeln!(f, "{:<20} {}", c.slug, c.label)?;
        }
        Ok(())
    }
}

/// Result of `show <id>`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetailResponse {
    #[serde(flatten)]
    pub product: Product,
    pub in_stock: bool,
    pub in_cart: u32,
    /// Units that can still be added.
    pub available_to_add: u32,
}

impl fmt::Display for ProductDetailResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = &self.product;
        writeln!(f, "{} (#{})", p.name, p.id)?;
        writeln!(f, "Category:  {}", storefront_core::category_label(&p.category))?;
        writeln!(f, "Price:     {}", p.price)?;
        if self.in_stock {
            writeln!(f, "Stock:     {} available", p.stock)?;
        } else {
            writeln!(f, "Stock:     Out of stock")?;
        }
        if self.in_cart > 0 {
            writeln!(f, "In cart:   {}", self.in_cart)?;
        }
        if let Some(image) = &p.image {
            writeln!(f, "Image:     {}", image)?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{}",
            p.description.as_deref().unwrap_or("No description available.")
        )
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Applies `args` to the listing state.
///
/// Unset arguments leave the current selection alone, so the shell can
/// change one filter at a time.
pub fn apply_args(listing: &mut ListingState, args: &ProductArgs) {
    if let Some(search) = &args.search {
        listing.set_search(search.clone());
    }
    if let Some(category) = &args.category {
        listing.set_category(category.clone());
    }
    if let Some(sort) = args.sort {
        listing.set_sort(sort);
    }
}

/// Lists the products visible under the session's current criteria.
pub fn list_products<S: KeyValueStore>(session: &Session<S>) -> ProductListResponse {
    let visible = session.listing.visible();
    debug!(
        visible = visible.len(),
        criteria = ?session.listing.criteria(),
        "list_products command"
    );

    ProductListResponse {
        origin: session.origin(),
        criteria: session.listing.criteria().clone(),
        total: session.catalog().len(),
        products: visible.into_iter().map(|p| ProductView::new(p, session)).collect(),
    }
}

/// Lists the distinct categories of the unfiltered catalog.
pub fn list_categories<S: KeyValueStore>(session: &Session<S>) -> CategoriesResponse {
    debug!("list_categories command");
    CategoriesResponse {
        categories: session
            .listing
            .category_options()
            .into_iter()
            .map(|(slug, label)| CategoryOption { slug, label })
            .collect(),
    }
}

/// Detail view for one product.
///
/// ## Errors
/// `NOT_FOUND` when the id is not in the catalog.
pub fn show_product<S: KeyValueStore>(
    session: &Session<S>,
    id: ProductId,
) -> CliResult<ProductDetailResponse> {
    debug!(product_id = %id, "show_product command");

    let product = session.catalog().require(id)?;
    let in_cart = session.store.quantity_of(id);

    Ok(ProductDetailResponse {
        product: product.clone(),
        in_stock: !product.is_out_of_stock(),
        in_cart,
        available_to_add: product.stock.saturating_sub(in_cart),
    })
}

/// Human label for a sort order.
pub fn sort_label(sort: SortOrder) -> &'static str {
    match sort {
        SortOrder::None => "Default",
        SortOrder::PriceAscending => "Price: Low to High",
        SortOrder::PriceDescending => "Price: High to Low",
    }
}
