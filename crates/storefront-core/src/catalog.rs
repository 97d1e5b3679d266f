//! # Catalog
//!
//! Read-only product list, loaded once per session and shared via `Arc`.
//!
//! The fallback catalog is the fixed 20-product list used whenever the
//! remote catalog cannot be fetched.

use crate::error::{CoreError, CoreResult};
use crate::filter::{self, FilterCriteria};
use crate::money::Money;
use crate::types::{Product, ProductId};

/// Ordered, read-only product list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Catalog { products }
    }

    /// Products in catalog order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Like [`Catalog::get`] but unknown ids are an error.
    pub fn require(&self, id: ProductId) -> CoreResult<&Product> {
        self.get(id).ok_or(CoreError::ProductNotFound(id))
    }

    /// Canonical stock for `id`, if the product is known.
    pub fn stock_of(&self, id: ProductId) -> Option<u32> {
        self.get(id).map(|p| p.stock)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn categories(&self) -> Vec<String> {
        filter::categories(self)
    }

    pub fn filter(&self, criteria: &FilterCriteria) -> Vec<&Product> {
        filter::apply(self, criteria)
    }
}

impl From<Vec<Product>> for Catalog {
    fn from(products: Vec<Product>) -> Self {
        Catalog::new(products)
    }
}

// =============================================================================
// Fallback Catalog
// =============================================================================

/// (id, name, cents, category, stock, description)
const FALLBACK_PRODUCTS: [(u32, &str, i64, &str, u32, &str); 20] = [
    (1, "Laptop", 99_999, "electronics", 10, "High-performance laptop"),
    (2, "Smartphone", 69_999, "electronics", 15, "Latest smartphone"),
    (3, "Headphones", 14_999, "electronics", 0, "Wireless headphones"),
    (4, "T-Shirt", 1_999, "clothing", 50, "Cotton t-shirt"),
    (5, "Jeans", 4_999, "clothing", 30, "Classic jeans"),
    (6, "Sneakers", 7_999, "clothing", 25, "Comfortable sneakers"),
    (7, "Coffee Maker", 8_999, "home", 12, "Automatic coffee maker"),
    (8, "Desk Lamp", 3_499, "home", 0, "LED desk lamp"),
    (9, "Book", 1_499, "books", 100, "Best-selling novel"),
    (10, "Notebook", 899, "books", 200, "Spiral notebook"),
    (11, "Tablet", 39_999, "electronics", 8, "10-inch tablet"),
    (12, "Watch", 19_999, "electronics", 20, "Smart watch"),
    (13, "Jacket", 7_999, "clothing", 15, "Winter jacket"),
    (14, "Backpack", 5_999, "clothing", 18, "Travel backpack"),
    (15, "Blender", 4_999, "home", 10, "Kitchen blender"),
    (16, "Pillow", 2_499, "home", 40, "Memory foam pillow"),
    (17, "Dictionary", 1_999, "books", 30, "English dictionary"),
    (18, "Pen Set", 1_299, "books", 60, "Premium pen set"),
    (19, "Camera", 59_999, "electronics", 5, "Digital camera"),
    (20, "Monitor", 29_999, "electronics", 12, "27-inch monitor"),
];

/// The static catalog used when the remote source is unavailable.
///
/// Always exactly 20 products with ids 1..=20. Headphones (3) and
/// Desk Lamp (8) are out of stock.
pub fn fallback_catalog() -> Catalog {
    FALLBACK_PRODUCTS
        .iter()
        .map(|&(id, name, cents, category, stock, description)| {
            Product::new(ProductId::new(id), name, category, Money::from_cents(cents), stock)
                .with_description(description)
        })
        .collect::<Vec<_>>()
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_catalog_shape() {
        let catalog = fallback_catalog();
        assert_eq!(catalog.len(), 20);

        let ids: Vec<u32> = catalog.products().iter().map(|p| p.id.get()).collect();
        assert_eq!(ids, (1..=20).collect::<Vec<_>>());

        let out_of_stock: Vec<&str> = catalog
            .products()
            .iter()
            .filter(|p| p.is_out_of_stock())
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(out_of_stock, vec!["Headphones", "Desk Lamp"]);
    }

    #[test]
    fn test_lookup() {
        let catalog = fallback_catalog();
        let laptop = catalog.get(ProductId::new(1)).unwrap();
        assert_eq!(laptop.name, "Laptop");
        assert_eq!(laptop.price.to_major(), 999.99);
        assert_eq!(laptop.description.as_deref(), Some("High-performance laptop"));

        assert_eq!(catalog.stock_of(ProductId::new(19)), Some(5));
        assert_eq!(catalog.stock_of(ProductId::new(99)), None);
        assert!(matches!(
            catalog.require(ProductId::new(99)),
            Err(CoreError::ProductNotFound(id)) if id.get() == 99
        ));
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::default();
        assert!(catalog.is_empty());
        assert!(catalog.categories().is_empty());
        assert!(catalog.filter(&FilterCriteria::new()).is_empty());
    }
}
