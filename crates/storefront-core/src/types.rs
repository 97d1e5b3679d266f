//! # Domain Types
//!
//! Core domain types used throughout the storefront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    CartLine     │   │  FilterCriteria │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (ProductId) │──►│  product fields │   │  search         │       │
//! │  │  name, category │   │  quantity       │   │  category       │       │
//! │  │  price (Money)  │   │                 │   │  sort           │       │
//! │  │  stock          │   └─────────────────┘   └─────────────────┘       │
//! │  └─────────────────┘      (cart.rs)             (filter.rs)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Products are immutable once they enter a [`Catalog`](crate::catalog::Catalog).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Product Id
// =============================================================================

/// Stable product identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct ProductId(u32);

impl ProductId {
    #[inline]
    pub const fn new(id: u32) -> Self {
        ProductId(id)
    }

    #[inline]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        ProductId(id)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProductId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .map(ProductId)
            .map_err(|e| ValidationError::InvalidFormat {
                field: "product id".to_string(),
                reason: e.to_string(),
            })
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product available in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Unique, stable identifier.
    pub id: ProductId,

    /// Display name. Search matches against this field.
    pub name: String,

    /// Free-text category label (e.g. "electronics", "home-decoration").
    pub category: String,

    /// Unit price, never negative.
    #[serde(with = "crate::money::decimal")]
    #[ts(type = "number")]
    pub price: Money,

    /// Maximum sellable units. Upper bound on cart quantity.
    pub stock: u32,

    /// Optional image reference (URL).
    #[serde(default)]
    pub image: Option<String>,

    /// Optional long description for the detail view.
    #[serde(default)]
    pub description: Option<String>,
}

impl Product {
    /// Creates a product without image or description.
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        category: impl Into<String>,
        price: Money,
        stock: u32,
    ) -> Self {
        Product {
            id,
            name: name.into(),
            category: category.into(),
            price: price.non_negative(),
            stock,
            image: None,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// A product with zero stock cannot be added to the cart.
    #[inline]
    pub fn is_out_of_stock(&self) -> bool {
        self.stock == 0
    }

    /// Checks if `quantity` units fit within stock.
    #[inline]
    pub fn can_supply(&self, quantity: u32) -> bool {
        quantity <= self.stock
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_id_parsing() {
        assert_eq!("42".parse::<ProductId>().unwrap(), ProductId::new(42));
        assert_eq!(" 7 ".parse::<ProductId>().unwrap(), ProductId::new(7));
        assert!("abc".parse::<ProductId>().is_err());
        assert!("-1".parse::<ProductId>().is_err());
    }

    #[test]
    fn test_new_product_clamps_negative_price() {
        let product = Product::new(ProductId::new(1), "Refund", "misc", Money::from_cents(-100), 1);
        assert!(product.price.is_zero());
    }

    #[test]
    fn test_stock_checks() {
        let product = Product::new(ProductId::new(1), "Desk Lamp", "home", Money::from_cents(3499), 0);
        assert!(product.is_out_of_stock());
        assert!(!product.can_supply(1));

        let product = Product::new(ProductId::new(2), "Camera", "electronics", Money::from_cents(59999), 5);
        assert!(!product.is_out_of_stock());
        assert!(product.can_supply(5));
        assert!(!product.can_supply(6));
    }

    #[test]
    fn test_product_json_uses_real_price() {
        let product = Product::new(ProductId::new(9), "Book", "books", Money::from_cents(1499), 100)
            .with_description("Best-selling novel");
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["id"], 9);
        assert_eq!(json["price"], 14.99);
        assert_eq!(json["image"], serde_json::Value::Null);
        assert_eq!(json["description"], "Best-selling novel");
    }
}
