//! # Cart
//!
//! Stock-bounded shopping cart with derived totals.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  User Action           Operation                 Outcome                │
//! │  ───────────           ─────────                 ───────                │
//! │                                                                         │
//! │  Add to Cart ────────► add_item(p, q) ─────────► Applied               │
//! │                          │ existing + q > stock ─► Rejected(ExceedsStock)│
//! │                          │ stock == 0 ───────────► Rejected(OutOfStock) │
//! │                                                                         │
//! │  Stepper +/- ────────► update_quantity(id, n, max)                      │
//! │                          │ n <= 0 ───────────────► same as remove_item  │
//! │                          │ n > max ──────────────► Rejected(ExceedsStock)│
//! │                                                                         │
//! │  Remove ─────────────► remove_item(id) ────────► Applied / Unchanged   │
//! │                                                                         │
//! │  Rejections never touch the cart. They are outcomes, not errors.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - At most one line per product id
//! - Every line has `1 <= quantity <= stock` (stock as known when validated)
//! - Lines keep insertion order

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use crate::money::Money;
use crate::types::{Product, ProductId};

// =============================================================================
// Cart Line
// =============================================================================

/// One product's entry in the cart.
///
/// Carries a frozen copy of the product fields so the cart renders
/// consistently even if the catalog is refetched with different data.
/// The flat field layout is also the persisted snapshot format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLine {
    pub id: ProductId,
    pub name: String,
    #[serde(with = "crate::money::decimal")]
    #[ts(type = "number")]
    pub price: Money,
    pub category: String,
    /// Stock at the time the line was last validated.
    pub stock: u32,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub quantity: u32,
}

impl CartLine {
    /// Creates a line from a product and quantity.
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        CartLine {
            id: product.id,
            name: product.name.clone(),
            price: product.price,
            category: product.category.clone(),
            stock: product.stock,
            image: product.image.clone(),
            description: product.description.clone(),
            quantity,
        }
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.price * self.quantity
    }

    /// Whether the quantity stepper may go up by one more unit.
    pub fn can_increment(&self) -> bool {
        self.quantity < self.stock
    }
}

// =============================================================================
// Outcomes
// =============================================================================

/// Why a cart mutation was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RejectReason {
    /// The resulting quantity would exceed the product's stock.
    #[error("only {available} in stock, requested {requested}")]
    ExceedsStock { requested: u32, available: u32 },

    /// The product has no stock at all.
    #[error("product is out of stock")]
    OutOfStock,

    /// Added quantity was zero.
    #[error("quantity must be at least 1")]
    InvalidQuantity,

    /// Quantity update for a product that has no line.
    #[error("product is not in the cart")]
    NotInCart,
}

/// Result of a cart mutation.
///
/// Callers can assert on the outcome instead of re-reading cart state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartOutcome {
    /// The cart changed.
    Applied,
    /// Nothing to do (e.g. removing an absent product).
    Unchanged,
    /// The mutation was refused; the cart is exactly as before.
    Rejected(RejectReason),
}

impl CartOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, CartOutcome::Applied)
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, CartOutcome::Rejected(_))
    }

    /// Short machine-readable label.
    pub fn status(&self) -> &'static str {
        match self {
            CartOutcome::Applied => "applied",
            CartOutcome::Unchanged => "unchanged",
            CartOutcome::Rejected(_) => "rejected",
        }
    }

    pub fn reject_reason(&self) -> Option<RejectReason> {
        match self {
            CartOutcome::Rejected(reason) => Some(*reason),
            _ => None,
        }
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// Serializes as a bare JSON array of [`CartLine`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Rebuilds a cart from persisted lines, restoring the invariants.
    ///
    /// - duplicate ids: the first line wins
    /// - quantities above the line's stock are clamped down to it
    /// - lines left with quantity 0 are dropped
    pub fn from_lines(lines: impl IntoIterator<Item = CartLine>) -> Self {
        let mut cart = Cart::new();
        for mut line in lines {
            if cart.find(line.id).is_some() {
                continue;
            }
            line.quantity = line.quantity.min(line.stock);
            if line.quantity > 0 {
                cart.lines.push(line);
            }
        }
        cart
    }

    /// Encodes the cart as its persisted snapshot (a JSON array of lines).
    pub fn to_snapshot(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.lines)
    }

    /// Decodes a persisted snapshot, sanitizing it through [`Cart::from_lines`].
    pub fn from_snapshot(snapshot: &str) -> serde_json::Result<Self> {
        let lines: Vec<CartLine> = serde_json::from_str(snapshot)?;
        Ok(Cart::from_lines(lines))
    }

    /// Adds a product to the cart or increases quantity if already present.
    ///
    /// ## Behavior
    /// - Product already in cart: quantity grows if `existing + quantity <= stock`
    /// - Product not in cart: appended if `quantity <= stock`
    /// - Anything else is rejected and the cart is left as it was
    pub fn add_item(&mut self, product: &Product, quantity: u32) -> CartOutcome {
        if quantity == 0 {
            return CartOutcome::Rejected(RejectReason::InvalidQuantity);
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.id == product.id) {
            let new_quantity = line.quantity.saturating_add(quantity);
            if new_quantity > product.stock {
                return CartOutcome::Rejected(RejectReason::ExceedsStock {
                    requested: new_quantity,
                    available: product.stock,
                });
            }
            line.quantity = new_quantity;
            line.stock = product.stock;
            return CartOutcome::Applied;
        }

        if product.is_out_of_stock() {
            return CartOutcome::Rejected(RejectReason::OutOfStock);
        }
        if !product.can_supply(quantity) {
            return CartOutcome::Rejected(RejectReason::ExceedsStock {
                requested: quantity,
                available: product.stock,
            });
        }

        self.lines.push(CartLine::from_product(product, quantity));
        CartOutcome::Applied
    }

    /// Removes the line for `product_id`. Absent ids are not an error.
    pub fn remove_item(&mut self, product_id: ProductId) -> CartOutcome {
        let initial_len = self.lines.len();
        self.lines.retain(|l| l.id != product_id);

        if self.lines.len() == initial_len {
            CartOutcome::Unchanged
        } else {
            CartOutcome::Applied
        }
    }

    /// Sets the quantity of a line, bounded by `max_stock`.
    ///
    /// An applied update records `max_stock` on the line, so the snapshot
    /// carries the bound the quantity was checked against.
    ///
    /// ## Behavior
    /// - `new_quantity <= 0`: identical to [`Cart::remove_item`]
    /// - `new_quantity > max_stock`: rejected, line unchanged
    /// - product not in cart: rejected
    pub fn update_quantity(
        &mut self,
        product_id: ProductId,
        new_quantity: i64,
        max_stock: u32,
    ) -> CartOutcome {
        if new_quantity <= 0 {
            return self.remove_item(product_id);
        }

        if new_quantity > i64::from(max_stock) {
            return CartOutcome::Rejected(RejectReason::ExceedsStock {
                requested: u32::try_from(new_quantity).unwrap_or(u32::MAX),
                available: max_stock,
            });
        }

        match self.lines.iter_mut().find(|l| l.id == product_id) {
            Some(line) => {
                // max_stock fits in u32, so does new_quantity
                line.quantity = new_quantity as u32;
                line.stock = max_stock;
                CartOutcome::Applied
            }
            None => CartOutcome::Rejected(RejectReason::NotInCart),
        }
    }

    /// Clears all lines from the cart.
    pub fn clear(&mut self) -> CartOutcome {
        if self.lines.is_empty() {
            return CartOutcome::Unchanged;
        }
        self.lines.clear();
        CartOutcome::Applied
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn find(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.id == product_id)
    }

    /// Quantity in cart for `product_id`, or 0.
    pub fn quantity_of(&self, product_id: ProductId) -> u32 {
        self.find(product_id).map_or(0, |l| l.quantity)
    }

    /// Number of distinct products in the cart.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Sum of quantities across all lines.
    pub fn total_item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Sum of price × quantity across all lines.
    pub fn total_price(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn totals(&self) -> CartTotals {
        CartTotals::from(self)
    }
}

// =============================================================================
// Totals
// =============================================================================

/// Cart totals summary for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    pub line_count: u32,
    #[ts(type = "number")]
    pub item_count: u64,
    #[serde(with = "crate::money::decimal")]
    #[ts(type = "number")]
    pub total_price: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            line_count: u32::try_from(cart.line_count()).unwrap_or(u32::MAX),
            item_count: cart.total_item_count(),
            total_price: cart.total_price(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn test_product(id: u32, price_cents: i64, stock: u32) -> Product {
        Product::new(
            ProductId::new(id),
            format!("Product {}", id),
            "test",
            Money::from_cents(price_cents),
            stock,
        )
    }

    #[test]
    fn test_add_item() {
        let mut cart = Cart::new();
        let product = test_product(1, 999, 10);

        assert_eq!(cart.add_item(&product, 2), CartOutcome::Applied);

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.total_item_count(), 2);
        assert_eq!(cart.total_price().cents(), 1998);
    }

    #[test]
    fn test_add_same_product_merges_lines() {
        let mut cart = Cart::new();
        let product = test_product(1, 999, 10);

        cart.add_item(&product, 2);
        cart.add_item(&product, 3);

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.quantity_of(product.id), 5);
    }

    #[test]
    fn test_applied_changes_refresh_line_stock() {
        let mut cart = Cart::new();
        cart.add_item(&test_product(1, 500, 2), 2);
        assert!(!cart.lines()[0].can_increment());

        let restocked = test_product(1, 500, 10);
        assert!(cart.add_item(&restocked, 1).is_applied());
        assert_eq!(cart.find(restocked.id).map(|l| l.stock), Some(10));

        assert!(cart.update_quantity(restocked.id, 8, 12).is_applied());
        assert_eq!(cart.find(restocked.id).map(|l| l.stock), Some(12));
        assert!(cart.lines()[0].can_increment());

        let reloaded = Cart::from_snapshot(&cart.to_snapshot().unwrap()).unwrap();
        assert_eq!(reloaded, cart);
    }

    #[test]
    fn test_huge_price_totals_saturate() {
        let mut cart = Cart::new();
        let pricey = Product::new(ProductId::new(1), "Yacht", "luxury", Money::from_major(5e16), 5);

        assert!(cart.add_item(&pricey, 2).is_applied());
        assert_eq!(cart.total_price().cents(), i64::MAX);
        assert_eq!(cart.totals().total_price.cents(), i64::MAX);
    }

    #[test]
    fn test_stock_limit_scenario() {
        let mut cart = Cart::new();
        let product = test_product(1, 1000, 2);

        assert!(cart.add_item(&product, 1).is_applied());
        assert!(cart.add_item(&product, 1).is_applied());
        assert_eq!(cart.total_item_count(), 2);
        assert_eq!(cart.total_price(), Money::from_cents(2000));

        let outcome = cart.add_item(&product, 1);
        assert_eq!(
            outcome,
            CartOutcome::Rejected(RejectReason::ExceedsStock {
                requested: 3,
                available: 2
            })
        );
        assert_eq!(cart.total_item_count(), 2);
        assert_eq!(cart.total_price(), Money::from_cents(2000));
    }

    #[test]
    fn test_new_line_above_stock_is_rejected() {
        let mut cart = Cart::new();
        let product = test_product(1, 1000, 2);

        assert!(cart.add_item(&product, 3).is_rejected());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_out_of_stock_and_zero_quantity() {
        let mut cart = Cart::new();
        let sold_out = test_product(3, 14999, 0);

        assert_eq!(
            cart.add_item(&sold_out, 1),
            CartOutcome::Rejected(RejectReason::OutOfStock)
        );
        assert_eq!(
            cart.add_item(&test_product(4, 100, 5), 0),
            CartOutcome::Rejected(RejectReason::InvalidQuantity)
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut cart = Cart::new();
        for id in [5, 2, 9] {
            cart.add_item(&test_product(id, 100, 5), 1);
        }
        cart.add_item(&test_product(2, 100, 5), 1);

        let ids: Vec<u32> = cart.lines().iter().map(|l| l.id.get()).collect();
        assert_eq!(ids, vec![5, 2, 9]);
    }

    #[test]
    fn test_remove_item() {
        let mut cart = Cart::new();
        let product = test_product(1, 999, 10);
        cart.add_item(&product, 2);

        assert_eq!(cart.remove_item(product.id), CartOutcome::Applied);
        assert!(cart.is_empty());
        assert_eq!(cart.remove_item(product.id), CartOutcome::Unchanged);
    }

    #[test]
    fn test_update_quantity() {
        let mut cart = Cart::new();
        let product = test_product(1, 500, 10);
        cart.add_item(&product, 2);

        assert!(cart.update_quantity(product.id, 7, 10).is_applied());
        assert_eq!(cart.quantity_of(product.id), 7);

        let outcome = cart.update_quantity(product.id, 11, 10);
        assert!(outcome.is_rejected());
        assert_eq!(cart.quantity_of(product.id), 7);

        assert_eq!(
            cart.update_quantity(ProductId::new(99), 1, 10),
            CartOutcome::Rejected(RejectReason::NotInCart)
        );
    }

    #[test]
    fn test_update_to_zero_or_negative_removes() {
        let mut cart = Cart::new();
        let product = test_product(1, 500, 10);

        cart.add_item(&product, 2);
        assert_eq!(cart.update_quantity(product.id, 0, 10), CartOutcome::Applied);
        assert!(cart.is_empty());

        cart.add_item(&product, 2);
        assert_eq!(cart.update_quantity(product.id, -3, 0), CartOutcome::Applied);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        assert_eq!(cart.clear(), CartOutcome::Unchanged);

        cart.add_item(&test_product(1, 999, 10), 2);
        assert_eq!(cart.clear(), CartOutcome::Applied);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_totals() {
        let mut cart = Cart::new();
        cart.add_item(&test_product(1, 1999, 50), 3);
        cart.add_item(&test_product(2, 899, 200), 2);

        let totals = cart.totals();
        assert_eq!(totals.line_count, 2);
        assert_eq!(totals.item_count, 5);
        assert_eq!(totals.total_price.cents(), 1999 * 3 + 899 * 2);

        let json = serde_json::to_value(totals).unwrap();
        assert_eq!(json["itemCount"], 5);
        assert_eq!(json["totalPrice"], 77.95);
    }

    #[test]
    fn test_snapshot_format() {
        let mut cart = Cart::new();
        let product = test_product(1, 99_999, 10).with_description("High-performance laptop");
        cart.add_item(&product, 2);

        let snapshot = cart.to_snapshot().unwrap();
        let value: serde_json::Value = serde_json::from_str(&snapshot).unwrap();
        let line = &value[0];
        assert_eq!(line["id"], 1);
        assert_eq!(line["price"], 999.99);
        assert_eq!(line["stock"], 10);
        assert_eq!(line["quantity"], 2);
        assert_eq!(line["description"], "High-performance laptop");
    }

    #[test]
    fn test_from_snapshot_sanitizes() {
        let snapshot = r#"[
            {"id":1,"name":"Laptop","price":999.99,"category":"electronics","stock":10,"image":"","description":"x","quantity":2},
            {"id":1,"name":"Laptop","price":999.99,"category":"electronics","stock":10,"image":"","description":"x","quantity":5},
            {"id":2,"name":"Tablet","price":399.99,"category":"electronics","stock":3,"quantity":9},
            {"id":3,"name":"Lamp","price":34.99,"category":"home","stock":0,"quantity":1}
        ]"#;

        let cart = Cart::from_snapshot(snapshot).unwrap();
        assert_eq!(cart.line_count(), 2);
        assert_eq!(cart.quantity_of(ProductId::new(1)), 2);
        assert_eq!(cart.quantity_of(ProductId::new(2)), 3);
        assert_eq!(cart.quantity_of(ProductId::new(3)), 0);
    }

    #[test]
    fn test_from_snapshot_rejects_garbage() {
        assert!(Cart::from_snapshot("not json").is_err());
        assert!(Cart::from_snapshot(r#"{"id":1}"#).is_err());
    }

    // =========================================================================
    // Properties
    // =========================================================================

    #[derive(Debug, Clone)]
    enum Op {
        Add { product: usize, quantity: u32 },
        Remove { product: usize },
        Update { product: usize, quantity: i64 },
    }

    fn catalog() -> Vec<Product> {
        vec![
            test_product(1, 1000, 2),
            test_product(2, 1999, 5),
            test_product(3, 14999, 0),
            test_product(4, 899, 20),
        ]
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0usize..4, 0u32..8).prop_map(|(product, quantity)| Op::Add { product, quantity }),
            (0usize..4).prop_map(|product| Op::Remove { product }),
            (0usize..4, -2i64..25).prop_map(|(product, quantity)| Op::Update { product, quantity }),
        ]
    }

    fn run(ops: &[Op]) -> Cart {
        let products = catalog();
        let mut cart = Cart::new();
        for op in ops {
            match op {
                Op::Add { product, quantity } => {
                    cart.add_item(&products[*product], *quantity);
                }
                Op::Remove { product } => {
                    cart.remove_item(products[*product].id);
                }
                Op::Update { product, quantity } => {
                    let p = &products[*product];
                    cart.update_quantity(p.id, *quantity, p.stock);
                }
            }
        }
        cart
    }

    proptest! {
        #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]

        #[test]
        fn merge_on_add_within_stock(stock in 1u32..50, q1 in 1u32..50, q2 in 1u32..50) {
            prop_assume!(q1 + q2 <= stock);
            let product = test_product(1, 250, stock);
            let mut cart = Cart::new();

            prop_assert!(cart.add_item(&product, q1).is_applied());
            prop_assert!(cart.add_item(&product, q2).is_applied());
            prop_assert_eq!(cart.line_count(), 1);
            prop_assert_eq!(cart.quantity_of(product.id), q1 + q2);
        }

        #[test]
        fn add_above_stock_leaves_empty_cart(stock in 0u32..50, extra in 1u32..50) {
            let product = test_product(1, 250, stock);
            let mut cart = Cart::new();

            prop_assert!(cart.add_item(&product, stock + extra).is_rejected());
            prop_assert!(cart.is_empty());
        }

        #[test]
        fn update_to_zero_equals_remove(ops in prop::collection::vec(op_strategy(), 0..20), idx in 0usize..4, max in 0u32..30) {
            let id = catalog()[idx].id;
            let mut updated = run(&ops);
            let mut removed = updated.clone();

            updated.update_quantity(id, 0, max);
            removed.remove_item(id);
            prop_assert_eq!(updated, removed);
        }

        #[test]
        fn update_above_max_keeps_quantity(ops in prop::collection::vec(op_strategy(), 0..20), idx in 0usize..4, max in 0u32..30, over in 1i64..10) {
            let id = catalog()[idx].id;
            let mut cart = run(&ops);
            let before = cart.quantity_of(id);

            let outcome = cart.update_quantity(id, i64::from(max) + over, max);
            prop_assert!(outcome.is_rejected());
            prop_assert_eq!(cart.quantity_of(id), before);
        }

        #[test]
        fn invariants_hold_for_any_sequence(ops in prop::collection::vec(op_strategy(), 0..40)) {
            let cart = run(&ops);

            let mut ids: Vec<_> = cart.lines().iter().map(|l| l.id).collect();
            ids.sort();
            ids.dedup();
            prop_assert_eq!(ids.len(), cart.line_count());

            for line in cart.lines() {
                prop_assert!(line.quantity >= 1);
                prop_assert!(line.quantity <= line.stock);
            }

            let count: u64 = cart.lines().iter().map(|l| u64::from(l.quantity)).sum();
            prop_assert_eq!(cart.total_item_count(), count);

            let cents: i64 = cart.lines().iter().map(|l| l.price.cents() * i64::from(l.quantity)).sum();
            prop_assert_eq!(cart.total_price().cents(), cents);
        }

        #[test]
        fn total_price_depends_only_on_final_lines(ops in prop::collection::vec(op_strategy(), 0..30)) {
            let cart = run(&ops);
            let mut reversed = cart.lines().to_vec();
            reversed.reverse();

            prop_assert_eq!(Cart::from_lines(reversed).total_price(), cart.total_price());
        }

        #[test]
        fn snapshot_round_trip(ops in prop::collection::vec(op_strategy(), 0..30)) {
            let cart = run(&ops);
            let snapshot = cart.to_snapshot().unwrap();
            prop_assert_eq!(Cart::from_snapshot(&snapshot).unwrap(), cart);
        }
    }
}
