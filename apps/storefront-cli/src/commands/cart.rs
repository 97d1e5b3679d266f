//! # Cart Commands
//!
//! Cart view and mutations.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ┌──────────┐   add    ┌──────────┐   clear / remove last   ┌────────┐ │
//! │  │  Empty   │─────────►│ In Cart  │────────────────────────►│ Empty  │ │
//! │  │  Cart    │          │          │                         │ Cart   │ │
//! │  └──────────┘          └──────────┘                         └────────┘ │
//! │                          │      ▲                                       │
//! │                          └──────┘                                       │
//! │                     add / set / remove                                  │
//! │                                                                         │
//! │  Every mutation reports applied | unchanged | rejected.                 │
//! │  Rejected mutations leave the cart exactly as it was.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use serde::Serialize;
use storefront_core::{CartLine, CartOutcome, CartTotals, Money, ProductId};
use storefront_store::KeyValueStore;
use tracing::debug;

use crate::error::CliResult;
use crate::state::Session;

// =============================================================================
// Responses
// =============================================================================

/// One cart line with its computed total.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineView {
    #[serde(flatten)]
    pub line: CartLine,
    #[serde(with = "storefront_core::money::decimal")]
    pub line_total: Money,
    /// Whether one more unit fits within the line's stock.
    pub can_increment: bool,
}

/// Cart contents and totals.
///
/// Checkout is always reported disabled; there is no order placement.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub totals: CartTotals,
    pub checkout_enabled: bool,
}

impl CartView {
    fn of<S: KeyValueStore>(session: &Session<S>) -> Self {
        let cart = session.store.cart();
        CartView {
            lines: cart
                .lines()
                .iter()
                .map(|line| CartLineView {
                    line: line.clone(),
                    line_total: line.line_total(),
                    can_increment: line.can_increment(),
                })
                .collect(),
            totals: cart.totals(),
            checkout_enabled: false,
        }
    }
}

impl fmt::Display for CartView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.lines.is_empty() {
            return writeln!(f, "Your cart is empty");
        }

        for view in &self.lines {
            let line = &view.line;
            writeln!(
                f,
                "{:>5}  {:<30} {:>3} x {:>10} = {:>10}{}",
                format!("#{}", line.id),
                line.name,
                line.quantity,
                line.price.to_string(),
                view.line_total.to_string(),
                if view.can_increment { "" } else { "  (max)" }
            )?;
        }
        writeln!(f)?;
        writeln!(f, "Total Items: {}", self.totals.item_count)?;
        writeln!(f, "Total Price: {}", self.totals.total_price)?;
        writeln!(f, "Checkout (disabled)")
    }
}

/// Result of a cart mutation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartMutationResponse {
    pub action: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<ProductId>,
    /// `applied`, `unchanged` or `rejected`.
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub message: String,
    pub cart: CartView,
}

impl CartMutationResponse {
    fn new<S: KeyValueStore>(
        session: &Session<S>,
        action: &'static str,
        product_id: Option<ProductId>,
        outcome: CartOutcome,
        message: String,
    ) -> Self {
        CartMutationResponse {
            action,
            product_id,
            status: outcome.status(),
            reason: outcome.reject_reason().map(|r| r.to_string()),
            message,
            cart: CartView::of(session),
        }
    }

    pub fn is_rejected(&self) -> bool {
        self.status == "rejected"
    }
}

impl fmt::Display for CartMutationResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.message)?;
        writeln!(
            f,
            "Cart: {} items, {}",
            self.cart.totals.item_count, self.cart.totals.total_price
        )
    }
}

/// Builds the user-facing message for an outcome.
fn describe(outcome: CartOutcome, applied: String, unchanged: &str) -> String {
    match outcome {
        CartOutcome::Applied => applied,
        CartOutcome::Unchanged => unchanged.to_string(),
        CartOutcome::Rejected(reason) => format!("Rejected: {}", reason),
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Current cart with totals.
pub fn get_cart<S: KeyValueStore>(session: &Session<S>) -> CartView {
    debug!("get_cart command");
    CartView::of(session)
}

/// Adds `quantity` units of a catalog product.
///
/// ## Errors
/// `NOT_FOUND` when the id is not in the catalog. Stock violations are
/// not errors; they come back with status `rejected`.
pub fn add_to_cart<S: KeyValueStore>(
    session: &mut Session<S>,
    id: ProductId,
    quantity: u32,
) -> CliResult<CartMutationResponse> {
    debug!(product_id = %id, quantity, "add_to_cart command");

    let product = session.catalog().require(id)?.clone();
    let outcome = session.store.add_item(&product, quantity);
    let message = describe(
        outcome,
        format!("Added {} x {} to cart", quantity, product.name),
        "Cart unchanged",
    );

    Ok(CartMutationResponse::new(session, "add", Some(id), outcome, message))
}

/// Removes a product's line. Removing an absent product is `unchanged`.
pub fn remove_from_cart<S: KeyValueStore>(
    session: &mut Session<S>,
    id: ProductId,
) -> CartMutationResponse {
    debug!(product_id = %id, "remove_from_cart command");

    let name = session.store.cart().find(id).map(|l| l.name.clone());
    let outcome = session.store.remove_item(id);
    let message = describe(
        outcome,
        format!("Removed {} from cart", name.unwrap_or_else(|| format!("#{}", id))),
        "Product was not in the cart",
    );

    CartMutationResponse::new(session, "remove", Some(id), outcome, message)
}

/// Sets a line's quantity. Zero or less removes the line.
pub fn set_quantity<S: KeyValueStore>(
    session: &mut Session<S>,
    id: ProductId,
    quantity: i64,
) -> CartMutationResponse {
    debug!(product_id = %id, quantity, "set_quantity command");

    let outcome = session.store.update_quantity(id, quantity);
    let applied = if quantity <= 0 {
        format!("Removed #{} from cart", id)
    } else {
        format!("Set #{} quantity to {}", id, quantity)
    };
    let message = describe(outcome, applied, "Cart unchanged");

    CartMutationResponse::new(session, "set", Some(id), outcome, message)
}

/// Empties the cart.
pub fn clear_cart<S: KeyValueStore>(session: &mut Session<S>) -> CartMutationResponse {
    debug!("clear_cart command");

    let outcome = session.store.clear();
    let message = describe(outcome, "Cart cleared".to_string(), "Cart was already empty");

    CartMutationResponse::new(session, "clear", None, outcome, message)
}
