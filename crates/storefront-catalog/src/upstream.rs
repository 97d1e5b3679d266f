//! # Upstream Payload
//!
//! Wire shape of the remote catalog and its normalization into [`Product`].
//!
//! ## Field Mapping
//! ```text
//! upstream record              Product
//! ───────────────              ───────
//! id          (number/string)  id        (records without one are skipped)
//! title                        name
//! price       (number/string)  price     (non-negative cents, else 0)
//! category                     category
//! stock       (number/string)  stock     (truncated, non-negative, else 0)
//! thumbnail                    image
//! description                  description
//! anything else                ignored
//! ```

use serde::Deserialize;
use serde_json::Value;
use storefront_core::{Money, Product, ProductId};
use tracing::debug;

/// Top-level response document.
#[derive(Debug, Deserialize)]
pub struct UpstreamResponse {
    pub products: Vec<UpstreamProduct>,
}

/// One upstream record. Fields are loosely typed and coerced in [`normalize`].
#[derive(Debug, Default, Deserialize)]
pub struct UpstreamProduct {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub title: Value,
    #[serde(default)]
    pub price: Value,
    #[serde(default)]
    pub category: Value,
    #[serde(default)]
    pub stock: Value,
    #[serde(default)]
    pub thumbnail: Value,
    #[serde(default)]
    pub description: Value,
}

impl UpstreamResponse {
    /// Normalizes the first `limit` records into products.
    pub fn into_products(self, limit: usize) -> Vec<Product> {
        self.products
            .into_iter()
            .take(limit)
            .filter_map(normalize)
            .collect()
    }
}

/// Converts one record, or `None` when it has no usable id.
pub fn normalize(record: UpstreamProduct) -> Option<Product> {
    let Some(id) = coerce_id(&record.id) else {
        debug!(id = %record.id, "Skipping upstream record without a usable id");
        return None;
    };

    let product = Product {
        id,
        name: coerce_text(&record.title).unwrap_or_default(),
        category: coerce_text(&record.category).unwrap_or_default(),
        price: Money::from_major(coerce_real(&record.price)).non_negative(),
        stock: coerce_stock(&record.stock),
        image: coerce_text(&record.thumbnail),
        description: coerce_text(&record.description),
    };
    Some(product)
}

fn coerce_id(value: &Value) -> Option<ProductId> {
    match value {
        Value::Number(n) => {
            let id = match n.as_u64() {
                Some(id) => id,
                None => {
                    let real = n.as_f64()?;
                    if real.fract() != 0.0 || real < 0.0 {
                        return None;
                    }
                    real as u64
                }
            };
            u32::try_from(id).ok().map(ProductId::new)
        }
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn coerce_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Numbers and numeric strings; anything else is 0.
fn coerce_real(value: &Value) -> f64 {
    let real = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    if real.is_finite() {
        real
    } else {
        0.0
    }
}

fn coerce_stock(value: &Value) -> u32 {
    let real = coerce_real(value).trunc();
    if real <= 0.0 {
        0
    } else if real >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        real as u32
    }
}
