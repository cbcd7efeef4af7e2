//! Products, cart lines and cart snapshots.
//!
//! A [`CartSnapshot`] is built fresh each time the checkout view loads the
//! buyer's cart from the backend. Nothing in this crate mutates a snapshot
//! after construction.

use serde::{Deserialize, Serialize};

use crate::types::{Money, ProductId, Quantity};

/// A marketplace product as seen by the cart.
///
/// The catalogue owns products; the cart only reads the price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Backend product ID.
    pub id: ProductId,
    /// Display name (e.g., "Tomato seedlings, 12 pack").
    pub name: String,
    /// Unit price in taka.
    pub price: Money,
    /// Primary product image, if any.
    pub image_url: Option<String>,
}

/// A product paired with the quantity the buyer asked for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    /// The product on this line.
    pub product: Product,
    /// Requested units.
    pub quantity: Quantity,
}

impl CartLineItem {
    /// Create a cart line.
    #[must_use]
    pub const fn new(product: Product, quantity: Quantity) -> Self {
        Self { product, quantity }
    }

    /// Unit price multiplied by quantity.
    #[must_use]
    pub fn line_total(&self) -> Money {
        self.product.price * self.quantity
    }
}

/// The buyer's cart at the moment checkout was opened.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartSnapshot {
    items: Vec<CartLineItem>,
}

impl CartSnapshot {
    /// Create a snapshot from line items, keeping their order.
    #[must_use]
    pub const fn new(items: Vec<CartLineItem>) -> Self {
        Self { items }
    }

    /// The line items in backend order.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Total units across all lines (the cart badge count).
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items
            .iter()
            .map(|line| u64::from(line.quantity.get()))
            .sum()
    }
}

impl FromIterator<CartLineItem> for CartSnapshot {
    fn from_iter<I: IntoIterator<Item = CartLineItem>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a CartSnapshot {
    type Item = &'a CartLineItem;
    type IntoIter = std::slice::Iter<'a, CartLineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
