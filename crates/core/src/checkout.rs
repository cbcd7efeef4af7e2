//! Checkout total computation.
//!
//! Pure functions over a cart snapshot. They hold no state, perform no I/O and
//! return the same result for the same input, so the checkout view can call
//! them on every render and again when the order is submitted.
//!
//! Input is not validated here. Negative prices or zero quantities flow
//! straight through the arithmetic; [`crate::normalize`] is the place that
//! rejects them, along with amounts large enough to overflow a total.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cart::CartLineItem;
use crate::format::CurrencyFormat;
use crate::shipping::ShippingPolicy;
use crate::types::Money;

/// Subtotal, shipping and grand total for a cart.
///
/// `total == subtotal + shipping_fee` always holds exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutTotals {
    /// Sum of price × quantity over all lines.
    pub subtotal: Money,
    /// Fee from the shipping policy.
    pub shipping_fee: Money,
    /// Amount charged.
    pub total: Money,
}

/// Checkout totals rendered for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedTotals {
    /// Formatted subtotal.
    pub subtotal: String,
    /// Formatted shipping fee, `৳0` when waived.
    pub shipping_fee: String,
    /// Formatted total.
    pub total: String,
}

impl CheckoutTotals {
    /// Whether shipping was waived.
    #[must_use]
    pub fn free_shipping(&self) -> bool {
        self.shipping_fee == Money::ZERO
    }

    /// Render every amount with the given currency format.
    #[must_use]
    pub fn formatted(&self, format: &CurrencyFormat) -> FormattedTotals {
        FormattedTotals {
            subtotal: format.format(self.subtotal),
            shipping_fee: format.format(self.shipping_fee),
            total: format.format(self.total),
        }
    }
}

/// Sum of `price * quantity` across all lines; zero for an empty slice.
#[must_use]
pub fn compute_subtotal(items: &[CartLineItem]) -> Money {
    items.iter().map(CartLineItem::line_total).sum()
}

/// Shipping fee owed on `subtotal` under `policy`.
#[must_use]
pub fn compute_shipping_fee(subtotal: Money, policy: &ShippingPolicy) -> Money {
    policy.fee_for(subtotal)
}

/// Compute subtotal, shipping fee and total for a cart.
///
/// An empty cart still yields the flat shipping fee as its total. Callers that
/// display or submit an empty cart must handle that case themselves.
#[must_use]
pub fn compute_total(items: &[CartLineItem], policy: &ShippingPolicy) -> CheckoutTotals {
    let subtotal = compute_subtotal(items);
    let shipping_fee = compute_shipping_fee(subtotal, policy);
    let totals = CheckoutTotals {
        subtotal,
        shipping_fee,
        total: subtotal + shipping_fee,
    };

    debug!(
        lines = items.len(),
        subtotal = %totals.subtotal,
        shipping_fee = %totals.shipping_fee,
        total = %totals.total,
        "Computed checkout totals"
    );

    totals
}
