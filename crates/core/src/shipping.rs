//! Shipping fee policy.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::Money;

/// Maps an order subtotal to a shipping fee.
///
/// Orders strictly above `free_shipping_threshold` ship free; everything else,
/// including a subtotal exactly at the threshold and an empty cart, pays
/// `flat_shipping_fee`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingPolicy {
    /// Subtotal that must be exceeded for free shipping.
    pub free_shipping_threshold: Money,
    /// Fee charged when the threshold is not exceeded.
    pub flat_shipping_fee: Money,
}

impl ShippingPolicy {
    /// Default free shipping threshold: 1000 taka.
    pub const DEFAULT_FREE_SHIPPING_THRESHOLD: Money = Money::new(Decimal::ONE_THOUSAND);
    /// Default flat fee: 100 taka.
    pub const DEFAULT_FLAT_SHIPPING_FEE: Money = Money::new(Decimal::ONE_HUNDRED);

    /// Create a policy.
    #[must_use]
    pub const fn new(free_shipping_threshold: Money, flat_shipping_fee: Money) -> Self {
        Self {
            free_shipping_threshold,
            flat_shipping_fee,
        }
    }

    /// The fee owed for a given subtotal.
    #[must_use]
    pub fn fee_for(&self, subtotal: Money) -> Money {
        if subtotal > self.free_shipping_threshold {
            Money::ZERO
        } else {
            self.flat_shipping_fee
        }
    }
}

impl Default for ShippingPolicy {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_FREE_SHIPPING_THRESHOLD,
            Self::DEFAULT_FLAT_SHIPPING_FEE,
        )
    }
}
