//! Krishi Core - marketplace cart and checkout library.
//!
//! This crate holds the client-side logic shared by every Krishi surface:
//! - `cli` - Command-line tool for inspecting carts and order payloads
//! - `integration-tests` - Black-box tests against recorded backend responses
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no network access,
//! no environment lookups, no logging subscriber. Backend JSON enters through
//! [`normalize`] exactly once and everything downstream works on typed values.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, money, quantities and emails
//! - [`cart`] - Products, line items and cart snapshots
//! - [`shipping`] - Shipping fee policy
//! - [`checkout`] - Subtotal, shipping and total computation
//! - [`format`] - Taka currency formatting
//! - [`normalize`] - Parsing of backend product and cart responses
//! - [`session`] - Explicitly passed sign-in state
//! - [`order`] - Order payload construction

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod checkout;
pub mod format;
pub mod normalize;
pub mod order;
pub mod session;
pub mod shipping;
pub mod types;

pub use cart::{CartLineItem, CartSnapshot, Product};
pub use checkout::{
    CheckoutTotals, FormattedTotals, compute_shipping_fee, compute_subtotal, compute_total,
};
pub use format::{CurrencyFormat, Grouping, format_taka};
pub use normalize::{NormalizeError, parse_cart, parse_products};
pub use order::{
    OrderDraft, OrderError, OrderItem, PaymentMethod, ShippingDetails, ShippingDetailsError,
    UnknownPaymentMethod,
};
pub use session::{SessionContext, SessionUser};
pub use shipping::ShippingPolicy;
pub use types::*;
