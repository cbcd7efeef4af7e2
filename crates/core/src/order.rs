//! Order payload construction.
//!
//! Turns a cart snapshot plus the checkout form into the JSON body the
//! backend's order-creation endpoint accepts. Totals come from
//! [`crate::checkout::compute_total`], so the amounts the buyer saw on screen
//! are the amounts submitted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::cart::{CartLineItem, CartSnapshot};
use crate::checkout::{CheckoutTotals, compute_total};
use crate::session::SessionContext;
use crate::shipping::ShippingPolicy;
use crate::types::{Email, Money, ProductId, Quantity, UserId};

/// Problems with the shipping section of the checkout form.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShippingDetailsError {
    /// A required field was blank after trimming.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// The phone is not a Bangladeshi mobile number.
    #[error("Invalid mobile number: {0} (expected 01XXXXXXXXX)")]
    InvalidPhone(String),

    /// The postal code is not four digits.
    #[error("Invalid postal code: {0} (expected 4 digits)")]
    InvalidPostalCode(String),
}

/// Reasons an order cannot be submitted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OrderError {
    /// The cart has no lines; shipping would be charged on nothing.
    #[error("Cart is empty")]
    EmptyCart,

    /// No signed-in buyer, or the sign-in has expired.
    #[error("Sign in to place an order")]
    NotSignedIn,

    /// The shipping section of the form failed validation.
    #[error("Shipping details: {0}")]
    Shipping(#[from] ShippingDetailsError),
}

/// Where and to whom the order ships.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingDetails {
    /// Recipient name.
    pub full_name: String,
    /// Bangladeshi mobile number, normalized to `01XXXXXXXXX`.
    pub phone: String,
    /// Street address.
    pub address: String,
    /// City or district.
    pub city: String,
    /// Four-digit postal code, if given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    /// Contact email, if different from the login.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<Email>,
}

impl ShippingDetails {
    /// Trim every field, normalize the phone number and check required fields.
    ///
    /// # Errors
    ///
    /// Returns the first [`ShippingDetailsError`] found, checking fields in
    /// form order.
    pub fn validated(self) -> Result<Self, ShippingDetailsError> {
        let full_name = required(self.full_name, "Full name")?;
        let phone = normalize_phone(&required(self.phone, "Phone")?)?;
        let address = required(self.address, "Address")?;
        let city = required(self.city, "City")?;

        let postal_code = match self.postal_code.map(|code| code.trim().to_owned()) {
            Some(code) if code.is_empty() => None,
            Some(code) if code.len() == 4 && code.bytes().all(|b| b.is_ascii_digit()) => {
                Some(code)
            }
            Some(code) => return Err(ShippingDetailsError::InvalidPostalCode(code)),
            None => None,
        };

        Ok(Self {
            full_name,
            phone,
            address,
            city,
            postal_code,
            email: self.email,
        })
    }
}

fn required(value: String, field: &'static str) -> Result<String, ShippingDetailsError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ShippingDetailsError::MissingField(field));
    }
    Ok(trimmed.to_owned())
}

/// Normalize `+8801712345678`, `8801712345678`, `017-1234-5678` and friends
/// to `01712345678`.
fn normalize_phone(input: &str) -> Result<String, ShippingDetailsError> {
    let compact: String = input
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect();
    let local = compact
        .strip_prefix("+88")
        .or_else(|| compact.strip_prefix("88"))
        .filter(|rest| rest.starts_with("01"))
        .unwrap_or(&compact);

    let valid = local.len() == 11
        && local.bytes().all(|b| b.is_ascii_digit())
        && local.starts_with("01")
        && matches!(local.as_bytes().get(2), Some(b'3'..=b'9'));

    if valid {
        Ok(local.to_owned())
    } else {
        Err(ShippingDetailsError::InvalidPhone(input.trim().to_owned()))
    }
}

/// How the buyer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Cash on delivery.
    #[default]
    #[serde(rename = "cod")]
    CashOnDelivery,
    /// Paid online before shipping.
    #[serde(rename = "online")]
    Online,
}

/// Unrecognized payment method name.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown payment method: {0} (expected cod or online)")]
pub struct UnknownPaymentMethod(pub String);

impl std::str::FromStr for PaymentMethod {
    type Err = UnknownPaymentMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cod" | "cash" | "cash_on_delivery" => Ok(Self::CashOnDelivery),
            "online" => Ok(Self::Online),
            other => Err(UnknownPaymentMethod(other.to_owned())),
        }
    }
}

/// One line of a submitted order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// Product ordered.
    pub product_id: ProductId,
    /// Product name at the time of ordering.
    pub name: String,
    /// Price per unit.
    pub unit_price: Money,
    /// Units ordered.
    pub quantity: Quantity,
    /// `unit_price * quantity`.
    pub line_total: Money,
}

impl From<&CartLineItem> for OrderItem {
    fn from(line: &CartLineItem) -> Self {
        Self {
            product_id: line.product.id.clone(),
            name: line.product.name.clone(),
            unit_price: line.product.price,
            quantity: line.quantity,
            line_total: line.line_total(),
        }
    }
}

/// Order creation request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    /// Fresh per draft; lets the backend reject a double-submitted order.
    pub client_reference: Uuid,
    /// Buyer placing the order.
    pub user_id: UserId,
    /// Cart lines, in cart order.
    pub items: Vec<OrderItem>,
    /// Validated shipping details.
    pub shipping: ShippingDetails,
    /// Chosen payment method.
    pub payment_method: PaymentMethod,
    /// Subtotal, shipping fee and total, flattened into the body.
    #[serde(flatten)]
    pub totals: CheckoutTotals,
    /// When the draft was built.
    pub created_at: DateTime<Utc>,
}

impl OrderDraft {
    /// Build the order body for the current cart.
    ///
    /// # Errors
    ///
    /// - [`OrderError::EmptyCart`] if the cart has no lines
    /// - [`OrderError::NotSignedIn`] if `session` has no live sign-in at `now`
    /// - [`OrderError::Shipping`] if the shipping details are invalid
    pub fn build(
        cart: &CartSnapshot,
        shipping: ShippingDetails,
        payment_method: PaymentMethod,
        policy: &ShippingPolicy,
        session: &SessionContext,
        now: DateTime<Utc>,
    ) -> Result<Self, OrderError> {
        if cart.is_empty() {
            return Err(OrderError::EmptyCart);
        }
        let user = session.current_user(now).ok_or(OrderError::NotSignedIn)?;
        let shipping = shipping.validated()?;

        let draft = Self {
            client_reference: Uuid::new_v4(),
            user_id: user.id.clone(),
            items: cart.items().iter().map(OrderItem::from).collect(),
            shipping,
            payment_method,
            totals: compute_total(cart.items(), policy),
            created_at: now,
        };

        tracing::info!(
            client_reference = %draft.client_reference,
            user_id = %draft.user_id,
            lines = draft.items.len(),
            total = %draft.totals.total,
            "Built order draft"
        );
        Ok(draft)
    }
}
