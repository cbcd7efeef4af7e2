//! Parsing of backend product and cart responses.
//!
//! The marketplace backend is inconsistent about response envelopes: product
//! listings arrive as `{"products": [...]}`, as a bare array, or wrapped in
//! `{"data": ...}`; carts arrive as `{"items": [...]}`, `{"cart": {...}}`,
//! a bare array, or wrapped in `{"data": ...}`. This module accepts all of
//! those once and hands out typed [`Product`]s and [`CartSnapshot`]s, so
//! nothing downstream has to inspect JSON shapes.
//!
//! It is also where checkout input is validated: a product with a negative or
//! unparsable price, a line with fewer than one unit, or a cart whose amounts
//! exceed [`Money::MAX_CART_TAKA`] is rejected here before any total is
//! computed. Totals of an accepted cart cannot overflow.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::cart::{CartLineItem, CartSnapshot, Product};
use crate::types::{Money, ProductId, Quantity};

/// Errors produced while normalizing a backend response.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// The body is not JSON or matches none of the known envelopes.
    #[error("Unrecognized response shape: {0}")]
    Shape(#[from] serde_json::Error),

    /// A product carried neither `id` nor `_id`.
    #[error("Product {name:?} has no id")]
    MissingProductId { name: String },

    /// A price could not be read as a decimal number.
    #[error("Invalid price for product {product_id}: {value}")]
    InvalidPrice { product_id: ProductId, value: String },

    /// A price was below zero.
    #[error("Negative price for product {product_id}: {price}")]
    NegativePrice { product_id: ProductId, price: Money },

    /// A price, line total or running subtotal went past the cart limit.
    #[error("Amount for product {product_id} exceeds the cart limit of {limit} taka")]
    AmountTooLarge { product_id: ProductId, limit: i64 },

    /// A line asked for fewer than one unit, or an absurd number of units.
    #[error("Invalid quantity for product {product_id}: {quantity} (must be at least 1)")]
    InvalidQuantity { product_id: ProductId, quantity: i64 },
}

// =============================================================================
// Wire Shapes
// =============================================================================

#[derive(Deserialize)]
#[serde(untagged)]
enum ProductsEnvelope {
    Bare(Vec<RawProduct>),
    Products { products: Vec<RawProduct> },
    Data { data: Box<ProductsEnvelope> },
}

impl ProductsEnvelope {
    fn into_products(self) -> Vec<RawProduct> {
        match self {
            Self::Bare(products) | Self::Products { products } => products,
            Self::Data { data } => data.into_products(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CartEnvelope {
    Bare(Vec<RawCartLine>),
    Items { items: Vec<RawCartLine> },
    Cart { cart: Box<CartEnvelope> },
    Data { data: Box<CartEnvelope> },
}

impl CartEnvelope {
    fn into_lines(self) -> Vec<RawCartLine> {
        match self {
            Self::Bare(items) | Self::Items { items } => items,
            Self::Cart { cart: inner } | Self::Data { data: inner } => inner.into_lines(),
        }
    }
}

#[derive(Deserialize)]
struct RawCartLine {
    product: Option<RawProduct>,
    quantity: i64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProduct {
    id: Option<String>,
    #[serde(rename = "_id")]
    document_id: Option<String>,
    #[serde(default)]
    name: String,
    price: RawAmount,
    #[serde(alias = "image_url")]
    image_url: Option<String>,
    #[serde(default)]
    images: Vec<RawImage>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(serde_json::Number),
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawImage {
    Url(String),
    Object { url: String },
}

impl RawImage {
    fn into_url(self) -> String {
        match self {
            Self::Url(url) | Self::Object { url } => url,
        }
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl TryFrom<RawProduct> for Product {
    type Error = NormalizeError;

    fn try_from(raw: RawProduct) -> Result<Self, Self::Error> {
        let Some(id) = raw.id.or(raw.document_id) else {
            return Err(NormalizeError::MissingProductId { name: raw.name });
        };
        let id = ProductId::new(id);

        let price = parse_amount(&raw.price).ok_or_else(|| NormalizeError::InvalidPrice {
            product_id: id.clone(),
            value: raw.price.to_string(),
        })?;
        if price.is_negative() {
            return Err(NormalizeError::NegativePrice {
                product_id: id,
                price,
            });
        }
        if !price.within_cart_limit() {
            return Err(too_large(id));
        }

        let image_url = raw
            .image_url
            .into_iter()
            .chain(raw.images.into_iter().map(RawImage::into_url))
            .find(|url| !url.trim().is_empty());

        Ok(Self {
            id,
            name: raw.name,
            price,
            image_url,
        })
    }
}

impl std::fmt::Display for RawAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s:?}"),
        }
    }
}

fn too_large(product_id: ProductId) -> NormalizeError {
    NormalizeError::AmountTooLarge {
        product_id,
        limit: Money::MAX_CART_TAKA,
    }
}

fn parse_amount(raw: &RawAmount) -> Option<Money> {
    let text = match raw {
        RawAmount::Number(n) => n.to_string(),
        RawAmount::Text(s) => s.trim().to_owned(),
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
        .map(Money::new)
}

fn convert_line(raw: RawCartLine) -> Result<Option<CartLineItem>, NormalizeError> {
    let Some(product) = raw.product else {
        warn!(
            quantity = raw.quantity,
            "Dropping cart line whose product no longer exists"
        );
        return Ok(None);
    };
    let product = Product::try_from(product)?;

    let quantity = u32::try_from(raw.quantity)
        .ok()
        .filter(|&units| units >= 1)
        .ok_or_else(|| NormalizeError::InvalidQuantity {
            product_id: product.id.clone(),
            quantity: raw.quantity,
        })?;
    let quantity = Quantity::new(quantity);

    if !product
        .price
        .checked_mul(quantity)
        .is_some_and(|total| total.within_cart_limit())
    {
        return Err(too_large(product.id));
    }

    Ok(Some(CartLineItem::new(product, quantity)))
}

// =============================================================================
// Public API
// =============================================================================

/// Parse a product listing response.
///
/// # Errors
///
/// Returns [`NormalizeError::Shape`] if the body matches no known envelope,
/// or a validation error for the first bad product.
pub fn parse_products(json: &str) -> Result<Vec<Product>, NormalizeError> {
    let envelope: ProductsEnvelope = serde_json::from_str(json)?;
    let products = envelope
        .into_products()
        .into_iter()
        .map(Product::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    debug!(count = products.len(), "Normalized product listing");
    Ok(products)
}

/// Parse a "current cart" response into a snapshot.
///
/// Lines whose product is `null` are dropped with a warning.
///
/// # Errors
///
/// Returns [`NormalizeError::Shape`] if the body matches no known envelope,
/// or a validation error for the first bad line.
pub fn parse_cart(json: &str) -> Result<CartSnapshot, NormalizeError> {
    let envelope: CartEnvelope = serde_json::from_str(json)?;
    let mut items = Vec::new();
    let mut subtotal = Money::ZERO;
    for raw in envelope.into_lines() {
        let Some(line) = convert_line(raw)? else {
            continue;
        };
        subtotal = subtotal
            .checked_add(line.line_total())
            .filter(Money::within_cart_limit)
            .ok_or_else(|| too_large(line.product.id.clone()))?;
        items.push(line);
    }

    debug!(lines = items.len(), "Normalized cart");
    Ok(CartSnapshot::new(items))
}
