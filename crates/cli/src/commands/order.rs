//! Order payload command.
//!
//! # Usage
//!
//! ```bash
//! # Requires KRISHI_AUTH_TOKEN, KRISHI_USER_ID and KRISHI_USER_EMAIL
//! krishi order cart.json \
//!     --name "Ayesha Rahman" --phone 01712345678 \
//!     --address "House 12, Road 4" --city Dhaka --postal-code 1207
//! ```
//!
//! Prints the JSON body the order-creation endpoint expects. Nothing is sent.

use std::path::Path;

use chrono::Utc;
use krishi_core::{Email, OrderDraft, PaymentMethod, ShippingDetails, parse_cart};

use super::{CommandError, read_input, write_json};
use crate::config::CliConfig;

/// Checkout form fields collected from the command line.
#[derive(Debug)]
pub struct CheckoutForm {
    pub full_name: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub postal_code: Option<String>,
    pub email: Option<Email>,
    pub payment_method: PaymentMethod,
}

/// Build and print an order draft for a cart response.
pub fn draft(path: &Path, form: CheckoutForm, config: &CliConfig) -> Result<(), CommandError> {
    let cart = parse_cart(&read_input(path)?)?;

    let shipping = ShippingDetails {
        full_name: form.full_name,
        phone: form.phone,
        address: form.address,
        city: form.city,
        postal_code: form.postal_code,
        email: form.email,
    };

    let draft = OrderDraft::build(
        &cart,
        shipping,
        form.payment_method,
        &config.shipping,
        &config.session,
        Utc::now(),
    )?;

    write_json(&draft)
}
