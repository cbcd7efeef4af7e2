//! Checkout total commands.
//!
//! # Usage
//!
//! ```bash
//! # Totals for a saved "current cart" response
//! krishi totals cart.json
//!
//! # Same, as JSON, reading from stdin
//! curl -s "$API/cart" -H "Authorization: Bearer $TOKEN" | krishi totals - --json
//!
//! # Shipping fee for a subtotal
//! krishi shipping-fee 1000
//!
//! # Format an amount
//! krishi format 150000
//! ```

use std::path::Path;

use krishi_core::{
    CartSnapshot, CheckoutTotals, CurrencyFormat, FormattedTotals, Money, ShippingPolicy,
    compute_shipping_fee, compute_total, format_taka, parse_cart,
};
use serde::Serialize;

use super::{CommandError, read_input, write_json, write_lines};

/// Machine-readable totals report.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TotalsReport {
    item_count: u64,
    /// `None` for an empty cart; no shipping is charged on nothing.
    totals: Option<CheckoutTotals>,
    formatted: Option<FormattedTotals>,
}

fn build_report(cart: &CartSnapshot, policy: &ShippingPolicy) -> TotalsReport {
    let totals = (!cart.is_empty()).then(|| compute_total(cart.items(), policy));
    TotalsReport {
        item_count: cart.item_count(),
        formatted: totals.as_ref().map(|t| t.formatted(&CurrencyFormat::TAKA)),
        totals,
    }
}

fn render_lines(cart: &CartSnapshot, report: &TotalsReport) -> Vec<String> {
    let (Some(totals), Some(formatted)) = (&report.totals, &report.formatted) else {
        return vec!["Your cart is empty.".to_string()];
    };
    let format = CurrencyFormat::TAKA;

    let mut lines: Vec<String> = cart
        .items()
        .iter()
        .map(|line| {
            format!(
                "{:>4} x {:<32} {:>12}",
                line.quantity,
                line.product.name,
                format.format(line.line_total())
            )
        })
        .collect();

    let shipping = if totals.free_shipping() {
        "Free"
    } else {
        formatted.shipping_fee.as_str()
    };
    lines.push(String::new());
    lines.push(format!("{:<39} {:>12}", "Subtotal", formatted.subtotal));
    lines.push(format!("{:<39} {:>12}", "Shipping", shipping));
    lines.push(format!("{:<39} {:>12}", "Total", formatted.total));
    lines
}

/// Print subtotal, shipping fee and total for a cart response.
pub fn show(path: &Path, json: bool, policy: &ShippingPolicy) -> Result<(), CommandError> {
    let cart = parse_cart(&read_input(path)?)?;
    tracing::info!(lines = cart.len(), items = cart.item_count(), "Loaded cart");

    let report = build_report(&cart, policy);
    if json {
        return write_json(&report);
    }
    write_lines(render_lines(&cart, &report))
}

/// Print the shipping fee for a subtotal.
pub fn shipping_fee(subtotal: Money, policy: &ShippingPolicy) -> Result<(), CommandError> {
    write_lines([format_taka(compute_shipping_fee(subtotal, policy))])
}

/// Print an amount in display format.
pub fn format_amount(amount: Money) -> Result<(), CommandError> {
    write_lines([format_taka(amount)])
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn cart(json: &str) -> CartSnapshot {
        parse_cart(json).unwrap()
    }

    #[test]
    fn test_empty_cart_report_has_no_totals() {
        let cart = cart(r#"{"items":[]}"#);
        let report = build_report(&cart, &ShippingPolicy::default());
        assert_eq!(report.item_count, 0);
        assert!(report.totals.is_none());

        let json = serde_json::to_value(&report).unwrap();
        assert!(json["totals"].is_null());
        assert!(json["formatted"].is_null());

        assert_eq!(render_lines(&cart, &report), ["Your cart is empty."]);
    }

    #[test]
    fn test_under_threshold_charges_flat_fee() {
        let cart = cart(
            r#"{"items":[{"product":{"id":"p1","name":"Jute rope","price":200},"quantity":2}]}"#,
        );
        let report = build_report(&cart, &ShippingPolicy::default());
        let totals = report.totals.unwrap();
        assert_eq!(totals.shipping_fee, Money::from_taka(100));
        assert_eq!(totals.total, Money::from_taka(500));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["itemCount"], 2);
        assert_eq!(json["totals"]["total"].as_f64(), Some(500.0));

        let lines = render_lines(&cart, &report);
        assert!(lines[0].contains("Jute rope"));
        assert!(lines[0].contains("৳400"));
        assert!(lines.iter().any(|l| l.starts_with("Shipping") && l.ends_with("৳100")));
        assert!(lines.last().unwrap().ends_with("৳500"));
    }

    #[test]
    fn test_over_threshold_ships_free() {
        let cart = cart(
            r#"{"items":[{"product":{"id":"p1","name":"Hand tiller","price":1200},"quantity":1}]}"#,
        );
        let report = build_report(&cart, &ShippingPolicy::default());
        assert_eq!(report.totals.unwrap().shipping_fee, Money::ZERO);

        let lines = render_lines(&cart, &report);
        assert!(lines.iter().any(|l| l.starts_with("Shipping") && l.ends_with("Free")));
        assert!(lines.last().unwrap().ends_with("৳1,200"));
    }
}
