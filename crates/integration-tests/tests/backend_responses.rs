//! Normalization of recorded backend responses.

use krishi_core::{
    Money, NormalizeError, ShippingPolicy, compute_total, parse_cart, parse_products,
};
use krishi_integration_tests::fixture;

#[test]
fn test_nested_cart_response() {
    let cart = parse_cart(&fixture("cart_free_shipping.json"))
        .expect("cart_free_shipping.json should parse");

    // The line whose product was deleted is dropped
    assert_eq!(cart.len(), 2);
    assert_eq!(cart.item_count(), 3);

    let planter = &cart.items()[1];
    assert_eq!(planter.product.id.as_str(), "650b2fa7d4");
    assert_eq!(planter.product.price, Money::from_taka(300));
    assert_eq!(
        planter.product.image_url.as_deref(),
        Some("https://cdn.krishi.example/products/planter.jpg")
    );

    let totals = compute_total(cart.items(), &ShippingPolicy::default());
    assert_eq!(totals.total, Money::from_taka(1100));
}

#[test]
fn test_flat_fee_cart_response() {
    let cart = parse_cart(&fixture("cart_flat_fee.json")).expect("cart_flat_fee.json should parse");
    assert_eq!(cart.len(), 1);

    let totals = compute_total(cart.items(), &ShippingPolicy::default());
    assert_eq!(totals.total, Money::from_taka(300));
}

#[test]
fn test_empty_cart_response() {
    let cart = parse_cart(&fixture("cart_empty.json"));
    assert!(matches!(cart, Ok(ref c) if c.is_empty()));
}

#[test]
fn test_product_listing_response() {
    let products = parse_products(&fixture("products.json")).expect("products.json should parse");
    let prices: Vec<String> = products.iter().map(|p| p.price.to_string()).collect();
    assert_eq!(prices, ["500", "300.5", "1250"]);
    assert!(products.iter().all(|p| p.image_url.is_none()));
}

#[test]
fn test_same_products_in_every_envelope() {
    let body = fixture("products.json");
    let value: serde_json::Value =
        serde_json::from_str(&body).expect("products.json should be JSON");
    let bare = value["products"].to_string();
    let nested = serde_json::json!({ "data": { "products": value["products"] } }).to_string();

    let expected = parse_products(&body).expect("wrapped listing should parse");
    assert_eq!(expected.len(), 3);
    assert_eq!(
        parse_products(&bare).expect("bare listing should parse"),
        expected
    );
    assert_eq!(
        parse_products(&nested).expect("nested listing should parse"),
        expected
    );
}

#[test]
fn test_error_response_is_rejected() {
    let result = parse_cart(r#"{"success":false,"message":"Unauthorized"}"#);
    assert!(matches!(result, Err(NormalizeError::Shape(_))));
}

#[test]
fn test_unrecognized_cart_body_is_an_error() {
    let result = parse_cart(r#"{"garbage": true}"#);
    assert!(matches!(result, Err(NormalizeError::Shape(_))));
}

#[test]
fn test_cart_that_would_overflow_totals_is_rejected() {
    let body = r#"{"items":[{"product":{"id":"p","name":"x","price":"79228162514264337593543950335"},"quantity":2}]}"#;
    assert!(matches!(
        parse_cart(body),
        Err(NormalizeError::AmountTooLarge { .. })
    ));
}
