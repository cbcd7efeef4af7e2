//! Cart response to order payload.

use chrono::{Duration, Utc};
use krishi_core::{
    Email, OrderDraft, OrderError, PaymentMethod, SessionContext, SessionUser, ShippingDetails,
    ShippingPolicy, UserId, parse_cart,
};
use krishi_integration_tests::fixture;
use secrecy::SecretString;

fn details() -> ShippingDetails {
    ShippingDetails {
        full_name: "Karim Uddin".to_string(),
        phone: "01812-345678".to_string(),
        address: "Village Bhabanipur, Ward 3".to_string(),
        city: "Rajshahi".to_string(),
        postal_code: None,
        email: Email::parse("karim@example.com").ok(),
    }
}

fn session() -> SessionContext {
    let mut session = SessionContext::anonymous();
    if let Ok(email) = Email::parse("karim@example.com") {
        session.sign_in(
            SessionUser {
                id: UserId::new("66e9aa01ff"),
                email,
            },
            SecretString::from("bearer-token"),
            Utc::now() + Duration::hours(2),
        );
    }
    session
}

#[test]
fn test_order_payload_from_cart_response() {
    let cart =
        parse_cart(&fixture("cart_flat_fee.json")).expect("cart_flat_fee.json should parse");
    let draft = match OrderDraft::build(
        &cart,
        details(),
        PaymentMethod::CashOnDelivery,
        &ShippingPolicy::default(),
        &session(),
        Utc::now(),
    ) {
        Ok(draft) => draft,
        Err(e) => panic!("order should build: {e}"),
    };

    let json = serde_json::to_value(&draft).expect("draft should serialize");
    assert_eq!(json["userId"], "66e9aa01ff");
    assert_eq!(json["items"][0]["name"], "Vermicompost (5 kg)");
    assert_eq!(json["items"][0]["quantity"], 1);
    assert_eq!(json["subtotal"].as_f64(), Some(200.0));
    assert_eq!(json["shippingFee"].as_f64(), Some(100.0));
    assert_eq!(json["total"].as_f64(), Some(300.0));
    assert_eq!(json["shipping"]["phone"], "01812345678");
    assert_eq!(json["shipping"]["email"], "karim@example.com");
}

#[test]
fn test_empty_cart_is_not_ordered() {
    let cart = parse_cart(&fixture("cart_empty.json")).expect("cart_empty.json should parse");
    assert!(cart.is_empty());
    let result = OrderDraft::build(
        &cart,
        details(),
        PaymentMethod::Online,
        &ShippingPolicy::default(),
        &session(),
        Utc::now(),
    );
    assert_eq!(result, Err(OrderError::EmptyCart));
}

#[test]
fn test_signed_out_buyer_cannot_order() {
    let cart =
        parse_cart(&fixture("cart_flat_fee.json")).expect("cart_flat_fee.json should parse");
    let mut session = session();
    session.sign_out();

    let result = OrderDraft::build(
        &cart,
        details(),
        PaymentMethod::Online,
        &ShippingPolicy::default(),
        &session,
        Utc::now(),
    );
    assert_eq!(result, Err(OrderError::NotSignedIn));
}
