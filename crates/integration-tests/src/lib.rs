//! Integration tests for Krishi.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p krishi-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `checkout_totals` - Calculator scenarios through the public API
//! - `backend_responses` - Normalization of recorded backend payloads
//! - `order_flow` - Cart response to order payload
//!
//! Recorded responses live in `fixtures/` and are loaded with [`fixture`].

/// Load a recorded backend response from `fixtures/`.
///
/// # Panics
///
/// Panics if the fixture does not exist.
#[must_use]
pub fn fixture(name: &str) -> String {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {e}", path.display()))
}
