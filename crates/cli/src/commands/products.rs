//! Product listing command.
//!
//! # Usage
//!
//! ```bash
//! krishi products products.json
//! ```

use std::path::Path;

use krishi_core::{format_taka, parse_products};

use super::{CommandError, read_input, write_lines};

/// Print one line per product: id, name and display price.
pub fn list(path: &Path) -> Result<(), CommandError> {
    let products = parse_products(&read_input(path)?)?;
    tracing::info!(count = products.len(), "Loaded products");

    write_lines(products.iter().map(|product| {
        format!(
            "{:<26} {:<32} {:>12}",
            product.id,
            product.name,
            format_taka(product.price)
        )
    }))
}
