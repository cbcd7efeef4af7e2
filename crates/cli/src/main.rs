//! Krishi CLI - cart, checkout and order tools for the marketplace.
//!
//! # Usage
//!
//! ```bash
//! # Subtotal, shipping and total for a saved cart response
//! krishi totals cart.json
//!
//! # Shipping fee under the configured policy
//! krishi shipping-fee 850
//!
//! # Display format for an amount
//! krishi format 125000
//!
//! # Normalized product listing
//! krishi products products.json
//!
//! # Order payload for a cart (needs a session, see config)
//! krishi order cart.json --name "..." --phone 017... --address "..." --city Dhaka
//! ```
//!
//! # Commands
//!
//! - `totals` - Checkout totals for a cart response
//! - `shipping-fee` - Fee for a subtotal
//! - `format` - Taka display formatting
//! - `products` - Product listing
//! - `order` - Order creation payload

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use krishi_core::{Email, Money, PaymentMethod};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

use commands::CommandError;
use commands::order::CheckoutForm;
use config::CliConfig;

#[derive(Parser)]
#[command(name = "krishi")]
#[command(author, version, about = "Krishi marketplace CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show subtotal, shipping fee and total for a cart response
    Totals {
        /// Cart response JSON file, or `-` for stdin
        input: PathBuf,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show the shipping fee for a subtotal
    ShippingFee {
        /// Subtotal in taka
        subtotal: Money,
    },
    /// Format an amount for display
    Format {
        /// Amount in taka
        amount: Money,
    },
    /// List products from a product listing response
    Products {
        /// Product listing JSON file, or `-` for stdin
        input: PathBuf,
    },
    /// Print the order creation payload for a cart response
    Order {
        /// Cart response JSON file, or `-` for stdin
        input: PathBuf,

        /// Recipient full name
        #[arg(short, long)]
        name: String,

        /// Recipient mobile number
        #[arg(short, long)]
        phone: String,

        /// Street address
        #[arg(short, long)]
        address: String,

        /// City or district
        #[arg(short, long)]
        city: String,

        /// Four-digit postal code
        #[arg(long)]
        postal_code: Option<String>,

        /// Contact email
        #[arg(short, long)]
        email: Option<Email>,

        /// Payment method (`cod` or `online`)
        #[arg(long, default_value = "cod")]
        payment: PaymentMethod,
    },
}

fn main() {
    // Logs go to stderr; stdout carries command output
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "krishi_cli=info,krishi_core=warn".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CommandError> {
    let config = CliConfig::from_env()?;
    tracing::debug!(?config, "Loaded configuration");

    match cli.command {
        Commands::Totals { input, json } => commands::totals::show(&input, json, &config.shipping),
        Commands::ShippingFee { subtotal } => {
            commands::totals::shipping_fee(subtotal, &config.shipping)
        }
        Commands::Format { amount } => commands::totals::format_amount(amount),
        Commands::Products { input } => commands::products::list(&input),
        Commands::Order {
            input,
            name,
            phone,
            address,
            city,
            postal_code,
            email,
            payment,
        } => commands::order::draft(
            &input,
            CheckoutForm {
                full_name: name,
                phone,
                address,
                city,
                postal_code,
                email,
                payment_method: payment,
            },
            &config,
        ),
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_order_arguments() {
        let cli = Cli::try_parse_from([
            "krishi",
            "order",
            "cart.json",
            "--name",
            "Ayesha Rahman",
            "--phone",
            "01712345678",
            "--address",
            "House 12",
            "--city",
            "Dhaka",
            "--payment",
            "online",
        ])
        .map_err(|e| e.to_string());

        assert!(matches!(
            cli,
            Ok(Cli {
                command: Commands::Order {
                    payment: PaymentMethod::Online,
                    email: None,
                    ..
                }
            })
        ));
    }

    #[test]
    fn test_parse_money_argument() {
        let cli =
            Cli::try_parse_from(["krishi", "shipping-fee", "1000.01"]).map_err(|e| e.to_string());
        assert!(matches!(
            cli,
            Ok(Cli {
                command: Commands::ShippingFee { .. }
            })
        ));

        assert!(Cli::try_parse_from(["krishi", "format", "lots"]).is_err());
    }
}
