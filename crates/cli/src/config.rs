//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `KRISHI_FREE_SHIPPING_THRESHOLD` - Subtotal that must be exceeded for free shipping (default: 1000)
//! - `KRISHI_FLAT_SHIPPING_FEE` - Fee charged otherwise (default: 100)
//!
//! ## Session (all-or-nothing, needed by `krishi order`)
//! - `KRISHI_AUTH_TOKEN` - Bearer token from a browser login
//! - `KRISHI_USER_ID` - Backend user ID the token belongs to
//! - `KRISHI_USER_EMAIL` - Login email
//! - `KRISHI_SESSION_EXPIRES_AT` - RFC 3339 expiry (default: one hour from now)

use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use krishi_core::{Email, Money, SessionContext, SessionUser, ShippingPolicy, UserId};
use secrecy::SecretString;
use thiserror::Error;

const DEFAULT_SESSION_LIFETIME_MINUTES: i64 = 60;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// CLI configuration.
///
/// `Debug` is derived; the session redacts its own token.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Shipping fee policy applied to every total.
    pub shipping: ShippingPolicy,
    /// Signed-in buyer, if the session variables are set.
    pub session: SessionContext,
}

impl CliConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid, or if the
    /// session variables are only partly set.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok(), Utc::now())
    }

    /// Load configuration from an arbitrary key lookup.
    fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Self, ConfigError> {
        let defaults = ShippingPolicy::default();
        let shipping = ShippingPolicy::new(
            get_amount(
                &lookup,
                "KRISHI_FREE_SHIPPING_THRESHOLD",
                defaults.free_shipping_threshold,
            )?,
            get_amount(
                &lookup,
                "KRISHI_FLAT_SHIPPING_FEE",
                defaults.flat_shipping_fee,
            )?,
        );

        let session = match lookup("KRISHI_AUTH_TOKEN") {
            Some(token) => load_session(&lookup, SecretString::from(token), now)?,
            None => SessionContext::anonymous(),
        };

        Ok(Self { shipping, session })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required variable.
fn get_required(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<String, ConfigError> {
    lookup(key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get a non-negative amount within the cart limit, with a default value.
fn get_amount(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: Money,
) -> Result<Money, ConfigError> {
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    let amount = Money::from_str(&raw)
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if amount.is_negative() {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("must not be negative (got {amount})"),
        ));
    }
    if !amount.within_cart_limit() {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("must not exceed {} (got {amount})", Money::MAX_CART_TAKA),
        ));
    }
    Ok(amount)
}

/// Build the signed-in session once a token is known to be present.
fn load_session(
    lookup: &impl Fn(&str) -> Option<String>,
    token: SecretString,
    now: DateTime<Utc>,
) -> Result<SessionContext, ConfigError> {
    let id = UserId::new(get_required(lookup, "KRISHI_USER_ID")?);
    let email = Email::parse(&get_required(lookup, "KRISHI_USER_EMAIL")?).map_err(|e| {
        ConfigError::InvalidEnvVar("KRISHI_USER_EMAIL".to_string(), e.to_string())
    })?;
    let expires_at = match lookup("KRISHI_SESSION_EXPIRES_AT") {
        Some(raw) => DateTime::parse_from_rfc3339(raw.trim())
            .map_err(|e| {
                ConfigError::InvalidEnvVar("KRISHI_SESSION_EXPIRES_AT".to_string(), e.to_string())
            })?
            .with_timezone(&Utc),
        None => now + Duration::minutes(DEFAULT_SESSION_LIFETIME_MINUTES),
    };

    Ok(SessionContext::authenticated(
        SessionUser { id, email },
        token,
        expires_at,
    ))
}
