//! Service configuration loaded from the environment.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::booking::TaxDefaults;

/// Configuration error raised at startup
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

/// Runtime configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Socket address the HTTP server binds to
    pub bind_addr: String,
    /// Fallback tracing filter when RUST_LOG is unset
    pub log_filter: String,
    /// Idle lifetime of a login session
    pub session_ttl: Duration,
    /// Currency code attached to money values in responses
    pub currency: String,
    /// Municipal tax pre-filled on booking forms
    pub default_municipal_tax: Decimal,
    /// Electricity tax pre-filled on booking forms
    pub default_electricity_tax: Decimal,
    /// Load the built-in demo inventory on startup
    pub seed_demo_data: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            log_filter: "buildercon_web=info,tower_http=info".to_string(),
            session_ttl: Duration::from_secs(8 * 60 * 60),
            currency: "INR".to_string(),
            default_municipal_tax: dec!(50000),
            default_electricity_tax: dec!(10000),
            seed_demo_data: true,
        }
    }
}

impl Config {
    /// Taxes used when a booking form leaves them blank
    pub fn tax_defaults(&self) -> TaxDefaults {
        TaxDefaults {
            municipal_tax: self.default_municipal_tax,
            electricity_tax: self.default_electricity_tax,
        }
    }

    /// Build configuration from environment variables, falling back to defaults.
    ///
    /// Call `dotenvy::dotenv()` first so a local `.env` file is honoured.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let session_ttl = match lookup("SESSION_TTL_SECS") {
            Some(raw) => Duration::from_secs(parse_value("SESSION_TTL_SECS", &raw)?),
            None => defaults.session_ttl,
        };

        let default_municipal_tax = match lookup("DEFAULT_MUNICIPAL_TAX") {
            Some(raw) => parse_tax("DEFAULT_MUNICIPAL_TAX", &raw)?,
            None => defaults.default_municipal_tax,
        };

        let default_electricity_tax = match lookup("DEFAULT_ELECTRICITY_TAX") {
            Some(raw) => parse_tax("DEFAULT_ELECTRICITY_TAX", &raw)?,
            None => defaults.default_electricity_tax,
        };

        let seed_demo_data = match lookup("SEED_DEMO_DATA") {
            Some(raw) => parse_value("SEED_DEMO_DATA", &raw)?,
            None => defaults.seed_demo_data,
        };

        Ok(Self {
            bind_addr: lookup("BIND_ADDR").unwrap_or(defaults.bind_addr),
            log_filter: lookup("RUST_LOG").unwrap_or(defaults.log_filter),
            session_ttl,
            currency: lookup("CURRENCY").unwrap_or(defaults.currency),
            default_municipal_tax,
            default_electricity_tax,
            seed_demo_data,
        })
    }
}

fn parse_value<T: FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: raw.to_string(),
    })
}

/// Taxes feed the cost calculator, which only takes non-negative amounts.
fn parse_tax(key: &'static str, raw: &str) -> Result<Decimal, ConfigError> {
    let tax: Decimal = parse_value(key, raw)?;
    if tax.is_sign_negative() && !tax.is_zero() {
        return Err(ConfigError::InvalidValue {
            key,
            value: raw.to_string(),
        });
    }
    Ok(tax)
}
