//! Kiosk configuration
//!
//! Tunables for pricing and session timing, loaded from environment variables
//! with sensible defaults.
//!
//! # Example
//!
//! ```no_run
//! use kiosk_core::config::KioskConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = KioskConfig::from_env()?;
//! println!("Idle timeout: {:?}", config.idle_timeout());
//! # Ok(())
//! # }
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Environment variable holding the tax rate as a fraction (`0.10`)
pub const ENV_TAX_RATE: &str = "KIOSK_TAX_RATE";
/// Environment variable holding the idle timeout in seconds
pub const ENV_IDLE_TIMEOUT_SECS: &str = "KIOSK_IDLE_TIMEOUT_SECS";
/// Environment variable holding the simulated payment delay in milliseconds
pub const ENV_PAYMENT_DELAY_MS: &str = "KIOSK_PAYMENT_DELAY_MS";
/// Environment variable holding the success screen countdown in seconds
pub const ENV_SUCCESS_COUNTDOWN_SECS: &str = "KIOSK_SUCCESS_COUNTDOWN_SECS";

/// Configuration error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Environment variable could not be parsed
    #[error("Failed to parse {var}: {value:?}")]
    ParseError {
        /// Variable name
        var: &'static str,
        /// Raw value
        value: String,
    },

    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

/// Pricing and timing settings for a kiosk session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KioskConfig {
    /// Tax as a fraction of the subtotal
    pub tax_rate: Decimal,
    /// Inactivity before an unfinished session is abandoned, in milliseconds
    pub idle_timeout_ms: u64,
    /// Simulated payment terminal latency, in milliseconds
    pub payment_delay_ms: u64,
    /// Seconds the success screen stays up before the kiosk resets
    pub success_countdown_secs: u32,
    /// Length of one countdown tick, in milliseconds
    pub countdown_tick_ms: u64,
}

impl Default for KioskConfig {
    fn default() -> Self {
        Self {
            tax_rate: Decimal::new(10, 2),
            idle_timeout_ms: 60_000,
            payment_delay_ms: 2_500,
            success_countdown_secs: 15,
            countdown_tick_ms: 1_000,
        }
    }
}

impl KioskConfig {
    /// Load defaults overridden by `KIOSK_*` environment variables
    ///
    /// # Errors
    ///
    /// Returns error if a variable is set but malformed, or the result fails validation
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`KioskConfig::from_env`] with a custom variable source
    ///
    /// # Errors
    ///
    /// Returns error if a variable is set but malformed, or the result fails validation
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(rate) = parse_var::<Decimal>(&lookup, ENV_TAX_RATE)? {
            config.tax_rate = rate;
        }
        if let Some(secs) = parse_var::<u64>(&lookup, ENV_IDLE_TIMEOUT_SECS)? {
            config.idle_timeout_ms = secs.saturating_mul(1_000);
        }
        if let Some(ms) = parse_var::<u64>(&lookup, ENV_PAYMENT_DELAY_MS)? {
            config.payment_delay_ms = ms;
        }
        if let Some(secs) = parse_var::<u32>(&lookup, ENV_SUCCESS_COUNTDOWN_SECS)? {
            config.success_countdown_secs = secs;
        }
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns error if configuration is invalid
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tax_rate.is_sign_negative() || self.tax_rate >= Decimal::ONE {
            return Err(ConfigError::ValidationError(
                "tax_rate must be in [0, 1)".to_string(),
            ));
        }
        if self.idle_timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "idle_timeout_ms must be > 0".to_string(),
            ));
        }
        if self.countdown_tick_ms == 0 {
            return Err(ConfigError::ValidationError(
                "countdown_tick_ms must be > 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Get idle timeout as Duration
    #[must_use]
    pub const fn idle_timeout(&self) -> Duration {
        Duration::from_millis(self.idle_timeout_ms)
    }

    /// Get payment delay as Duration
    #[must_use]
    pub const fn payment_delay(&self) -> Duration {
        Duration::from_millis(self.payment_delay_ms)
    }

    /// Get countdown tick as Duration
    #[must_use]
    pub const fn countdown_tick(&self) -> Duration {
        Duration::from_millis(self.countdown_tick_ms)
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<T>, ConfigError> {
    lookup(var)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|_| ConfigError::ParseError { var, value: raw })
        })
        .transpose()
}
