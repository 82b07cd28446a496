//! # Awesome Pizza Configuration
//!
//! Layered configuration loaded with the `config` crate:
//!
//! 1. Built-in defaults
//! 2. `config/awesome-pizza.toml`
//! 3. `config/awesome-pizza.<environment>.toml`
//! 4. `AWESOME_PIZZA__*` environment variables (`__` separates sections)
//! 5. `DATABASE_URL`, when set
//!
//! ## Usage
//!
//! ```rust,no_run
//! use awesome_pizza::config::ConfigManager;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = ConfigManager::load()?;
//! let threshold = manager.config().kitchen.cooking_threshold;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod loader;

use crate::constants::{DEFAULT_COOKING_THRESHOLD, DEFAULT_DATABASE_URL};
use serde::{Deserialize, Serialize};

pub use error::{ConfigResult, ConfigurationError};
pub use loader::ConfigManager;

/// Root configuration structure mirroring awesome-pizza.toml
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PizzaConfig {
    /// Database connection settings
    pub database: DatabaseConfig,

    /// Kitchen admission control
    pub kitchen: KitchenConfig,

    /// Log output settings
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_seconds: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: 10,
            acquire_timeout_seconds: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct KitchenConfig {
    /// Maximum number of orders a single chef may have COOKING at once
    pub cooking_threshold: i64,
}

impl Default for KitchenConfig {
    fn default() -> Self {
        Self {
            cooking_threshold: DEFAULT_COOKING_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive; `RUST_LOG` wins when set
    pub level: Option<String>,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl PizzaConfig {
    /// Reject values the kitchen cannot operate with
    pub fn validate(&self) -> ConfigResult<()> {
        if self.kitchen.cooking_threshold < 1 {
            return Err(ConfigurationError::invalid_value(
                "kitchen.cooking_threshold",
                format!("must be at least 1, got {}", self.kitchen.cooking_threshold),
            ));
        }

        if self.database.max_connections == 0 {
            return Err(ConfigurationError::invalid_value(
                "database.max_connections",
                "must be greater than 0",
            ));
        }

        if self.database.url.trim().is_empty() {
            return Err(ConfigurationError::invalid_value(
                "database.url",
                "must not be empty",
            ));
        }

        Ok(())
    }
}
