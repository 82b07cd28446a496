//! # System Constants
//!
//! Defaults and names shared across configuration, logging and the kitchen.

/// Orders a chef may have COOKING at the same time unless configured otherwise
pub const DEFAULT_COOKING_THRESHOLD: i64 = 1;

pub const DEFAULT_DATABASE_URL: &str = "postgresql://localhost/awesome_pizza_development";

/// Environment variable selecting development/test/production
pub const ENV_VAR: &str = "AWESOME_PIZZA_ENV";

/// Environment variable overriding the configuration directory
pub const CONFIG_DIR_ENV: &str = "AWESOME_PIZZA_CONFIG_DIR";

/// Prefix of section overrides, e.g. `AWESOME_PIZZA__KITCHEN__COOKING_THRESHOLD`
pub const ENV_VAR_PREFIX: &str = "AWESOME_PIZZA";

/// Base name of configuration files in the configuration directory
pub const CONFIG_FILE_STEM: &str = "awesome-pizza";

/// Structured log operation names
pub mod operations {
    pub const ORDER_CREATED: &str = "order.created";
    pub const ORDER_TRANSITIONED: &str = "order.transitioned";
    pub const ORDER_CLAIM_NEXT: &str = "order.claim_next";
}
