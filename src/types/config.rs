//! Service configuration.

use config::{Config, ConfigError, Environment};
use serde::{Deserialize, Serialize};

use crate::{DEFAULT_POOL_SIZE, DEFAULT_PORT};

/// Prefix for environment overrides, e.g. `PAYMENT_AMQP_URI`.
pub const ENV_PREFIX: &str = "PAYMENT";

/// Global payment relay configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP listen port
    pub port: u16,

    /// AMQP broker URI; when absent the relay runs against an in-process broker
    pub amqp_uri: Option<String>,

    /// Maximum pooled broker connections
    pub pool_size: usize,

    /// Declare exchange, queue and binding at startup. Applies to both
    /// brokers; without it the in-process broker has no exchange and every
    /// publish fails, as an undeclared AMQP exchange would.
    pub declare_topology: bool,

    /// Subscribe the listener to the payment queue
    pub listener_enabled: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            amqp_uri: None,
            pool_size: DEFAULT_POOL_SIZE,
            declare_topology: true,
            listener_enabled: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults overlaid with `PAYMENT_*` variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
    }

    /// Load configuration with an explicit environment source.
    pub fn load_from(env: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("port", DEFAULT_PORT as i64)?
            .set_default("pool_size", DEFAULT_POOL_SIZE as i64)?
            .set_default("declare_topology", true)?
            .set_default("listener_enabled", true)?
            .add_source(env)
            .build()?
            .try_deserialize()
    }
}
