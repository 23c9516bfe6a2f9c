use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub kafka: KafkaConfig,
    pub pricing: PricingRules,
}

/// Operator-tunable pricing knobs. File defaults can be overridden per
/// deployment from the pricing_rules table, see DbClient::fetch_pricing_rules.
#[derive(Debug, Deserialize, Clone)]
pub struct PricingRules {
    /// How long a quoted price stays bookable.
    #[serde(default = "default_quote_ttl")]
    pub quote_ttl_seconds: u64,
    /// Cap used when a service carries none of its own.
    #[serde(default = "default_surge_cap")]
    pub default_surge_cap: f64,
    /// Ceiling on provider-configured caps.
    #[serde(default = "default_max_surge_cap")]
    pub max_surge_cap: f64,
    #[serde(default = "default_rate_limit")]
    pub rate_limit_per_minute: i64,
    /// Kafka topic quote telemetry is published to.
    #[serde(default = "default_quote_topic")]
    pub quote_topic: String,
}

fn default_quote_ttl() -> u64 {
    900
}
fn default_surge_cap() -> f64 {
    2.0
}
fn default_max_surge_cap() -> f64 {
    3.0
}
fn default_rate_limit() -> i64 {
    100
}
fn default_quote_topic() -> String {
    "pricing.quotes".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RedisConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct KafkaConfig {
    pub brokers: String,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Base configuration, always present
            .add_source(config::File::with_name("config/default"))
            // Environment-specific file, optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Environment variables, e.g. SURGE__SERVER__PORT=9000
            .add_source(config::Environment::with_prefix("SURGE").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
