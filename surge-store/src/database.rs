use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres, Row};
use std::time::Duration;
use tracing::info;

use crate::app_config::PricingRules;

#[derive(Clone)]
pub struct DbClient {
    pub pool: Pool<Postgres>,
}

impl DbClient {
    pub async fn new(connection_string: &str) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(connection_string)
            .await?;

        Ok(Self { pool })
    }

    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        info!("Running database migrations...");
        sqlx::migrate!("../migrations").run(&self.pool).await?;
        info!("Migrations completed successfully.");
        Ok(())
    }

    /// Merge per-deployment overrides from the pricing_rules table over the
    /// file-based defaults. Rows are {"value": <number/string>} keyed by
    /// rule_key; unknown keys are ignored.
    pub async fn fetch_pricing_rules(
        &self,
        defaults: PricingRules,
    ) -> Result<PricingRules, sqlx::Error> {
        let rows = sqlx::query("SELECT rule_key, rule_value FROM pricing_rules")
            .fetch_all(&self.pool)
            .await?;

        let mut rules = defaults;

        for row in rows {
            let key: String = row.try_get("rule_key")?;
            let val: serde_json::Value = row.try_get("rule_value")?;

            let Some(v) = val.get("value") else { continue };

            match key.as_str() {
                "quote_ttl_seconds" => {
                    if let Some(u) = v.as_u64() {
                        rules.quote_ttl_seconds = u;
                    }
                }
                "default_surge_cap" => {
                    if let Some(f) = v.as_f64() {
                        rules.default_surge_cap = f;
                    }
                }
                "max_surge_cap" => {
                    if let Some(f) = v.as_f64() {
                        rules.max_surge_cap = f;
                    }
                }
                "rate_limit_per_minute" => {
                    if let Some(i) = v.as_i64() {
                        rules.rate_limit_per_minute = i;
                    }
                }
                "quote_topic" => {
                    if let Some(s) = v.as_str() {
                        rules.quote_topic = String::from(s);
                    }
                }
                _ => {}
            }
        }

        Ok(rules)
    }
}
