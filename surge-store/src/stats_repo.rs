use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use surge_core::models::{GeoPoint, ServiceListing};
use surge_core::repository::StatsRepository;

/// Postgres-backed aggregates for the pricing engine.
pub struct PostgresStatsRepository {
    pub pool: PgPool,
}

impl PostgresStatsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StatsRepository for PostgresStatsRepository {
    async fn get_service(
        &self,
        id: Uuid,
    ) -> Result<Option<ServiceListing>, Box<dyn std::error::Error + Send + Sync>> {
        let row = sqlx::query(
            r#"
            SELECT id, category_id, name, base_price, surge_cap, is_active
            FROM services
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(Some(ServiceListing {
            id: row.try_get("id")?,
            category_id: row.try_get("category_id")?,
            name: row.try_get("name")?,
            base_price: row.try_get("base_price")?,
            surge_cap: row.try_get("surge_cap")?,
            is_active: row.try_get("is_active")?,
        }))
    }

    async fn count_category_requests(
        &self,
        category_id: Uuid,
        since: DateTime<Utc>,
    ) -> Result<i64, Box<dyn std::error::Error + Send + Sync>> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM service_requests
            WHERE category_id = $1 AND status = 'PENDING' AND created_at >= $2
            "#,
        )
        .bind(category_id)
        .bind(since)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn count_providers_within(
        &self,
        category_id: Uuid,
        location: &GeoPoint,
        radius_km: f64,
    ) -> Result<i64, Box<dyn std::error::Error + Send + Sync>> {
        // Haversine great-circle distance in km against the provider's
        // stored coordinates. Fine at city scale; swap for PostGIS if the
        // provider table ever grows past that.
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM providers
            WHERE category_id = $1
              AND is_available
              AND 6371.0 * 2 * asin(sqrt(
                    pow(sin(radians($2 - lat) / 2), 2)
                    + cos(radians(lat)) * cos(radians($2))
                    * pow(sin(radians($3 - lng) / 2), 2)
                  )) <= $4
            "#,
        )
        .bind(category_id)
        .bind(location.lat)
        .bind(location.lng)
        .bind(radius_km)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}
