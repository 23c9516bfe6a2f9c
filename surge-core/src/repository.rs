use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{GeoPoint, ServiceListing};

/// Data access the pricing service needs from the marketplace store. The
/// engine itself never queries anything; the HTTP layer gathers these
/// aggregates and hands them over as plain numbers.
#[async_trait]
pub trait StatsRepository: Send + Sync {
    async fn get_service(
        &self,
        id: Uuid,
    ) -> Result<Option<ServiceListing>, Box<dyn std::error::Error + Send + Sync>>;

    /// Pending requests in a category created at or after `since`.
    async fn count_category_requests(
        &self,
        category_id: Uuid,
        since: DateTime<Utc>,
    ) -> Result<i64, Box<dyn std::error::Error + Send + Sync>>;

    /// Available providers for a category within `radius_km` of `location`.
    async fn count_providers_within(
        &self,
        category_id: Uuid,
        location: &GeoPoint,
        radius_km: f64,
    ) -> Result<i64, Box<dyn std::error::Error + Send + Sync>>;
}
