use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use surge_core::models::{
    Confidence, DynamicPriceResult, GeoPoint, PricingFactors, PricingRequest, ServiceContext,
    Urgency,
};
use surge_shared::models::QuoteGeneratedEvent;
use surge_shared::pii::Masked;

use crate::error::AppError;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    pub service_id: Uuid,
    pub customer_id: Option<Masked<String>>,
    pub location: GeoPoint,
    pub radius_km: f64,
    #[serde(default)]
    pub urgency: Urgency,
    pub duration_minutes: Option<i32>,
    pub preferred_start: Option<DateTime<Utc>>,
}

#[derive(Debug, thiserror::Error)]
pub enum QuoteError {
    #[error("Invalid quote request: {0}")]
    InvalidRequest(String),

    #[error("Service not found: {0}")]
    ServiceNotFound(Uuid),

    #[error("Service is not accepting bookings: {0}")]
    ServiceInactive(Uuid),
}

impl QuoteRequest {
    /// Shape validation. The engine assumes already-validated inputs, so
    /// everything malformed stops here with a 400.
    pub fn validate(&self) -> Result<(), QuoteError> {
        if !self.location.lat.is_finite() || self.location.lat.abs() > 90.0 {
            return Err(QuoteError::InvalidRequest(format!(
                "latitude out of range: {}",
                self.location.lat
            )));
        }
        if !self.location.lng.is_finite() || self.location.lng.abs() > 180.0 {
            return Err(QuoteError::InvalidRequest(format!(
                "longitude out of range: {}",
                self.location.lng
            )));
        }
        if !self.radius_km.is_finite() || self.radius_km <= 0.0 || self.radius_km > 100.0 {
            return Err(QuoteError::InvalidRequest(format!(
                "search radius must be within (0, 100] km, got {}",
                self.radius_km
            )));
        }
        if let Some(minutes) = self.duration_minutes {
            if minutes <= 0 {
                return Err(QuoteError::InvalidRequest(format!(
                    "duration must be positive, got {} minutes",
                    minutes
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteResponse {
    pub id: Uuid,
    pub service_id: Uuid,
    pub base_price: f64,
    pub dynamic_price: f64,
    pub surge_multiplier: f64,
    pub factors: PricingFactors,
    pub confidence: Confidence,
    pub explanation: Vec<String>,
    pub suggestions: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl QuoteResponse {
    pub fn from_result(
        service_id: Uuid,
        result: DynamicPriceResult,
        created_at: DateTime<Utc>,
        ttl_seconds: u64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            service_id,
            base_price: result.base_price,
            dynamic_price: result.dynamic_price,
            surge_multiplier: result.surge_multiplier,
            factors: result.factors,
            confidence: result.confidence,
            explanation: result.explanation,
            suggestions: result.suggestions,
            created_at,
            expires_at: created_at + Duration::seconds(ttl_seconds as i64),
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

fn quote_error(err: QuoteError) -> AppError {
    match err {
        QuoteError::InvalidRequest(msg) => AppError::Validation(msg),
        QuoteError::ServiceNotFound(id) => AppError::NotFound(format!("service {} not found", id)),
        QuoteError::ServiceInactive(id) => {
            AppError::Gone(format!("service {} is not accepting bookings", id))
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/quotes", post(create_quote))
        .route("/v1/quotes/{id}", get(get_quote))
}

/// POST /v1/quotes
/// Price a single service request and cache the quote for its validity
/// window.
pub async fn create_quote(
    State(state): State<AppState>,
    Json(req): Json<QuoteRequest>,
) -> Result<Json<QuoteResponse>, AppError> {
    req.validate().map_err(quote_error)?;

    // 1. Resolve the listing
    let service = state
        .stats
        .get_service(req.service_id)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .ok_or_else(|| quote_error(QuoteError::ServiceNotFound(req.service_id)))?;

    if !service.is_active {
        return Err(quote_error(QuoteError::ServiceInactive(service.id)));
    }

    // 2. Gather the aggregates the engine consumes
    let now = Utc::now();
    let requests_last_24h = state
        .stats
        .count_category_requests(service.category_id, now - Duration::hours(24))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;
    let requests_last_30d = state
        .stats
        .count_category_requests(service.category_id, now - Duration::days(30))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;
    let providers_nearby = state
        .stats
        .count_providers_within(service.category_id, &req.location, req.radius_km)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let context = ServiceContext {
        category_id: service.category_id,
        base_price: service.base_price,
        surge_cap: service.surge_cap,
        requests_last_24h,
        requests_last_30d,
        providers_nearby,
    };

    let request = PricingRequest {
        service_id: req.service_id,
        location: req.location,
        radius_km: req.radius_km,
        urgency: req.urgency,
        duration_minutes: req.duration_minutes,
        preferred_start: req.preferred_start,
        quoted_at: now,
    };

    // 3. Price it
    let result = state.engine.compute(&context, &request);

    tracing::info!(
        "Quoted service {} for {:?}: x{:.3} ({})",
        service.id,
        req.customer_id,
        result.surge_multiplier,
        result.confidence.as_str()
    );

    // 4. Cache the quote for its validity window
    let ttl = state.pricing_rules.quote_ttl_seconds;
    let quote = QuoteResponse::from_result(service.id, result, now, ttl);
    let payload = serde_json::to_string(&quote)?;
    state
        .redis
        .cache_quote(&quote.id.to_string(), &payload, ttl)
        .await?;

    // 5. Telemetry, fire and forget
    let event = QuoteGeneratedEvent {
        quote_id: quote.id,
        service_id: service.id,
        category_id: service.category_id,
        customer_id: req.customer_id.map(Masked::into_inner),
        surge_multiplier: quote.surge_multiplier,
        dynamic_price: quote.dynamic_price,
        confidence: quote.confidence.as_str().to_string(),
        timestamp: now.timestamp(),
        request_context: serde_json::json!({
            "urgency": request.urgency,
            "radius_km": request.radius_km,
            "preferred_start": request.preferred_start,
        }),
    };
    let _ = state
        .kafka
        .publish_quote_generated(&state.pricing_rules.quote_topic, &event)
        .await;

    Ok(Json(quote))
}

/// GET /v1/quotes/{id}
/// Retrieve a previously issued quote. Expired quotes are gone, not stale.
pub async fn get_quote(
    State(state): State<AppState>,
    Path(quote_id): Path<Uuid>,
) -> Result<Json<QuoteResponse>, AppError> {
    let payload = state
        .redis
        .get_quote(&quote_id.to_string())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("quote {} not found", quote_id)))?;

    let quote: QuoteResponse = serde_json::from_str(&payload)?;

    // The cache TTL normally handles expiry; the timestamp check covers
    // clock skew between this process and Redis.
    if quote.is_expired(Utc::now()) {
        let _ = state.redis.delete_quote(&quote_id.to_string()).await;
        return Err(AppError::Gone(format!("quote {} has expired", quote_id)));
    }

    Ok(Json(quote))
}
