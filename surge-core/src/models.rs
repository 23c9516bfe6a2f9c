use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A point on the map, WGS84 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// How soon the customer needs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Immediate,
    Today,
    ThisWeek,
    Flexible,
    /// Anything we don't recognize on the wire lands here and prices neutral.
    #[serde(other)]
    Unspecified,
}

impl Urgency {
    pub fn multiplier(&self) -> f64 {
        match self {
            Urgency::Immediate => 1.5,
            Urgency::Today => 1.2,
            Urgency::ThisWeek => 1.05,
            Urgency::Flexible => 0.95,
            Urgency::Unspecified => 1.0,
        }
    }
}

impl Default for Urgency {
    fn default() -> Self {
        Urgency::Unspecified
    }
}

/// A single pricing request. Built once by the caller, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingRequest {
    pub service_id: Uuid,
    pub location: GeoPoint,
    pub radius_km: f64,
    pub urgency: Urgency,
    pub duration_minutes: Option<i32>,
    /// When the customer wants the job done. None means "whenever".
    pub preferred_start: Option<DateTime<Utc>>,
    /// Caller-supplied clock. The engine never reads the wall clock itself,
    /// so identical requests always price identically.
    pub quoted_at: DateTime<Utc>,
}

/// Supporting data the caller fetches before invoking the engine.
/// Read-only numeric aggregates; the engine does no I/O of its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceContext {
    pub category_id: Uuid,
    pub base_price: f64,
    /// Provider-configured surge ceiling. Non-positive values fall back to
    /// the engine default.
    pub surge_cap: f64,
    /// Pending requests in this category over the last 24 hours.
    pub requests_last_24h: i64,
    /// Requests in this category over the last 30 days.
    pub requests_last_30d: i64,
    /// Available providers within the requested radius.
    pub providers_nearby: i64,
}

/// A service listing as the marketplace stores it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceListing {
    pub id: Uuid,
    pub category_id: Uuid,
    pub name: String,
    pub base_price: f64,
    pub surge_cap: f64,
    pub is_active: bool,
}

/// The six contextual multipliers, 1.0 = neutral. Each is already clamped
/// to its sane range by the time it lands here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingFactors {
    pub demand: f64,
    pub supply: f64,
    pub time: f64,
    pub urgency: f64,
    pub location: f64,
    pub seasonal: f64,
}

impl PricingFactors {
    /// Aggregate deviation from neutral across all six factors.
    /// Large spread means the estimate is less reliable.
    pub fn variance(&self) -> f64 {
        [
            self.demand,
            self.supply,
            self.time,
            self.urgency,
            self.location,
            self.seasonal,
        ]
        .iter()
        .map(|f| (f - 1.0).abs())
        .sum()
    }
}

/// Coarse reliability indicator derived from factor variance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
        }
    }
}

/// Everything the engine produces for one request. Fresh per call; the
/// engine keeps no state between invocations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DynamicPriceResult {
    pub base_price: f64,
    /// Rounded to currency precision, half-up.
    pub dynamic_price: f64,
    /// Bounded to [surge floor, effective cap].
    pub surge_multiplier: f64,
    pub factors: PricingFactors,
    pub confidence: Confidence,
    /// Human-readable reasons, in a fixed order.
    pub explanation: Vec<String>,
    /// Cheaper-timing advisories, at most two.
    pub suggestions: Vec<String>,
}
