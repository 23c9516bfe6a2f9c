use uuid::Uuid;

/// Published whenever a quote leaves the pricing service. Downstream
/// consumers (analytics, provider payouts) key on quote_id.
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct QuoteGeneratedEvent {
    pub quote_id: Uuid,
    pub service_id: Uuid,
    pub category_id: Uuid,
    pub customer_id: Option<String>,
    pub surge_multiplier: f64,
    pub dynamic_price: f64,
    pub confidence: String,
    pub timestamp: i64,
    /// Serialized request summary for downstream analytics.
    pub request_context: serde_json::Value,
}
