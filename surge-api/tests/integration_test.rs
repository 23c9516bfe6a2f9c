use chrono::{TimeZone, Utc};
use uuid::Uuid;

use surge_api::quotes::QuoteResponse;
use surge_core::models::{GeoPoint, PricingRequest, ServiceContext, Urgency};
use surge_core::{EngineConfig, PricingEngine};

fn context() -> ServiceContext {
    ServiceContext {
        category_id: Uuid::new_v4(),
        base_price: 120.0,
        surge_cap: 2.0,
        requests_last_24h: 24,
        requests_last_30d: 240,
        providers_nearby: 3,
    }
}

fn request() -> PricingRequest {
    PricingRequest {
        service_id: Uuid::new_v4(),
        location: GeoPoint { lat: 52.52, lng: 13.405 },
        radius_km: 10.0,
        urgency: Urgency::Immediate,
        duration_minutes: Some(120),
        preferred_start: Some(Utc.with_ymd_and_hms(2025, 3, 15, 18, 0, 0).unwrap()),
        quoted_at: Utc.with_ymd_and_hms(2025, 3, 14, 9, 0, 0).unwrap(),
    }
}

#[test]
fn quote_survives_the_cache_round_trip() {
    let engine = PricingEngine::new(EngineConfig::default());
    let now = Utc.with_ymd_and_hms(2025, 3, 14, 9, 0, 0).unwrap();

    let result = engine.compute(&context(), &request());
    let quote = QuoteResponse::from_result(Uuid::new_v4(), result, now, 900);

    // What goes into Redis must come back out unchanged.
    let payload = serde_json::to_string(&quote).unwrap();
    let restored: QuoteResponse = serde_json::from_str(&payload).unwrap();
    assert_eq!(restored, quote);
}

#[test]
fn quote_expiry_follows_the_configured_ttl() {
    let engine = PricingEngine::new(EngineConfig::default());
    let now = Utc.with_ymd_and_hms(2025, 3, 14, 9, 0, 0).unwrap();

    let result = engine.compute(&context(), &request());
    let quote = QuoteResponse::from_result(Uuid::new_v4(), result, now, 900);

    assert_eq!(quote.expires_at, now + chrono::Duration::seconds(900));
    assert!(!quote.is_expired(now));
    assert!(!quote.is_expired(now + chrono::Duration::seconds(900)));
    assert!(quote.is_expired(now + chrono::Duration::seconds(901)));
}

#[test]
fn demand_spike_quote_explains_itself_in_order() {
    let engine = PricingEngine::new(EngineConfig::default());
    let ctx = ServiceContext {
        requests_last_24h: 72, // triple the daily average of 8
        requests_last_30d: 240,
        providers_nearby: 1,
        ..context()
    };

    let result = engine.compute(&ctx, &request());

    let demand_line = result
        .explanation
        .iter()
        .position(|l| l == "High demand" || l == "Moderate demand increase")
        .expect("a demand line must be present for a spike");
    let urgency_line = result
        .explanation
        .iter()
        .position(|l| l == "Premium for immediate service")
        .expect("immediate urgency must be called out");
    assert!(demand_line < urgency_line);
}

#[test]
fn quoted_price_respects_the_provider_cap() {
    let engine = PricingEngine::new(EngineConfig::default());
    let ctx = ServiceContext {
        surge_cap: 1.25,
        requests_last_24h: 100,
        requests_last_30d: 240,
        providers_nearby: 1,
        ..context()
    };

    let result = engine.compute(&ctx, &request());

    assert!(result.surge_multiplier <= 1.25 + 1e-9);
    assert!(result.dynamic_price <= 1.25 * ctx.base_price + 0.005);
}
