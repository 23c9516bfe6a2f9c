use chrono::{Datelike, Timelike, Weekday};
use std::ops::RangeInclusive;

use crate::engine::PricingEngine;
use crate::models::{PricingFactors, PricingRequest, ServiceContext};

/// Peak windows shared by the time factor and the alternative-time advisor.
pub const EVENING_PEAK_HOURS: RangeInclusive<u32> = 17..=20;
pub const MORNING_PEAK_HOURS: RangeInclusive<u32> = 8..=10;

pub(crate) fn is_weekend(day: Weekday) -> bool {
    matches!(day, Weekday::Sat | Weekday::Sun)
}

impl PricingEngine {
    pub(crate) fn calculate_factors(
        &self,
        context: &ServiceContext,
        request: &PricingRequest,
    ) -> PricingFactors {
        PricingFactors {
            demand: self.demand_factor(context),
            supply: self.supply_factor(context),
            time: time_factor(request),
            urgency: request.urgency.multiplier(),
            location: self.location_factor(request),
            seasonal: seasonal_factor(request),
        }
    }

    /// Ratio of yesterday's pending requests to the 30-day daily average,
    /// damped and clamped. The average is floored at 1 so a category with no
    /// history divides cleanly instead of blowing up.
    fn demand_factor(&self, context: &ServiceContext) -> f64 {
        let cfg = self.config();
        let daily_average = (context.requests_last_30d.max(0) as f64 / 30.0).max(1.0);
        let ratio = context.requests_last_24h.max(0) as f64 / daily_average;
        let damped = 1.0 + (ratio - 1.0) * cfg.demand_damping;
        damped.clamp(cfg.demand_min, cfg.demand_max)
    }

    /// Fewer available providers nearby means a higher multiplier. Count is
    /// floored at 1 so an empty radius maxes out rather than diverging.
    fn supply_factor(&self, context: &ServiceContext) -> f64 {
        let cfg = self.config();
        let count = context.providers_nearby.max(1) as f64;
        (2.0 - count * cfg.supply_slope).clamp(cfg.supply_min, cfg.supply_max)
    }

    fn location_factor(&self, request: &PricingRequest) -> f64 {
        let cfg = self.config();
        self.location_model()
            .multiplier(&request.location, request.radius_km)
            .clamp(cfg.location_min, cfg.location_max)
    }
}

/// Time-of-day and day-of-week premium for the preferred slot. No preferred
/// time, no adjustment.
///
/// The rules are evaluated in this exact order, first match wins. In
/// particular a weekend evening takes the evening value because evening is
/// checked first.
fn time_factor(request: &PricingRequest) -> f64 {
    let Some(start) = request.preferred_start else {
        return 1.0;
    };
    let hour = start.hour();

    if EVENING_PEAK_HOURS.contains(&hour) {
        1.2
    } else if MORNING_PEAK_HOURS.contains(&hour) {
        1.1
    } else if is_weekend(start.weekday()) {
        1.15
    } else if hour < 8 || hour > 20 {
        1.3
    } else {
        1.0
    }
}

/// Calendar-month premium: holiday season and the summer trades peak.
/// Keyed off the preferred slot when given, otherwise the quote time.
fn seasonal_factor(request: &PricingRequest) -> f64 {
    let month = request.preferred_start.unwrap_or(request.quoted_at).month();
    match month {
        12 | 1 => 1.1,
        6..=8 => 1.05,
        _ => 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{EngineConfig, PricingEngine};
    use crate::models::{GeoPoint, ServiceContext, Urgency};
    use chrono::{DateTime, TimeZone, Utc};
    use uuid::Uuid;

    fn engine() -> PricingEngine {
        PricingEngine::new(EngineConfig::default())
    }

    fn context(recent: i64, monthly: i64, providers: i64) -> ServiceContext {
        ServiceContext {
            category_id: Uuid::new_v4(),
            base_price: 80.0,
            surge_cap: 2.0,
            requests_last_24h: recent,
            requests_last_30d: monthly,
            providers_nearby: providers,
        }
    }

    fn request_at(preferred: Option<DateTime<Utc>>) -> PricingRequest {
        PricingRequest {
            service_id: Uuid::new_v4(),
            location: GeoPoint { lat: 48.2, lng: 16.37 },
            radius_km: 5.0,
            urgency: Urgency::Flexible,
            duration_minutes: None,
            preferred_start: preferred,
            quoted_at: Utc.with_ymd_and_hms(2025, 3, 11, 9, 30, 0).unwrap(),
        }
    }

    #[test]
    fn demand_survives_an_empty_history() {
        let engine = engine();
        let factors = engine.calculate_factors(&context(5, 0, 10), &request_at(None));

        // Average floors at 1, ratio 5, damped 3.0, clamped to the max.
        assert!((factors.demand - 2.0).abs() < 1e-9);
    }

    #[test]
    fn demand_is_neutral_when_today_matches_the_average() {
        let engine = engine();
        let factors = engine.calculate_factors(&context(10, 300, 10), &request_at(None));
        assert!((factors.demand - 1.0).abs() < 1e-9);
    }

    #[test]
    fn quiet_day_discounts_demand_down_to_the_clamp() {
        let engine = engine();
        let factors = engine.calculate_factors(&context(0, 300, 10), &request_at(None));
        assert!((factors.demand - 0.5).abs() < 1e-9);
    }

    #[test]
    fn supply_tightens_as_providers_disappear() {
        let engine = engine();
        let scarce = engine.calculate_factors(&context(10, 300, 1), &request_at(None));
        let plenty = engine.calculate_factors(&context(10, 300, 12), &request_at(None));

        assert!((scarce.supply - 1.5).abs() < 1e-9); // 1.9 clamps to 1.5
        assert!((plenty.supply - 0.8).abs() < 1e-9);
    }

    #[test]
    fn zero_providers_counts_as_one() {
        let engine = engine();
        let factors = engine.calculate_factors(&context(10, 300, 0), &request_at(None));
        assert!((factors.supply - 1.5).abs() < 1e-9);
    }

    #[test]
    fn time_factor_is_neutral_without_a_preferred_slot() {
        let engine = engine();
        let factors = engine.calculate_factors(&context(10, 300, 10), &request_at(None));
        assert!((factors.time - 1.0).abs() < 1e-9);
    }

    #[test]
    fn evening_wins_over_weekend_on_a_saturday_night() {
        // 2025-03-15 is a Saturday; 18:00 falls in the evening window.
        let preferred = Utc.with_ymd_and_hms(2025, 3, 15, 18, 0, 0).unwrap();
        let engine = engine();
        let factors = engine.calculate_factors(&context(10, 300, 10), &request_at(Some(preferred)));
        assert!((factors.time - 1.2).abs() < 1e-9);
    }

    #[test]
    fn time_windows_map_to_their_tiers() {
        let engine = engine();
        let cases = [
            (Utc.with_ymd_and_hms(2025, 3, 12, 9, 0, 0).unwrap(), 1.1),  // weekday morning
            (Utc.with_ymd_and_hms(2025, 3, 12, 19, 0, 0).unwrap(), 1.2), // weekday evening
            (Utc.with_ymd_and_hms(2025, 3, 16, 13, 0, 0).unwrap(), 1.15), // Sunday afternoon
            (Utc.with_ymd_and_hms(2025, 3, 12, 6, 0, 0).unwrap(), 1.3),  // before hours
            (Utc.with_ymd_and_hms(2025, 3, 12, 22, 0, 0).unwrap(), 1.3), // after hours
            (Utc.with_ymd_and_hms(2025, 3, 12, 14, 0, 0).unwrap(), 1.0), // plain afternoon
        ];
        for (preferred, expected) in cases {
            let factors =
                engine.calculate_factors(&context(10, 300, 10), &request_at(Some(preferred)));
            assert!(
                (factors.time - expected).abs() < 1e-9,
                "{preferred}: expected {expected}, got {}",
                factors.time
            );
        }
    }

    #[test]
    fn urgency_tiers_match_the_lookup() {
        assert!((Urgency::Immediate.multiplier() - 1.5).abs() < 1e-9);
        assert!((Urgency::Today.multiplier() - 1.2).abs() < 1e-9);
        assert!((Urgency::ThisWeek.multiplier() - 1.05).abs() < 1e-9);
        assert!((Urgency::Flexible.multiplier() - 0.95).abs() < 1e-9);
        assert!((Urgency::Unspecified.multiplier() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn seasonal_peaks_in_winter_and_summer() {
        let engine = engine();
        let cases = [
            (Utc.with_ymd_and_hms(2025, 12, 20, 12, 0, 0).unwrap(), 1.1),
            (Utc.with_ymd_and_hms(2026, 1, 5, 12, 0, 0).unwrap(), 1.1),
            (Utc.with_ymd_and_hms(2025, 7, 14, 12, 0, 0).unwrap(), 1.05),
            (Utc.with_ymd_and_hms(2025, 10, 2, 12, 0, 0).unwrap(), 1.0),
        ];
        for (preferred, expected) in cases {
            let factors =
                engine.calculate_factors(&context(10, 300, 10), &request_at(Some(preferred)));
            assert!((factors.seasonal - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn seasonal_falls_back_to_the_quote_time() {
        let engine = engine();
        let mut request = request_at(None);
        request.quoted_at = Utc.with_ymd_and_hms(2025, 12, 24, 8, 0, 0).unwrap();
        let factors = engine.calculate_factors(&context(10, 300, 10), &request);
        assert!((factors.seasonal - 1.1).abs() < 1e-9);
    }
}
