use chrono::{Datelike, Timelike};

use crate::factors::{is_weekend, EVENING_PEAK_HOURS};
use crate::models::{PricingRequest, Urgency};

/// Cheaper-timing advisories derived from the same request the factors saw.
/// Purely informational; nothing tracks whether the customer takes the hint.
/// At most two suggestions are emitted.
pub fn suggest_alternatives(request: &PricingRequest) -> Vec<String> {
    let mut suggestions = Vec::new();

    if request.urgency == Urgency::Immediate {
        suggestions
            .push("Booking later today instead of right now usually lowers the rate".to_string());
    }

    if let Some(start) = request.preferred_start {
        if EVENING_PEAK_HOURS.contains(&start.hour()) {
            suggestions.push("Morning slots are typically cheaper than the evening peak".to_string());
        }
        if is_weekend(start.weekday()) {
            suggestions.push("Weekday appointments often price below weekend ones".to_string());
        }
    }

    suggestions.truncate(2);
    suggestions
}
