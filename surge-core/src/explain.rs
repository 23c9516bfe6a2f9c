use crate::models::PricingFactors;

/// One row of the explanation table: a predicate over the computed factors
/// and the line shown to the customer when it holds.
struct ExplanationRule {
    applies: fn(&PricingFactors, f64) -> bool,
    message: &'static str,
}

/// Evaluated top to bottom; every matching row is appended, so the output
/// order is fixed. The two demand lines are mutually exclusive by
/// construction, everything else can stack.
static RULES: &[ExplanationRule] = &[
    ExplanationRule {
        applies: |_, surge| surge > 1.3,
        message: "High demand",
    },
    ExplanationRule {
        applies: |_, surge| surge > 1.1 && surge <= 1.3,
        message: "Moderate demand increase",
    },
    ExplanationRule {
        applies: |factors, _| factors.urgency > 1.2,
        message: "Premium for immediate service",
    },
    ExplanationRule {
        applies: |factors, _| factors.time > 1.1,
        message: "Peak time pricing applied",
    },
    ExplanationRule {
        applies: |factors, _| factors.supply > 1.1,
        message: "Limited providers available",
    },
    ExplanationRule {
        applies: |_, surge| surge < 1.0,
        message: "Discounted pricing for flexible timing",
    },
];

/// Human-readable reasons for the quoted multiplier, in table order.
pub fn explain(factors: &PricingFactors, surge_multiplier: f64) -> Vec<String> {
    RULES
        .iter()
        .filter(|rule| (rule.applies)(factors, surge_multiplier))
        .map(|rule| rule.message.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn factors() -> PricingFactors {
        PricingFactors {
            demand: 1.0,
            supply: 1.0,
            time: 1.0,
            urgency: 1.0,
            location: 1.0,
            seasonal: 1.0,
        }
    }

    #[test]
    fn neutral_pricing_needs_no_explanation() {
        assert!(explain(&factors(), 1.0).is_empty());
    }

    #[test]
    fn spike_lists_demand_before_urgency() {
        let f = PricingFactors {
            demand: 2.0,
            supply: 1.5,
            time: 1.2,
            urgency: 1.5,
            ..factors()
        };
        assert_eq!(
            explain(&f, 1.54),
            vec![
                "High demand".to_string(),
                "Premium for immediate service".to_string(),
                "Peak time pricing applied".to_string(),
                "Limited providers available".to_string(),
            ]
        );
    }

    #[test]
    fn moderate_surge_uses_the_softer_demand_line() {
        let lines = explain(&factors(), 1.2);
        assert_eq!(lines, vec!["Moderate demand increase".to_string()]);
    }

    #[test]
    fn the_two_demand_lines_never_appear_together() {
        for surge in [0.8, 1.0, 1.05, 1.15, 1.3, 1.31, 2.0] {
            let lines = explain(&factors(), surge);
            let demand_lines = lines
                .iter()
                .filter(|l| l.contains("demand") || l.contains("Demand"))
                .count();
            assert!(demand_lines <= 1, "surge {surge} produced {lines:?}");
        }
    }

    #[test]
    fn discounts_are_called_out() {
        assert_eq!(
            explain(&factors(), 0.9),
            vec!["Discounted pricing for flexible timing".to_string()]
        );
    }
}
