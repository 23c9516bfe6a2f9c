use serde::{Deserialize, Serialize};

use crate::location::{FlatLocationModel, LocationModel};
use crate::models::{Confidence, DynamicPriceResult, PricingRequest, ServiceContext};
use crate::{advisor, explain};

/// Relative weight of each factor in the combined multiplier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactorWeights {
    pub demand: f64,
    pub supply: f64,
    pub time: f64,
    pub urgency: f64,
    pub location: f64,
    pub seasonal: f64,
}

impl Default for FactorWeights {
    fn default() -> Self {
        Self {
            demand: 0.30,
            supply: 0.20,
            time: 0.20,
            urgency: 0.20,
            location: 0.10,
            seasonal: 0.10,
        }
    }
}

/// All tunable knobs in one place so deployments can override them and
/// tests can pin them. No inline literals in the combiner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub weights: FactorWeights,

    /// Hard lower bound on the surge multiplier, independent of any cap.
    pub surge_floor: f64,

    /// Cap applied when the service context carries none of its own.
    pub default_surge_cap: f64,

    /// Ceiling on provider-configured caps.
    pub max_surge_cap: f64,

    /// Damping applied to the raw demand ratio before clamping.
    pub demand_damping: f64,
    pub demand_min: f64,
    pub demand_max: f64,

    /// Per-provider reduction in the supply factor.
    pub supply_slope: f64,
    pub supply_min: f64,
    pub supply_max: f64,

    pub location_min: f64,
    pub location_max: f64,

    /// Factor variance below this is a high-confidence estimate.
    pub high_variance_cutoff: f64,
    /// Below this, medium. Anything above is low.
    pub medium_variance_cutoff: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            weights: FactorWeights::default(),
            surge_floor: 0.8,
            default_surge_cap: 2.0,
            max_surge_cap: 3.0,
            demand_damping: 0.5,
            demand_min: 0.5,
            demand_max: 2.0,
            supply_slope: 0.1,
            supply_min: 0.8,
            supply_max: 1.5,
            location_min: 0.5,
            location_max: 2.0,
            high_variance_cutoff: 0.5,
            medium_variance_cutoff: 1.0,
        }
    }
}

/// The dynamic pricing engine. Stateless and pure: identical inputs yield
/// identical results, so callers may share one instance across requests
/// without coordination.
pub struct PricingEngine {
    config: EngineConfig,
    location_model: Box<dyn LocationModel>,
}

impl PricingEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            location_model: Box::new(FlatLocationModel),
        }
    }

    /// Swap in a data-driven location model once one exists.
    pub fn with_location_model(mut self, model: Box<dyn LocationModel>) -> Self {
        self.location_model = model;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Compute the quoted price for one request. Total over all well-typed
    /// inputs: extreme numbers clamp, missing history floors, nothing errors.
    pub fn compute(&self, context: &ServiceContext, request: &PricingRequest) -> DynamicPriceResult {
        let factors = self.calculate_factors(context, request);

        let w = &self.config.weights;
        let raw = 1.0
            + w.demand * (factors.demand - 1.0)
            + w.supply * (factors.supply - 1.0)
            + w.time * (factors.time - 1.0)
            + w.urgency * (factors.urgency - 1.0)
            + w.location * (factors.location - 1.0)
            + w.seasonal * (factors.seasonal - 1.0);

        let cap = self.effective_cap(context);
        let surge_multiplier = raw.clamp(self.config.surge_floor, cap);

        let dynamic_price = round_currency(context.base_price * surge_multiplier);
        let confidence = self.confidence_for(factors.variance());

        DynamicPriceResult {
            base_price: context.base_price,
            dynamic_price,
            surge_multiplier,
            factors,
            confidence,
            explanation: explain::explain(&factors, surge_multiplier),
            suggestions: advisor::suggest_alternatives(request),
        }
    }

    /// The cap actually applied: provider cap when set, bounded so it can
    /// never undercut the floor or exceed the platform ceiling.
    fn effective_cap(&self, context: &ServiceContext) -> f64 {
        let cap = if context.surge_cap > 0.0 {
            context.surge_cap
        } else {
            self.config.default_surge_cap
        };
        cap.clamp(self.config.surge_floor, self.config.max_surge_cap)
    }

    fn confidence_for(&self, variance: f64) -> Confidence {
        if variance < self.config.high_variance_cutoff {
            Confidence::High
        } else if variance < self.config.medium_variance_cutoff {
            Confidence::Medium
        } else {
            Confidence::Low
        }
    }

    pub(crate) fn location_model(&self) -> &dyn LocationModel {
        self.location_model.as_ref()
    }
}

/// Standard currency rounding, half-up to two decimals.
fn round_currency(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
