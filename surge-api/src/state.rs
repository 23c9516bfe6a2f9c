use std::sync::Arc;

use surge_core::{PricingEngine, StatsRepository};
use surge_store::app_config::PricingRules;
use surge_store::{EventProducer, RedisClient};

#[derive(Clone)]
pub struct AppState {
    pub redis: Arc<RedisClient>,
    pub kafka: Arc<EventProducer>,
    pub stats: Arc<dyn StatsRepository>,
    pub engine: Arc<PricingEngine>,
    pub pricing_rules: PricingRules,
}
