pub mod advisor;
pub mod engine;
pub mod explain;
pub mod factors;
pub mod location;
pub mod models;
pub mod repository;

pub use engine::{EngineConfig, FactorWeights, PricingEngine};
pub use location::{FlatLocationModel, LocationModel};
pub use models::{
    Confidence, DynamicPriceResult, GeoPoint, PricingFactors, PricingRequest, ServiceContext,
    ServiceListing, Urgency,
};
pub use repository::StatsRepository;
