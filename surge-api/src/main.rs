use std::net::SocketAddr;
use std::sync::Arc;

use surge_api::{app, AppState};
use surge_core::{EngineConfig, PricingEngine};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "surge_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = surge_store::app_config::Config::load().expect("Failed to load config");
    tracing::info!("Starting Surge API on port {}", config.server.port);

    // Postgres: migrations plus per-deployment pricing-rule overrides
    let db = surge_store::DbClient::new(&config.database.url)
        .await
        .expect("Failed to connect to Postgres");
    db.migrate().await.expect("Failed to run migrations");
    let pricing_rules = match db.fetch_pricing_rules(config.pricing.clone()).await {
        Ok(rules) => rules,
        Err(e) => {
            tracing::warn!("Could not load pricing rules from database, using file defaults: {}", e);
            config.pricing.clone()
        }
    };

    // Redis Connection
    let redis = surge_store::RedisClient::new(&config.redis.url)
        .await
        .expect("Failed to connect to Redis");

    // Kafka Connection
    let kafka = surge_store::EventProducer::new(&config.kafka.brokers)
        .expect("Failed to create Kafka producer");

    let engine_config = EngineConfig {
        default_surge_cap: pricing_rules.default_surge_cap,
        max_surge_cap: pricing_rules.max_surge_cap,
        ..EngineConfig::default()
    };

    let app_state = AppState {
        redis: Arc::new(redis),
        kafka: Arc::new(kafka),
        stats: Arc::new(surge_store::PostgresStatsRepository::new(db.pool.clone())),
        engine: Arc::new(PricingEngine::new(engine_config)),
        pricing_rules,
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .unwrap();
}
