pub mod app_config;
pub mod database;
pub mod events;
pub mod redis_repo;
pub mod stats_repo;

pub use database::DbClient;
pub use events::EventProducer;
pub use redis_repo::RedisClient;
pub use stats_repo::PostgresStatsRepository;
